//! Tree validation
//!
//! Expands the tree and audits every node: move counts, win flags, terminal
//! markers, parent links, and sibling dedup soundness and completeness.

use anyhow::{Result, bail};
use clap::Args;

use super::ExpansionArgs;
use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section},
    tictactoe::GameTree,
};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub expansion: ExpansionArgs,

    /// Print every violation instead of the first ten
    #[arg(long)]
    pub all: bool,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = args.expansion.resolve()?;

    let spinner = create_spinner("Expanding game tree...", config.progress)?;
    let mut tree = GameTree::new();
    tree.expand(config.order, config.max_depth);
    spinner.set_message("Auditing nodes...");
    let report = tree.audit();
    spinner.finish_and_clear();

    print_section("Tree Validation");
    print_kv("Nodes checked", &format_number(report.nodes_checked));
    print_kv("Violations", &format_number(report.violations.len()));

    if report.is_clean() {
        println!("\n✓ All invariants hold");
        return Ok(());
    }

    let shown = if args.all { report.violations.len() } else { 10 };
    for violation in report.violations.iter().take(shown) {
        println!("  ✗ {violation}");
    }
    bail!("{} invariant violations found", report.violations.len())
}
