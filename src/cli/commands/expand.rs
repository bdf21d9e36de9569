//! Expand command - build the symmetry-reduced tree and report its shape

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::ExpansionArgs;
use crate::{
    cli::output::{create_spinner, format_number, print_kv, print_section, print_subsection},
    tictactoe::{ExpansionStats, GameTree},
};

#[derive(Args, Debug)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub expansion: ExpansionArgs,
}

pub fn execute(args: ExpandArgs) -> Result<()> {
    let config = args.expansion.resolve()?;
    debug!(?config, "resolved expansion config");

    let spinner = create_spinner("Expanding game tree...", config.progress)?;
    let mut tree = GameTree::new();
    let stats = tree.expand(config.order, config.max_depth);
    spinner.finish_and_clear();

    print_section("Game Tree Statistics");
    print_kv("Order", &config.order.to_string());
    print_kv(
        "Depth limit",
        &config
            .max_depth
            .map_or_else(|| "none".to_string(), |d| d.to_string()),
    );
    print_report(&stats);
    Ok(())
}

/// Print per-depth and outcome counts.
pub fn print_report(stats: &ExpansionStats) {
    print_kv("Total states", &format_number(stats.total_nodes()));
    print_kv("Expanded", &format_number(stats.expanded));
    print_kv("Unexpanded", &format_number(stats.unexpanded));

    print_subsection("States by depth");
    for (depth, &count) in stats.nodes_per_depth.iter().enumerate() {
        if count > 0 {
            println!("  Depth {depth}: {} states", format_number(count));
        }
    }

    print_subsection("Terminal states");
    print_kv("X wins", &format_number(stats.x_wins));
    print_kv("O wins", &format_number(stats.o_wins));
    print_kv("Draws", &format_number(stats.draws));
}
