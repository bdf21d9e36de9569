//! Compare two boards up to symmetry

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    cli::output::{print_indented, print_kv, print_section},
    tictactoe::{Board, matching_transform},
};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First board, e.g. "X.. / .O. / ..."
    pub first: String,

    /// Second board
    pub second: String,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let a = Board::from_string(&args.first)
        .with_context(|| format!("parsing board '{}'", args.first))?;
    let b = Board::from_string(&args.second)
        .with_context(|| format!("parsing board '{}'", args.second))?;

    print_section("Board Comparison");
    println!("First:");
    print_indented(&a.to_string());
    println!("Second:");
    print_indented(&b.to_string());
    println!();

    print_kv("Identical", if a == b { "yes" } else { "no" });
    match matching_transform(&a, &b) {
        Some(t) => {
            print_kv("Equivalent", "yes");
            print_kv("Transform", &t.to_string());
        }
        None => print_kv("Equivalent", "no"),
    }
    Ok(())
}
