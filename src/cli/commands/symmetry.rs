//! Symmetry analysis
//!
//! Shows a board's canonical form, its stabilizer subgroup and, on request,
//! all eight images under the D4 group.

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    cli::output::{print_indented, print_kv, print_section, print_subsection},
    tictactoe::{Board, D4Transform, State},
};

#[derive(Args, Debug)]
pub struct SymmetryArgs {
    /// Board to analyze, e.g. "X.O/.X./..." (defaults to the empty board)
    #[arg(long)]
    pub state: Option<String>,

    /// Print all 8 transformed boards
    #[arg(long)]
    pub visualize: bool,
}

pub fn execute(args: SymmetryArgs) -> Result<()> {
    let board = match &args.state {
        Some(s) => Board::from_string(s).with_context(|| format!("parsing board '{s}'"))?,
        None => Board::new(),
    };
    let state = State::from_board(board)?;

    print_section("Symmetry Analysis");
    println!("{board}");
    print_kv("Marks", &state.move_count().to_string());
    print_kv("To move", &state.to_move().to_string());
    print_kv(
        "Terminal",
        &match (state.is_terminal(), state.winner()) {
            (true, Some(winner)) => format!("yes, {winner} wins"),
            (true, None) => "yes, draw".to_string(),
            (false, _) => "no".to_string(),
        },
    );

    let canonical = board.canonical();
    print_subsection("Canonical form");
    println!("{canonical}");
    if canonical == board {
        println!("\n✓ This board is already in canonical form");
    } else {
        println!("\n→ Board reduces to canonical form via symmetry");
    }

    let stabilizer = board.stabilizer();
    print_subsection("Stabilizer");
    print_kv("|Stab|", &stabilizer.len().to_string());
    print_kv("Orbit size", &(8 / stabilizer.len()).to_string());
    for t in &stabilizer {
        println!("  - {t}");
    }

    if args.visualize {
        print_subsection("All D4 images");
        for (i, t) in D4Transform::ALL.into_iter().enumerate() {
            let image = board.transform(t);
            let marker = if image == canonical { " (canonical)" } else { "" };
            println!("{}. {t}{marker}", i + 1);
            print_indented(&image.to_string());
        }
    } else {
        println!("\nTip: Use --visualize to see all 8 D4 symmetry transformations");
    }

    Ok(())
}
