//! symtree CLI - explore the symmetry-reduced Tic-Tac-Toe game tree
//!
//! This CLI provides a unified interface for:
//! - Expanding the tree and reporting states per depth
//! - Inspecting the symmetries of a single board
//! - Comparing two boards up to symmetry
//! - Auditing tree invariants
//! - Exporting the tree for further analysis

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "symtree")]
#[command(version, about = "Symmetry-reduced Tic-Tac-Toe game tree explorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the game tree and report its shape
    Expand(symtree::cli::commands::expand::ExpandArgs),

    /// Analyze the symmetries of a board
    Symmetry(symtree::cli::commands::symmetry::SymmetryArgs),

    /// Check whether two boards are equivalent under symmetry
    Compare(symtree::cli::commands::compare::CompareArgs),

    /// Expand the tree and audit every invariant
    Validate(symtree::cli::commands::validate::ValidateArgs),

    /// Write the tree to CSV or JSON
    Export(symtree::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Expand(args) => symtree::cli::commands::expand::execute(args),
        Commands::Symmetry(args) => symtree::cli::commands::symmetry::execute(args),
        Commands::Compare(args) => symtree::cli::commands::compare::execute(args),
        Commands::Validate(args) => symtree::cli::commands::validate::execute(args),
        Commands::Export(args) => symtree::cli::commands::export::execute(args),
    }
}
