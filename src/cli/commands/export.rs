//! Export command - write every node of the tree to CSV or JSON

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use super::ExpansionArgs;
use crate::{
    cli::output::{create_spinner, format_number},
    tictactoe::GameTree,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination file
    #[arg(long, short)]
    pub output: PathBuf,

    /// File format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    #[command(flatten)]
    pub expansion: ExpansionArgs,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let config = args.expansion.resolve()?;

    let spinner = create_spinner("Expanding game tree...", config.progress)?;
    let mut tree = GameTree::new();
    tree.expand(config.order, config.max_depth);
    spinner.set_message("Writing nodes...");

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    match args.format {
        ExportFormat::Csv => write_csv(&tree, &mut writer)?,
        ExportFormat::Json => write_json(&tree, &mut writer)?,
    }
    writer.flush()?;
    spinner.finish_and_clear();

    info!(path = %args.output.display(), nodes = tree.len(), "tree exported");
    println!(
        "Exported {} states to: {}",
        format_number(tree.len()),
        args.output.display()
    );
    Ok(())
}

/// Write one CSV row per node.
///
/// `children` is empty for nodes that were never expanded.
pub fn write_csv<W: Write>(tree: &GameTree, writer: &mut W) -> Result<(), crate::Error> {
    writeln!(writer, "id,parent,depth,board,has_winner,children")?;
    for record in tree.records() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            record.id,
            record.parent.map(|p| p.to_string()).unwrap_or_default(),
            record.depth,
            record.board,
            record.has_winner,
            record.children.map(|c| c.to_string()).unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Write all nodes as a pretty-printed JSON array.
pub fn write_json<W: Write>(tree: &GameTree, writer: &mut W) -> Result<(), crate::Error> {
    serde_json::to_writer_pretty(writer, &tree.records())?;
    Ok(())
}
