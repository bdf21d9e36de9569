//! Subcommands of the symtree binary

pub mod compare;
pub mod expand;
pub mod export;
pub mod symmetry;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::config::ExpandConfig;
use crate::tictactoe::Traversal;

/// Expansion flags shared by `expand`, `validate` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExpansionArgs {
    /// Traversal order
    #[arg(long, value_enum)]
    pub order: Option<Traversal>,

    /// Leave nodes with this many marks unexpanded
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// TOML file with expansion settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide progress spinners
    #[arg(long, short)]
    pub quiet: bool,
}

impl ExpansionArgs {
    /// Resolve the effective expansion settings from the optional config file
    /// and the command-line overrides.
    pub fn resolve(&self) -> Result<ExpandConfig> {
        let base = match &self.config {
            Some(path) => ExpandConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ExpandConfig::default(),
        };
        Ok(base.with_overrides(self.order, self.max_depth, self.quiet)?)
    }
}
