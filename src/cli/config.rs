//! Shared configuration types for CLI commands

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::tictactoe::Traversal;

/// Tree expansion settings, loadable from a TOML file.
///
/// ```toml
/// order = "dfs"
/// max_depth = 6
/// progress = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpandConfig {
    /// Order in which nodes are expanded
    pub order: Traversal,

    /// Leave nodes at this move count unexpanded
    pub max_depth: Option<usize>,

    /// Whether to show progress spinners
    pub progress: bool,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            order: Traversal::BreadthFirst,
            max_depth: None,
            progress: true,
        }
    }
}

impl ExpandConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, crate::Error> {
        let config: ExpandConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let text = fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read config file {}", path.display()),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Command-line flags win over file values.
    pub fn with_overrides(
        mut self,
        order: Option<Traversal>,
        max_depth: Option<usize>,
        quiet: bool,
    ) -> Result<Self, crate::Error> {
        if let Some(order) = order {
            self.order = order;
        }
        if max_depth.is_some() {
            self.max_depth = max_depth;
        }
        if quiet {
            self.progress = false;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), crate::Error> {
        match self.max_depth {
            Some(depth) if depth > 9 => Err(crate::Error::InvalidConfiguration {
                message: format!("max_depth {depth} exceeds the 9 cells of the board"),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExpandConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExpandConfig::default());
    }

    #[test]
    fn test_parse_aliases() {
        let config = ExpandConfig::from_toml_str("order = \"dfs\"\nmax_depth = 4\n").unwrap();
        assert_eq!(config.order, Traversal::DepthFirst);
        assert_eq!(config.max_depth, Some(4));
        assert!(config.progress);
    }

    #[test]
    fn test_rejects_unknown_keys_and_depth() {
        assert!(ExpandConfig::from_toml_str("colour = 3").is_err());
        let err = ExpandConfig::from_toml_str("max_depth = 12").unwrap_err();
        assert!(err.to_string().contains("max_depth 12"));
    }

    #[test]
    fn test_overrides() {
        let config = ExpandConfig::default()
            .with_overrides(Some(Traversal::DepthFirst), Some(3), true)
            .unwrap();
        assert_eq!(config.order, Traversal::DepthFirst);
        assert_eq!(config.max_depth, Some(3));
        assert!(!config.progress);
    }
}
