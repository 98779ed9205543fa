//! Viewer defaults for rendering a parsed feed.
//!
//! Defines the YAML-serializable configuration that picks the initial sort
//! order, filter and output format.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! sort: price-desc
//! filter: All
//! format: table
//! with_report: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use handle_feed_core::{Filter, SortOption};

use crate::error::{FeedError, Result};
use crate::output::OutputFormat;

/// Conventional config file name in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".handle-feed.yml";

/// Top-level viewer configuration.
///
/// # Examples
///
/// ```
/// # use handle_feed_core::{Filter, SortOption};
/// let config: handle_feed_parser::FeedConfig = serde_yaml::from_str("version: \"1.0\"").unwrap();
/// assert_eq!(config.sort, SortOption::PriceDesc);
/// assert_eq!(config.filter, Filter::All);
/// assert!(!config.with_report);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Initial record ordering.
    #[serde(default)]
    pub sort: SortOption,
    /// Initial record filter.
    #[serde(default)]
    pub filter: Filter,
    /// Output format for the CLI.
    #[serde(default)]
    pub format: OutputFormat,
    /// Emit the parse report next to the catalog.
    #[serde(default)]
    pub with_report: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            sort: SortOption::default(),
            filter: Filter::default(),
            format: OutputFormat::default(),
            with_report: false,
        }
    }
}

impl FeedConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](FeedError::IoError) if the file cannot be read,
    /// [`YamlError`](FeedError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](FeedError::InvalidConfig) if `version` is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        if config.version.trim().is_empty() {
            return Err(FeedError::InvalidConfig(
                "version cannot be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
