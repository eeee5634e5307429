//! TOML configuration for `dicom-meta`.
//!
//! ```toml
//! [frame]
//! id_column = "instance"
//! metadata_column = "xml"
//!
//! [output]
//! null_value = "NA"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dicom_core::FrameConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::DatasetArgs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub frame: FrameConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Written for null cells in CSV output.
    pub null_value: String,
}

impl CliConfig {
    /// Reads a config file. Missing tables and keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads the file named by `--config`, if any, then applies flag overrides.
    pub fn resolve(args: &DatasetArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(name) = &args.id_column {
            config.frame.id_column.clone_from(name);
        }
        if let Some(name) = &args.metadata_column {
            config.frame.metadata_column.clone_from(name);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tables_keep_defaults() {
        let config: CliConfig = toml::from_str("[frame]\nmetadata_column = \"xml\"\n").unwrap();
        assert_eq!(config.frame.id_column, "id");
        assert_eq!(config.frame.metadata_column, "xml");
        assert_eq!(config.output.null_value, "");
    }

    #[test]
    fn unknown_tables_are_rejected() {
        assert!(toml::from_str::<CliConfig>("[frames]\nid_column = \"x\"\n").is_err());
        assert!(toml::from_str::<CliConfig>("[output]\nnull = \"x\"\n").is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = CliConfig::default();
        config.output.null_value = "NA".to_string();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<CliConfig>(&text).unwrap(), config);
    }
}
