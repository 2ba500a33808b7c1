//! Configuration file support
//!
//! `folio` reads an optional TOML file; command-line flags override every
//! value it sets.

use crate::output::OutputFormat;
use folio_engine::{PageMap, DEFAULT_VARIANT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted key of the field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct FolioConfig {
    /// Segmentation configuration
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Page numbering configuration
    #[serde(default)]
    pub pages: PagesConfig,
}

/// Segmentation-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Ruleset/document tag stamped on every chunk
    pub variant: String,

    /// Ingestion label stamped on every chunk
    pub source: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            variant: DEFAULT_VARIANT.to_string(),
            source: folio_core::DEFAULT_SOURCE.to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Page numbering configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PagesConfig {
    /// Original page numbers of the processed pages, e.g. "3,4,7-9"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
}

impl FolioConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Check every value against what the engine accepts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segmentation.variant.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "segmentation.variant",
                reason: "must not be empty".to_string(),
            });
        }
        if self.segmentation.source.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "segmentation.source",
                reason: "must not be empty".to_string(),
            });
        }
        self.default_format()?;
        self.page_map()?;
        Ok(())
    }

    /// The configured default output format
    pub fn default_format(&self) -> Result<OutputFormat, ConfigError> {
        self.output
            .default_format
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                field: "output.default_format",
                reason,
            })
    }

    /// The configured page map, if any
    pub fn page_map(&self) -> Result<Option<PageMap>, ConfigError> {
        self.pages
            .map
            .as_deref()
            .map(PageMap::parse)
            .transpose()
            .map_err(|e| ConfigError::Invalid {
                field: "pages.map",
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = FolioConfig::default();
        assert_eq!(config.segmentation.variant, "default");
        assert_eq!(config.segmentation.source, "PDF (DocAI-Layout)");
        assert_eq!(config.default_format().unwrap(), OutputFormat::Text);
        assert!(config.page_map().unwrap().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = FolioConfig::from_toml(
            r#"
[segmentation]
variant = "indoor"

[pages]
map = "3,4,7-9"
"#,
        )
        .unwrap();
        assert_eq!(config.segmentation.variant, "indoor");
        assert_eq!(config.segmentation.source, "PDF (DocAI-Layout)");
        assert!(config.output.pretty_json);
        assert_eq!(
            config.page_map().unwrap().unwrap().to_string(),
            "3,4,7-9"
        );
    }

    #[test]
    fn test_invalid_values() {
        let config = FolioConfig::from_toml("[output]\ndefault_format = \"yaml\"").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "output.default_format",
                ..
            })
        ));

        let config = FolioConfig::from_toml("[pages]\nmap = \"0,1\"").unwrap();
        assert!(config.validate().is_err());

        let config = FolioConfig::from_toml("[segmentation]\nvariant = \"\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            FolioConfig::from_toml("[segmentation"),
            Err(ConfigError::Parse(_))
        ));
        assert!(FolioConfig::from_toml("[output]\npretty_json = \"yes\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[output]\ndefault_format = \"jsonl\"\npretty_json = false\n").unwrap();

        let config = FolioConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_format().unwrap(), OutputFormat::Jsonl);
        assert!(!config.output.pretty_json);

        let missing = FolioConfig::from_file(Path::new("/nonexistent/folio.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = FolioConfig {
            pages: PagesConfig {
                map: Some("2,5".to_string()),
            },
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(FolioConfig::from_toml(&text).unwrap(), config);
    }
}
