//! Configuration normalization
//!
//! Turns raw configuration text, either a YAML document or a flat
//! `.properties` file, into one canonical form: a nested [`ConfigTree`] plus
//! the application name read from `spring.application.name`.
//!
//! # Example
//!
//! ```
//! use svcmap::normalize::{normalize, ConfigFormat};
//!
//! let config = normalize("spring.application.name=orders\n", ConfigFormat::Properties).unwrap();
//! assert_eq!(config.application_name(), "orders");
//! ```

pub mod properties;
pub mod tree;
pub mod yaml;

pub use tree::{ConfigTree, ConfigValue, FlatConfig};

use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration path holding the application name
pub const APPLICATION_NAME_KEY: &str = "spring.application.name";

/// Application name used when the configuration does not declare one
pub const UNKNOWN_SERVICE: &str = "unknown-service";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to parse configuration: {0}")]
    MalformedDocument(#[from] serde_yaml::Error),

    #[error("unable to parse configuration: document root must be a mapping")]
    NotAMapping,
}

/// Supported input syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Yaml,
    Properties,
}

impl ConfigFormat {
    /// Sniffs the format from a file extension (`yml`, `yaml`, `properties`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(ConfigFormat::Yaml),
            "properties" => Some(ConfigFormat::Properties),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Properties => write!(f, "properties"),
        }
    }
}

/// Canonical configuration produced by either parser. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedConfig {
    application_name: String,
    config_tree: ConfigTree,
    #[serde(skip)]
    flat: FlatConfig,
}

impl NormalizedConfig {
    /// Wraps a tree, flattens it once and resolves the application name.
    ///
    /// The name goes through the flattened view so a literal
    /// `spring.application.name` key in a YAML document resolves the same
    /// as the nested form.
    pub fn from_tree(config_tree: ConfigTree) -> Self {
        let flat = tree::flatten(&config_tree);
        let application_name = flat
            .get(APPLICATION_NAME_KEY)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SERVICE)
            .to_string();

        Self {
            application_name,
            config_tree,
            flat,
        }
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn config_tree(&self) -> &ConfigTree {
        &self.config_tree
    }

    /// Leaf values keyed by full dotted path, in document order.
    pub fn flatten(&self) -> &FlatConfig {
        &self.flat
    }
}

/// Parses a YAML document (or several `---`-separated documents).
pub fn parse_yaml(content: &str) -> Result<NormalizedConfig, ParseError> {
    let tree = yaml::parse_tree(content)?;
    let config = NormalizedConfig::from_tree(tree);
    debug!(
        format = "yaml",
        application = config.application_name(),
        top_level_keys = config.config_tree().len(),
        "Normalized configuration"
    );
    Ok(config)
}

/// Parses a flat properties file. Never fails; bad lines are skipped.
pub fn parse_properties(content: &str) -> NormalizedConfig {
    let config = NormalizedConfig::from_tree(properties::parse_tree(content));
    debug!(
        format = "properties",
        application = config.application_name(),
        top_level_keys = config.config_tree().len(),
        "Normalized configuration"
    );
    config
}

/// Single entry point dispatching on the caller-supplied format.
pub fn normalize(content: &str, format: ConfigFormat) -> Result<NormalizedConfig, ParseError> {
    match format {
        ConfigFormat::Yaml => parse_yaml(content),
        ConfigFormat::Properties => Ok(parse_properties(content)),
    }
}
