//! Configuration management for svcmap
//!
//! Settings are read from environment variables with defaults that reproduce
//! the stock manifest layout.
//!
//! # Environment Variables
//!
//! - `SVCMAP_LOG_LEVEL`: Logging level - default: "info"
//! - `SVCMAP_IMAGE_NAMESPACE`: Registry namespace for the application image - default: "com.example"
//! - `SVCMAP_IMAGE_TAG`: Tag for the application image - default: "latest"
//! - `SVCMAP_APP_PORT`: Port published by the application container - default: "8080"
//! - `SVCMAP_COMPOSE_VERSION`: Manifest `version` field - default: "3.8"
//!
//! # Example
//!
//! ```no_run
//! use svcmap::SvcmapConfig;
//!
//! let config = SvcmapConfig::from_env().expect("invalid environment");
//! config.validate().expect("invalid configuration");
//! let settings = config.generator_settings();
//! ```

use crate::generate::GeneratorSettings;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_IMAGE_NAMESPACE: &str = "com.example";
const DEFAULT_IMAGE_TAG: &str = "latest";
const DEFAULT_APP_PORT: u16 = 8080;
const DEFAULT_COMPOSE_VERSION: &str = "3.8";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvcmapConfig {
    pub log_level: String,
    pub image_namespace: String,
    pub image_tag: String,
    pub app_port: u16,
    pub compose_version: String,
}

impl Default for SvcmapConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            image_namespace: DEFAULT_IMAGE_NAMESPACE.to_string(),
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            app_port: DEFAULT_APP_PORT,
            compose_version: DEFAULT_COMPOSE_VERSION.to_string(),
        }
    }
}

impl SvcmapConfig {
    /// Loads `SVCMAP_*` variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if `SVCMAP_APP_PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let app_port = match env::var("SVCMAP_APP_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::ParseError {
                field: "SVCMAP_APP_PORT".to_string(),
                error: e.to_string(),
            })?,
            Err(_) => defaults.app_port,
        };

        Ok(Self {
            log_level: env::var("SVCMAP_LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_level),
            image_namespace: env::var("SVCMAP_IMAGE_NAMESPACE").unwrap_or(defaults.image_namespace),
            image_tag: env::var("SVCMAP_IMAGE_TAG").unwrap_or(defaults.image_tag),
            app_port,
            compose_version: env::var("SVCMAP_COMPOSE_VERSION").unwrap_or(defaults.compose_version),
        })
    }

    /// Replaces the log level when one was chosen on the command line.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level.to_lowercase();
        }
        self
    }

    /// Checks that:
    /// - the published port is non-zero
    /// - namespace, tag and compose version are non-empty
    /// - the log level is one of trace/debug/info/warn/error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_port == 0 {
            return Err(ConfigError::ValidationFailed(
                "Application port must be between 1 and 65535".to_string(),
            ));
        }

        for (name, value) in [
            ("Image namespace", &self.image_namespace),
            ("Image tag", &self.image_tag),
            ("Compose version", &self.compose_version),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        if self.image_tag.contains(':') || self.image_tag.contains('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid image tag: {}",
                self.image_tag
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            image_namespace: self.image_namespace.trim_end_matches('/').to_string(),
            image_tag: self.image_tag.clone(),
            app_port: self.app_port,
            compose_version: self.compose_version.clone(),
        }
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("image_namespace".to_string(), self.image_namespace.clone());
        map.insert("image_tag".to_string(), self.image_tag.clone());
        map.insert("app_port".to_string(), self.app_port.to_string());
        map.insert("compose_version".to_string(), self.compose_version.clone());
        map
    }
}
