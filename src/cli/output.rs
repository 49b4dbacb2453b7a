//! Output formatting for detection results, settings and the catalog
//!
//! Each report can be printed as JSON, YAML or human-readable text.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::ServiceCatalog;
use crate::config::SvcmapConfig;
use crate::pipeline::Analysis;

pub const NO_DEPENDENCIES_MESSAGE: &str = "No dependencies detected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    image: &'a str,
    ports: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    depends_on: &'a [String],
    keys: Vec<&'a str>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_analysis(&self, analysis: &Analysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(analysis)
                .context("Failed to serialize detection result to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(analysis)
                .context("Failed to serialize detection result to YAML"),
            OutputFormat::Human => Ok(self.format_analysis_human(analysis)),
        }
    }

    pub fn format_config(&self, config: &SvcmapConfig) -> Result<String> {
        let map: BTreeMap<String, String> = config.to_display_map().into_iter().collect();
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&map).context("Failed to serialize config to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => {
                let mut lines = vec!["Settings:".to_string()];
                lines.extend(map.iter().map(|(key, value)| format!("  {:<16} {}", key, value)));
                Ok(join_lines(lines))
            }
        }
    }

    pub fn format_catalog(&self, catalog: &ServiceCatalog) -> Result<String> {
        let mut entries: BTreeMap<&str, CatalogEntry> = BTreeMap::new();
        for (id, template) in catalog.templates() {
            entries.insert(
                id,
                CatalogEntry {
                    image: &template.image,
                    ports: &template.ports,
                    depends_on: &template.depends_on,
                    keys: Vec::new(),
                },
            );
        }
        for (key, service) in catalog.key_mappings() {
            if let Some(entry) = entries.get_mut(service) {
                entry.keys.push(key);
            }
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&entries).context("Failed to serialize catalog to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&entries).context("Failed to serialize catalog to YAML")
            }
            OutputFormat::Human => Ok(self.format_catalog_human(&entries, catalog)),
        }
    }

    fn format_analysis_human(&self, analysis: &Analysis) -> String {
        if !analysis.has_dependencies() {
            return join_lines(vec![NO_DEPENDENCIES_MESSAGE.to_string()]);
        }
        join_lines(analysis.dependencies.iter().map(ToString::to_string).collect())
    }

    fn format_catalog_human(
        &self,
        entries: &BTreeMap<&str, CatalogEntry>,
        catalog: &ServiceCatalog,
    ) -> String {
        let mut lines = vec!["Known services:".to_string()];
        for (id, entry) in entries {
            lines.push(format!("  {:<10} {}", id, entry.image));
            if !entry.depends_on.is_empty() {
                lines.push(format!("             requires: {}", entry.depends_on.join(", ")));
            }
            lines.extend(entry.keys.iter().map(|key| format!("             key: {}", key)));
        }

        let markers = catalog.connection_markers();
        if !markers.is_empty() {
            lines.push(String::new());
            lines.push("Datasource URL markers:".to_string());
            lines.extend(
                markers
                    .iter()
                    .map(|marker| format!("  {:<10} → {}", marker.marker, marker.service)),
            );
        }
        join_lines(lines)
    }
}

/// Newline-terminated text, one entry per line
fn join_lines(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::ConfigFormat;
    use crate::pipeline::AnalysisPipeline;

    fn analysis(content: &str) -> Analysis {
        AnalysisPipeline::default()
            .analyze(content, ConfigFormat::Properties)
            .unwrap()
    }

    #[test]
    fn test_human_lists_edges() {
        let result = analysis("spring.application.name=orders\nspring.redis.host=r\n");
        let text = OutputFormatter::new(OutputFormat::Human)
            .format_analysis(&result)
            .unwrap();
        assert_eq!(text, "orders → redis\n");
    }

    #[test]
    fn test_human_catalog_layout() {
        let catalog = ServiceCatalog::new()
            .with_template("cache", crate::catalog::ServiceTemplate::new("cache:1"))
            .with_key("app.cache.host", "cache")
            .with_marker("h2", "cache");
        let text = OutputFormatter::new(OutputFormat::Human)
            .format_catalog(&catalog)
            .unwrap();
        assert_eq!(
            text,
            "Known services:\n  cache      cache:1\n             key: app.cache.host\n\nDatasource URL markers:\n  h2         → cache\n"
        );
    }

    #[test]
    fn test_human_empty_message() {
        let text = OutputFormatter::new(OutputFormat::Human)
            .format_analysis(&analysis("server.port=8080\n"))
            .unwrap();
        assert_eq!(text.trim(), NO_DEPENDENCIES_MESSAGE);
    }

    #[test]
    fn test_json_analysis() {
        let text = OutputFormatter::new(OutputFormat::Json)
            .format_analysis(&analysis("spring.rabbitmq.host=mq\n"))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["dependencies"][0]["to_service"], "rabbitmq");
    }

    #[test]
    fn test_yaml_catalog() {
        let text = OutputFormatter::new(OutputFormat::Yaml)
            .format_catalog(ServiceCatalog::builtin())
            .unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed["kafka"]["image"], "bitnami/kafka:latest");
        assert_eq!(parsed["kafka"]["keys"][0], "spring.kafka.bootstrap-servers");
    }

    #[test]
    fn test_human_catalog_and_config() {
        let catalog = OutputFormatter::new(OutputFormat::Human)
            .format_catalog(ServiceCatalog::builtin())
            .unwrap();
        assert!(catalog.contains("requires: zookeeper"));
        assert!(catalog.contains("postgresql"));

        let config = OutputFormatter::new(OutputFormat::Human)
            .format_config(&SvcmapConfig::default())
            .unwrap();
        assert!(config.contains("com.example"));
    }
}
