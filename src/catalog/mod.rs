//! Static catalog of known backing services
//!
//! The catalog answers three questions for the rest of the pipeline:
//! which container template describes a service, which configuration key
//! implies which service, and which connection-string marker identifies
//! which relational engine. It is built once and never mutated; consumers
//! clone templates before attaching them to a manifest.

mod builtin;

use crate::util::OrderedMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Deployment template for one catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    pub image: String,
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub environment: OrderedMap<String>,
    /// Upstream catalog services this one needs in order to run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ServiceTemplate {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ports: Vec::new(),
            environment: OrderedMap::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn port(mut self, mapping: impl Into<String>) -> Self {
        self.ports.push(mapping.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key, value.into());
        self
    }

    pub fn depends_on(mut self, service: impl Into<String>) -> Self {
        self.depends_on.push(service.into());
        self
    }

    /// Composite services declare their own upstream dependencies.
    pub fn is_composite(&self) -> bool {
        !self.depends_on.is_empty()
    }
}

/// Substring of a datasource URL that identifies a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionMarker {
    pub marker: String,
    pub service: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceCatalog {
    templates: OrderedMap<ServiceTemplate>,
    key_to_service: OrderedMap<String>,
    connection_markers: Vec<ConnectionMarker>,
}

static BUILTIN: OnceLock<ServiceCatalog> = OnceLock::new();

impl ServiceCatalog {
    /// An empty catalog, for building reduced catalogs in tests
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide catalog of known services.
    pub fn builtin() -> &'static ServiceCatalog {
        BUILTIN.get_or_init(builtin::catalog)
    }

    pub fn with_template(mut self, id: impl Into<String>, template: ServiceTemplate) -> Self {
        self.templates.insert(id, template);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>, service: impl Into<String>) -> Self {
        self.key_to_service.insert(key, service.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>, service: impl Into<String>) -> Self {
        self.connection_markers.push(ConnectionMarker {
            marker: marker.into(),
            service: service.into(),
        });
        self
    }

    pub fn template(&self, id: &str) -> Option<&ServiceTemplate> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Service implied by a full dotted configuration key, if any.
    pub fn service_for_key(&self, key: &str) -> Option<&str> {
        self.key_to_service.get(key).map(String::as_str)
    }

    pub fn connection_markers(&self) -> &[ConnectionMarker] {
        &self.connection_markers
    }

    pub fn templates(&self) -> impl Iterator<Item = (&str, &ServiceTemplate)> {
        self.templates.iter()
    }

    pub fn key_mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.key_to_service.iter().map(|(k, v)| (k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_required_services() {
        let catalog = ServiceCatalog::builtin();
        for id in ["postgres", "redis", "kafka", "rabbitmq", "zookeeper"] {
            assert!(catalog.contains(id), "missing template for {}", id);
        }
    }

    #[test]
    fn test_kafka_is_composite_on_zookeeper() {
        let kafka = ServiceCatalog::builtin().template("kafka").unwrap();
        assert!(kafka.is_composite());
        assert_eq!(kafka.depends_on, vec!["zookeeper".to_string()]);
        assert!(!ServiceCatalog::builtin()
            .template("zookeeper")
            .unwrap()
            .is_composite());
    }

    #[test]
    fn test_key_lookup() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(
            catalog.service_for_key("spring.kafka.bootstrap-servers"),
            Some("kafka")
        );
        assert_eq!(catalog.service_for_key("spring.redis.host"), Some("redis"));
        assert_eq!(
            catalog.service_for_key("spring.rabbitmq.host"),
            Some("rabbitmq")
        );
        assert_eq!(catalog.service_for_key("server.port"), None);
        assert_eq!(catalog.service_for_key("spring"), None);
    }

    #[test]
    fn test_every_mapped_service_has_template() {
        let catalog = ServiceCatalog::builtin();
        for (key, service) in catalog.key_mappings() {
            assert!(catalog.contains(service), "{} maps to unknown {}", key, service);
        }
        for marker in catalog.connection_markers() {
            assert!(catalog.contains(&marker.service));
        }
        for (id, template) in catalog.templates() {
            for upstream in &template.depends_on {
                assert!(catalog.contains(upstream), "{} depends on unknown {}", id, upstream);
            }
        }
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = ServiceCatalog::new()
            .with_template("cache", ServiceTemplate::new("cache:1").port("1:1"))
            .with_key("app.cache.host", "cache")
            .with_marker("h2", "cache");

        assert!(catalog.contains("cache"));
        assert!(!catalog.contains("postgres"));
        assert_eq!(catalog.service_for_key("app.cache.host"), Some("cache"));
        assert_eq!(catalog.connection_markers().len(), 1);
    }

    #[test]
    fn test_builtin_is_shared_instance() {
        let a = ServiceCatalog::builtin() as *const ServiceCatalog;
        let b = ServiceCatalog::builtin() as *const ServiceCatalog;
        assert_eq!(a, b);
    }
}
