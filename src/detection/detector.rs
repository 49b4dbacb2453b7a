use super::types::{push_unique_target, DependencyEdge};
use crate::catalog::ServiceCatalog;
use crate::normalize::NormalizedConfig;
use tracing::{debug, info};

/// Key whose value is inspected for relational-engine markers
pub const DATASOURCE_URL_KEY: &str = "spring.datasource.url";

/// Infers backing services from a normalized configuration
pub struct DependencyDetector<'a> {
    catalog: &'a ServiceCatalog,
}

impl Default for DependencyDetector<'static> {
    fn default() -> Self {
        Self::new(ServiceCatalog::builtin())
    }
}

impl<'a> DependencyDetector<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self { catalog }
    }

    /// Returns one edge per distinct target, in the order targets were first seen.
    ///
    /// Keys are matched against the full dotted path of every leaf, walked in
    /// document order. The datasource URL is inspected afterwards.
    pub fn detect(&self, config: &NormalizedConfig) -> Vec<DependencyEdge> {
        let app = config.application_name();
        let flat = config.flatten();
        let mut edges = Vec::new();

        for (key, _) in flat.iter() {
            if let Some(service) = self.catalog.service_for_key(key) {
                if push_unique_target(&mut edges, app, service) {
                    debug!(key, service, "Matched configuration key");
                }
            }
        }

        if let Some(url) = flat.get(DATASOURCE_URL_KEY) {
            for marker in self.catalog.connection_markers() {
                if url.contains(&marker.marker)
                    && push_unique_target(&mut edges, app, &marker.service)
                {
                    debug!(marker = %marker.marker, service = %marker.service, "Matched datasource URL");
                }
            }
        }

        info!(
            application = app,
            dependencies = edges.len(),
            "Dependency detection complete"
        );
        edges
    }
}
