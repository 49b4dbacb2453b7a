//! Compose manifest generation

use super::implied::resolve_dependencies;
use super::GenerateError;
use crate::catalog::ServiceCatalog;
use crate::detection::DependencyEdge;
use crate::output::{ComposeManifest, ServiceSpec};
use crate::util::OrderedMap;
use tracing::{debug, info, warn};

/// Fixed values for the application's own service entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub image_namespace: String,
    pub image_tag: String,
    pub app_port: u16,
    pub compose_version: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            image_namespace: "com.example".to_string(),
            image_tag: "latest".to_string(),
            app_port: 8080,
            compose_version: "3.8".to_string(),
        }
    }
}

impl GeneratorSettings {
    pub fn image_for(&self, application: &str) -> String {
        format!("{}/{}:{}", self.image_namespace, application, self.image_tag)
    }

    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.app_port, self.app_port)
    }
}

pub struct ComposeGenerator<'a> {
    catalog: &'a ServiceCatalog,
    settings: GeneratorSettings,
}

impl Default for ComposeGenerator<'static> {
    fn default() -> Self {
        Self::new(ServiceCatalog::builtin(), GeneratorSettings::default())
    }
}

impl<'a> ComposeGenerator<'a> {
    pub fn new(catalog: &'a ServiceCatalog, settings: GeneratorSettings) -> Self {
        Self { catalog, settings }
    }

    fn primary_spec(&self, application: &str) -> ServiceSpec {
        ServiceSpec {
            image: self.settings.image_for(application),
            ports: vec![self.settings.port_mapping()],
            environment: OrderedMap::new(),
            depends_on: Vec::new(),
        }
    }

    /// Builds the manifest model: the application first, then one copied
    /// template per distinct catalog target. Implied services get a container
    /// but only detected ones appear in the application's `depends_on`.
    pub fn build(&self, application: &str, edges: &[DependencyEdge]) -> ComposeManifest {
        let mut primary = self.primary_spec(application);
        let mut dependencies: OrderedMap<ServiceSpec> = OrderedMap::new();

        for resolved in resolve_dependencies(application, edges, self.catalog) {
            let target = resolved.target();

            if target == application {
                warn!(service = target, "Skipping dependency that names the application itself");
                continue;
            }

            let Some(template) = self.catalog.template(target) else {
                debug!(service = target, "No catalog template; leaving out of manifest");
                continue;
            };

            dependencies.insert(target, ServiceSpec::from_template(template));

            if resolved.is_detected() && !primary.depends_on.iter().any(|d| d == target) {
                primary.depends_on.push(target.to_string());
            }
        }

        let mut services = OrderedMap::new();
        services.insert(application, primary);
        for (name, spec) in dependencies.iter() {
            services.insert(name, spec.clone());
        }

        info!(
            application,
            services = services.len(),
            "Built compose manifest"
        );

        ComposeManifest {
            version: self.settings.compose_version.clone(),
            services,
        }
    }

    pub fn render(&self, manifest: &ComposeManifest) -> Result<String, GenerateError> {
        Ok(serde_yaml::to_string(manifest)?)
    }

    /// Builds and serializes the manifest as compose YAML.
    pub fn generate(
        &self,
        application: &str,
        edges: &[DependencyEdge],
    ) -> Result<String, GenerateError> {
        self.render(&self.build(application, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceTemplate;

    fn edges(app: &str, targets: &[&str]) -> Vec<DependencyEdge> {
        targets
            .iter()
            .map(|t| DependencyEdge::new(app, *t))
            .collect()
    }

    #[test]
    fn test_primary_service_defaults() {
        let manifest = ComposeGenerator::default().build("orders", &[]);
        assert_eq!(manifest.version, "3.8");
        assert_eq!(manifest.services.len(), 1);

        let orders = manifest.service("orders").unwrap();
        assert_eq!(orders.image, "com.example/orders:latest");
        assert_eq!(orders.ports, vec!["8080:8080".to_string()]);
        assert!(orders.depends_on.is_empty());
    }

    #[test]
    fn test_no_dependencies_omits_depends_on() {
        let yaml = ComposeGenerator::default().generate("orders", &[]).unwrap();
        assert!(!yaml.contains("depends_on"));
        assert!(yaml.contains("com.example/orders:latest"));
    }

    #[test]
    fn test_kafka_brings_zookeeper_container_only() {
        let manifest = ComposeGenerator::default().build("orders", &edges("orders", &["kafka"]));

        let names: Vec<_> = manifest.services.keys().collect();
        assert_eq!(names, vec!["orders", "kafka", "zookeeper"]);
        assert_eq!(
            manifest.service("orders").unwrap().depends_on,
            vec!["kafka".to_string()]
        );
        assert_eq!(
            manifest.service("kafka").unwrap().depends_on,
            vec!["zookeeper".to_string()]
        );
    }

    #[test]
    fn test_explicit_zookeeper_is_listed() {
        let manifest =
            ComposeGenerator::default().build("orders", &edges("orders", &["kafka", "zookeeper"]));
        assert_eq!(
            manifest.service("orders").unwrap().depends_on,
            vec!["kafka".to_string(), "zookeeper".to_string()]
        );
    }

    #[test]
    fn test_unknown_targets_are_skipped() {
        let catalog = ServiceCatalog::new().with_template("redis", ServiceTemplate::new("redis:6"));
        let generator = ComposeGenerator::new(&catalog, GeneratorSettings::default());
        let manifest = generator.build("app", &edges("app", &["oracle", "redis"]));

        assert!(manifest.service("oracle").is_none());
        assert_eq!(
            manifest.service("app").unwrap().depends_on,
            vec!["redis".to_string()]
        );
    }

    #[test]
    fn test_self_dependency_is_ignored() {
        let manifest = ComposeGenerator::default().build("redis", &edges("redis", &["redis"]));
        let redis = manifest.service("redis").unwrap();
        assert_eq!(redis.image, "com.example/redis:latest");
        assert!(redis.depends_on.is_empty());
    }

    #[test]
    fn test_repeated_generation_leaves_catalog_untouched() {
        let generator = ComposeGenerator::default();
        let first = generator.build("a", &edges("a", &["kafka", "redis"]));
        let second = generator.build("b", &edges("b", &["kafka"]));

        assert_eq!(first.service("kafka"), second.service("kafka"));
        assert_eq!(
            ServiceCatalog::builtin().template("kafka").unwrap().depends_on,
            vec!["zookeeper".to_string()]
        );
        assert!(ServiceCatalog::builtin().template("redis").unwrap().depends_on.is_empty());
    }

    #[test]
    fn test_custom_settings() {
        let settings = GeneratorSettings {
            image_namespace: "registry.local/team".to_string(),
            image_tag: "1.2.3".to_string(),
            app_port: 9000,
            compose_version: "3.9".to_string(),
        };
        let generator = ComposeGenerator::new(ServiceCatalog::builtin(), settings);
        let manifest = generator.build("orders", &[]);

        assert_eq!(manifest.version, "3.9");
        let orders = manifest.service("orders").unwrap();
        assert_eq!(orders.image, "registry.local/team/orders:1.2.3");
        assert_eq!(orders.ports, vec!["9000:9000".to_string()]);
    }
}
