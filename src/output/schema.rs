//! Compose manifest schema
//!
//! The deployment manifest emitted by the compose generator: a `version`
//! string and a `services` table keyed by service name. Field names follow
//! the compose file format so the output can be handed to `docker compose`
//! as-is.

use crate::catalog::ServiceTemplate;
use crate::util::OrderedMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeManifest {
    pub version: String,
    pub services: OrderedMap<ServiceSpec>,
}

/// One container in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub image: String,
    /// `"host:container"` port mappings
    #[serde(default)]
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "OrderedMap::is_empty")]
    pub environment: OrderedMap<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ServiceSpec {
    /// Copies a catalog template; the catalog itself is never referenced by the manifest.
    pub fn from_template(template: &ServiceTemplate) -> Self {
        Self {
            image: template.image.clone(),
            ports: template.ports.clone(),
            environment: template.environment.clone(),
            depends_on: template.depends_on.clone(),
        }
    }
}

impl ComposeManifest {
    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.get(name)
    }
}

impl fmt::Display for ComposeManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compose manifest (version {})", self.version)?;
        for (name, spec) in self.services.iter() {
            writeln!(f, "  {} ({})", name, spec.image)?;
            if !spec.ports.is_empty() {
                writeln!(f, "    ports: {}", spec.ports.join(", "))?;
            }
            if !spec.depends_on.is_empty() {
                writeln!(f, "    depends on: {}", spec.depends_on.join(", "))?;
            }
        }
        Ok(())
    }
}
