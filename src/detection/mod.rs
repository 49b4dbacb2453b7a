//! Dependency detection
//!
//! Walks a normalized configuration against the service catalog and reports
//! which backing services the application talks to. Detection cannot fail:
//! a configuration with no recognizable keys yields an empty list.

pub mod detector;
pub mod types;

pub use detector::{DependencyDetector, DATASOURCE_URL_KEY};
pub use types::{push_unique_target, DependencyEdge};

use crate::normalize::NormalizedConfig;

/// Detects dependencies using the built-in catalog.
pub fn detect(config: &NormalizedConfig) -> Vec<DependencyEdge> {
    DependencyDetector::default().detect(config)
}
