//! Implied dependencies of composite services
//!
//! A composite service (its catalog template declares `depends_on`) cannot
//! run alone: a broker needs its coordination service even when the
//! application never mentions it. This module computes the full edge list
//! once, as a value, before any generator copies templates.

use crate::catalog::ServiceCatalog;
use crate::detection::DependencyEdge;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeOrigin {
    /// Found in the application's configuration
    Detected,
    /// Added because a detected service requires it
    Implied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEdge {
    #[serde(flatten)]
    pub edge: DependencyEdge,
    pub origin: EdgeOrigin,
}

impl ResolvedEdge {
    pub fn target(&self) -> &str {
        &self.edge.to_service
    }

    pub fn is_detected(&self) -> bool {
        self.origin == EdgeOrigin::Detected
    }
}

/// Returns the detected edges followed by every implied upstream not already
/// present, walked transitively through the catalog templates.
pub fn resolve_dependencies(
    application: &str,
    edges: &[DependencyEdge],
    catalog: &ServiceCatalog,
) -> Vec<ResolvedEdge> {
    let mut resolved: Vec<ResolvedEdge> = edges
        .iter()
        .map(|edge| ResolvedEdge {
            edge: edge.clone(),
            origin: EdgeOrigin::Detected,
        })
        .collect();

    let mut idx = 0;
    while idx < resolved.len() {
        let upstreams = catalog
            .template(resolved[idx].target())
            .map(|t| t.depends_on.clone())
            .unwrap_or_default();

        for upstream in upstreams {
            if resolved.iter().any(|r| r.target() == upstream) {
                continue;
            }
            debug!(
                service = %resolved[idx].target(),
                upstream = %upstream,
                "Adding implied dependency"
            );
            resolved.push(ResolvedEdge {
                edge: DependencyEdge::new(application, upstream),
                origin: EdgeOrigin::Implied,
            });
        }
        idx += 1;
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceTemplate;

    #[test]
    fn test_kafka_implies_zookeeper() {
        let edges = vec![DependencyEdge::new("orders", "kafka")];
        let resolved = resolve_dependencies("orders", &edges, ServiceCatalog::builtin());

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].target(), "kafka");
        assert!(resolved[0].is_detected());
        assert_eq!(resolved[1].edge, DependencyEdge::new("orders", "zookeeper"));
        assert_eq!(resolved[1].origin, EdgeOrigin::Implied);
    }

    #[test]
    fn test_explicit_zookeeper_is_not_duplicated() {
        let edges = vec![
            DependencyEdge::new("orders", "zookeeper"),
            DependencyEdge::new("orders", "kafka"),
        ];
        let resolved = resolve_dependencies("orders", &edges, ServiceCatalog::builtin());

        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(ResolvedEdge::is_detected));
    }

    #[test]
    fn test_transitive_and_unknown_targets() {
        let catalog = ServiceCatalog::new()
            .with_template("a", ServiceTemplate::new("a").depends_on("b"))
            .with_template("b", ServiceTemplate::new("b").depends_on("c"))
            .with_template("c", ServiceTemplate::new("c"));
        let edges = vec![
            DependencyEdge::new("app", "mystery"),
            DependencyEdge::new("app", "a"),
        ];

        let resolved = resolve_dependencies("app", &edges, &catalog);
        let targets: Vec<_> = resolved.iter().map(ResolvedEdge::target).collect();
        assert_eq!(targets, vec!["mystery", "a", "b", "c"]);
        assert_eq!(resolved[3].origin, EdgeOrigin::Implied);
    }

    #[test]
    fn test_no_edges() {
        assert!(resolve_dependencies("app", &[], ServiceCatalog::builtin()).is_empty());
    }
}
