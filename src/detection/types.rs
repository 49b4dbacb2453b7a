use serde::{Deserialize, Serialize};
use std::fmt;

/// "`from_service` depends on `to_service`"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from_service: String,
    pub to_service: String,
}

impl DependencyEdge {
    pub fn new(from_service: impl Into<String>, to_service: impl Into<String>) -> Self {
        Self {
            from_service: from_service.into(),
            to_service: to_service.into(),
        }
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from_service, self.to_service)
    }
}

/// Appends an edge unless one with the same target is already present.
/// Deduplication is on the target only, never on the (from, to) pair.
pub fn push_unique_target(
    edges: &mut Vec<DependencyEdge>,
    from_service: &str,
    to_service: &str,
) -> bool {
    if edges.iter().any(|e| e.to_service == to_service) {
        return false;
    }
    edges.push(DependencyEdge::new(from_service, to_service));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_unique_target_dedups_on_target() {
        let mut edges = Vec::new();
        assert!(push_unique_target(&mut edges, "a", "redis"));
        assert!(!push_unique_target(&mut edges, "a", "redis"));
        assert!(!push_unique_target(&mut edges, "b", "redis"));
        assert!(push_unique_target(&mut edges, "a", "kafka"));
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(DependencyEdge::new("orders", "kafka").to_string(), "orders → kafka");
    }
}
