//! Artifact generators
//!
//! Both generators take the application name and the detected edges. The
//! compose generator first expands composite services through
//! [`implied::resolve_dependencies`]; the diagram generator draws exactly the
//! edges it is given.

pub mod compose;
pub mod diagram;
pub mod implied;

pub use compose::{ComposeGenerator, GeneratorSettings};
pub use diagram::{DiagramGenerator, DiagramModel};
pub use implied::{resolve_dependencies, EdgeOrigin, ResolvedEdge};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
