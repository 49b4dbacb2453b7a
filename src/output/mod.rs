pub mod artifact;
pub mod schema;

pub use artifact::{Artifact, ArtifactKind};
pub use schema::{ComposeManifest, ServiceSpec};
