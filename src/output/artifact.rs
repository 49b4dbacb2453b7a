//! Generated artifacts with their suggested file names and media types

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Compose,
    Diagram,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Compose => "docker-compose.yml",
            ArtifactKind::Diagram => "architecture.drawio",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ArtifactKind::Compose => "text/yaml",
            ArtifactKind::Diagram => "application/vnd.jgraph.mxfile",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Compose => write!(f, "compose manifest"),
            ArtifactKind::Diagram => write!(f, "diagram"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, content: String) -> Self {
        Self {
            kind,
            file_name: kind.file_name().to_string(),
            mime_type: kind.mime_type().to_string(),
            content,
        }
    }
}
