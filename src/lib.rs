//! svcmap - backing-service inference for Spring-style application configuration
//!
//! Reads an `application.yml` or `application.properties` file, recognizes the
//! configuration keys and connection strings of well-known infrastructure
//! services, and produces a docker-compose manifest and a draw.io diagram for
//! the application and everything it talks to.
//!
//! # Core Concepts
//!
//! - **Normalization**: YAML and properties input become one nested
//!   [`ConfigTree`](normalize::ConfigTree) plus an application name
//! - **Catalog**: The table of known services, the configuration keys that
//!   imply them and the container templates used to run them
//! - **Detection**: Scanning a normalized configuration for catalog keys and
//!   datasource URL markers, yielding ordered [`DependencyEdge`]s
//! - **Generation**: Rendering edges into a compose manifest or an mxGraph
//!   diagram
//!
//! # Example Usage
//!
//! ```
//! use svcmap::{AnalysisPipeline, ConfigFormat};
//!
//! let yaml = "spring:\n  application:\n    name: orders\n  kafka:\n    bootstrap-servers: kafka:9092\n";
//! let pipeline = AnalysisPipeline::default();
//! let analysis = pipeline.analyze(yaml, ConfigFormat::Yaml).unwrap();
//! assert_eq!(analysis.dependencies[0].to_service, "kafka");
//!
//! let compose = pipeline.compose(&analysis).unwrap();
//! assert!(compose.content.contains("zookeeper"));
//! ```
//!
//! # Project Structure
//!
//! - [`normalize`]: YAML and properties parsing into a canonical tree
//! - [`catalog`]: Known services and their templates
//! - [`detection`]: Dependency edge detection
//! - [`generate`]: Compose and diagram generators
//! - [`pipeline`]: The normalize → detect → generate chain
//! - [`cli`]: Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod detection;
pub mod generate;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod util;

pub use catalog::{ServiceCatalog, ServiceTemplate};
pub use config::{ConfigError, SvcmapConfig};
pub use detection::{detect, DependencyDetector, DependencyEdge};
pub use generate::{ComposeGenerator, DiagramGenerator, GenerateError, GeneratorSettings};
pub use normalize::{normalize, ConfigFormat, NormalizedConfig, ParseError};
pub use output::{Artifact, ArtifactKind, ComposeManifest, ServiceSpec};
pub use pipeline::{Analysis, AnalysisPipeline, PipelineError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
