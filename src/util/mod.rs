//! Utility modules for svcmap
//!
//! - Structured logging setup and configuration
//! - Insertion-ordered maps shared by the configuration tree and manifest model

pub mod logging;
pub mod ordered_map;

pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
pub use ordered_map::OrderedMap;
