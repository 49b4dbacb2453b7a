pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{ArtifactArgs, CliArgs, Commands, DetectArgs, GenerateArgs, ShowArgs};
pub use handlers::CliError;
pub use output::{OutputFormat, OutputFormatter};
