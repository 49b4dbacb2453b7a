use crate::normalize::ConfigFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Infers backing services from application configuration
#[derive(Parser, Debug)]
#[command(
    name = "svcmap",
    about = "Infers backing services from Spring configuration and emits compose manifests and diagrams",
    version,
    long_about = "svcmap reads an application.yml or application.properties file, recognizes \
                  the configuration keys and connection strings of well-known backing services \
                  (databases, caches, brokers, queues), and generates a docker-compose manifest \
                  and a draw.io architecture diagram for the application and its dependencies."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Log level selected on the command line, if any. Takes precedence
    /// over `SVCMAP_LOG_LEVEL`.
    pub fn log_level_override(&self) -> Option<String> {
        if let Some(level) = &self.log_level {
            Some(level.to_lowercase())
        } else if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List the services a configuration file depends on",
        long_about = "Parses the configuration file and prints one line per detected dependency.\n\n\
                      Examples:\n  \
                      svcmap detect src/main/resources/application.yml\n  \
                      svcmap detect application.properties --format json"
    )]
    Detect(DetectArgs),

    #[command(about = "Generate a docker-compose manifest")]
    Compose(ArtifactArgs),

    #[command(about = "Generate a draw.io architecture diagram")]
    Diagram(ArtifactArgs),

    #[command(
        about = "Write both the compose manifest and the diagram",
        long_about = "Writes docker-compose.yml and architecture.drawio into the output directory.\n\n\
                      Examples:\n  \
                      svcmap generate application.yml\n  \
                      svcmap generate application.properties --out-dir deploy/"
    )]
    Generate(GenerateArgs),

    #[command(about = "Show effective settings")]
    Config(ShowArgs),

    #[command(about = "List known services and the configuration keys that imply them")]
    Catalog(ShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(value_name = "FILE", help = "Configuration file (.yml, .yaml or .properties)")]
    pub file: PathBuf,

    #[arg(
        short = 'i',
        long,
        value_enum,
        help = "Input syntax (by default, inferred from the file extension)"
    )]
    pub input_format: Option<InputFormatArg>,
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory to write the artifacts into"
    )]
    pub out_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormatArg {
    Yaml,
    Properties,
}

impl From<InputFormatArg> for ConfigFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Yaml => ConfigFormat::Yaml,
            InputFormatArg::Properties => ConfigFormat::Properties,
        }
    }
}
