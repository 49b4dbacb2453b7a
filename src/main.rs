use svcmap::cli::commands::{CliArgs, Commands};
use svcmap::cli::handlers::{
    handle_artifact, handle_catalog, handle_config, handle_detect, handle_generate, EXIT_FAILURE,
};
use svcmap::output::ArtifactKind;
use svcmap::util::logging::{init_logging, parse_level, LoggingConfig};
use svcmap::{ConfigError, SvcmapConfig, VERSION};

use clap::Parser;
use std::env;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };
    init_logging_from_config(&config);

    debug!("svcmap v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, &config),
        Commands::Compose(artifact_args) => {
            handle_artifact(ArtifactKind::Compose, artifact_args, &config)
        }
        Commands::Diagram(artifact_args) => {
            handle_artifact(ArtifactKind::Diagram, artifact_args, &config)
        }
        Commands::Generate(generate_args) => handle_generate(generate_args, &config),
        Commands::Config(show_args) => handle_config(show_args, &config),
        Commands::Catalog(show_args) => handle_catalog(show_args),
    };

    std::process::exit(exit_code);
}

/// Environment settings with the command-line log level folded in, validated.
fn load_config(args: &CliArgs) -> Result<SvcmapConfig, ConfigError> {
    let config = SvcmapConfig::from_env()?.with_log_level(args.log_level_override());
    config.validate()?;
    Ok(config)
}

fn init_logging_from_config(config: &SvcmapConfig) {
    let use_json = env::var("SVCMAP_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level: parse_level(&config.log_level),
        use_json,
        ..LoggingConfig::default()
    });
}
