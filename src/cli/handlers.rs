//! Command handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 when the
//! configuration cannot be read, parsed or written, 2 when the input format
//! cannot be determined.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::commands::{ArtifactArgs, DetectArgs, GenerateArgs, InputArgs, ShowArgs};
use super::output::OutputFormatter;
use crate::catalog::ServiceCatalog;
use crate::config::SvcmapConfig;
use crate::normalize::ConfigFormat;
use crate::output::{Artifact, ArtifactKind};
use crate::pipeline::{Analysis, AnalysisPipeline};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_UNSUPPORTED: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unsupported file type: {0} (expected .yml, .yaml or .properties)")]
    UnsupportedFormat(PathBuf),
}

/// Picks the input syntax from the explicit flag, else from the file extension.
pub fn resolve_format(input: &InputArgs) -> Result<ConfigFormat, CliError> {
    match input.input_format {
        Some(format) => Ok(format.into()),
        None => ConfigFormat::from_path(&input.file)
            .ok_or_else(|| CliError::UnsupportedFormat(input.file.clone())),
    }
}

fn read_input(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

fn analyze(pipeline: &AnalysisPipeline, input: &InputArgs) -> Result<Analysis> {
    let format = resolve_format(input)?;
    let content = read_input(&input.file)?;
    debug!(file = %input.file.display(), %format, bytes = content.len(), "Read configuration");
    Ok(pipeline.analyze(&content, format)?)
}

fn write_artifact(artifact: &Artifact, path: &Path) -> Result<()> {
    fs::write(path, &artifact.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        kind = %artifact.kind,
        path = %path.display(),
        mime_type = %artifact.mime_type,
        "Wrote artifact"
    );
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<CliError>().is_some() {
        EXIT_UNSUPPORTED
    } else {
        EXIT_FAILURE
    }
}

fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            exit_code(&err)
        }
    }
}

fn run_detect(args: &DetectArgs, config: &SvcmapConfig) -> Result<()> {
    let pipeline = AnalysisPipeline::new(ServiceCatalog::builtin(), config.generator_settings());
    let analysis = analyze(&pipeline, &args.input)?;
    let output = OutputFormatter::new(args.format.into()).format_analysis(&analysis)?;
    print!("{}", output);
    Ok(())
}

fn run_artifact(kind: ArtifactKind, args: &ArtifactArgs, config: &SvcmapConfig) -> Result<()> {
    let pipeline = AnalysisPipeline::new(ServiceCatalog::builtin(), config.generator_settings());
    let analysis = analyze(&pipeline, &args.input)?;
    let artifact = match kind {
        ArtifactKind::Compose => pipeline.compose(&analysis)?,
        ArtifactKind::Diagram => pipeline.diagram(&analysis),
    };

    match &args.output {
        Some(path) => write_artifact(&artifact, path)?,
        None => print!("{}", artifact.content),
    }
    Ok(())
}

fn run_generate(args: &GenerateArgs, config: &SvcmapConfig) -> Result<()> {
    let pipeline = AnalysisPipeline::new(ServiceCatalog::builtin(), config.generator_settings());
    let analysis = analyze(&pipeline, &args.input)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    for artifact in [pipeline.compose(&analysis)?, pipeline.diagram(&analysis)] {
        let path = args.out_dir.join(&artifact.file_name);
        write_artifact(&artifact, &path)?;
        println!("Wrote {} to {}", artifact.kind, path.display());
    }
    Ok(())
}

pub fn handle_detect(args: &DetectArgs, config: &SvcmapConfig) -> i32 {
    report(run_detect(args, config))
}

pub fn handle_artifact(kind: ArtifactKind, args: &ArtifactArgs, config: &SvcmapConfig) -> i32 {
    report(run_artifact(kind, args, config))
}

pub fn handle_generate(args: &GenerateArgs, config: &SvcmapConfig) -> i32 {
    report(run_generate(args, config))
}

pub fn handle_config(args: &ShowArgs, config: &SvcmapConfig) -> i32 {
    report(
        OutputFormatter::new(args.format.into())
            .format_config(config)
            .map(|output| print!("{}", output)),
    )
}

pub fn handle_catalog(args: &ShowArgs) -> i32 {
    report(
        OutputFormatter::new(args.format.into())
            .format_catalog(ServiceCatalog::builtin())
            .map(|output| print!("{}", output)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::InputFormatArg;
    use tempfile::TempDir;

    fn input(path: &str, format: Option<InputFormatArg>) -> InputArgs {
        InputArgs {
            file: PathBuf::from(path),
            input_format: format,
        }
    }

    #[test]
    fn test_resolve_format_from_extension() {
        assert_eq!(
            resolve_format(&input("application.yaml", None)).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            resolve_format(&input("application.properties", None)).unwrap(),
            ConfigFormat::Properties
        );
    }

    #[test]
    fn test_resolve_format_override() {
        assert_eq!(
            resolve_format(&input("app.conf", Some(InputFormatArg::Properties))).unwrap(),
            ConfigFormat::Properties
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = resolve_format(&input("application.json", None)).unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
        assert_eq!(exit_code(&anyhow::Error::new(err)), EXIT_UNSUPPORTED);
    }

    #[test]
    fn test_generate_writes_both_artifacts() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("application.properties");
        fs::write(
            &config_path,
            "spring.application.name=orders\nspring.kafka.bootstrap-servers=kafka:9092\n",
        )
        .unwrap();

        let out_dir = dir.path().join("out");
        let args = GenerateArgs {
            input: InputArgs {
                file: config_path,
                input_format: None,
            },
            out_dir: out_dir.clone(),
        };

        assert_eq!(handle_generate(&args, &SvcmapConfig::default()), EXIT_SUCCESS);

        let compose = fs::read_to_string(out_dir.join("docker-compose.yml")).unwrap();
        assert!(compose.contains("zookeeper"));
        let diagram = fs::read_to_string(out_dir.join("architecture.drawio")).unwrap();
        assert!(diagram.contains(r#"value="orders""#));
    }

    #[test]
    fn test_artifact_to_file_and_parse_failure() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("application.yml");
        fs::write(&bad, "spring: [unclosed\n").unwrap();

        let args = ArtifactArgs {
            input: InputArgs {
                file: bad,
                input_format: None,
            },
            output: Some(dir.path().join("out.yml")),
        };
        assert_eq!(
            handle_artifact(ArtifactKind::Compose, &args, &SvcmapConfig::default()),
            EXIT_FAILURE
        );
        assert!(!dir.path().join("out.yml").exists());
    }

    #[test]
    fn test_missing_file() {
        let args = ArtifactArgs {
            input: input("/nonexistent/application.yml", None),
            output: None,
        };
        assert_eq!(
            handle_artifact(ArtifactKind::Diagram, &args, &SvcmapConfig::default()),
            EXIT_FAILURE
        );
    }
}
