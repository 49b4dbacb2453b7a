use crate::catalog::ServiceCatalog;
use crate::detection::{DependencyDetector, DependencyEdge};
use crate::generate::{ComposeGenerator, DiagramGenerator, GenerateError, GeneratorSettings};
use crate::normalize::{normalize, ConfigFormat, NormalizedConfig, ParseError};
use crate::output::{Artifact, ArtifactKind};
use serde::Serialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Result of normalizing and scanning one configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub application_name: String,
    pub format: ConfigFormat,
    pub dependencies: Vec<DependencyEdge>,
    #[serde(skip)]
    pub config: NormalizedConfig,
}

impl Analysis {
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// Runs the normalize → detect → generate chain against one catalog
pub struct AnalysisPipeline<'a> {
    catalog: &'a ServiceCatalog,
    settings: GeneratorSettings,
}

impl Default for AnalysisPipeline<'static> {
    fn default() -> Self {
        Self::new(ServiceCatalog::builtin(), GeneratorSettings::default())
    }
}

impl<'a> AnalysisPipeline<'a> {
    pub fn new(catalog: &'a ServiceCatalog, settings: GeneratorSettings) -> Self {
        Self { catalog, settings }
    }

    /// Parse failures stop here; nothing is detected or generated.
    pub fn analyze(&self, content: &str, format: ConfigFormat) -> Result<Analysis, ParseError> {
        let config = normalize(content, format)?;
        let dependencies = DependencyDetector::new(self.catalog).detect(&config);

        info!(
            application = config.application_name(),
            %format,
            dependencies = dependencies.len(),
            "Analyzed configuration"
        );

        Ok(Analysis {
            application_name: config.application_name().to_string(),
            format,
            dependencies,
            config,
        })
    }

    pub fn compose(&self, analysis: &Analysis) -> Result<Artifact, GenerateError> {
        let content = ComposeGenerator::new(self.catalog, self.settings.clone())
            .generate(&analysis.application_name, &analysis.dependencies)?;
        Ok(Artifact::new(ArtifactKind::Compose, content))
    }

    pub fn diagram(&self, analysis: &Analysis) -> Artifact {
        let content =
            DiagramGenerator::new().generate(&analysis.application_name, &analysis.dependencies);
        Artifact::new(ArtifactKind::Diagram, content)
    }

    /// Both artifacts, manifest first.
    pub fn artifacts(&self, content: &str, format: ConfigFormat) -> Result<Vec<Artifact>, PipelineError> {
        let analysis = self.analyze(content, format)?;
        Ok(vec![self.compose(&analysis)?, self.diagram(&analysis)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_properties() {
        let analysis = AnalysisPipeline::default()
            .analyze(
                "spring.application.name=orders\nspring.redis.host=cache\n",
                ConfigFormat::Properties,
            )
            .unwrap();

        assert_eq!(analysis.application_name, "orders");
        assert_eq!(analysis.format, ConfigFormat::Properties);
        assert_eq!(analysis.dependencies, vec![DependencyEdge::new("orders", "redis")]);
        assert!(analysis.has_dependencies());
    }

    #[test]
    fn test_parse_failure_stops_pipeline() {
        let result = AnalysisPipeline::default().artifacts("spring: [", ConfigFormat::Yaml);
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }

    #[test]
    fn test_artifacts() {
        let artifacts = AnalysisPipeline::default()
            .artifacts("spring.kafka.bootstrap-servers=k:9092\n", ConfigFormat::Properties)
            .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].kind, ArtifactKind::Compose);
        assert!(artifacts[0].content.contains("zookeeper"));
        assert_eq!(artifacts[1].kind, ArtifactKind::Diagram);
        assert!(artifacts[1].content.contains(r#"value="kafka""#));
    }

    #[test]
    fn test_analysis_json_skips_config() {
        let analysis = AnalysisPipeline::default()
            .analyze("spring.redis.host=cache\n", ConfigFormat::Properties)
            .unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["application_name"], "unknown-service");
        assert_eq!(json["format"], "properties");
        assert_eq!(json["dependencies"][0]["to_service"], "redis");
        assert!(json.get("config").is_none());
    }
}
