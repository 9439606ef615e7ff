//! Pipeline configuration
//!
//! Selects options of the reference pipeline (post transform, label cast,
//! normalizer, ZipMap). Model data is never read from configuration.

use crate::model::{class_labels, model_with_transform};
use crate::normalizer::Norm;
use crate::pipeline::{ClassifierPipeline, PipelineBuilder};
use crate::transform::PostTransform;
use linclass_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Options for assembling the inference pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Pipeline name used in logs and results
    #[serde(default = "default_name")]
    pub name: String,

    /// Transform applied to the linear scores
    #[serde(default = "default_post_transform")]
    pub post_transform: PostTransform,

    /// Cast predicted labels to int64
    #[serde(default = "default_true")]
    pub cast_labels: bool,

    /// Normalization of the scores; `null` skips the stage
    #[serde(default = "default_normalizer")]
    pub normalizer: Option<Norm>,

    /// Emit label → probability mappings
    #[serde(default = "default_true")]
    pub zipmap: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            post_transform: default_post_transform(),
            cast_labels: true,
            normalizer: default_normalizer(),
            zipmap: true,
        }
    }
}

impl PipelineConfig {
    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Build the pipeline over the hardcoded model
    pub fn build_pipeline(&self) -> Result<ClassifierPipeline> {
        let mut builder = PipelineBuilder::new(self.name.clone())
            .linear("linear_classifier", model_with_transform(self.post_transform)?);

        if self.cast_labels {
            builder = builder.cast("cast");
        }
        if let Some(norm) = self.normalizer {
            builder = builder.normalize("normalizer", norm);
        }
        if self.zipmap {
            builder = builder.zipmap("zipmap", class_labels());
        }

        let pipeline = builder.build()?;
        debug!(
            pipeline = %self.name,
            post_transform = %self.post_transform,
            stages = pipeline.stage_count(),
            "Built pipeline from configuration"
        );
        Ok(pipeline)
    }
}

/// Load configuration from a file, falling back to defaults when it is absent
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) if path.exists() => {
            info!("Loading pipeline configuration from {:?}", path);
            PipelineConfig::from_file(path).map_err(|e| {
                Error::config(format!("Failed to load pipeline config {:?}: {}", path, e))
            })
        }
        Some(path) => {
            info!("Pipeline config {:?} not found, using defaults", path);
            Ok(PipelineConfig::default())
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn default_name() -> String {
    "reference".to_string()
}

fn default_post_transform() -> PostTransform {
    PostTransform::Softmax
}

fn default_normalizer() -> Option<Norm> {
    Some(Norm::L1)
}

fn default_true() -> bool {
    true
}
