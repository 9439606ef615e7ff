//! Staged inference pipeline
//!
//! A pipeline runs a fixed sequence of operators over a batch of rows:
//! - a linear classifier producing labels and post-transformed scores
//! - an optional cast of the labels to `i64`
//! - optional normalization of the scores
//! - an optional ZipMap producing label → probability mappings
//!
//! The linear classifier must come first and ZipMap, when present, last.

use crate::cast::cast_labels_to_int64;
use crate::classifier::{ClassificationResult, Classifier};
use crate::linear::{LinearClassifier, LinearOutput};
use crate::normalizer::{Norm, Normalizer};
use crate::scores::ScoreMatrix;
use crate::zipmap::ZipMap;
use linclass_core::{ClassLabels, Error, Label, LabelDistribution, Result};
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// A sequence of inference stages
#[derive(Debug, Clone)]
pub struct ClassifierPipeline {
    name: String,
    stages: Vec<PipelineStage>,
}

/// A single stage in the pipeline
#[derive(Debug, Clone)]
pub enum PipelineStage {
    /// Affine transform, post transform and label selection
    Linear {
        name: String,
        classifier: LinearClassifier,
    },

    /// Cast predicted labels to int64
    Cast { name: String },

    /// Row-wise normalization of the scores
    Normalize {
        name: String,
        normalizer: Normalizer,
    },

    /// Pair scores with class labels
    ZipMap { name: String, zipmap: ZipMap },
}

impl PipelineStage {
    /// Stage name
    pub fn name(&self) -> &str {
        match self {
            Self::Linear { name, .. }
            | Self::Cast { name }
            | Self::Normalize { name, .. }
            | Self::ZipMap { name, .. } => name,
        }
    }

    /// Operator kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "LinearClassifier",
            Self::Cast { .. } => "Cast",
            Self::Normalize { .. } => "Normalizer",
            Self::ZipMap { .. } => "ZipMap",
        }
    }
}

/// Timing for one executed stage
#[derive(Debug, Clone, Serialize)]
pub struct StageTrace {
    /// Stage name
    pub stage_name: String,

    /// Operator kind
    pub kind: &'static str,

    /// Stage execution time
    pub stage_latency_us: u64,
}

/// One row's prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted label
    pub label: Label,

    /// Label → probability mapping, when the pipeline ends in ZipMap
    pub distribution: Option<LabelDistribution>,
}

/// Complete pipeline execution result
#[derive(Debug, Clone, Serialize)]
pub struct PipelineExecutionResult {
    /// Predicted label per row
    pub labels: Vec<Label>,

    /// Predicted labels as int64, when the pipeline casts them
    pub int_labels: Option<Vec<i64>>,

    /// Final scores per row after every score stage
    pub probabilities: ScoreMatrix,

    /// Label → probability mapping per row, when the pipeline ends in ZipMap
    pub distributions: Option<Vec<LabelDistribution>>,

    /// Per-stage timings in execution order
    pub stages: Vec<StageTrace>,

    /// Total pipeline execution time
    pub total_latency_us: u64,
}

impl PipelineExecutionResult {
    /// Pair each label with its distribution
    pub fn predictions(&self) -> Vec<Prediction> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| Prediction {
                label: label.clone(),
                distribution: self.distributions.as_ref().and_then(|d| d.get(i).cloned()),
            })
            .collect()
    }
}

/// Values carried between stages
#[derive(Default)]
struct StageState {
    linear: Option<LinearOutput>,
    int_labels: Option<Vec<i64>>,
    distributions: Option<Vec<LabelDistribution>>,
}

impl StageState {
    fn linear_mut(&mut self, stage: &PipelineStage) -> Result<&mut LinearOutput> {
        self.linear.as_mut().ok_or_else(|| {
            Error::config(format!(
                "stage '{}' ({}) runs before the linear classifier",
                stage.name(),
                stage.kind()
            ))
        })
    }
}

impl ClassifierPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            name: "pipeline".to_string(),
            stages: Vec::new(),
        }
    }

    /// Set the pipeline name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a linear classifier stage
    pub fn add_linear(mut self, name: impl Into<String>, classifier: LinearClassifier) -> Self {
        self.stages.push(PipelineStage::Linear {
            name: name.into(),
            classifier,
        });
        self
    }

    /// Add a label cast stage
    pub fn add_cast(mut self, name: impl Into<String>) -> Self {
        self.stages.push(PipelineStage::Cast { name: name.into() });
        self
    }

    /// Add a normalizer stage
    pub fn add_normalizer(mut self, name: impl Into<String>, norm: Norm) -> Self {
        self.stages.push(PipelineStage::Normalize {
            name: name.into(),
            normalizer: Normalizer::new(norm),
        });
        self
    }

    /// Add a ZipMap stage
    pub fn add_zipmap(mut self, name: impl Into<String>, labels: ClassLabels) -> Self {
        self.stages.push(PipelineStage::ZipMap {
            name: name.into(),
            zipmap: ZipMap::new(labels),
        });
        self
    }

    /// Check stage ordering
    pub fn validate(&self) -> Result<()> {
        match self.stages.first() {
            Some(PipelineStage::Linear { .. }) => {}
            Some(stage) => {
                return Err(Error::config(format!(
                    "pipeline '{}' must start with a linear classifier, found '{}' ({})",
                    self.name,
                    stage.name(),
                    stage.kind()
                )))
            }
            None => {
                return Err(Error::config(format!(
                    "pipeline '{}' has no stages",
                    self.name
                )))
            }
        }

        let last = self.stages.len() - 1;
        for (i, stage) in self.stages.iter().enumerate().skip(1) {
            match stage {
                PipelineStage::Linear { name, .. } => {
                    return Err(Error::config(format!(
                        "pipeline '{}' has a second linear classifier '{}'",
                        self.name, name
                    )))
                }
                PipelineStage::ZipMap { name, .. } if i != last => {
                    return Err(Error::config(format!(
                        "zipmap stage '{}' must be the last stage of pipeline '{}'",
                        name, self.name
                    )))
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Execute the entire pipeline over a batch of rows
    pub fn execute<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<PipelineExecutionResult> {
        self.validate()?;

        let start = Instant::now();
        let mut state = StageState::default();
        let mut traces = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let stage_start = Instant::now();
            self.execute_stage(stage, rows, &mut state)?;
            let stage_latency_us = stage_start.elapsed().as_micros() as u64;

            debug!(
                pipeline = %self.name,
                stage = stage.name(),
                kind = stage.kind(),
                latency_us = stage_latency_us,
                "stage complete"
            );
            traces.push(StageTrace {
                stage_name: stage.name().to_string(),
                kind: stage.kind(),
                stage_latency_us,
            });
        }

        let LinearOutput { labels, scores } = state
            .linear
            .ok_or_else(|| Error::config(format!("pipeline '{}' produced no scores", self.name)))?;

        Ok(PipelineExecutionResult {
            labels,
            int_labels: state.int_labels,
            probabilities: scores,
            distributions: state.distributions,
            stages: traces,
            total_latency_us: start.elapsed().as_micros() as u64,
        })
    }

    /// Execute a single stage
    fn execute_stage<R: AsRef<[f64]>>(
        &self,
        stage: &PipelineStage,
        rows: &[R],
        state: &mut StageState,
    ) -> Result<()> {
        match stage {
            PipelineStage::Linear { classifier, .. } => {
                state.linear = Some(classifier.compute(rows)?);
            }

            PipelineStage::Cast { .. } => {
                let output = state.linear_mut(stage)?;
                let ints = cast_labels_to_int64(&output.labels)?;
                output.labels = ints.iter().copied().map(Label::Int).collect();
                state.int_labels = Some(ints);
            }

            PipelineStage::Normalize { normalizer, .. } => {
                let output = state.linear_mut(stage)?;
                normalizer.apply(&mut output.scores);
            }

            PipelineStage::ZipMap { zipmap, .. } => {
                let output = state.linear_mut(stage)?;
                let distributions = zipmap.apply(&output.scores)?;
                state.distributions = Some(distributions);
            }
        }

        Ok(())
    }

    /// Class labels of the pipeline's linear classifier
    pub fn class_labels(&self) -> Option<&ClassLabels> {
        self.stages.iter().find_map(|stage| match stage {
            PipelineStage::Linear { classifier, .. } => Some(classifier.labels()),
            _ => None,
        })
    }

    /// Stages in execution order
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Get number of stages in pipeline
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl Default for ClassifierPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for ClassifierPipeline {
    fn classify(&self, input: &[f64]) -> Result<ClassificationResult> {
        let mut results = self.classify_batch(&[input.to_vec()])?;
        results
            .pop()
            .ok_or_else(|| Error::config(format!("pipeline '{}' returned no result", self.name)))
    }

    /// Classify the batch in one pipeline execution
    ///
    /// Every result carries the latency of the whole batch, not a per-row
    /// share of it.
    fn classify_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<ClassificationResult>> {
        let result = self.execute(rows)?;

        let distributions = match result.distributions {
            Some(distributions) => distributions,
            None => {
                let labels = self.class_labels().cloned().ok_or_else(|| {
                    Error::config(format!("pipeline '{}' has no class labels", self.name))
                })?;
                ZipMap::new(labels).apply(&result.probabilities)?
            }
        };

        let latency_us = result.total_latency_us;
        Ok(result
            .labels
            .into_iter()
            .zip(distributions)
            .map(|(label, distribution)| ClassificationResult {
                label,
                distribution,
                latency_us,
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for constructing pipelines fluently
pub struct PipelineBuilder {
    pipeline: ClassifierPipeline,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            pipeline: ClassifierPipeline::new().with_name(name),
        }
    }

    /// Add the linear classifier
    pub fn linear(mut self, name: impl Into<String>, classifier: LinearClassifier) -> Self {
        self.pipeline = self.pipeline.add_linear(name, classifier);
        self
    }

    /// Add a label cast
    pub fn cast(mut self, name: impl Into<String>) -> Self {
        self.pipeline = self.pipeline.add_cast(name);
        self
    }

    /// Add a normalizer
    pub fn normalize(mut self, name: impl Into<String>, norm: Norm) -> Self {
        self.pipeline = self.pipeline.add_normalizer(name, norm);
        self
    }

    /// Add a ZipMap
    pub fn zipmap(mut self, name: impl Into<String>, labels: ClassLabels) -> Self {
        self.pipeline = self.pipeline.add_zipmap(name, labels);
        self
    }

    /// Build and validate the pipeline
    pub fn build(self) -> Result<ClassifierPipeline> {
        self.pipeline.validate()?;
        Ok(self.pipeline)
    }
}
