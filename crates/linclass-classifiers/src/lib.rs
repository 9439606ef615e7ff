//! linclass Classifiers
//!
//! Inference operators for a fixed multinomial linear classifier and the
//! pipeline that chains them:
//!
//! affine transform → softmax → argmax label → int64 cast →
//! L1 renormalization → label/probability mapping (ZipMap)
//!
//! Every operator is a pure function of its input; the model constants are
//! read-only statics.

pub mod cast;
pub mod classifier;
pub mod config;
pub mod linear;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod scores;
pub mod transform;
pub mod zipmap;

pub use classifier::{ClassificationResult, Classifier};
pub use config::{load_config, PipelineConfig};
pub use linear::{LinearClassifier, LinearOutput};
pub use model::{reference_model, reference_pipeline};
pub use normalizer::{Norm, Normalizer};
pub use pipeline::{
    ClassifierPipeline, PipelineBuilder, PipelineExecutionResult, PipelineStage, Prediction,
    StageTrace,
};
pub use scores::ScoreMatrix;
pub use transform::PostTransform;
pub use zipmap::ZipMap;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::linear::LinearClassifier;
    pub use crate::model::{reference_model, reference_pipeline, REFERENCE_INPUT};
    pub use crate::normalizer::Norm;
    pub use crate::pipeline::{ClassifierPipeline, PipelineBuilder};
    pub use crate::transform::PostTransform;
    pub use linclass_core::{ClassLabels, Error, Label, LabelDistribution, Result};
}
