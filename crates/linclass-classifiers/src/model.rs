//! Hardcoded three-class linear model
//!
//! Four input features, three classes labelled `0, 1, 2`. The constants are
//! statics and are borrowed, never copied, by the classifier built from them.

use crate::linear::LinearClassifier;
use crate::normalizer::Norm;
use crate::pipeline::{ClassifierPipeline, PipelineBuilder};
use crate::transform::PostTransform;
use linclass_core::{ClassLabels, Result};
use std::borrow::Cow;

/// Number of input features
pub const NUM_FEATURES: usize = 4;

/// Number of classes
pub const NUM_CLASSES: usize = 3;

/// Row-major coefficients, one row of `NUM_FEATURES` per class
#[rustfmt::skip]
pub static COEFFICIENTS: [f64; NUM_CLASSES * NUM_FEATURES] = [
    -0.50130147, 0.8419699, -2.2627807, -0.96755445,
    0.5673314, -0.37099984, -0.17644618, -0.8879377,
    -0.06602986, -0.47097006, 2.4392269, 1.8554921,
];

/// Per-class intercepts
pub static INTERCEPTS: [f64; NUM_CLASSES] = [9.628701, 1.8089765, -11.437677];

/// Class labels, index-aligned with coefficient rows
pub static CLASS_LABELS: [i64; NUM_CLASSES] = [0, 1, 2];

/// Input classified by the reference run
pub const REFERENCE_INPUT: [f64; NUM_FEATURES] = [1.0, 2.0, 3.0, 4.0];

/// Class labels as a `ClassLabels` value
pub fn class_labels() -> ClassLabels {
    ClassLabels::Ints(CLASS_LABELS.to_vec())
}

/// The constant classifier with the given post transform
pub fn model_with_transform(post_transform: PostTransform) -> Result<LinearClassifier> {
    Ok(LinearClassifier::new(
        Cow::Borrowed(&COEFFICIENTS[..]),
        Some(Cow::Borrowed(&INTERCEPTS[..])),
        class_labels(),
    )?
    .with_post_transform(post_transform))
}

/// The constant classifier with softmax scores
pub fn reference_model() -> Result<LinearClassifier> {
    model_with_transform(PostTransform::Softmax)
}

/// Linear classifier → cast → L1 normalizer → ZipMap over the constant model
pub fn reference_pipeline() -> Result<ClassifierPipeline> {
    PipelineBuilder::new("reference")
        .linear("linear_classifier", reference_model()?)
        .cast("cast")
        .normalize("normalizer", Norm::L1)
        .zipmap("zipmap", class_labels())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use linclass_core::Label;

    #[test]
    fn test_constant_shapes_agree() {
        let model = reference_model().unwrap();
        assert_eq!(model.num_features(), Some(NUM_FEATURES));
        assert_eq!(model.labels().len(), NUM_CLASSES);
        assert_eq!(model.intercepts().map(<[f64]>::len), Some(NUM_CLASSES));
    }

    #[test]
    fn test_reference_logits() {
        let logits = reference_model().unwrap().logits(&[REFERENCE_INPUT]).unwrap();
        let expected = [0.15277943, -2.44678112, 2.29400212];
        for (a, e) in logits.row(0).iter().zip(expected) {
            assert!((a - e).abs() < 1e-7, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_reference_prediction() {
        let result = reference_pipeline().unwrap().classify(&REFERENCE_INPUT).unwrap();

        assert_eq!(result.label, Label::Int(2));
        let probs = result.distribution.values();
        let expected = [0.10433901747512819, 0.007753038499504878, 0.8879079440253669];
        for (a, e) in probs.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_model_borrows_statics() {
        let model = reference_model().unwrap();
        assert!(std::ptr::eq(model.coefficients(), &COEFFICIENTS[..]));
    }
}
