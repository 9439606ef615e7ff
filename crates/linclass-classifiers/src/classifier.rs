//! Classifier trait and common types

use crate::linear::LinearClassifier;
use crate::zipmap::ZipMap;
use linclass_core::{Label, LabelDistribution, Result};
use serde::Serialize;
use std::time::Instant;

/// Trait for all classifiers
pub trait Classifier: Send + Sync {
    /// Classify a single feature row
    fn classify(&self, input: &[f64]) -> Result<ClassificationResult>;

    /// Classify a batch; the whole batch fails if any row fails
    fn classify_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<ClassificationResult>> {
        rows.iter().map(|row| self.classify(row)).collect()
    }

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Predicted label
    pub label: Label,

    /// Probability per class label
    pub distribution: LabelDistribution,

    /// Latency in microseconds
    ///
    /// Results from a single batched call share that call's latency.
    pub latency_us: u64,
}

impl Classifier for LinearClassifier {
    fn classify(&self, input: &[f64]) -> Result<ClassificationResult> {
        let start = Instant::now();

        let mut output = self.compute(&[input])?;
        let distribution = ZipMap::new(self.labels().clone())
            .apply(&output.scores)?
            .pop()
            .unwrap_or_default();
        let label = output.labels.remove(0);

        Ok(ClassificationResult {
            label,
            distribution,
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        "linear_classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::PostTransform;
    use linclass_core::ClassLabels;

    fn classifier() -> LinearClassifier {
        LinearClassifier::new(
            vec![1.0, 0.0, 0.0, 1.0],
            Some(vec![0.0, 0.0].into()),
            ClassLabels::Strings(vec!["left".into(), "right".into()]),
        )
        .unwrap()
        .with_post_transform(PostTransform::Softmax)
    }

    #[test]
    fn test_linear_classifier_as_classifier() {
        let result = classifier().classify(&[0.0, 3.0]).unwrap();

        assert_eq!(result.label, Label::from("right"));
        assert!(result.distribution.get(&Label::from("right")).unwrap() > 0.9);
        assert!((result.distribution.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_classify_batch() {
        let results = classifier()
            .classify_batch(&[vec![2.0, 0.0], vec![0.0, 2.0]])
            .unwrap();
        assert_eq!(results[0].label, Label::from("left"));
        assert_eq!(results[1].label, Label::from("right"));
    }

    #[test]
    fn test_classify_batch_fails_whole_batch() {
        let err = classifier()
            .classify_batch(&[vec![2.0, 0.0], vec![0.0]])
            .unwrap_err();
        assert!(err.is_dimension_mismatch());
    }
}
