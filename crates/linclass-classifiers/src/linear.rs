//! Linear classifier operator
//!
//! Computes `scores = X · Wᵀ + b` for a batch of rows, applies the post
//! transform, and picks a label per row. Supports the multiclass layout
//! (one coefficient row per class) and the binary layout (a single
//! coefficient row with two labels).

use crate::scores::ScoreMatrix;
use crate::transform::PostTransform;
use linclass_core::{ClassLabels, Error, Label, Result};
use std::borrow::Cow;
use tracing::trace;

/// Output of a linear classifier over a batch
#[derive(Debug, Clone, PartialEq)]
pub struct LinearOutput {
    /// Predicted label per row
    pub labels: Vec<Label>,

    /// Post-transformed scores, one column per class label
    pub scores: ScoreMatrix,
}

/// ONNX-ML style linear classifier with fixed coefficients
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    coefficients: Cow<'static, [f64]>,
    intercepts: Option<Cow<'static, [f64]>>,
    labels: ClassLabels,
    post_transform: PostTransform,
}

impl LinearClassifier {
    /// Create a classifier from flat row-major coefficients
    ///
    /// With intercepts, the coefficient count must be a multiple of the
    /// intercept count, which fixes the number of coefficient rows.
    /// Without intercepts the shape is resolved from the input width.
    pub fn new(
        coefficients: impl Into<Cow<'static, [f64]>>,
        intercepts: Option<Cow<'static, [f64]>>,
        labels: ClassLabels,
    ) -> Result<Self> {
        let coefficients = coefficients.into();
        if coefficients.is_empty() {
            return Err(Error::dimension_mismatch("coefficient length", 1, 0));
        }

        if let Some(intercepts) = &intercepts {
            if intercepts.is_empty() || coefficients.len() % intercepts.len() != 0 {
                return Err(Error::dimension_mismatch(
                    "coefficient length (multiple of intercept count)",
                    intercepts.len(),
                    coefficients.len(),
                ));
            }
            let class_rows = intercepts.len();
            let expected_labels = if class_rows == 1 { 2 } else { class_rows };
            if labels.len() != expected_labels {
                return Err(Error::dimension_mismatch(
                    "class label count",
                    expected_labels,
                    labels.len(),
                ));
            }
        } else if labels.is_empty() {
            return Err(Error::dimension_mismatch("class label count", 1, 0));
        }

        Ok(Self {
            coefficients,
            intercepts,
            labels,
            post_transform: PostTransform::None,
        })
    }

    /// Set the post transform
    pub fn with_post_transform(mut self, post_transform: PostTransform) -> Self {
        self.post_transform = post_transform;
        self
    }

    /// Class labels, index-aligned with score columns
    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Post transform applied after the affine step
    pub fn post_transform(&self) -> PostTransform {
        self.post_transform
    }

    /// Flat row-major coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Intercepts, if any
    pub fn intercepts(&self) -> Option<&[f64]> {
        self.intercepts.as_deref()
    }

    /// Number of input features, when fixed by the intercepts
    pub fn num_features(&self) -> Option<usize> {
        self.intercepts
            .as_ref()
            .map(|b| self.coefficients.len() / b.len())
    }

    /// Resolve `(coefficient_rows, features)` for a given input width
    fn shape_for(&self, width: usize) -> Result<(usize, usize)> {
        match self.num_features() {
            Some(features) if features == width => {
                Ok((self.coefficients.len() / features, features))
            }
            Some(features) => Err(Error::dimension_mismatch(
                "input feature count",
                features,
                width,
            )),
            None => {
                if width == 0 || self.coefficients.len() % width != 0 {
                    return Err(Error::dimension_mismatch(
                        "input feature count (divisor of coefficient length)",
                        self.coefficients.len(),
                        width,
                    ));
                }
                let rows = self.coefficients.len() / width;
                let expected_labels = if rows == 1 { 2 } else { rows };
                if self.labels.len() != expected_labels {
                    return Err(Error::dimension_mismatch(
                        "class label count",
                        expected_labels,
                        self.labels.len(),
                    ));
                }
                Ok((rows, width))
            }
        }
    }

    /// Raw affine scores `X · Wᵀ + b`, one column per coefficient row
    pub fn logits<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<ScoreMatrix> {
        let width = match rows.first() {
            Some(row) => row.as_ref().len(),
            None => self.num_features().unwrap_or(0),
        };
        let (class_rows, features) = if rows.is_empty() {
            (self.intercepts.as_ref().map(|b| b.len()).unwrap_or(0), width)
        } else {
            self.shape_for(width)?
        };

        let mut scores = ScoreMatrix::zeros(rows.len(), class_rows);
        for (i, input) in rows.iter().enumerate() {
            let input = input.as_ref();
            if input.len() != features {
                return Err(Error::dimension_mismatch(
                    format!("input row {}", i),
                    features,
                    input.len(),
                ));
            }

            let out = scores.row_mut(i);
            for (c, weights) in self.coefficients.chunks_exact(features).enumerate() {
                let dot: f64 = input.iter().zip(weights).map(|(x, w)| x * w).sum();
                let bias = self.intercepts.as_ref().map(|b| b[c]).unwrap_or(0.0);
                out[c] = dot + bias;
            }
            trace!(row = i, logits = ?out, "affine transform");
        }

        Ok(scores)
    }

    /// Classify a batch: label selection on the raw scores, then the post
    /// transform
    ///
    /// `SOFTMAX_ZERO` does not preserve ordering, so the label is always
    /// taken from the affine scores.
    pub fn compute<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<LinearOutput> {
        let logits = self.logits(rows)?;

        if logits.cols() == 1 {
            return self.compute_binary(&logits);
        }

        let labels = logits
            .iter_rows()
            .map(|row| {
                let best = argmax(row);
                self.labels.get(best).ok_or_else(|| {
                    Error::dimension_mismatch("class label count", best + 1, self.labels.len())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut scores = logits;
        self.post_transform.apply(&mut scores);

        Ok(LinearOutput { labels, scores })
    }

    /// Binary layout: one score per row expanded to `[1 - p, p]`
    fn compute_binary(&self, logits: &ScoreMatrix) -> Result<LinearOutput> {
        let threshold = match self.post_transform {
            PostTransform::None => 0.0,
            PostTransform::Logistic => 0.5,
            other => {
                return Err(Error::unsupported(format!(
                    "post transform {} on a binary linear classifier",
                    other
                )))
            }
        };

        let mut scores = ScoreMatrix::zeros(logits.rows(), 2);
        let mut labels = Vec::with_capacity(logits.rows());
        for (i, row) in logits.iter_rows().enumerate() {
            let mut p = row[0];
            if self.post_transform == PostTransform::Logistic {
                p = crate::transform::logistic(p);
            }
            let out = scores.row_mut(i);
            out[0] = 1.0 - p;
            out[1] = p;

            let index = if p > threshold { 1 } else { 0 };
            let label = self.labels.get(index).ok_or_else(|| {
                Error::dimension_mismatch("class label count", 2, self.labels.len())
            })?;
            labels.push(label);
        }

        Ok(LinearOutput { labels, scores })
    }
}

/// Index of the largest value; ties resolve to the lowest index
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
