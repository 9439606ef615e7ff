//! Score post transforms applied after the affine step
//!
//! Names follow the ONNX-ML `post_transform` attribute: `NONE`, `SOFTMAX`,
//! `SOFTMAX_ZERO`, `LOGISTIC`, `PROBIT`.

use crate::scores::ScoreMatrix;
use linclass_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Values within this distance of zero are treated as zero by `SOFTMAX_ZERO`
const SOFTMAX_ZERO_EPSILON: f64 = 1e-7;

/// Constant of the Winitzki approximation to the inverse error function
const ERF_INV_A: f64 = 0.147;

/// Transform applied to raw class scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostTransform {
    /// Raw scores
    #[default]
    None,

    /// Row-wise numerically stable softmax
    Softmax,

    /// Softmax that leaves (near-)zero scores scaled rather than exponentiated
    SoftmaxZero,

    /// Element-wise sigmoid
    Logistic,

    /// Element-wise inverse of the standard normal CDF
    Probit,
}

impl PostTransform {
    /// ONNX attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Softmax => "SOFTMAX",
            Self::SoftmaxZero => "SOFTMAX_ZERO",
            Self::Logistic => "LOGISTIC",
            Self::Probit => "PROBIT",
        }
    }

    /// Apply the transform to every row in place
    pub fn apply(&self, scores: &mut ScoreMatrix) {
        for row in scores.iter_rows_mut() {
            self.apply_row(row);
        }
    }

    /// Apply the transform to one row in place
    pub fn apply_row(&self, row: &mut [f64]) {
        match self {
            Self::None => {}
            Self::Softmax => softmax_in_place(row),
            Self::SoftmaxZero => softmax_zero_in_place(row),
            Self::Logistic => row.iter_mut().for_each(|v| *v = logistic(*v)),
            Self::Probit => row.iter_mut().for_each(|v| *v = probit(*v)),
        }
    }
}

impl fmt::Display for PostTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostTransform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NONE" => Ok(Self::None),
            "SOFTMAX" => Ok(Self::Softmax),
            "SOFTMAX_ZERO" => Ok(Self::SoftmaxZero),
            "LOGISTIC" => Ok(Self::Logistic),
            "PROBIT" => Ok(Self::Probit),
            other => Err(Error::unsupported(format!(
                "post transform '{}'",
                other
            ))),
        }
    }
}

/// Numerically stable softmax over one row
///
/// The row maximum is subtracted before exponentiating. A row whose
/// exponentials sum to zero is left as the exponentials.
pub fn softmax_in_place(row: &mut [f64]) {
    let Some(max) = row.iter().copied().reduce(f64::max) else {
        return;
    };

    let mut sum = 0.0;
    for v in row.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }

    if sum != 0.0 {
        row.iter_mut().for_each(|v| *v /= sum);
    }
}

/// Softmax variant that scales near-zero entries by `exp(-max)`
///
/// A row that sums to zero becomes all `0.5`.
pub fn softmax_zero_in_place(row: &mut [f64]) {
    let Some(max) = row.iter().copied().reduce(f64::max) else {
        return;
    };
    let exp_neg_max = (-max).exp();

    let mut sum = 0.0;
    for v in row.iter_mut() {
        if v.abs() > SOFTMAX_ZERO_EPSILON {
            *v = (*v - max).exp();
        } else {
            *v *= exp_neg_max;
        }
        sum += *v;
    }

    if sum == 0.0 {
        row.iter_mut().for_each(|v| *v = 0.5);
    } else {
        row.iter_mut().for_each(|v| *v /= sum);
    }
}

/// Sigmoid
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Probit: `sqrt(2) * erfinv(2x - 1)`
pub fn probit(x: f64) -> f64 {
    std::f64::consts::SQRT_2 * erf_inv(x * 2.0 - 1.0)
}

/// Winitzki approximation of the inverse error function
fn erf_inv(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let t = (1.0 - x) * (1.0 + x);
    if t == 0.0 {
        return 0.0;
    }
    let ln = t.ln();
    let v = 2.0 / (std::f64::consts::PI * ERF_INV_A) + 0.5 * ln;
    let v2 = ln / ERF_INV_A;
    sign * (-v + (v * v - v2).sqrt()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < tol, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut row = [0.15277943, -2.44678112, 2.29400212];
        softmax_in_place(&mut row);
        assert_close(&row, &[0.104339017, 0.007753038, 0.887907944], 1e-8);
        assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_large_logits_do_not_overflow() {
        let mut row = [1000.0, 1000.0, 999.0];
        softmax_in_place(&mut row);
        assert!(row.iter().all(|v| v.is_finite()));
        assert!((row[0] - row[1]).abs() < 1e-15);
    }

    #[test]
    fn test_softmax_empty_row() {
        let mut row: [f64; 0] = [];
        softmax_in_place(&mut row);
    }

    #[test]
    fn test_softmax_zero_keeps_zero_entries_small() {
        let mut row = [0.0, 2.0, 1.0];
        softmax_zero_in_place(&mut row);
        // exp(2 - 2) = 1, exp(1 - 2) = e^-1, 0 * e^-2 = 0
        let e = (-1.0f64).exp();
        assert_close(&row, &[0.0, 1.0 / (1.0 + e), e / (1.0 + e)], 1e-12);
    }

    #[test]
    fn test_softmax_zero_all_zero_row() {
        let mut row = [0.0, 0.0];
        softmax_zero_in_place(&mut row);
        assert_eq!(row, [0.5, 0.5]);
    }

    #[test]
    fn test_logistic() {
        assert_eq!(logistic(0.0), 0.5);
        assert!((logistic(-4.14164229) - 0.015647972).abs() < 1e-6);
        assert!((logistic(1.1092185) - 0.751983387).abs() < 1e-6);
    }

    #[test]
    fn test_probit() {
        assert!(probit(0.5).abs() < 1e-12);
        // Phi^-1(0.975) ~= 1.96; the approximation is good to ~1e-3
        assert!((probit(0.975) - 1.959964).abs() < 5e-3);
        assert!((probit(0.025) + 1.959964).abs() < 5e-3);
    }

    #[test]
    fn test_parse_and_display() {
        for name in ["NONE", "SOFTMAX", "SOFTMAX_ZERO", "LOGISTIC", "PROBIT"] {
            let t: PostTransform = name.parse().unwrap();
            assert_eq!(t.to_string(), name);
        }
        assert!(matches!(
            "TANH".parse::<PostTransform>(),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let t: PostTransform = serde_yaml::from_str("SOFTMAX_ZERO").unwrap();
        assert_eq!(t, PostTransform::SoftmaxZero);
        assert_eq!(serde_json::to_string(&PostTransform::Logistic).unwrap(), "\"LOGISTIC\"");
    }

    #[test]
    fn test_apply_to_matrix() {
        let mut m = ScoreMatrix::from_rows(&[vec![1.0, 1.0], vec![0.0, 0.0]]).unwrap();
        PostTransform::Softmax.apply(&mut m);
        assert_eq!(m.to_rows(), vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
    }
}
