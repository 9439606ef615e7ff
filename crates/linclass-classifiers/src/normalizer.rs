//! Row-wise normalizer (`MAX`, `L1`, `L2`)

use crate::scores::ScoreMatrix;
use linclass_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Norm {
    /// Divide by the row maximum
    #[serde(rename = "MAX")]
    #[default]
    Max,

    /// Divide by the sum of absolute values
    L1,

    /// Divide by the Euclidean norm
    L2,
}

impl Norm {
    /// ONNX attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Max => "MAX",
            Self::L1 => "L1",
            Self::L2 => "L2",
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Norm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MAX" => Ok(Self::Max),
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            other => Err(Error::unsupported(format!("norm mode '{}'", other))),
        }
    }
}

/// Normalizer operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalizer {
    norm: Norm,
}

impl Normalizer {
    /// Create a normalizer for the given mode
    pub fn new(norm: Norm) -> Self {
        Self { norm }
    }

    /// Normalization mode
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Normalize every row in place
    pub fn apply(&self, scores: &mut ScoreMatrix) {
        for row in scores.iter_rows_mut() {
            normalize_row(self.norm, row);
        }
    }
}

/// Normalize one row in place; a row with a zero divisor is left unchanged
pub fn normalize_row(norm: Norm, row: &mut [f64]) {
    match norm {
        Norm::Max => {
            let largest = row.iter().copied().fold(f64::MIN, f64::max);
            if largest != 0.0 && !row.is_empty() {
                row.iter_mut().for_each(|v| *v /= largest);
            }
        }
        Norm::L1 => {
            let sum: f64 = row.iter().map(|v| v.abs()).sum();
            if sum != 0.0 {
                row.iter_mut().for_each(|v| *v /= sum);
            }
        }
        Norm::L2 => {
            let sum: f64 = row.iter().map(|v| v * v).sum();
            if sum != 0.0 {
                row.iter_mut().for_each(|v| {
                    let magnitude = (*v * *v / sum).sqrt();
                    *v = if *v < 0.0 { -magnitude } else { magnitude };
                });
            }
        }
    }
}
