//! Row-major score matrix shared by the pipeline operators

use serde::Serialize;

/// Dense row-major matrix of per-class scores, one row per input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ScoreMatrix {
    /// Zero-filled matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from rows; every row must have the same width
    ///
    /// Returns `None` when the rows are ragged.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (classes)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow one row
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Mutably borrow one row
    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        let start = index * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, so an empty-width matrix yields no rows
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Iterate mutably over rows
    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        let rows = self.rows;
        self.data.chunks_mut(self.cols.max(1)).take(rows)
    }

    /// Flat row-major values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Rows as owned vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }
}
