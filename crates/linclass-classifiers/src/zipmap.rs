//! ZipMap: pair class labels with per-row probabilities

use crate::scores::ScoreMatrix;
use linclass_core::{ClassLabels, Error, Label, LabelDistribution, Result};

/// Pairs each score column with its class label
///
/// Columns are matched to label *values* in declaration order, so labels
/// that are non-contiguous or reordered still land on the right column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipMap {
    labels: ClassLabels,
    // Labels are exactly 0..n, so a column index is its own label
    array_like: bool,
}

impl ZipMap {
    /// Create a ZipMap over the given labels
    pub fn new(labels: ClassLabels) -> Self {
        let array_like = labels.is_array_like();
        Self { labels, array_like }
    }

    /// Whether the labels are the column indices `0..n`
    pub fn is_array_like(&self) -> bool {
        self.array_like
    }

    /// Labels used for the mapping
    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Build one label distribution per row
    pub fn apply(&self, scores: &ScoreMatrix) -> Result<Vec<LabelDistribution>> {
        if scores.rows() > 0 && scores.cols() != self.labels.len() {
            return Err(Error::dimension_mismatch(
                "zipmap score columns",
                self.labels.len(),
                scores.cols(),
            ));
        }

        if self.array_like {
            return Ok(scores
                .iter_rows()
                .map(|row| {
                    let entries = row
                        .iter()
                        .enumerate()
                        .map(|(j, p)| (Label::Int(j as i64), *p))
                        .collect();
                    LabelDistribution::new(entries)
                })
                .collect());
        }

        Ok(scores
            .iter_rows()
            .map(|row| {
                LabelDistribution::new(self.labels.iter().zip(row.iter().copied()).collect())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_labels() {
        let zipmap = ZipMap::new(ClassLabels::Ints(vec![0, 1, 2]));
        let scores = ScoreMatrix::from_rows(&[vec![0.1, 0.2, 0.7], vec![0.5, 0.25, 0.25]]).unwrap();

        let dists = zipmap.apply(&scores).unwrap();
        assert_eq!(dists.len(), 2);
        assert_eq!(dists[0].get(&Label::Int(2)), Some(0.7));
        assert_eq!(dists[1].get(&Label::Int(0)), Some(0.5));
    }

    #[test]
    fn test_array_like_matches_label_lookup() {
        let indexed = ZipMap::new(ClassLabels::Ints(vec![0, 1, 2]));
        let shifted = ZipMap::new(ClassLabels::Ints(vec![1, 2, 3]));
        assert!(indexed.is_array_like());
        assert!(!shifted.is_array_like());
        assert!(!ZipMap::new(ClassLabels::Strings(vec!["a".into()])).is_array_like());

        let scores = ScoreMatrix::from_rows(&[vec![0.1, 0.2, 0.7]]).unwrap();
        let dists = indexed.apply(&scores).unwrap();
        assert_eq!(
            dists[0],
            LabelDistribution::new(vec![
                (Label::Int(0), 0.1),
                (Label::Int(1), 0.2),
                (Label::Int(2), 0.7),
            ])
        );

        let dists = shifted.apply(&scores).unwrap();
        assert_eq!(dists[0].get(&Label::Int(3)), Some(0.7));
        assert_eq!(dists[0].get(&Label::Int(0)), None);
    }

    #[test]
    fn test_reordered_labels_use_label_values() {
        let zipmap = ZipMap::new(ClassLabels::Ints(vec![10, 3, 7]));
        let scores = ScoreMatrix::from_rows(&[vec![0.6, 0.3, 0.1]]).unwrap();

        let dists = zipmap.apply(&scores).unwrap();
        let dist = &dists[0];
        assert_eq!(dist.get(&Label::Int(10)), Some(0.6));
        assert_eq!(dist.get(&Label::Int(3)), Some(0.3));
        assert_eq!(dist.get(&Label::Int(7)), Some(0.1));
        assert_eq!(dist.get(&Label::Int(0)), None);
        assert_eq!(
            dist.iter().map(|(l, _)| l.clone()).collect::<Vec<_>>(),
            vec![Label::Int(10), Label::Int(3), Label::Int(7)]
        );
    }

    #[test]
    fn test_string_labels() {
        let zipmap = ZipMap::new(ClassLabels::Strings(vec!["no".into(), "yes".into()]));
        let scores = ScoreMatrix::from_rows(&[vec![0.9, 0.1]]).unwrap();
        let dists = zipmap.apply(&scores).unwrap();
        let dist = &dists[0];
        assert_eq!(dist.get(&Label::from("yes")), Some(0.1));
    }

    #[test]
    fn test_width_mismatch() {
        let zipmap = ZipMap::new(ClassLabels::Ints(vec![0, 1, 2]));
        let scores = ScoreMatrix::from_rows(&[vec![0.5, 0.5]]).unwrap();
        assert!(zipmap.apply(&scores).unwrap_err().is_dimension_mismatch());
    }
}
