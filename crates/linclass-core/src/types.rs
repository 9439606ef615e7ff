//! Core types for linclass: class labels and label distributions

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single class label, either an integer or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer label (`classlabels_ints`)
    Int(i64),

    /// String label (`classlabels_strings`)
    Text(String),
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered class labels, index-aligned with the classifier's output columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabels {
    /// Integer labels
    Ints(Vec<i64>),

    /// String labels
    Strings(Vec<String>),
}

impl ClassLabels {
    /// Number of labels
    pub fn len(&self) -> usize {
        match self {
            Self::Ints(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    /// Whether there are no labels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label at the given column index
    pub fn get(&self, index: usize) -> Option<Label> {
        match self {
            Self::Ints(v) => v.get(index).copied().map(Label::Int),
            Self::Strings(v) => v.get(index).cloned().map(Label::Text),
        }
    }

    /// Iterate over labels in column order
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// True when integer labels equal their column index (0, 1, 2, ...)
    pub fn is_array_like(&self) -> bool {
        match self {
            Self::Ints(v) => v.iter().enumerate().all(|(i, &label)| label == i as i64),
            Self::Strings(_) => false,
        }
    }
}

/// Label → probability mapping for one row, in class-label order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelDistribution {
    entries: Vec<(Label, f64)>,
}

impl LabelDistribution {
    /// Create a distribution from label/probability pairs
    pub fn new(entries: Vec<(Label, f64)>) -> Self {
        Self { entries }
    }

    /// Probability for an explicit label value
    pub fn get(&self, label: &Label) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    /// Iterate over (label, probability) pairs in class-label order
    pub fn iter(&self) -> impl Iterator<Item = (&Label, f64)> {
        self.entries.iter().map(|(l, p)| (l, *p))
    }

    /// Probabilities in class-label order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, p)| *p).collect()
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Label with the highest probability; ties go to the earliest label
    pub fn most_likely(&self) -> Option<&Label> {
        let mut best: Option<&(Label, f64)> = None;
        for entry in &self.entries {
            match best {
                Some((_, p)) if entry.1 <= *p => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(l, _)| l)
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LabelDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, prob) in &self.entries {
            map.serialize_entry(label, prob)?;
        }
        map.end()
    }
}

impl fmt::Display for LabelDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, prob)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", label, prob)?;
        }
        write!(f, "}}")
    }
}
