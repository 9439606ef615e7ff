//! Cast of predicted labels to 64-bit integers

use linclass_core::{Error, Label, Result};

/// Convert predicted labels to `i64`
///
/// Integer labels pass through. Text labels are accepted only when they
/// parse as an integer.
pub fn cast_labels_to_int64(labels: &[Label]) -> Result<Vec<i64>> {
    labels.iter().map(cast_label).collect()
}

fn cast_label(label: &Label) -> Result<i64> {
    match label {
        Label::Int(v) => Ok(*v),
        Label::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::unsupported(format!("cannot cast label '{}' to int64", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_labels_pass_through() {
        let labels = vec![Label::Int(2), Label::Int(0), Label::Int(-7)];
        assert_eq!(cast_labels_to_int64(&labels).unwrap(), vec![2, 0, -7]);
    }

    #[test]
    fn test_numeric_text_labels() {
        let labels = vec![Label::from("3"), Label::from(" 12 ")];
        assert_eq!(cast_labels_to_int64(&labels).unwrap(), vec![3, 12]);
    }

    #[test]
    fn test_non_numeric_text_label_fails() {
        let labels = vec![Label::Int(1), Label::from("pretty_good")];
        let err = cast_labels_to_int64(&labels).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
