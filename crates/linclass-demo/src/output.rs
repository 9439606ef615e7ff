//! Rendering of pipeline results and model constants

use linclass_classifiers::model::{CLASS_LABELS, COEFFICIENTS, INTERCEPTS, NUM_FEATURES};
use linclass_classifiers::PipelineExecutionResult;
use linclass_core::{Label, LabelDistribution};
use serde::Serialize;

/// JSON shape of a classification run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub pipeline: &'a str,
    pub labels: &'a [Label],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<&'a [LabelDistribution]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Vec<f64>>>,
    pub latency_us: u64,
}

impl<'a> RunReport<'a> {
    pub fn new(pipeline: &'a str, result: &'a PipelineExecutionResult) -> Self {
        let probabilities = result.distributions.as_deref();
        Self {
            pipeline,
            labels: &result.labels,
            probabilities,
            // Raw scores only when there is no label mapping to show
            scores: probabilities
                .is_none()
                .then(|| result.probabilities.to_rows()),
            latency_us: result.total_latency_us,
        }
    }
}

/// Text rendering of a classification run
///
/// Labels are space-separated, distributions comma-separated:
/// `Predicted Label: [2 0]` / `Class Probabilities: [{0: ..}, {0: ..}]`
pub fn render_text(result: &PipelineExecutionResult) -> String {
    let labels = match &result.int_labels {
        Some(ints) => join(ints.iter(), " "),
        None => join(result.labels.iter(), " "),
    };

    let probabilities = match &result.distributions {
        Some(distributions) => join(distributions.iter(), ", "),
        None => result
            .probabilities
            .iter_rows()
            .map(|row| format!("{:?}", row))
            .collect::<Vec<_>>()
            .join(", "),
    };

    format!(
        "Predicted Label: [{}]\nClass Probabilities: [{}]",
        labels, probabilities
    )
}

/// JSON shape of the model constants
#[derive(Debug, Serialize)]
pub struct ModelReport {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: &'static [f64],
    pub labels: &'static [i64],
}

impl ModelReport {
    pub fn new() -> Self {
        Self {
            coefficients: COEFFICIENTS.chunks(NUM_FEATURES).map(<[f64]>::to_vec).collect(),
            intercepts: &INTERCEPTS,
            labels: &CLASS_LABELS,
        }
    }
}

impl Default for ModelReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Text rendering of the model constants
pub fn render_model_text(report: &ModelReport) -> String {
    let mut out = String::from("Coefficients:\n");
    for (label, row) in report.labels.iter().zip(&report.coefficients) {
        out.push_str(&format!("  class {}: {:?}\n", label, row));
    }
    out.push_str(&format!("Intercepts: {:?}\n", report.intercepts));
    out.push_str(&format!("Labels: {:?}", report.labels));
    out
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>, separator: &str) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linclass_classifiers::model::REFERENCE_INPUT;
    use linclass_classifiers::reference_pipeline;

    #[test]
    fn test_render_reference_text() {
        let result = reference_pipeline().unwrap().execute(&[REFERENCE_INPUT]).unwrap();
        let text = render_text(&result);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Predicted Label: [2]"));
        let probabilities = lines.next().unwrap();
        assert!(probabilities.starts_with("Class Probabilities: [{0: 0.1043390174"));
        assert!(probabilities.ends_with("}]"));
    }

    #[test]
    fn test_report_json() {
        let result = reference_pipeline().unwrap().execute(&[REFERENCE_INPUT]).unwrap();
        let report = RunReport::new("reference", &result);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["labels"], serde_json::json!([2]));
        assert!(json["probabilities"][0]["2"].as_f64().unwrap() > 0.88);
        assert!(json.get("scores").is_none());
    }

    #[test]
    fn test_model_report() {
        let report = ModelReport::new();
        assert_eq!(report.coefficients.len(), 3);
        assert_eq!(report.coefficients[2][3], 1.8554921);
        assert!(render_model_text(&report).contains("class 1: [0.5673314"));
    }
}
