//! Review-analysis JSON to `ScorecardSnapshot` converter.

use feedback_core::{FeedbackConfig, FeedbackError, ScoreBar, ScorecardSnapshot};
use serde_json::Value;

/// Build a scorecard from a JSON string.
pub fn build_scorecard_str(
    analysis_json: &str,
    config: &FeedbackConfig,
) -> Result<ScorecardSnapshot, FeedbackError> {
    let value: Value =
        serde_json::from_str(analysis_json).map_err(|err| FeedbackError::Parse(err.to_string()))?;
    build_scorecard_value(&value, config)
}

/// Build a scorecard from a `serde_json::Value`.
///
/// The expected shape is the review application's analysis result:
/// a `criteria_scores` array of objects carrying `criterion_name` and
/// `score`, plus an optional top-level `overall_score`. A criterion with a
/// missing or non-numeric score still produces a bar; its NaN percentage
/// falls through to the lowest tier when rendered.
pub fn build_scorecard_value(
    analysis: &Value,
    config: &FeedbackConfig,
) -> Result<ScorecardSnapshot, FeedbackError> {
    let criteria = analysis
        .get("criteria_scores")
        .and_then(Value::as_array)
        .ok_or(FeedbackError::MissingData)?;

    let bars = criteria
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let label = extract_label(entry, index);
            let score = extract_number(entry.get("score"));
            let max_score = match entry.get("max_score") {
                Some(raw) => extract_number(Some(raw)),
                None => config.default_max_score,
            };
            ScoreBar::new(label, score, max_score)
        })
        .collect();

    let overall_score = extract_optional_number(analysis.get("overall_score"));

    Ok(ScorecardSnapshot::new(overall_score, bars))
}

fn extract_label(entry: &Value, index: usize) -> String {
    entry
        .get("criterion_name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Criterion {}", index + 1))
}

/// Numeric field tolerant of string-encoded numbers; anything else is NaN.
fn extract_number(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn extract_optional_number(raw: Option<&Value>) -> Option<f64> {
    let value = extract_number(raw);
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
