use std::fs;

use feedback_core::{FeedbackConfig, FeedbackError, ScoreTier};
use feedback_scorecard::{build_scorecard_str, build_scorecard_value};
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn analysis_document_matches_golden() {
    let analysis = fs::read_to_string(fixture_path("review_analysis.json"))
        .expect("Không đọc được analysis mẫu");

    let snapshot = build_scorecard_str(&analysis, &FeedbackConfig::default())
        .expect("Không tạo được snapshot");

    let mut actual = serde_json::to_value(snapshot).expect("Không serialize snapshot");
    normalize_dynamic_fields(&mut actual);

    let expected = fs::read_to_string(fixture_path("review_analysis_snapshot.json"))
        .expect("Không đọc được golden snapshot");

    let mut expected_value: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");
    normalize_dynamic_fields(&mut expected_value);

    assert_eq!(actual, expected_value);
}

#[test]
fn missing_criteria_scores_is_missing_data() {
    let analysis: Value = serde_json::json!({ "overall_score": 4.2 });
    let err = build_scorecard_value(&analysis, &FeedbackConfig::default())
        .expect_err("Thiếu criteria_scores phải bị từ chối");
    assert!(matches!(err, FeedbackError::MissingData));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = build_scorecard_str("{ not json", &FeedbackConfig::default())
        .expect_err("JSON hỏng phải bị từ chối");
    assert!(matches!(err, FeedbackError::Parse(_)));
}

#[test]
fn non_numeric_score_becomes_a_poor_nan_bar() {
    let analysis = serde_json::json!({
        "criteria_scores": [
            { "criterion_name": "Clarity", "score": "unavailable" }
        ]
    });

    let snapshot = build_scorecard_value(&analysis, &FeedbackConfig::default())
        .expect("Không tạo được snapshot");

    let bar = &snapshot.bars()[0];
    assert!(bar.percentage.is_nan());
    assert_eq!(bar.tier, ScoreTier::Poor);
    assert_eq!(bar.width, "NaN%");
}

#[test]
fn unnamed_criteria_get_positional_labels() {
    let analysis = serde_json::json!({
        "criteria_scores": [
            { "score": 5.0 },
            { "criterion_name": "Novelty", "score": "3" }
        ]
    });

    let snapshot = build_scorecard_value(&analysis, &FeedbackConfig::default())
        .expect("Không tạo được snapshot");

    assert_eq!(snapshot.bars()[0].label, "Criterion 1");
    assert_eq!(snapshot.bars()[1].label, "Novelty");
    assert_eq!(snapshot.bars()[1].percentage, 60.0);
    assert_eq!(snapshot.count_in_tier(ScoreTier::Excellent), 1);
}

fn normalize_dynamic_fields(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        if obj.contains_key("generated_at") {
            obj.insert(
                "generated_at".to_string(),
                Value::String("__DYNAMIC_TIMESTAMP__".to_string()),
            );
        }
    }
}
