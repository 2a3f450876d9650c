use feedback_core::{
    parse_max_score_attr, parse_score_attr, score_percentage, width_style, FeedbackConfig,
    FeedbackConfigOverrides, FeedbackSelection, HostEnvelope, ScoreBar, ScoreTier,
};

#[test]
fn four_out_of_five_is_excellent_at_exactly_eighty() {
    let percentage = score_percentage(4.0, 5.0);
    assert_eq!(percentage, 80.0);
    assert_eq!(ScoreTier::from_percentage(percentage), ScoreTier::Excellent);
    assert_eq!(width_style(percentage), "80%");
}

#[test]
fn sixty_percent_lands_on_good_not_excellent() {
    let percentage = score_percentage(3.0, 5.0);
    assert_eq!(percentage, 60.0);
    assert_eq!(ScoreTier::from_percentage(percentage), ScoreTier::Good);
    assert_eq!(ScoreTier::from_percentage(79.9), ScoreTier::Good);
}

#[test]
fn lower_tiers_follow_thresholds() {
    assert_eq!(ScoreTier::from_percentage(59.9), ScoreTier::Fair);
    assert_eq!(ScoreTier::from_percentage(40.0), ScoreTier::Fair);
    assert_eq!(ScoreTier::from_percentage(39.9), ScoreTier::Poor);
    assert_eq!(ScoreTier::from_percentage(0.0), ScoreTier::Poor);
    assert_eq!(width_style(score_percentage(0.0, 5.0)), "0%");
}

#[test]
fn percentage_is_not_clamped() {
    assert_eq!(score_percentage(7.0, 5.0), 140.0);
    assert_eq!(width_style(140.0), "140%");
    assert_eq!(score_percentage(-1.0, 5.0), -20.0);
    assert_eq!(width_style(-20.0), "-20%");
}

#[test]
fn missing_score_falls_through_to_poor_as_nan() {
    let score = parse_score_attr(None);
    assert!(score.is_nan());

    let percentage = score_percentage(score, 5.0);
    assert!(percentage.is_nan());
    assert_eq!(ScoreTier::from_percentage(percentage), ScoreTier::Poor);
    assert_eq!(width_style(percentage), "NaN%");
}

#[test]
fn malformed_score_behaves_like_missing_score() {
    assert!(parse_score_attr(Some("not-a-number")).is_nan());
    assert_eq!(parse_score_attr(Some(" 4.5 ")), 4.5);
}

#[test]
fn max_score_attr_distinguishes_absent_from_malformed() {
    assert_eq!(parse_max_score_attr(None, 5.0), 5.0);
    assert_eq!(parse_max_score_attr(Some(""), 5.0), 5.0);
    assert_eq!(parse_max_score_attr(Some("10"), 5.0), 10.0);
    assert!(parse_max_score_attr(Some("mười"), 5.0).is_nan());
}

#[test]
fn score_bar_precomputes_render_fields() {
    let bar = ScoreBar::new("Scientific Rigor", 4.0, 5.0);
    assert_eq!(bar.percentage, 80.0);
    assert_eq!(bar.tier, ScoreTier::Excellent);
    assert_eq!(bar.width, "80%");
    assert_eq!(
        bar.gradient,
        "linear-gradient(90deg, #48bb78 0%, #38a169 100%)"
    );
}

#[test]
fn selection_payload_serializes_null_for_missing_value() {
    let selection = FeedbackSelection {
        group: "quality".to_string(),
        value: None,
    };
    let payload = serde_json::to_value(&selection).expect("Không serialize được payload");
    assert_eq!(
        payload,
        serde_json::json!({ "group": "quality", "value": null })
    );
}

#[test]
fn only_the_render_sentinel_triggers_a_rescan() {
    let config = FeedbackConfig::default();

    let render: HostEnvelope =
        serde_json::from_str(r#"{ "type": "streamlit:render" }"#).expect("Vỏ thông điệp hợp lệ");
    assert!(render.triggers_rescan(&config));

    let other: HostEnvelope = serde_json::from_str(r#"{ "type": "streamlit:setComponentValue" }"#)
        .expect("Vỏ thông điệp hợp lệ");
    assert!(!other.triggers_rescan(&config));

    let untyped: HostEnvelope = serde_json::from_str("{}").expect("Vỏ thông điệp hợp lệ");
    assert!(!untyped.triggers_rescan(&config));
}

#[test]
fn overrides_merge_over_defaults_field_by_field() {
    let overrides = FeedbackConfigOverrides {
        default_max_score: Some(10.0),
        render_message_type: Some("host:render".to_string()),
        ..FeedbackConfigOverrides::default()
    };

    let config = FeedbackConfig::from(overrides);
    assert_eq!(config.default_max_score, 10.0);
    assert_eq!(config.render_message_type, "host:render");
    assert_eq!(config.rescan_delay_ms, 100);
    assert_eq!(config.evidence_highlight_color, "#f0f4ff");

    let envelope = HostEnvelope {
        message_type: Some("host:render".to_string()),
    };
    assert!(envelope.triggers_rescan(&config));
}
