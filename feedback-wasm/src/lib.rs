//! Bridge WASM <-> JavaScript trung lập framework.

use feedback_core::{FeedbackConfig, FeedbackConfigOverrides, FeedbackError};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn compute_scorecard(
    input_analysis: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let analysis_value = from_value::<serde_json::Value>(input_analysis)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON analysis: {err}")))?;

    let cfg = match config {
        Some(js_cfg) => {
            let overrides: FeedbackConfigOverrides = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            FeedbackConfig::from(overrides)
        }
        None => FeedbackConfig::default(),
    };

    let snapshot = feedback_scorecard::build_scorecard_value(&analysis_value, &cfg)
        .map_err(|err| JsValue::from_str(&format_feedback_error(err)))?;

    to_value(&snapshot)
        .map_err(|err| JsValue::from_str(&format!("Không serialize snapshot: {err}")))
}

fn format_feedback_error(err: FeedbackError) -> String {
    format!("Scorecard error: {err}")
}
