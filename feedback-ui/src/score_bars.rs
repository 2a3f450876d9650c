#![cfg(target_arch = "wasm32")]

use feedback_core::{
    parse_max_score_attr, parse_score_attr, score_percentage, width_style, FeedbackConfig,
    ScoreTier,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

const BAR_CONTAINER_SELECTOR: &str = ".score-bar-container";
const BAR_FILL_SELECTOR: &str = ".score-bar-inner";
const SCORE_ATTR: &str = "data-score";
const MAX_SCORE_ATTR: &str = "data-max-score";
const TIER_ATTR: &str = "data-tier";

/// Quét mọi `.score-bar-container` dưới `root` và tô thanh điểm bên trong.
pub fn render_score_bars(root: &Element, config: &FeedbackConfig) -> Result<(), JsValue> {
    let containers = root.query_selector_all(BAR_CONTAINER_SELECTOR)?;

    for index in 0..containers.length() {
        let Some(node) = containers.get(index) else {
            continue;
        };
        let Ok(container) = node.dyn_into::<Element>() else {
            continue;
        };
        render_one(&container, config)?;
    }

    Ok(())
}

/// Điểm sai định dạng cho ra NaN; NaN trượt mọi ngưỡng và nhận màu bậc thấp
/// nhất, còn width hiển thị nguyên văn `"NaN%"`. Container thiếu phần tử
/// fill bị bỏ qua trong im lặng.
fn render_one(container: &Element, config: &FeedbackConfig) -> Result<(), JsValue> {
    let score = parse_score_attr(container.get_attribute(SCORE_ATTR).as_deref());
    let max_score = parse_max_score_attr(
        container.get_attribute(MAX_SCORE_ATTR).as_deref(),
        config.default_max_score,
    );
    let percentage = score_percentage(score, max_score);

    let Some(fill) = container.query_selector(BAR_FILL_SELECTOR)? else {
        return Ok(());
    };
    let Ok(fill) = fill.dyn_into::<HtmlElement>() else {
        return Ok(());
    };

    let tier = ScoreTier::from_percentage(percentage);
    let style = fill.style();
    style.set_property("width", &width_style(percentage))?;
    style.set_property("background", tier.gradient())?;
    container.set_attribute(TIER_ATTR, tier.level())?;

    Ok(())
}
