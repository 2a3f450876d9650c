#![cfg(target_arch = "wasm32")]

use feedback_core::FeedbackConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, NodeList};

const TOOLTIP_SELECTOR: &str = ".tooltip";
const TOOLTIP_TEXT_SELECTOR: &str = ".tooltiptext";
const EVIDENCE_SELECTOR: &str = ".evidence-item";

/// Marker chống gắn trùng handler khi quét lại, tách theo từng hành vi.
const TOOLTIP_BOUND_ATTR: &str = "data-feedback-bound-tooltip";
const EVIDENCE_BOUND_ATTR: &str = "data-feedback-bound-evidence";

const TRANSPARENT: &str = "transparent";

/// Gắn handler hover hiện/ẩn chú giải cho mọi `.tooltip` chưa gắn dưới `root`.
pub fn init_tooltips(root: &Element) -> Result<(), JsValue> {
    let anchors = root.query_selector_all(TOOLTIP_SELECTOR)?;

    for anchor in unbound_elements(&anchors, TOOLTIP_BOUND_ATTR)? {
        let enter_anchor = anchor.clone();
        let enter = Closure::wrap(Box::new(move |_event: Event| {
            set_tooltip_visible(&enter_anchor, true);
        }) as Box<dyn FnMut(_)>);
        anchor.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;
        enter.forget();

        let leave_anchor = anchor.clone();
        let leave = Closure::wrap(Box::new(move |_event: Event| {
            set_tooltip_visible(&leave_anchor, false);
        }) as Box<dyn FnMut(_)>);
        anchor.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())?;
        leave.forget();
    }

    Ok(())
}

/// Gắn handler hover tô nền cho mọi `.evidence-item` chưa gắn dưới `root`.
pub fn highlight_evidence(root: &Element, config: &FeedbackConfig) -> Result<(), JsValue> {
    let items = root.query_selector_all(EVIDENCE_SELECTOR)?;

    for item in unbound_elements(&items, EVIDENCE_BOUND_ATTR)? {
        let highlight = config.evidence_highlight_color.clone();
        let enter_item = item.clone();
        let enter = Closure::wrap(Box::new(move |_event: Event| {
            set_background(&enter_item, &highlight);
        }) as Box<dyn FnMut(_)>);
        item.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;
        enter.forget();

        let leave_item = item.clone();
        let leave = Closure::wrap(Box::new(move |_event: Event| {
            set_background(&leave_item, TRANSPARENT);
        }) as Box<dyn FnMut(_)>);
        item.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())?;
        leave.forget();
    }

    Ok(())
}

/// Lọc danh sách về các `Element` chưa mang marker, đồng thời đóng dấu marker.
fn unbound_elements(nodes: &NodeList, marker_attr: &str) -> Result<Vec<Element>, JsValue> {
    let mut fresh = Vec::new();

    for index in 0..nodes.length() {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        if element.has_attribute(marker_attr) {
            continue;
        }
        element.set_attribute(marker_attr, "true")?;
        fresh.push(element);
    }

    Ok(fresh)
}

/// Thiếu node chữ chú giải thì handler không làm gì, không báo lỗi.
fn set_tooltip_visible(anchor: &Element, visible: bool) {
    let Ok(Some(text_node)) = anchor.query_selector(TOOLTIP_TEXT_SELECTOR) else {
        return;
    };
    let Ok(text_node) = text_node.dyn_into::<HtmlElement>() else {
        return;
    };

    let (visibility, opacity) = if visible {
        ("visible", "1")
    } else {
        ("hidden", "0")
    };

    let style = text_node.style();
    let _ = style.set_property("visibility", visibility);
    let _ = style.set_property("opacity", opacity);
}

fn set_background(item: &Element, color: &str) {
    let Some(item) = item.dyn_ref::<HtmlElement>() else {
        return;
    };
    let _ = item.style().set_property("background-color", color);
}
