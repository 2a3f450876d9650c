#![cfg(target_arch = "wasm32")]

use feedback_core::FeedbackSelection;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

const GROUP_ATTR: &str = "data-group";
const VALUE_ATTR: &str = "data-value";
const SELECTED_CLASS: &str = "selected";

/// Chọn một lựa chọn trong nhóm: gỡ trạng thái chọn khỏi mọi phần tử cùng
/// `data-group` rồi đặt lên `option`. Nhóm rỗng thì bước gỡ là no-op.
/// Bất biến: sau khi trả về, đúng một phần tử trong nhóm mang class chọn.
pub fn select_feedback_in(
    root: &Element,
    option: &Element,
    group_name: &str,
) -> Result<FeedbackSelection, JsValue> {
    let group_selector = format!("[{GROUP_ATTR}=\"{group_name}\"]");
    let members = root.query_selector_all(&group_selector)?;

    for index in 0..members.length() {
        let Some(node) = members.get(index) else {
            continue;
        };
        let Ok(member) = node.dyn_into::<Element>() else {
            continue;
        };
        member.class_list().remove_1(SELECTED_CLASS)?;
    }

    option.class_list().add_1(SELECTED_CLASS)?;

    Ok(FeedbackSelection {
        group: group_name.to_string(),
        value: option.get_attribute(VALUE_ATTR),
    })
}
