//! Lớp tăng cường tương tác cho widget phản hồi trong môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod hover;
#[cfg(target_arch = "wasm32")]
mod score_bars;
#[cfg(target_arch = "wasm32")]
mod selector;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::{hover, score_bars, selector};
    use feedback_core::{FeedbackConfig, FeedbackConfigOverrides, HostEnvelope};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, MessageEvent, Window};

    fn resolve_root(selector_text: &str) -> Result<Element, JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        document
            .query_selector(selector_text)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))
    }

    fn parse_config(config: Option<JsValue>) -> Result<FeedbackConfig, JsValue> {
        match config {
            Some(js_cfg) => {
                let overrides: FeedbackConfigOverrides = from_value(js_cfg)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
                Ok(FeedbackConfig::from(overrides))
            }
            None => Ok(FeedbackConfig::default()),
        }
    }

    /// Quét toàn bộ cây con và khởi tạo cả ba thành phần theo thứ tự cố định.
    /// Không giữ trạng thái giữa các lần quét; gắn handler đã có marker bị bỏ qua.
    fn init_components(root: &Element, config: &FeedbackConfig) -> Result<(), JsValue> {
        score_bars::render_score_bars(root, config)?;
        hover::init_tooltips(root)?;
        hover::highlight_evidence(root, config)?;

        console::log_1(&JsValue::from_str(
            "Feedback visualization components initialized",
        ));
        Ok(())
    }

    fn schedule_rescan(selector_text: &str, config: &FeedbackConfig) {
        let selector_text = selector_text.to_string();
        let config = config.clone();
        let delay = config.rescan_delay_ms;

        // Root được tra lại lúc hẹn giờ nổ vì host có thể đã thay markup.
        let rescan = Closure::wrap(Box::new(move || {
            if let Ok(root) = resolve_root(&selector_text) {
                if let Err(err) = init_components(&root, &config) {
                    console::error_1(&err);
                }
            }
        }) as Box<dyn FnMut()>);

        if let Some(window) = web_sys::window() {
            if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                rescan.as_ref().unchecked_ref(),
                delay,
            ) {
                console::error_1(&err);
            }
        }
        rescan.forget();
    }

    fn attach_render_listener(selector_text: &str, config: FeedbackConfig) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;

        let selector_text = selector_text.to_string();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let envelope: HostEnvelope = from_value(event.data()).unwrap_or_default();
            if envelope.triggers_rescan(&config) {
                schedule_rescan(&selector_text, &config);
            }
        }) as Box<dyn FnMut(_)>);

        window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())?;
        on_message.forget();
        Ok(())
    }

    /// Gắn lớp tăng cường vào cây con của `selector`: quét một lần ngay và
    /// đăng ký nghe thông điệp re-render của host để quét lại sau độ trễ cấu hình.
    #[wasm_bindgen]
    pub fn mount_feedback(selector_text: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let config = parse_config(config)?;
        let root = resolve_root(selector_text)?;

        init_components(&root, &config)?;
        attach_render_listener(selector_text, config)
    }

    /// Quét lại ngay lập tức, dành cho host muốn tự gọi thay vì gửi thông điệp.
    #[wasm_bindgen]
    pub fn rescan_feedback(selector_text: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let config = parse_config(config)?;
        let root = resolve_root(selector_text)?;
        init_components(&root, &config)
    }

    /// Đánh dấu một lựa chọn phản hồi trong nhóm của nó và ghi payload ra console.
    /// Việc chuyển payload về host là việc của lớp tích hợp bên ngoài.
    #[wasm_bindgen]
    pub fn select_feedback(option: Element, group_name: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("Document không có phần tử gốc"))?;

        let selection = selector::select_feedback_in(&root, &option, group_name)?;
        let payload = serde_wasm_bindgen::to_value(&selection)?;
        console::log_2(&JsValue::from_str("Feedback selected:"), &payload);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_feedback, rescan_feedback, select_feedback};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_feedback(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "feedback-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn rescan_feedback(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "feedback-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn select_feedback(
    _: wasm_bindgen::JsValue,
    _: &str,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "feedback-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
