//! Host page integration: configuration, resource name, clock, focus.

use gloo::utils::{document, window};
use js_sys::{Function, Reflect};
use tiao_config::{UiConfig, load_or_default};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::core::effects::Millis;
use crate::core::panels::PanelId;

const CONFIG_ELEMENT_ID: &str = "ui-config";
const FOCUS_FALLBACK: &str = "input:not([disabled]), button.primary:not([disabled]), select";

/// Configuration from the inline `<script id="ui-config">` block, with the
/// resource name reported by the host page.
pub(crate) fn load_config() -> UiConfig {
    let inline = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    load_or_default(inline.as_deref(), parent_resource_name())
}

/// Result of the host-provided `GetParentResourceName()`, when present.
fn parent_resource_name() -> Option<String> {
    let window = window();
    let getter = Reflect::get(window.as_ref(), &JsValue::from_str("GetParentResourceName"))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    getter
        .call0(window.as_ref())
        .ok()?
        .as_string()
        .filter(|name| !name.is_empty())
}

/// Current time in milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn now_ms() -> Millis {
    js_sys::Date::now().max(0.0) as Millis
}

/// Focus the first `[data-autofocus]` control of `panel`, else its first
/// enabled input, primary button or select.
pub(crate) fn focus_panel(panel: PanelId) {
    let Ok(Some(container)) = document().query_selector(&format!("#{}", panel.dom_id())) else {
        return;
    };
    let target = container
        .query_selector("[data-autofocus]")
        .ok()
        .flatten()
        .or_else(|| container.query_selector(FOCUS_FALLBACK).ok().flatten());
    if let Some(element) = target.and_then(|element| element.dyn_into::<HtmlElement>().ok()) {
        let _ = element.focus();
    }
}

/// Whether keyboard focus is inside a textarea.
pub(crate) fn focus_in_textarea() -> bool {
    document()
        .active_element()
        .is_some_and(|element| element.tag_name().eq_ignore_ascii_case("textarea"))
}
