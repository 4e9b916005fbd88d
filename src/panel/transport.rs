//! Messaging between the popup and the content script in the active tab.
//!
//! Only the browser build talks to `chrome.*`; elsewhere every request
//! fails with a delivery error so the UI still runs.

use serde_json::Value;

use crate::error::TransportError;
use crate::protocol::{AgentRequest, PanelNotice};

#[cfg(target_arch = "wasm32")]
mod chrome {
    use js_sys::{Array, Function, Promise, Reflect};
    use tracing::warn;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use super::*;
    use crate::js_json::{from_js, to_js};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
        fn tabs_query(query_info: &JsValue) -> Result<Promise, JsValue>;

        #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
        fn tabs_send_message(tab_id: f64, message: &JsValue) -> Result<Promise, JsValue>;

        #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
        fn on_message_add_listener(listener: &Function);
    }

    async fn active_tab_id() -> Result<f64, TransportError> {
        let query = to_js(&serde_json::json!({"active": true, "currentWindow": true}))?;
        let tabs: Array = JsFuture::from(tabs_query(&query)?).await?.dyn_into()?;
        Reflect::get(&tabs.get(0), &JsValue::from_str("id"))
            .ok()
            .and_then(|id| id.as_f64())
            .ok_or(TransportError::NoActiveTab)
    }

    pub async fn send(request: &AgentRequest) -> Result<Value, TransportError> {
        let tab = active_tab_id().await?;
        let message = to_js(request)?;
        let reply = JsFuture::from(tabs_send_message(tab, &message)?).await?;
        Ok(from_js(&reply)?)
    }

    pub fn listen(mut handler: impl FnMut(PanelNotice) + 'static) {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |message: JsValue| {
            let Ok(value) = from_js(&message) else {
                return;
            };
            let is_notice = value.get("action").and_then(Value::as_str) == Some("elementSelected");
            if !is_notice {
                return;
            }
            match serde_json::from_value::<PanelNotice>(value) {
                Ok(notice) => handler(notice),
                Err(err) => warn!(error = %err, "malformed selection notice"),
            }
        });
        on_message_add_listener(listener.as_ref().unchecked_ref());
        // The popup document owns the listener until it closes.
        listener.forget();
    }
}

/// Send `request` to the active tab and wait for its reply (`null` when
/// the agent sends none).
#[cfg(target_arch = "wasm32")]
pub async fn send(request: &AgentRequest) -> Result<Value, TransportError> {
    chrome::send(request).await
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn send(request: &AgentRequest) -> Result<Value, TransportError> {
    let _ = request;
    Err(TransportError::Delivery("extension messaging needs a browser".into()))
}

/// Call `handler` for every selection push from the page.
#[cfg(target_arch = "wasm32")]
pub fn listen(handler: impl FnMut(PanelNotice) + 'static) {
    chrome::listen(handler)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn listen(handler: impl FnMut(PanelNotice) + 'static) {
    drop(handler);
}
