//! Visual, in-page restyling for a browser extension.
//!
//! The content script runs [`page_agent`]: it selects and drags page
//! elements, applies style edits and keeps the undo/redo log. The popup
//! runs [`panel`], a Dioxus app that edits the selected element and talks
//! to the content script through the messages in [`protocol`].

pub mod config;
pub mod error;
pub mod page_agent;
#[cfg(feature = "web")]
pub mod panel;
pub mod protocol;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod js_json;

pub use config::EditorConfig;
pub use error::{DomError, EditorError, TransportError};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Content-script entry point. `config` is an optional JSON object
/// overriding [`EditorConfig`] defaults.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = startPageAgent)]
pub fn start_page_agent(config: Option<String>) -> Result<(), JsValue> {
    // Fails only when a subscriber is already installed.
    let _ = dioxus::logger::init(tracing::Level::INFO);
    let config = EditorConfig::from_json(config.as_deref().unwrap_or_default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    page_agent::start(config)
}
