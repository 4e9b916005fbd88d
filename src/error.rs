use thiserror::Error;

use crate::page_agent::ElementHandle;

/// Failure while talking to the page's DOM.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomError {
    #[error("element {0} is not registered")]
    UnknownElement(ElementHandle),

    #[error("no document available")]
    NoDocument,

    #[error("DOM call failed: {0}")]
    Js(String),
}

/// Page agent errors.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The history entry points at an element that left the document.
    #[error("history target {0} is no longer attached to the document")]
    DetachedTarget(ElementHandle),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Panel side messaging errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no active tab")]
    NoActiveTab,

    #[error("message delivery failed: {0}")]
    Delivery(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        DomError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for TransportError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        TransportError::Delivery(format!("{value:?}"))
    }
}
