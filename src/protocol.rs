//! Messages exchanged between the panel and the page agent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::page_agent::ElementSnapshot;
use crate::style::StyleMap;

/// Panel -> agent commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AgentRequest {
    ToggleDragMode { enabled: bool },
    GetDragModeState,
    GetSelectedElementDetails,
    UpdateStyle { property: String, value: String },
    Undo,
    Redo,
}

impl AgentRequest {
    /// Decode a runtime message. `Ok(None)` for actions this agent does
    /// not handle, such as its own `elementSelected` pushes.
    pub fn from_value(value: Value) -> Result<Option<Self>, serde_json::Error> {
        let known = value
            .get("action")
            .and_then(Value::as_str)
            .is_some_and(|action| {
                matches!(
                    action,
                    "toggleDragMode"
                        | "getDragModeState"
                        | "getSelectedElementDetails"
                        | "updateStyle"
                        | "undo"
                        | "redo"
                )
            });
        if !known {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragModeState {
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StylesReply {
    pub styles: StyleMap,
}

/// Agent's answer to one request.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentReply {
    /// The request has no response.
    Silent,
    DragMode(DragModeState),
    Details(Option<ElementSnapshot>),
    Styles(Option<StylesReply>),
}

impl AgentReply {
    /// JSON to hand to `sendResponse`, `None` when nothing is sent.
    pub fn to_json(&self) -> Result<Option<Value>, serde_json::Error> {
        match self {
            AgentReply::Silent => Ok(None),
            AgentReply::DragMode(state) => serde_json::to_value(state).map(Some),
            AgentReply::Details(details) => serde_json::to_value(details).map(Some),
            AgentReply::Styles(styles) => serde_json::to_value(styles).map(Some),
        }
    }
}

/// Agent -> panel push.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PanelNotice {
    ElementSelected { details: Option<ElementSnapshot> },
}
