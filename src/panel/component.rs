use dioxus::prelude::*;
use futures::StreamExt;
use tracing::{debug, info};

use super::state::PanelState;
use super::style_controls::StyleControls;
use super::transport;
use crate::page_agent::ElementSnapshot;
use crate::protocol::{AgentRequest, DragModeState, PanelNotice, StylesReply};

pub static PANEL_STATE: GlobalSignal<PanelState> = Signal::global(PanelState::default);

#[component]
pub fn PanelApp() -> Element {
    use_hook(|| {
        let (tx, mut rx) = futures::channel::mpsc::unbounded::<PanelNotice>();
        transport::listen(move |notice| {
            let _ = tx.unbounded_send(notice);
        });
        spawn(async move {
            while let Some(notice) = rx.next().await {
                match notice {
                    PanelNotice::ElementSelected { details } => {
                        debug!(selected = details.is_some(), "selection changed");
                        PANEL_STATE.write().show_details(details.as_ref());
                    }
                }
            }
        });
        spawn(sync_with_page());
    });

    let state = PANEL_STATE.read();
    let toggle_label = state.toggle_label();
    let toggle_class = if state.edit_mode { "tool-button active" } else { "tool-button" };

    rsx! {
        div {
            class: "panel",
            style: "width: 320px; font-family: system-ui; padding: 12px;",

            div {
                class: "toolbar",
                style: "display: flex; gap: 8px; margin-bottom: 12px;",
                button {
                    class: "{toggle_class}",
                    onclick: move |_| toggle_edit_mode(),
                    "{toggle_label}"
                }
                button {
                    onclick: move |_| history_step(AgentRequest::Undo),
                    "Undo"
                }
                button {
                    onclick: move |_| history_step(AgentRequest::Redo),
                    "Redo"
                }
            }

            p { style: "font-size: 12px; color: #666; line-height: 1.4;",
                "Drag elements to move them"
                br {}
                "Alt + click an element to edit it"
            }

            if state.preview.is_some() {
                UniversalEditor {}
            }
        }
    }
}

#[component]
fn UniversalEditor() -> Element {
    let state = PANEL_STATE.read();
    let Some(preview) = state.preview.as_ref() else {
        return rsx! {};
    };
    let style = preview.style_attribute();

    rsx! {
        div { class: "universal-editor visible",
            div { class: "element-info",
                span { class: "element-tag", "{preview.tag}" }
                span { class: "element-classes", " {preview.classes}" }
            }
            div { class: "element-preview",
                style: "border: 1px dashed #999; margin: 8px 0; overflow: hidden; max-height: 160px;",
                div {
                    class: "element-preview-container",
                    style: "{style}",
                    dangerous_inner_html: "{preview.html}",
                }
            }
            StyleControls {}
        }
    }
}

/// Pull edit mode and the current selection, so a reopened popup matches
/// the page.
async fn sync_with_page() {
    match transport::send(&AgentRequest::GetDragModeState).await {
        Ok(reply) => match serde_json::from_value::<DragModeState>(reply) {
            Ok(mode) => PANEL_STATE.write().edit_mode = mode.enabled,
            Err(err) => debug!(error = %err, "no edit mode state"),
        },
        Err(err) => debug!(error = %err, "page agent unreachable"),
    }

    match transport::send(&AgentRequest::GetSelectedElementDetails).await {
        Ok(reply) => match serde_json::from_value::<Option<ElementSnapshot>>(reply) {
            Ok(Some(details)) => PANEL_STATE.write().show_details(Some(&details)),
            Ok(None) => {}
            Err(err) => debug!(error = %err, "unreadable element details"),
        },
        Err(err) => debug!(error = %err, "page agent unreachable"),
    }
}

fn toggle_edit_mode() {
    let enabled = PANEL_STATE.write().toggle_edit_mode();
    info!(enabled, "edit mode toggled");
    send_detached(AgentRequest::ToggleDragMode { enabled });
}

fn history_step(request: AgentRequest) {
    spawn(async move {
        match transport::send(&request).await {
            Ok(reply) => match serde_json::from_value::<Option<StylesReply>>(reply) {
                Ok(Some(reply)) => PANEL_STATE.write().apply_styles(&reply.styles),
                Ok(None) => debug!(?request, "nothing changed"),
                Err(err) => debug!(error = %err, "unreadable history reply"),
            },
            Err(err) => debug!(error = %err, ?request, "request failed"),
        }
    });
}

/// Fire a request whose reply is not needed.
pub(super) fn send_detached(request: AgentRequest) {
    spawn(async move {
        if let Err(err) = transport::send(&request).await {
            debug!(error = %err, ?request, "request failed");
        }
    });
}
