use tracing::{debug, info, warn};

use super::dom::{ElementHandle, PageDom};
use super::drag::{DragController, Pointer};
use super::history::{apply_styles, History, HistoryEntry, HistoryStep};
use super::selection::{ProximityTracker, SelectionChange, SelectionTracker};
use super::snapshot::{build_snapshot, ElementSnapshot};
use super::storage::{history_record, HistoryStore};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::protocol::{AgentReply, AgentRequest, DragModeState, PanelNotice, StylesReply};
use crate::style::{css_name, single};

/// A mouse button event, reduced to what the editor looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseInput {
    pub target: Option<ElementHandle>,
    pub pointer: Pointer,
    /// The select chord (Alt) is held.
    pub alt_key: bool,
}

/// What the caller should do after a mousedown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseDownOutcome {
    pub prevent_default: bool,
    pub notice: Option<PanelNotice>,
}

/// All page-agent state for one page: edit mode, selection, drag and the
/// history log. Created once when the content script starts.
pub struct EditorSession<D, S> {
    config: EditorConfig,
    dom: D,
    store: S,
    history: History,
    selection: SelectionTracker,
    drag: DragController,
    proximity: ProximityTracker,
    edit_mode: bool,
}

impl<D: PageDom, S: HistoryStore> EditorSession<D, S> {
    pub fn new(dom: D, store: S, config: EditorConfig) -> Self {
        Self {
            config,
            dom,
            store,
            history: History::new(),
            selection: SelectionTracker::default(),
            drag: DragController::default(),
            proximity: ProximityTracker::default(),
            edit_mode: false,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn selected(&self) -> Option<ElementHandle> {
        self.selection.selected()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Answer one panel request. Failures are logged and turned into the
    /// empty reply for that request.
    pub fn handle(&mut self, request: AgentRequest) -> AgentReply {
        debug!(?request, "handling request");
        match request {
            AgentRequest::ToggleDragMode { enabled } => {
                if let Err(err) = self.set_edit_mode(enabled) {
                    warn!(error = %err, enabled, "failed to switch edit mode");
                }
                AgentReply::Silent
            }
            AgentRequest::GetDragModeState => AgentReply::DragMode(DragModeState {
                enabled: self.edit_mode,
            }),
            AgentRequest::GetSelectedElementDetails => AgentReply::Details(self.snapshot()),
            AgentRequest::UpdateStyle { property, value } => {
                if let Err(err) = self.update_style(&property, &value) {
                    warn!(error = %err, %property, "style update failed");
                }
                AgentReply::Silent
            }
            AgentRequest::Undo => AgentReply::Styles(Self::styles_reply(self.undo(), "undo")),
            AgentRequest::Redo => AgentReply::Styles(Self::styles_reply(self.redo(), "redo")),
        }
    }

    fn styles_reply(step: Result<HistoryStep, EditorError>, what: &str) -> Option<StylesReply> {
        match step {
            Ok(HistoryStep::Applied(styles)) => Some(StylesReply { styles }),
            Ok(HistoryStep::Noop) => {
                debug!("nothing to {what}");
                None
            }
            Err(err) => {
                warn!(error = %err, "{what} skipped");
                None
            }
        }
    }

    pub fn set_edit_mode(&mut self, enabled: bool) -> Result<(), EditorError> {
        self.edit_mode = enabled;
        info!(enabled, "edit mode");
        self.dom.set_body_class(&self.config.body_class, enabled)?;
        if enabled {
            self.dom.set_body_cursor("grab")?;
        } else {
            self.dom.set_body_cursor("default")?;
            self.drag.cancel(&mut self.dom, &self.config)?;
            self.proximity
                .clear(&mut self.dom, &self.config.near_pointer_class)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Option<ElementSnapshot> {
        let agent_classes = [
            self.config.near_pointer_class.as_str(),
            self.config.dragging_class.as_str(),
        ];
        build_snapshot(&self.dom, self.selection.selected(), &agent_classes)
    }

    /// Set one inline property on the selected element and log it. No-op
    /// without a selection.
    pub fn update_style(&mut self, property: &str, value: &str) -> Result<(), EditorError> {
        let Some(element) = self.selection.selected() else {
            debug!(%property, "style update without selection ignored");
            return Ok(());
        };
        let old = self.dom.inline_style(element, &css_name(property))?;
        let new_styles = single(property, value);
        apply_styles(&mut self.dom, element, &new_styles)?;
        self.record(HistoryEntry {
            element,
            old_styles: single(property, old),
            new_styles,
        })
    }

    pub fn record(&mut self, entry: HistoryEntry) -> Result<(), EditorError> {
        self.history.record(entry);
        self.persist()
    }

    pub fn undo(&mut self) -> Result<HistoryStep, EditorError> {
        let step = self.history.undo(&mut self.dom);
        self.persist_after(step)
    }

    pub fn redo(&mut self) -> Result<HistoryStep, EditorError> {
        let step = self.history.redo(&mut self.dom);
        self.persist_after(step)
    }

    /// The cursor may have moved even when the step failed, so the log is
    /// saved either way.
    fn persist_after(&mut self, step: Result<HistoryStep, EditorError>) -> Result<HistoryStep, EditorError> {
        if matches!(step, Ok(HistoryStep::Noop)) {
            return step;
        }
        if let Err(err) = self.persist() {
            warn!(error = %err, "failed to persist history");
        }
        step
    }

    fn persist(&mut self) -> Result<(), EditorError> {
        let record = history_record(&self.history, &self.config.storage)?;
        self.store.save(record)
    }

    /// Capture-phase click: returns true when the click must be swallowed.
    pub fn on_click(&self) -> bool {
        self.edit_mode
    }

    pub fn on_mouse_down(&mut self, input: MouseInput) -> Result<MouseDownOutcome, EditorError> {
        if !self.edit_mode {
            return Ok(MouseDownOutcome::default());
        }
        let Some(target) = input.target else {
            return Ok(MouseDownOutcome::default());
        };

        if input.alt_key {
            self.finish_drag()?;
            let change = self
                .selection
                .toggle(&mut self.dom, target, &self.config.selected_class)?;
            let details = match change {
                SelectionChange::Selected(_) => self.snapshot(),
                SelectionChange::Deselected => None,
            };
            return Ok(MouseDownOutcome {
                prevent_default: true,
                notice: Some(PanelNotice::ElementSelected { details }),
            });
        }

        if let Some(entry) = self
            .drag
            .begin(&mut self.dom, target, input.pointer, &self.config)?
        {
            self.record(entry)?;
        }
        Ok(MouseDownOutcome {
            prevent_default: true,
            notice: None,
        })
    }

    pub fn on_mouse_move(&mut self, pointer: Pointer, now_ms: f64) -> Result<(), EditorError> {
        if !self.edit_mode {
            return Ok(());
        }
        self.drag.motion(&mut self.dom, pointer)?;
        if self.config.proximity_enabled
            && self.proximity.due(now_ms, self.config.proximity_interval_ms)
        {
            self.proximity.evaluate(&mut self.dom, pointer, &self.config)?;
        }
        Ok(())
    }

    pub fn on_mouse_up(&mut self) -> Result<(), EditorError> {
        self.finish_drag()
    }

    fn finish_drag(&mut self) -> Result<(), EditorError> {
        if let Some(entry) = self.drag.finish(&mut self.dom, &self.config)? {
            self.record(entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
