//! What the popup shows: edit mode, the local preview of the selected
//! element and the current value of every control.

use std::collections::HashMap;

use super::controls::{control, CONTROLS};
use crate::page_agent::ElementSnapshot;
use crate::protocol::AgentRequest;
use crate::style::{css_name, StyleMap};

/// Local copy of the selected element, styled like the original.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewState {
    pub tag: String,
    pub classes: String,
    pub styles: StyleMap,
    /// Computed styles from the snapshot, shown again when an undo empties
    /// an inline value.
    pub computed: StyleMap,
    pub html: String,
}

impl PreviewState {
    pub fn from_snapshot(details: &ElementSnapshot) -> Self {
        let classes = if details.classes.is_empty() {
            "None".to_string()
        } else {
            details.classes.join(" ")
        };
        Self {
            tag: details.tag_name.to_lowercase(),
            classes,
            styles: details.styles.clone(),
            computed: details.styles.clone(),
            html: details.html.clone(),
        }
    }

    /// Inline `style` attribute for the preview wrapper.
    pub fn style_attribute(&self) -> String {
        self.styles
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}: {};", css_name(k), v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelState {
    pub edit_mode: bool,
    pub preview: Option<PreviewState>,
    values: HashMap<&'static str, String>,
}

impl PanelState {
    /// Flip edit mode, returning the new value to send to the page.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.edit_mode
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.edit_mode {
            "Disable Drag Mode"
        } else {
            "Enable Drag Mode"
        }
    }

    /// Current raw value of a control, or its default.
    pub fn value(&self, id: &str) -> String {
        match self.values.get(id) {
            Some(v) => v.clone(),
            None => control(id).map(|c| c.default.to_string()).unwrap_or_default(),
        }
    }

    /// Rebuild the preview from a snapshot; `None` hides the editor.
    pub fn show_details(&mut self, details: Option<&ElementSnapshot>) {
        let Some(details) = details else {
            self.preview = None;
            return;
        };
        self.preview = Some(PreviewState::from_snapshot(details));
        self.back_fill(&details.styles);
    }

    /// A control changed. Updates the preview right away and returns the
    /// request to send to the page.
    pub fn edit(&mut self, id: &str, raw: &str) -> Option<AgentRequest> {
        let binding = control(id)?;
        self.values.insert(binding.id, raw.to_string());
        let value = binding.transform.apply(raw);
        let property = binding.property.name().to_string();
        if let Some(preview) = self.preview.as_mut() {
            preview.styles.insert(property.clone(), value.clone());
        }
        Some(AgentRequest::UpdateStyle { property, value })
    }

    /// Styles returned by undo/redo: patch the preview and the controls
    /// without fetching a new snapshot. An empty value falls back to the
    /// computed one.
    pub fn apply_styles(&mut self, styles: &StyleMap) {
        let mut resolved = styles.clone();
        if let Some(preview) = self.preview.as_mut() {
            for (property, value) in resolved.iter_mut() {
                if value.is_empty() {
                    if let Some(computed) = preview.computed.get(property) {
                        value.clone_from(computed);
                    }
                }
                preview.styles.insert(property.clone(), value.clone());
            }
        }
        let mut context = self
            .preview
            .as_ref()
            .map(|p| p.styles.clone())
            .unwrap_or_default();
        context.extend(resolved.iter().map(|(k, v)| (k.clone(), v.clone())));
        for binding in CONTROLS.iter() {
            if resolved.contains_key(binding.property.name()) {
                if let Some(value) = binding.back_fill(&context) {
                    self.values.insert(binding.id, value);
                }
            }
        }
    }

    fn back_fill(&mut self, styles: &StyleMap) {
        for binding in CONTROLS.iter() {
            if let Some(value) = binding.back_fill(styles) {
                self.values.insert(binding.id, value);
            }
        }
    }
}
