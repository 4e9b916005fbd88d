use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Tunables for the page agent. Every field has a default, so a JSON
/// override only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Marker class on the selected element.
    pub selected_class: String,
    /// Marker class on the element being dragged.
    pub dragging_class: String,
    /// Marker class on elements close to the pointer.
    pub near_pointer_class: String,
    /// Class on `<body>` while edit mode is on.
    pub body_class: String,
    /// Stacking order given to dragged elements.
    pub drag_z_index: String,
    pub proximity_enabled: bool,
    pub proximity_radius_px: f64,
    pub proximity_interval_ms: f64,
    /// Selector for elements considered by the proximity pass.
    pub proximity_selector: String,
    pub storage: StorageKeys,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub history: String,
    pub history_index: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            selected_class: "editor-selected".to_string(),
            dragging_class: "dragging".to_string(),
            near_pointer_class: "near-pointer".to_string(),
            body_class: "drag-mode-enabled".to_string(),
            drag_z_index: "1000".to_string(),
            proximity_enabled: true,
            proximity_radius_px: 30.0,
            proximity_interval_ms: 16.0,
            proximity_selector: "body *".to_string(),
            storage: StorageKeys::default(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            history: "history".to_string(),
            history_index: "historyIndex".to_string(),
        }
    }
}

impl EditorConfig {
    /// Defaults overlaid with a JSON object. An empty string means defaults.
    pub fn from_json(raw: &str) -> Result<Self, EditorError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EditorError> {
        if self.proximity_radius_px < 0.0 {
            return Err(EditorError::Config("proximityRadiusPx must not be negative".into()));
        }
        if self.proximity_interval_ms < 0.0 {
            return Err(EditorError::Config("proximityIntervalMs must not be negative".into()));
        }
        for (key, class) in [
            ("selectedClass", &self.selected_class),
            ("draggingClass", &self.dragging_class),
            ("nearPointerClass", &self.near_pointer_class),
            ("bodyClass", &self.body_class),
        ] {
            if class.is_empty() || class.contains(char::is_whitespace) {
                return Err(EditorError::Config(format!("{key} must be a single class name")));
            }
        }
        Ok(())
    }
}
