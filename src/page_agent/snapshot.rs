//! Read-only description of the selected element for the panel.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::dom::{ElementHandle, StyleInspector};
use crate::error::DomError;
use crate::style::{px, script_name, StyleMap};

/// Computed properties reported to the panel (CSS names).
pub const SNAPSHOT_PROPERTIES: [&str; 12] = [
    "color",
    "background-color",
    "font-size",
    "font-family",
    "padding",
    "margin",
    "border",
    "border-radius",
    "display",
    "text-align",
    "line-height",
    "font-weight",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub tag_name: String,
    pub classes: Vec<String>,
    /// Allowlisted computed styles plus `width`/`height` as px strings.
    pub styles: StyleMap,
    pub html: String,
    pub dimensions: Dimensions,
}

/// Snapshot of `selected`, or `None` when nothing is selected or the page
/// refused one of the queries. Classes in `hidden_classes` are left out.
pub fn build_snapshot<I>(
    inspector: &I,
    selected: Option<ElementHandle>,
    hidden_classes: &[&str],
) -> Option<ElementSnapshot>
where
    I: StyleInspector + ?Sized,
{
    let element = selected?;
    match try_build(inspector, element, hidden_classes) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(%element, error = %err, "could not read element details");
            None
        }
    }
}

fn try_build<I>(
    inspector: &I,
    element: ElementHandle,
    hidden_classes: &[&str],
) -> Result<ElementSnapshot, DomError>
where
    I: StyleInspector + ?Sized,
{
    let rect = inspector.bounding_rect(element)?;

    let mut styles = StyleMap::new();
    for property in SNAPSHOT_PROPERTIES {
        styles.insert(script_name(property), inspector.computed_style(element, property)?);
    }
    styles.insert("width".to_string(), px(rect.width));
    styles.insert("height".to_string(), px(rect.height));

    let mut classes: Vec<String> = Vec::new();
    for class in inspector.class_list(element)? {
        if !classes.contains(&class) && !hidden_classes.contains(&class.as_str()) {
            classes.push(class);
        }
    }

    Ok(ElementSnapshot {
        tag_name: inspector.tag_name(element)?,
        classes,
        styles,
        html: inspector.inner_html(element)?,
        dimensions: Dimensions {
            width: rect.width,
            height: rect.height,
        },
    })
}
