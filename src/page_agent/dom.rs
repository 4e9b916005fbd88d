//! The page capabilities the agent needs, as traits, so the session logic
//! can run against a real document or an in-memory fake.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomError;

/// Stable id for one page element, assigned the first time the agent
/// sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub u32);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Distance from a point to the nearest edge of the box; 0 inside it.
    pub fn distance_to(&self, px: f64, py: f64) -> f64 {
        let dx = (self.x - px).max(0.0).max(px - (self.x + self.width));
        let dy = (self.y - py).max(0.0).max(py - (self.y + self.height));
        (dx * dx + dy * dy).sqrt()
    }
}

/// Read-only queries against rendered elements.
pub trait StyleInspector {
    fn tag_name(&self, element: ElementHandle) -> Result<String, DomError>;
    fn class_list(&self, element: ElementHandle) -> Result<Vec<String>, DomError>;
    /// Computed value of a CSS property (CSS name, e.g. `font-size`).
    fn computed_style(&self, element: ElementHandle, css_property: &str) -> Result<String, DomError>;
    fn bounding_rect(&self, element: ElementHandle) -> Result<Rect, DomError>;
    fn inner_html(&self, element: ElementHandle) -> Result<String, DomError>;
    fn is_attached(&self, element: ElementHandle) -> bool;
}

/// Mutations the agent performs on the page.
pub trait PageDom: StyleInspector {
    /// Inline value of a CSS property, empty when unset.
    fn inline_style(&self, element: ElementHandle, css_property: &str) -> Result<String, DomError>;
    fn set_inline_style(
        &mut self,
        element: ElementHandle,
        css_property: &str,
        value: &str,
        important: bool,
    ) -> Result<(), DomError>;
    fn add_class(&mut self, element: ElementHandle, class: &str) -> Result<(), DomError>;
    fn remove_class(&mut self, element: ElementHandle, class: &str) -> Result<(), DomError>;
    fn set_body_class(&mut self, class: &str, on: bool) -> Result<(), DomError>;
    fn set_body_cursor(&mut self, cursor: &str) -> Result<(), DomError>;
    /// Elements matching `selector`. The handles stay valid at least
    /// until the next query.
    fn query_all(&mut self, selector: &str) -> Result<Vec<ElementHandle>, DomError>;
}
