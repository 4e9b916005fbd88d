//! Single-element selection and the near-pointer highlight.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::dom::{ElementHandle, PageDom};
use super::drag::Pointer;
use crate::config::EditorConfig;
use crate::error::DomError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(ElementHandle),
    Deselected,
}

#[derive(Debug, Default)]
pub struct SelectionTracker {
    selected: Option<ElementHandle>,
}

impl SelectionTracker {
    pub fn selected(&self) -> Option<ElementHandle> {
        self.selected
    }

    /// Select `element`, or deselect it when it already is the selection.
    /// The marker class follows the selection.
    pub fn toggle<D: PageDom + ?Sized>(
        &mut self,
        dom: &mut D,
        element: ElementHandle,
        marker: &str,
    ) -> Result<SelectionChange, DomError> {
        if let Some(previous) = self.selected.take() {
            if dom.is_attached(previous) {
                dom.remove_class(previous, marker)?;
            }
            if previous == element {
                debug!(%element, "deselected");
                return Ok(SelectionChange::Deselected);
            }
        }
        dom.add_class(element, marker)?;
        self.selected = Some(element);
        debug!(%element, "selected");
        Ok(SelectionChange::Selected(element))
    }
}

/// Marks elements within a radius of the pointer, at most once per
/// interval.
#[derive(Debug, Default)]
pub struct ProximityTracker {
    last_eval_ms: Option<f64>,
    near: BTreeSet<ElementHandle>,
}

impl ProximityTracker {
    pub fn near(&self) -> impl Iterator<Item = ElementHandle> + '_ {
        self.near.iter().copied()
    }

    /// Whether enough time passed since the last evaluation.
    pub fn due(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        match self.last_eval_ms {
            Some(last) if now_ms - last < interval_ms => false,
            _ => {
                self.last_eval_ms = Some(now_ms);
                true
            }
        }
    }

    /// Re-mark candidates around `pointer`. Elements whose geometry can't
    /// be read are skipped.
    pub fn evaluate<D: PageDom + ?Sized>(
        &mut self,
        dom: &mut D,
        pointer: Pointer,
        config: &EditorConfig,
    ) -> Result<(), DomError> {
        let (px, py) = (f64::from(pointer.x), f64::from(pointer.y));
        let mut now_near = BTreeSet::new();
        for element in dom.query_all(&config.proximity_selector)? {
            let Ok(rect) = dom.bounding_rect(element) else {
                continue;
            };
            if rect.distance_to(px, py) <= config.proximity_radius_px {
                now_near.insert(element);
            }
        }

        for gone in self.near.difference(&now_near) {
            if dom.is_attached(*gone) {
                dom.remove_class(*gone, &config.near_pointer_class)?;
            }
        }
        for added in now_near.difference(&self.near) {
            dom.add_class(*added, &config.near_pointer_class)?;
        }
        trace!(count = now_near.len(), "proximity updated");
        self.near = now_near;
        Ok(())
    }

    pub fn clear<D: PageDom + ?Sized>(&mut self, dom: &mut D, class: &str) -> Result<(), DomError> {
        for element in std::mem::take(&mut self.near) {
            if dom.is_attached(element) {
                dom.remove_class(element, class)?;
            }
        }
        self.last_eval_ms = None;
        Ok(())
    }
}
