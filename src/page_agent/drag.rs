//! Free-form repositioning of elements with the mouse.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::dom::{ElementHandle, PageDom};
use super::history::HistoryEntry;
use crate::config::EditorConfig;
use crate::error::DomError;
use crate::style::{parse_px, StyleMap};

/// Pointer position in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
}

impl Pointer {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Inline values an element had before its first drag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OriginalInline {
    pub position: String,
    pub z_index: String,
    pub transition: String,
    pub left: String,
    pub top: String,
}

#[derive(Clone, Debug)]
struct DragState {
    element: ElementHandle,
    pointer_start: Pointer,
    offset_start: (i32, i32),
    start_left: String,
    start_top: String,
    offset: (i32, i32),
}

#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragState>,
    originals: HashMap<ElementHandle, OriginalInline>,
}

impl DragController {
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged(&self) -> Option<ElementHandle> {
        self.active.as_ref().map(|d| d.element)
    }

    /// Inline styles cached on the element's first drag.
    pub fn original(&self, element: ElementHandle) -> Option<&OriginalInline> {
        self.originals.get(&element)
    }

    /// Start dragging `element`. A drag that never saw its mouseup is
    /// finished first and its history entry returned.
    pub fn begin<D: PageDom + ?Sized>(
        &mut self,
        dom: &mut D,
        element: ElementHandle,
        pointer: Pointer,
        config: &EditorConfig,
    ) -> Result<Option<HistoryEntry>, DomError> {
        let interrupted = self.finish(dom, config)?;
        if let Some(entry) = &interrupted {
            debug!(element = %entry.element, "unfinished drag closed");
        }

        if !self.originals.contains_key(&element) {
            let original = OriginalInline {
                position: dom.inline_style(element, "position")?,
                z_index: dom.inline_style(element, "z-index")?,
                transition: dom.inline_style(element, "transition")?,
                left: dom.inline_style(element, "left")?,
                top: dom.inline_style(element, "top")?,
            };
            self.originals.insert(element, original);
        }

        let start_left = dom.inline_style(element, "left")?;
        let start_top = dom.inline_style(element, "top")?;

        dom.set_inline_style(element, "position", "relative", false)?;
        dom.set_inline_style(element, "z-index", &config.drag_z_index, false)?;
        dom.add_class(element, &config.dragging_class)?;
        dom.set_body_cursor("grabbing")?;

        let offset_start = (parse_px(&start_left), parse_px(&start_top));
        debug!(%element, x = offset_start.0, y = offset_start.1, "drag started");
        self.active = Some(DragState {
            element,
            pointer_start: pointer,
            offset_start,
            start_left,
            start_top,
            offset: offset_start,
        });
        Ok(interrupted)
    }

    /// Follow the pointer. Returns false when no drag is running.
    pub fn motion<D: PageDom + ?Sized>(&mut self, dom: &mut D, pointer: Pointer) -> Result<bool, DomError> {
        let Some(drag) = self.active.as_mut() else {
            return Ok(false);
        };
        let x = drag.offset_start.0 + (pointer.x - drag.pointer_start.x);
        let y = drag.offset_start.1 + (pointer.y - drag.pointer_start.y);
        drag.offset = (x, y);
        dom.set_inline_style(drag.element, "left", &format!("{x}px"), false)?;
        dom.set_inline_style(drag.element, "top", &format!("{y}px"), false)?;
        trace!(element = %drag.element, x, y, "drag moved");
        Ok(true)
    }

    /// End the drag. Yields the history entry when the element moved.
    pub fn finish<D: PageDom + ?Sized>(
        &mut self,
        dom: &mut D,
        config: &EditorConfig,
    ) -> Result<Option<HistoryEntry>, DomError> {
        let Some(drag) = self.active.take() else {
            return Ok(None);
        };
        dom.remove_class(drag.element, &config.dragging_class)?;
        dom.set_body_cursor("grab")?;

        if drag.offset == drag.offset_start {
            debug!(element = %drag.element, "drag ended without movement");
            return Ok(None);
        }

        let mut old_styles = StyleMap::new();
        old_styles.insert("left".into(), drag.start_left);
        old_styles.insert("top".into(), drag.start_top);
        let mut new_styles = StyleMap::new();
        new_styles.insert("left".into(), format!("{}px", drag.offset.0));
        new_styles.insert("top".into(), format!("{}px", drag.offset.1));
        debug!(element = %drag.element, x = drag.offset.0, y = drag.offset.1, "drag ended");
        Ok(Some(HistoryEntry {
            element: drag.element,
            old_styles,
            new_styles,
        }))
    }

    /// Drop a running drag without recording it.
    pub fn cancel<D: PageDom + ?Sized>(&mut self, dom: &mut D, config: &EditorConfig) -> Result<(), DomError> {
        if let Some(drag) = self.active.take() {
            dom.remove_class(drag.element, &config.dragging_class)?;
        }
        Ok(())
    }
}
