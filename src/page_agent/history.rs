//! Linear undo/redo log of style edits.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::dom::{ElementHandle, PageDom};
use crate::error::{DomError, EditorError};
use crate::style::{css_name, needs_important, StyleMap};

/// One undoable action: the styles an element had before and after it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub element: ElementHandle,
    pub old_styles: StyleMap,
    pub new_styles: StyleMap,
}

/// Result of an undo or redo.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryStep {
    /// The styles written back to the element.
    Applied(StyleMap),
    /// Nothing to undo/redo.
    Noop,
}

/// Entries plus a cursor pointing at the last applied entry. `None` is the
/// "nothing applied" position (index -1 when persisted).
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor as a signed index, -1 when nothing is applied.
    pub fn index(&self) -> i64 {
        self.cursor.map_or(-1, |c| c as i64)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.next_index() < self.entries.len()
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// Drop everything after the cursor and append `entry` as the new tail.
    pub fn record(&mut self, entry: HistoryEntry) {
        let keep = self.next_index();
        if keep < self.entries.len() {
            debug!(dropped = self.entries.len() - keep, "discarding redo entries");
        }
        self.entries.truncate(keep);
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
        trace!(index = self.index(), "recorded history entry");
    }

    /// Write the current entry's old styles back and step the cursor back.
    ///
    /// The cursor moves even when the target has left the document; the
    /// entry is then reported as [`EditorError::DetachedTarget`] and
    /// nothing is applied.
    pub fn undo<D: PageDom>(&mut self, dom: &mut D) -> Result<HistoryStep, EditorError> {
        let Some(current) = self.cursor else {
            return Ok(HistoryStep::Noop);
        };
        self.cursor = current.checked_sub(1);
        let entry = &self.entries[current];
        if !dom.is_attached(entry.element) {
            return Err(EditorError::DetachedTarget(entry.element));
        }
        apply_styles(dom, entry.element, &entry.old_styles)?;
        Ok(HistoryStep::Applied(entry.old_styles.clone()))
    }

    /// Step forward and re-apply that entry's new styles. Detached targets
    /// are handled as in [`History::undo`].
    pub fn redo<D: PageDom>(&mut self, dom: &mut D) -> Result<HistoryStep, EditorError> {
        if !self.can_redo() {
            return Ok(HistoryStep::Noop);
        }
        let next = self.next_index();
        self.cursor = Some(next);
        let entry = &self.entries[next];
        if !dom.is_attached(entry.element) {
            return Err(EditorError::DetachedTarget(entry.element));
        }
        apply_styles(dom, entry.element, &entry.new_styles)?;
        Ok(HistoryStep::Applied(entry.new_styles.clone()))
    }
}

/// Write a style map inline. `color` goes in with `!important` so page
/// stylesheets cannot override it.
pub fn apply_styles<D: PageDom + ?Sized>(
    dom: &mut D,
    element: ElementHandle,
    styles: &StyleMap,
) -> Result<(), DomError> {
    for (property, value) in styles {
        dom.set_inline_style(element, &css_name(property), value, needs_important(property))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
