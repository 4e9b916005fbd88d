//! The content-script half of the extension: selection, drag, style edits
//! and the undo/redo log for one page.

mod dom;
mod drag;
mod history;
mod registry;
mod selection;
mod session;
mod snapshot;
mod storage;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(test)]
mod fake_dom;

pub use dom::{ElementHandle, PageDom, Rect, StyleInspector};
pub use drag::{DragController, OriginalInline, Pointer};
pub use history::{apply_styles, History, HistoryEntry, HistoryStep};
pub use registry::{ElementRegistry, IdentityMap};
pub use selection::{ProximityTracker, SelectionChange, SelectionTracker};
pub use session::{EditorSession, MouseDownOutcome, MouseInput};
pub use snapshot::{build_snapshot, Dimensions, ElementSnapshot, SNAPSHOT_PROPERTIES};
pub use storage::{history_record, HistoryStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use browser::start;
