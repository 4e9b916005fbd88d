//! The popup: controls for the selected element's styles, a local preview
//! and the undo/redo buttons.

mod color;
mod component;
mod controls;
mod state;
mod style_controls;
mod transport;

pub use color::to_hex;
pub use component::{PanelApp, PANEL_STATE};
pub use controls::{control, groups, ControlBinding, ControlKind, Trigger, ValueTransform, CONTROLS};
pub use state::{PanelState, PreviewState};
pub use transport::{listen, send};
