//! Application state: a single `State` value shared between the input
//! thread, the worker thread, and the renderer.

mod form;
mod navigation;
mod overlay;
mod panel;
mod state_impl;

pub use form::{AddressField, EventFormField};
pub use navigation::{AddressFocus, EventsView, Tab};
pub use overlay::{Overlay, OverlayVisibility, DEFAULT_CLOSE_MS, DEFAULT_OPEN_MS};
pub use panel::PanelState;
pub use state_impl::{State, DEMO_ITEM_COUNT};
