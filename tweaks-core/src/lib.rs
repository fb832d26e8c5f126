//! tweaks-core - Platform-free logic for the root variable overlay
//!
//! Reads the page's root custom properties into an editable [`OverlayState`],
//! binds one widget control per field, and writes edits back to the document.
//! The browser and the widget library are reached only through the
//! [`Document`] and [`WidgetBackend`] traits, so everything here runs natively.

pub mod config;
pub mod controls;
pub mod error;
pub mod mount;
pub mod overlay;
pub mod panel;
pub mod state;
pub mod units;
pub mod variables;
pub mod visibility;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::OverlayConfig;
pub use controls::{ControlDef, ControlKind, CONTROLS};
pub use error::OverlayError;
pub use mount::{MountSlot, Unmount};
pub use overlay::Overlay;
pub use panel::{
    ChangeHandler, FieldUpdate, PanelError, WidgetBackend, WidgetControl, WidgetFolder, WidgetPanel,
};
pub use state::{Field, FieldValue, OverlayState};
pub use variables::{Document, DocumentError, MirrorPolicy, VariableAccessor};
pub use visibility::{Visibility, VisibilityController, MIN_VIEWPORT_WIDTH};
