//! Widget panel capability traits
//!
//! The overlay needs exactly these operations from a GUI library: create a
//! panel, add a folder, add a control bound to a field, subscribe to changes,
//! show or hide the panel, and tear it down again. Rendering is entirely the
//! backend's business.

use thiserror::Error;

use crate::controls::ControlDef;
use crate::state::{Field, FieldValue};

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("widget library unavailable: {0}")]
    Unavailable(String),
    #[error("widget call {call} failed: {message}")]
    Call { call: &'static str, message: String },
}

/// Another field an edit changed as a side effect. The backend shows the new
/// value in that field's control.
pub type FieldUpdate = (Field, FieldValue);

/// Callback invoked synchronously with the control's new value.
pub type ChangeHandler = Box<dyn FnMut(FieldValue) -> Option<FieldUpdate>>;

/// Entry point of a widget library.
pub trait WidgetBackend {
    type Panel: WidgetPanel;

    fn create_panel(&self) -> Result<Self::Panel, PanelError>;
}

pub trait WidgetPanel {
    type Folder: WidgetFolder;

    fn add_folder(&mut self, title: &str) -> Result<Self::Folder, PanelError>;

    fn show(&self);

    fn hide(&self);

    /// Remove the panel from the page.
    fn destroy(&self);
}

pub trait WidgetFolder {
    type Control: WidgetControl;

    /// Add a control for `def`, starting at `initial`.
    fn add_control(
        &mut self,
        def: &ControlDef,
        initial: &FieldValue,
    ) -> Result<Self::Control, PanelError>;
}

pub trait WidgetControl {
    /// Register the change callback. A later call replaces the earlier one.
    fn on_change(&mut self, handler: ChangeHandler);
}
