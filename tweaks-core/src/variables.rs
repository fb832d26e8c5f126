//! Root custom property access
//!
//! The [`Document`] trait is the only way the overlay touches the page.
//! [`VariableAccessor`] layers the read cleanup and the state mirroring rule
//! on top of it.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

use crate::state::{Field, FieldValue, OverlayState};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document has no root element")]
    NoRoot,
    #[error("document has no body element")]
    NoBody,
    #[error("style write rejected for {name}: {message}")]
    StyleRejected { name: String, message: String },
    #[error("class list update failed for {class}: {message}")]
    ClassList { class: String, message: String },
}

/// Minimal view of the page the overlay edits.
pub trait Document {
    /// Resolved value of a custom property on the root element, as the
    /// browser reports it. Empty when the property is unset.
    fn computed_property(&self, name: &str) -> String;

    /// Set a custom property on the root element's inline style.
    fn set_property(&self, name: &str, value: &str) -> Result<(), DocumentError>;

    /// Add (`present = true`) or remove a class on the body element.
    fn set_body_class(&self, class: &str, present: bool) -> Result<(), DocumentError>;
}

/// Which state field receives the value written by [`VariableAccessor::update_variable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorPolicy {
    /// Every write lands in `colorText`, whichever variable was written.
    #[default]
    Legacy,
    /// A write lands in the field backed by the written variable.
    Exact,
}

impl MirrorPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Some(Self::Legacy),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// Reads and writes root custom properties.
pub struct VariableAccessor<D> {
    document: Rc<D>,
    mirror: MirrorPolicy,
}

impl<D: Document> VariableAccessor<D> {
    pub fn new(document: Rc<D>, mirror: MirrorPolicy) -> Self {
        Self { document, mirror }
    }

    /// Current value of `name`, trimmed and with all quote characters removed.
    /// An unset property reads as the empty string.
    pub fn fetch_variable(&self, name: &str) -> String {
        clean_value(&self.document.computed_property(name))
    }

    /// Write `value` to `name` on the root and mirror it into `state`.
    ///
    /// The state is updated before the document write and stays updated even
    /// when the write is rejected.
    pub fn update_variable(
        &self,
        state: &mut OverlayState,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        match self.mirror {
            MirrorPolicy::Legacy => state.color_text = value.to_string(),
            MirrorPolicy::Exact => {
                if let Some(field) = Field::from_variable(name) {
                    state.set(field, &FieldValue::Text(value.to_string()));
                }
            }
        }
        debug!(variable = name, value, "Writing root variable");
        self.document.set_property(name, value)
    }

    /// Add or remove a class on the body element.
    pub fn set_body_class(&self, class: &str, present: bool) -> Result<(), DocumentError> {
        debug!(class, present, "Toggling body class");
        self.document.set_body_class(class, present)
    }
}

fn clean_value(raw: &str) -> String {
    raw.trim().replace(['\'', '"'], "")
}
