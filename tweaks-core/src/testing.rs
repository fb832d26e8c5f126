//! In-memory document and recording widget backend for tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::controls::{ControlDef, ControlKind};
use crate::panel::{ChangeHandler, PanelError, WidgetBackend, WidgetControl, WidgetFolder, WidgetPanel};
use crate::state::{Field, FieldValue};
use crate::variables::{Document, DocumentError};

/// Document with a stylesheet layer and an inline layer on the root.
///
/// Inline properties win over stylesheet ones when resolving, as they do in
/// a browser.
#[derive(Default)]
pub struct FakeDocument {
    stylesheet: RefCell<BTreeMap<String, String>>,
    inline: RefCell<BTreeMap<String, String>>,
    body_classes: RefCell<BTreeSet<String>>,
    writes: RefCell<Vec<(String, String)>>,
    reject_writes: Cell<bool>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property in the stylesheet layer.
    pub fn with_property(self, name: &str, value: &str) -> Self {
        self.stylesheet
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn inline_property(&self, name: &str) -> Option<String> {
        self.inline.borrow().get(name).cloned()
    }

    /// Every accepted `set_property` call, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.borrow().contains(class)
    }
}

impl Document for FakeDocument {
    fn computed_property(&self, name: &str) -> String {
        if let Some(value) = self.inline.borrow().get(name) {
            return value.clone();
        }
        self.stylesheet
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    fn set_property(&self, name: &str, value: &str) -> Result<(), DocumentError> {
        if self.reject_writes.get() {
            return Err(DocumentError::StyleRejected {
                name: name.to_string(),
                message: "rejected by test".to_string(),
            });
        }
        self.inline
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self.writes
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_body_class(&self, class: &str, present: bool) -> Result<(), DocumentError> {
        let mut classes = self.body_classes.borrow_mut();
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
        Ok(())
    }
}

/// Operations observed by the recording backend.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent {
    CreatePanel,
    AddFolder(String),
    AddControl {
        field: Field,
        label: String,
        kind: ControlKind,
    },
    Show,
    Hide,
    Destroy,
    /// A control was told to display a value it did not originate.
    Display { field: Field, value: FieldValue },
}

#[derive(Default)]
struct Recording {
    events: Vec<PanelEvent>,
    initial: HashMap<Field, FieldValue>,
    handlers: HashMap<Field, ChangeHandler>,
}

/// Widget backend that records every call and lets tests fire change events.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    recording: Rc<RefCell<Recording>>,
    fail_create: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_panel` fail.
    pub fn failing(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn events(&self) -> Vec<PanelEvent> {
        self.recording.borrow().events.clone()
    }

    pub fn panels_created(&self) -> usize {
        self.count(|e| matches!(e, PanelEvent::CreatePanel))
    }

    /// Number of show plus hide calls.
    pub fn visibility_calls(&self) -> usize {
        self.count(|e| matches!(e, PanelEvent::Show | PanelEvent::Hide))
    }

    /// Whether the last show/hide call was a show. `None` if neither happened.
    pub fn is_shown(&self) -> Option<bool> {
        self.recording
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|e| match e {
                PanelEvent::Show => Some(true),
                PanelEvent::Hide => Some(false),
                _ => None,
            })
    }

    pub fn initial_value(&self, field: Field) -> Option<FieldValue> {
        self.recording.borrow().initial.get(&field).cloned()
    }

    /// Simulate the user editing a control. Returns `false` if the control has
    /// no change handler.
    pub fn change(&self, field: Field, value: FieldValue) -> bool {
        // Take the handler out so it can run without holding the borrow
        let handler = self.recording.borrow_mut().handlers.remove(&field);
        let Some(mut handler) = handler else {
            return false;
        };
        if let Some((field, value)) = handler(value) {
            self.record(PanelEvent::Display { field, value });
        }
        self.recording
            .borrow_mut()
            .handlers
            .entry(field)
            .or_insert(handler);
        true
    }

    fn count(&self, predicate: impl Fn(&PanelEvent) -> bool) -> usize {
        self.recording
            .borrow()
            .events
            .iter()
            .filter(|e| predicate(*e))
            .count()
    }

    fn record(&self, event: PanelEvent) {
        self.recording.borrow_mut().events.push(event);
    }
}

impl WidgetBackend for RecordingBackend {
    type Panel = RecordingPanel;

    fn create_panel(&self) -> Result<RecordingPanel, PanelError> {
        if self.fail_create {
            return Err(PanelError::Unavailable("recording backend set to fail".into()));
        }
        self.record(PanelEvent::CreatePanel);
        Ok(RecordingPanel {
            backend: self.clone(),
        })
    }
}

pub struct RecordingPanel {
    backend: RecordingBackend,
}

impl WidgetPanel for RecordingPanel {
    type Folder = RecordingFolder;

    fn add_folder(&mut self, title: &str) -> Result<RecordingFolder, PanelError> {
        self.backend.record(PanelEvent::AddFolder(title.to_string()));
        Ok(RecordingFolder {
            backend: self.backend.clone(),
        })
    }

    fn show(&self) {
        self.backend.record(PanelEvent::Show);
    }

    fn hide(&self) {
        self.backend.record(PanelEvent::Hide);
    }

    fn destroy(&self) {
        self.backend.record(PanelEvent::Destroy);
    }
}

pub struct RecordingFolder {
    backend: RecordingBackend,
}

impl WidgetFolder for RecordingFolder {
    type Control = RecordingControl;

    fn add_control(
        &mut self,
        def: &ControlDef,
        initial: &FieldValue,
    ) -> Result<RecordingControl, PanelError> {
        self.backend.record(PanelEvent::AddControl {
            field: def.field,
            label: def.label.to_string(),
            kind: def.kind.clone(),
        });
        self.backend
            .recording
            .borrow_mut()
            .initial
            .insert(def.field, initial.clone());
        Ok(RecordingControl {
            backend: self.backend.clone(),
            field: def.field,
        })
    }
}

pub struct RecordingControl {
    backend: RecordingBackend,
    field: Field,
}

impl WidgetControl for RecordingControl {
    fn on_change(&mut self, handler: ChangeHandler) {
        self.backend
            .recording
            .borrow_mut()
            .handlers
            .insert(self.field, handler);
    }
}

impl Drop for RecordingControl {
    fn drop(&mut self) {
        self.backend
            .recording
            .borrow_mut()
            .handlers
            .remove(&self.field);
    }
}
