//! `web-sys` implementation of the overlay's document view

use tracing::warn;
use tweaks_core::{Document, DocumentError};
use wasm_bindgen::{JsCast, JsValue};

/// The live page: `documentElement` for custom properties, `body` for classes.
pub struct BrowserDocument {
    window: web_sys::Window,
    root: web_sys::HtmlElement,
    body: web_sys::HtmlElement,
}

impl BrowserDocument {
    pub fn from_window(window: web_sys::Window) -> Result<Self, DocumentError> {
        let document = window.document().ok_or(DocumentError::NoRoot)?;
        let root = document
            .document_element()
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            .ok_or(DocumentError::NoRoot)?;
        let body = document.body().ok_or(DocumentError::NoBody)?;
        Ok(Self { window, root, body })
    }

    /// `window.innerWidth` in CSS pixels, 0 if unavailable.
    pub fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }
}

impl Document for BrowserDocument {
    fn computed_property(&self, name: &str) -> String {
        match self.window.get_computed_style(&self.root) {
            Ok(Some(style)) => style.get_property_value(name).unwrap_or_default(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("getComputedStyle failed for {name}: {}", describe(&e));
                String::new()
            }
        }
    }

    fn set_property(&self, name: &str, value: &str) -> Result<(), DocumentError> {
        self.root
            .style()
            .set_property(name, value)
            .map_err(|e| DocumentError::StyleRejected {
                name: name.to_string(),
                message: describe(&e),
            })
    }

    fn set_body_class(&self, class: &str, present: bool) -> Result<(), DocumentError> {
        let classes = self.body.class_list();
        let result = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        result.map_err(|e| DocumentError::ClassList {
            class: class.to_string(),
            message: describe(&e),
        })
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
