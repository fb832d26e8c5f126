//! Event listener tied to Rust ownership
//!
//! The closure backing a JS listener has to outlive the registration. Storing
//! it next to its target and removing the listener on `Drop` keeps exactly one
//! registration per value: dropping the [`EventListener`] detaches it, and a
//! listener that is never dropped stays attached for the page's lifetime.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub struct EventListener {
    target: web_sys::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(JsValue)>,
}

impl EventListener {
    /// Attach `callback` to `event_name` on `target`.
    pub fn new(
        target: web_sys::EventTarget,
        event_name: &'static str,
        callback: impl FnMut(JsValue) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(JsValue)> =
            Closure::wrap(Box::new(callback) as Box<dyn FnMut(JsValue)>);

        target
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Self {
            target,
            event_name,
            callback,
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
