//! lil-gui bindings
//!
//! Drives the `lil` global exposed by lil-gui's UMD build, looked up at
//! runtime through `Reflect` rather than linked, so the page decides how the
//! script is loaded. All controllers bind to one plain JS object holding a
//! property per field; lil-gui writes edits into it and then calls
//! `onChange`, which is where the overlay takes over. When an edit also
//! changed another field, the new value is written into that object too and
//! the folder's controllers redraw.

use js_sys::{Array, Function, Object, Reflect};
use tracing::{debug, warn};
use tweaks_core::{
    ChangeHandler, ControlDef, ControlKind, FieldUpdate, FieldValue, PanelError, WidgetBackend,
    WidgetControl, WidgetFolder, WidgetPanel,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::describe;

/// Keeps the panel above page content.
const PANEL_Z_INDEX: &str = "2147483647";

/// Factory for lil-gui panels.
#[derive(Debug, Default, Clone, Copy)]
pub struct LilGuiBackend;

impl WidgetBackend for LilGuiBackend {
    type Panel = LilGuiPanel;

    fn create_panel(&self) -> Result<LilGuiPanel, PanelError> {
        let window = web_sys::window().ok_or_else(|| PanelError::Unavailable("no window".into()))?;
        let lil = Reflect::get(&window, &"lil".into())
            .ok()
            .filter(|v| v.is_object())
            .ok_or_else(|| PanelError::Unavailable("lil-gui is not loaded (window.lil)".into()))?;
        let constructor = Reflect::get(&lil, &"GUI".into())
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
            .ok_or_else(|| PanelError::Unavailable("window.lil.GUI is not a constructor".into()))?;

        let gui = Reflect::construct(&constructor, &Array::new()).map_err(|e| PanelError::Call {
            call: "new GUI",
            message: describe(&e),
        })?;
        raise_to_top(&gui);

        Ok(LilGuiPanel {
            gui,
            target: Object::new(),
        })
    }
}

pub struct LilGuiPanel {
    gui: JsValue,
    /// Object every controller reads and writes.
    target: Object,
}

impl WidgetPanel for LilGuiPanel {
    type Folder = LilGuiFolder;

    fn add_folder(&mut self, title: &str) -> Result<LilGuiFolder, PanelError> {
        let folder = call_method(&self.gui, "addFolder", &Array::of1(&title.into()))?;
        Ok(LilGuiFolder {
            folder,
            target: self.target.clone(),
        })
    }

    fn show(&self) {
        if let Err(e) = call_method(&self.gui, "show", &Array::new()) {
            warn!("Failed to show panel: {e}");
        }
    }

    fn hide(&self) {
        if let Err(e) = call_method(&self.gui, "hide", &Array::new()) {
            warn!("Failed to hide panel: {e}");
        }
    }

    fn destroy(&self) {
        if let Err(e) = call_method(&self.gui, "destroy", &Array::new()) {
            warn!("Failed to destroy panel: {e}");
        }
    }
}

pub struct LilGuiFolder {
    folder: JsValue,
    target: Object,
}

impl WidgetFolder for LilGuiFolder {
    type Control = LilGuiControl;

    fn add_control(
        &mut self,
        def: &ControlDef,
        initial: &FieldValue,
    ) -> Result<LilGuiControl, PanelError> {
        let key = JsValue::from_str(def.field.key());
        Reflect::set(&self.target, &key, &to_js(initial)).map_err(|e| PanelError::Call {
            call: "Reflect.set",
            message: describe(&e),
        })?;

        let controller = match &def.kind {
            ControlKind::Color => {
                call_method(&self.folder, "addColor", &Array::of2(&self.target, &key))?
            }
            ControlKind::Slider { min, max, .. } => call_method(
                &self.folder,
                "add",
                &Array::of4(
                    &self.target,
                    &key,
                    &JsValue::from_f64(*min),
                    &JsValue::from_f64(*max),
                ),
            )?,
            ControlKind::Choice(options) => {
                let options: Array = options.iter().map(|o| JsValue::from_str(o)).collect();
                call_method(&self.folder, "add", &Array::of3(&self.target, &key, &options))?
            }
            ControlKind::Toggle => call_method(&self.folder, "add", &Array::of2(&self.target, &key))?,
        };
        call_method(&controller, "name", &Array::of1(&def.label.into()))?;

        debug!(field = %def.field, label = def.label, "Added lil-gui controller");
        Ok(LilGuiControl {
            controller,
            folder: self.folder.clone(),
            target: self.target.clone(),
            callback: None,
        })
    }
}

pub struct LilGuiControl {
    controller: JsValue,
    folder: JsValue,
    target: Object,
    /// Must live as long as lil-gui may call it.
    callback: Option<Closure<dyn FnMut(JsValue)>>,
}

impl WidgetControl for LilGuiControl {
    fn on_change(&mut self, mut handler: ChangeHandler) {
        let folder = self.folder.clone();
        let target = self.target.clone();
        let callback: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(move |value: JsValue| {
            if let Some(update) = handler(from_js(&value)) {
                display_update(&folder, &target, update);
            }
        }) as Box<dyn FnMut(JsValue)>);

        if let Err(e) = call_method(&self.controller, "onChange", &Array::of1(callback.as_ref())) {
            warn!("Failed to register change handler: {e}");
            return;
        }
        self.callback = Some(callback);
    }
}

fn call_method(target: &JsValue, name: &'static str, args: &Array) -> Result<JsValue, PanelError> {
    let method = Reflect::get(target, &name.into())
        .ok()
        .and_then(|m| m.dyn_into::<Function>().ok())
        .ok_or_else(|| PanelError::Call {
            call: name,
            message: "not a function".to_string(),
        })?;
    method.apply(target, args).map_err(|e| PanelError::Call {
        call: name,
        message: describe(&e),
    })
}

/// Write a side-effect update into the bound object and redraw the folder.
fn display_update(folder: &JsValue, target: &Object, (field, value): FieldUpdate) {
    if let Err(e) = Reflect::set(target, &field.key().into(), &to_js(&value)) {
        warn!(%field, "Failed to update bound value: {}", describe(&e));
        return;
    }
    let controllers = Reflect::get(folder, &"controllers".into())
        .ok()
        .and_then(|c| c.dyn_into::<Array>().ok());
    for controller in controllers.iter().flat_map(|c| c.iter()) {
        if let Err(e) = call_method(&controller, "updateDisplay", &Array::new()) {
            debug!("Controller did not redraw: {e}");
        }
    }
}

fn raise_to_top(gui: &JsValue) {
    let element = Reflect::get(gui, &"domElement".into())
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    match element {
        Some(el) => {
            if let Err(e) = el.style().set_property("z-index", PANEL_Z_INDEX) {
                warn!("Failed to raise panel: {}", describe(&e));
            }
        }
        None => debug!("Panel has no domElement to raise"),
    }
}

fn to_js(value: &FieldValue) -> JsValue {
    match value {
        FieldValue::Text(s) => JsValue::from_str(s),
        FieldValue::Number(n) => JsValue::from_f64(*n),
        FieldValue::Bool(b) => JsValue::from_bool(*b),
    }
}

fn from_js(value: &JsValue) -> FieldValue {
    if let Some(b) = value.as_bool() {
        FieldValue::Bool(b)
    } else if let Some(n) = value.as_f64() {
        FieldValue::Number(n)
    } else {
        FieldValue::Text(value.as_string().unwrap_or_default())
    }
}
