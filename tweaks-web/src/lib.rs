//! tweaks-web - Root variable overlay for the browser
//!
//! Wires `tweaks-core` to the live page: [`BrowserDocument`] for the root
//! style and body classes, [`LilGuiBackend`] for the panel, and a window
//! `resize` listener that owns the overlay context.
//!
//! With the default `autostart` feature the overlay mounts itself on
//! `DOMContentLoaded`. Pages can also call the exported `initialize({ show })`;
//! only the newest mount stays live, so `initialize({ show: false })` removes
//! an autostarted panel.

pub mod dom;
pub mod lil_gui;
pub mod listener;
pub mod logging;

use std::rc::Rc;

use tracing::{debug, info};
use tweaks_core::{MountSlot, Overlay, OverlayConfig, OverlayError, Unmount};
use wasm_bindgen::prelude::*;

pub use dom::BrowserDocument;
pub use lil_gui::{LilGuiBackend, LilGuiPanel};
pub use listener::EventListener;

pub type BrowserOverlay = Overlay<BrowserDocument, LilGuiPanel>;

/// The live overlay together with the listener that drives it.
struct Mounted {
    overlay: Rc<BrowserOverlay>,
    resize: EventListener,
}

impl Unmount for Mounted {
    fn unmount(self) {
        drop(self.resize);
        self.overlay.dispose();
    }
}

thread_local! {
    static MOUNTED: MountSlot<Mounted> = const { MountSlot::new() };
}

/// View of a mounted overlay. Once a later mount replaces it, the handle
/// reports the old overlay as not visible.
#[wasm_bindgen]
pub struct OverlayHandle {
    overlay: Rc<BrowserOverlay>,
}

#[wasm_bindgen]
impl OverlayHandle {
    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    /// Current state as a plain object keyed by field name.
    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&*self.overlay.state())
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Build the overlay against the current window and start following resizes.
/// Any overlay mounted earlier is torn down.
pub fn mount(config: &OverlayConfig) -> Result<OverlayHandle, OverlayError> {
    let window = web_sys::window().ok_or(OverlayError::NoWindow)?;
    let document = Rc::new(BrowserDocument::from_window(window.clone())?);
    let viewport_width = document.viewport_width();

    let overlay = Rc::new(Overlay::initialize(
        Rc::clone(&document),
        &LilGuiBackend,
        config,
        viewport_width,
    )?);
    if let Ok(snapshot) = serde_json::to_string(&*overlay.state()) {
        debug!(state = %snapshot, "Root variables loaded");
    }

    let resize = {
        let overlay = Rc::clone(&overlay);
        EventListener::new(window.into(), "resize", move |_| {
            overlay.handle_resize(document.viewport_width());
        })
    };

    info!(
        visible = overlay.is_visible(),
        viewport_width, "Overlay mounted"
    );
    MOUNTED.with(|slot| {
        slot.install(Mounted {
            overlay: Rc::clone(&overlay),
            resize,
        })
    });
    Ok(OverlayHandle { overlay })
}

/// JS entry point: `initialize({ show: true })`.
///
/// `options` may be omitted; missing keys take their defaults.
#[wasm_bindgen]
pub fn initialize(options: JsValue) -> Result<OverlayHandle, JsError> {
    let config: OverlayConfig = if options.is_undefined() || options.is_null() {
        OverlayConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::from(OverlayError::Options(e.to_string())))?
    };
    logging::init(&config.log_level);
    mount(&config).map_err(|e| JsError::new(&e.to_string()))
}

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(bootstrap);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .is_err()
        {
            // Logging is not set up until bootstrap runs
            web_sys::console::warn_1(&JsValue::from_str(
                "tweaks: could not wait for DOMContentLoaded, overlay not mounted",
            ));
        }
    } else {
        bootstrap();
    }
}

#[cfg(feature = "autostart")]
fn bootstrap() {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let config = OverlayConfig::default().with_query(&search);
    logging::init(&config.log_level);

    // The page called initialize() before the document finished loading
    if MOUNTED.with(MountSlot::is_mounted) {
        debug!("Overlay already mounted, skipping autostart");
        return;
    }
    if let Err(e) = mount(&config) {
        tracing::error!("Failed to mount overlay: {e}");
    }
}
