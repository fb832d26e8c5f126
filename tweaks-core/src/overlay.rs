//! The overlay context
//!
//! An [`Overlay`] is built once per page load. It owns the state mirror, the
//! accessor, the visibility controller and, when the panel was built, the
//! panel with every bound control. The page adapter keeps the overlay alive,
//! forwards each viewport resize to [`Overlay::handle_resize`] and calls
//! [`Overlay::dispose`] when the overlay is replaced.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::config::OverlayConfig;
use crate::controls::{ControlDef, CONTROLS, DARK_MODE_CLASS, FOLDER_TITLE};
use crate::error::OverlayError;
use crate::mount::Unmount;
use crate::panel::{FieldUpdate, WidgetBackend, WidgetControl, WidgetFolder, WidgetPanel};
use crate::state::{Field, FieldValue, OverlayState};
use crate::variables::{Document, VariableAccessor};
use crate::visibility::{Visibility, VisibilityController};

type ControlOf<P> = <<P as WidgetPanel>::Folder as WidgetFolder>::Control;

/// A built panel plus the handles that must outlive it.
struct PanelBinding<P: WidgetPanel> {
    panel: P,
    _folder: P::Folder,
    _controls: Vec<ControlOf<P>>,
}

pub struct Overlay<D: Document, P: WidgetPanel> {
    state: Rc<RefCell<OverlayState>>,
    accessor: Rc<VariableAccessor<D>>,
    visibility: VisibilityController,
    binding: RefCell<Option<PanelBinding<P>>>,
}

impl<D, P> Overlay<D, P>
where
    D: Document + 'static,
    P: WidgetPanel,
{
    /// Read the root variables and, if the panel should be visible at
    /// `viewport_width`, build it with one control per field.
    ///
    /// When the panel is not built here it is never built later: widening the
    /// viewport afterwards has nothing to show.
    pub fn initialize<B>(
        document: Rc<D>,
        backend: &B,
        config: &OverlayConfig,
        viewport_width: f64,
    ) -> Result<Self, OverlayError>
    where
        B: WidgetBackend<Panel = P>,
    {
        let accessor = Rc::new(VariableAccessor::new(document, config.mirror_policy));
        let state = Rc::new(RefCell::new(OverlayState::from_document(&accessor)));
        let visibility = VisibilityController::new(config.show);

        let binding = match visibility.evaluate(viewport_width) {
            Visibility::Shown => Some(bind_panel(backend, &state, &accessor)?),
            Visibility::Hidden => {
                info!(
                    show = config.show,
                    viewport_width, "Overlay panel not built"
                );
                None
            }
        };

        let overlay = Self {
            state,
            accessor,
            visibility,
            binding: RefCell::new(binding),
        };
        overlay.handle_resize(viewport_width);
        Ok(overlay)
    }

    /// Re-evaluate visibility for a new viewport width and show or hide the
    /// panel accordingly. Without a panel this only records the decision.
    pub fn handle_resize(&self, viewport_width: f64) -> Visibility {
        let visibility = self.visibility.update(viewport_width);
        if let Some(binding) = self.binding.borrow().as_ref() {
            match visibility {
                Visibility::Shown => binding.panel.show(),
                Visibility::Hidden => binding.panel.hide(),
            }
        }
        visibility
    }

    pub fn state(&self) -> Ref<'_, OverlayState> {
        self.state.borrow()
    }

    pub fn accessor(&self) -> &VariableAccessor<D> {
        &self.accessor
    }

    pub fn has_panel(&self) -> bool {
        self.binding.borrow().is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.has_panel() && self.visibility.current() == Some(Visibility::Shown)
    }

    /// Destroy the panel and drop its controls. Later resizes only record the
    /// visibility decision. Calling it again is a no-op.
    pub fn dispose(&self) {
        let binding = self.binding.borrow_mut().take();
        if let Some(binding) = binding {
            binding.panel.destroy();
            info!("Overlay panel destroyed");
        }
    }
}

impl<D, P> Unmount for Overlay<D, P>
where
    D: Document + 'static,
    P: WidgetPanel,
{
    fn unmount(self) {
        self.dispose();
    }
}

fn bind_panel<B, D>(
    backend: &B,
    state: &Rc<RefCell<OverlayState>>,
    accessor: &Rc<VariableAccessor<D>>,
) -> Result<PanelBinding<B::Panel>, OverlayError>
where
    B: WidgetBackend,
    D: Document + 'static,
{
    let mut panel = backend.create_panel()?;
    let mut folder = panel.add_folder(FOLDER_TITLE)?;

    let mut controls = Vec::with_capacity(CONTROLS.len());
    for def in CONTROLS {
        let initial = state.borrow().get(def.field);
        let mut control = folder.add_control(def, &initial)?;

        let state = Rc::clone(state);
        let accessor = Rc::clone(accessor);
        control.on_change(Box::new(move |value| {
            apply_change(def, value, &state, &accessor)
        }));
        controls.push(control);
    }

    info!(controls = controls.len(), "Overlay panel built");
    Ok(PanelBinding {
        panel,
        _folder: folder,
        _controls: controls,
    })
}

/// Store a control's new value and push it to the document.
///
/// Runs inside widget callbacks, so failures are logged rather than returned.
/// When the write also replaced `colorText` in the state, the new text is
/// returned for the colorText control to display.
fn apply_change<D: Document>(
    def: &ControlDef,
    value: FieldValue,
    state: &RefCell<OverlayState>,
    accessor: &VariableAccessor<D>,
) -> Option<FieldUpdate> {
    debug!(field = %def.field, ?value, "Control changed");
    let mut state = state.borrow_mut();
    state.set(def.field, &value);
    let color_text = state.color_text.clone();

    let result = match (def.field.variable(), def.css_value(&value)) {
        (Some(name), Some(css)) => accessor.update_variable(&mut state, name, &css),
        _ => accessor.set_body_class(DARK_MODE_CLASS, value.as_bool()),
    };
    if let Err(e) = result {
        warn!(field = %def.field, "Failed to apply control change: {e}");
    }

    (def.field != Field::ColorText && state.color_text != color_text)
        .then(|| (Field::ColorText, FieldValue::Text(state.color_text.clone())))
}
