//! Show/hide decision for the panel

use std::cell::Cell;
use tracing::debug;

/// Narrowest viewport, in CSS pixels, that still gets the panel.
pub const MIN_VIEWPORT_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Combines the fixed `show` flag with the live viewport width.
///
/// There is no debounce: each resize is evaluated on its own. The last
/// outcome is remembered only so transitions can be logged.
#[derive(Debug)]
pub struct VisibilityController {
    show: bool,
    last: Cell<Option<Visibility>>,
}

impl VisibilityController {
    pub fn new(show: bool) -> Self {
        Self {
            show,
            last: Cell::new(None),
        }
    }

    /// Pure decision for a viewport width.
    pub fn evaluate(&self, viewport_width: f64) -> Visibility {
        if self.show && viewport_width >= MIN_VIEWPORT_WIDTH {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }

    /// Evaluate and record the outcome.
    pub fn update(&self, viewport_width: f64) -> Visibility {
        let next = self.evaluate(viewport_width);
        if self.last.replace(Some(next)) != Some(next) {
            debug!(viewport_width, ?next, "Panel visibility changed");
        }
        next
    }

    /// Outcome of the most recent [`update`](Self::update), if any.
    pub fn current(&self) -> Option<Visibility> {
        self.last.get()
    }
}
