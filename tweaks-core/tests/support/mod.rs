use std::rc::Rc;

use tweaks_core::testing::{FakeDocument, RecordingBackend, RecordingPanel};
use tweaks_core::{MirrorPolicy, Overlay, OverlayConfig};

pub type TestOverlay = Overlay<FakeDocument, RecordingPanel>;

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Root variables as a typical page stylesheet declares them
pub fn styled_document() -> FakeDocument {
    FakeDocument::new()
        .with_property("--color-text", " #1a1a1a")
        .with_property("--color-background", "#ffffff")
        .with_property("--color-debug", "rgba(255, 0, 0, 0.25)")
        .with_property("--max-width", "1200px")
        .with_property("--font-family-primary", "\"Arial\"")
        .with_property("--font-family-secondary", "'Tahoma'")
        .with_property("--general-line-height", "1.5")
}

#[allow(dead_code)]
pub fn overlay_with(
    document: FakeDocument,
    show: bool,
    mirror_policy: MirrorPolicy,
    viewport_width: f64,
) -> (Rc<FakeDocument>, RecordingBackend, TestOverlay) {
    let document = Rc::new(document);
    let backend = RecordingBackend::new();
    let config = OverlayConfig {
        show,
        mirror_policy,
        ..Default::default()
    };
    let overlay = Overlay::initialize(document.clone(), &backend, &config, viewport_width)
        .expect("overlay");
    (document, backend, overlay)
}

/// Visible overlay on a wide viewport with the default mirror policy
#[allow(dead_code)]
pub fn visible_overlay() -> (Rc<FakeDocument>, RecordingBackend, TestOverlay) {
    overlay_with(styled_document(), true, MirrorPolicy::Legacy, 1280.0)
}
