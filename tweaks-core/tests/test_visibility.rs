#![cfg(feature = "test-utils")]
//! Panel visibility across viewport resizes.
mod support;
use crate::support::{overlay_with, styled_document, tracing_init, visible_overlay};
use tweaks_core::{MirrorPolicy, Visibility};

#[test]
fn test_wide_viewport_shows_panel() {
    tracing_init();
    let (_, backend, overlay) = visible_overlay();
    assert!(overlay.is_visible());
    assert_eq!(backend.is_shown(), Some(true));
}

#[test]
fn test_resize_hides_then_shows() {
    tracing_init();
    let (_, backend, overlay) = visible_overlay();

    assert_eq!(overlay.handle_resize(800.0), Visibility::Hidden);
    assert_eq!(backend.is_shown(), Some(false));
    assert!(!overlay.is_visible());

    assert_eq!(overlay.handle_resize(1280.0), Visibility::Shown);
    assert_eq!(backend.is_shown(), Some(true));
    assert!(overlay.is_visible());
}

#[test]
fn test_each_resize_toggles_once() {
    tracing_init();
    let (_, backend, overlay) = visible_overlay();
    let initial_calls = backend.visibility_calls();

    for width in [800.0, 1280.0, 1000.0, 1024.0, 1440.0, 640.0] {
        overlay.handle_resize(width);
    }

    // One show/hide per resize, and the panel itself is never rebuilt
    assert_eq!(backend.visibility_calls(), initial_calls + 6);
    assert_eq!(backend.panels_created(), 1);
    assert_eq!(backend.is_shown(), Some(false));
}

#[test]
fn test_show_false_never_builds_panel() {
    tracing_init();
    let (_, backend, overlay) = overlay_with(styled_document(), false, MirrorPolicy::Legacy, 1280.0);

    assert_eq!(overlay.handle_resize(2560.0), Visibility::Hidden);
    assert_eq!(overlay.handle_resize(800.0), Visibility::Hidden);
    assert!(!overlay.is_visible());
    assert!(backend.events().is_empty());
}

#[test]
fn test_panel_not_built_on_narrow_start() {
    tracing_init();
    let (_, backend, overlay) = overlay_with(styled_document(), true, MirrorPolicy::Legacy, 900.0);

    assert!(!overlay.has_panel());
    overlay.handle_resize(1600.0);
    assert!(!overlay.is_visible());
    assert_eq!(backend.panels_created(), 0);
}
