#![cfg(feature = "test-utils")]
//! Control edits flowing back into the document.
//!
//! Every edit goes through the recording backend's change hook, which calls
//! the same handler a real widget would.
mod support;
use crate::support::{overlay_with, styled_document, tracing_init, visible_overlay};
use tweaks_core::controls::DARK_MODE_CLASS;
use tweaks_core::testing::{FakeDocument, PanelEvent};
use tweaks_core::{Field, FieldValue, MirrorPolicy};

#[test]
fn test_state_mirrors_root_variables() {
    tracing_init();
    let (_, _, overlay) = visible_overlay();
    let state = overlay.state();

    assert_eq!(state.color_text, "#1a1a1a");
    assert_eq!(state.color_background, "#ffffff");
    assert_eq!(state.color_debug, "rgba(255, 0, 0, 0.25)");
    assert_eq!(state.max_width, Some(1200.0));
    assert_eq!(state.font_family_primary, "Arial");
    assert_eq!(state.font_family_secondary, "Tahoma");
    assert_eq!(state.general_line_height, Some(1.5));
    assert!(!state.dark_mode);
}

#[test]
fn test_color_edit_updates_only_its_property() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();

    assert!(backend.change(Field::ColorBackground, FieldValue::Text("#202020".into())));

    assert_eq!(
        doc.writes(),
        vec![("--color-background".to_string(), "#202020".to_string())]
    );
    assert_eq!(overlay.accessor().fetch_variable("--color-background"), "#202020");
    assert_eq!(overlay.accessor().fetch_variable("--color-text"), "#1a1a1a");
    assert_eq!(overlay.state().color_background, "#202020");
}

/// Every write also lands in colorText. Kept for compatibility with the
/// behavior pages were tuned against; `MirrorPolicy::Exact` turns it off.
#[test]
fn test_legacy_mirror_overwrites_color_text_state() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();

    backend.change(Field::FontFamilyPrimary, FieldValue::Text("Georgia".into()));

    assert_eq!(overlay.state().font_family_primary, "Georgia");
    assert_eq!(overlay.state().color_text, "Georgia");
    // Only the state drifts; the text color property itself is untouched
    assert_eq!(doc.inline_property("--color-text"), None);
    assert_eq!(overlay.accessor().fetch_variable("--color-text"), "#1a1a1a");
}

#[test]
fn test_exact_mirror_leaves_color_text_alone() {
    tracing_init();
    let (_, backend, overlay) = overlay_with(styled_document(), true, MirrorPolicy::Exact, 1280.0);

    backend.change(Field::FontFamilySecondary, FieldValue::Text("Impact".into()));

    assert_eq!(overlay.state().font_family_secondary, "Impact");
    assert_eq!(overlay.state().color_text, "#1a1a1a");
}

#[test]
fn test_max_width_edit_writes_px() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();

    backend.change(Field::MaxWidth, FieldValue::Number(1500.0));

    assert_eq!(doc.inline_property("--max-width").as_deref(), Some("1500px"));
    assert_eq!(doc.writes().len(), 1);
    assert_eq!(overlay.state().max_width, Some(1500.0));
}

#[test]
fn test_line_height_edit_writes_plain_number() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();

    backend.change(Field::GeneralLineHeight, FieldValue::Number(1.8));

    assert_eq!(doc.inline_property("--general-line-height").as_deref(), Some("1.8"));
    assert_eq!(overlay.state().general_line_height, Some(1.8));
}

#[test]
fn test_dark_mode_toggles_body_class_only() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();

    backend.change(Field::DarkMode, FieldValue::Bool(true));
    assert!(doc.has_body_class(DARK_MODE_CLASS));
    assert!(doc.writes().is_empty());
    assert!(overlay.state().dark_mode);
    assert_eq!(overlay.state().color_text, "#1a1a1a");

    backend.change(Field::DarkMode, FieldValue::Bool(false));
    assert!(!doc.has_body_class(DARK_MODE_CLASS));
    assert!(doc.writes().is_empty());
    assert!(!overlay.state().dark_mode);
}

#[test]
fn test_document_drift_until_edit() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();

    // Another script changes the variable after the overlay was built
    use tweaks_core::Document;
    doc.set_property("--color-debug", "blue").unwrap();
    assert_eq!(overlay.state().color_debug, "rgba(255, 0, 0, 0.25)");

    backend.change(Field::ColorDebug, FieldValue::Text("green".into()));
    assert_eq!(overlay.state().color_debug, "green");
    assert_eq!(overlay.accessor().fetch_variable("--color-debug"), "green");
}

#[test]
fn test_rejected_write_is_absorbed() {
    tracing_init();
    let (doc, backend, overlay) = visible_overlay();
    doc.reject_writes(true);

    assert!(backend.change(Field::ColorText, FieldValue::Text("#ff0000".into())));

    assert_eq!(overlay.state().color_text, "#ff0000");
    assert_eq!(doc.inline_property("--color-text"), None);
}

#[test]
fn test_unset_variables_reach_controls_as_nan() {
    tracing_init();
    let (_, backend, overlay) = overlay_with(FakeDocument::new(), true, MirrorPolicy::Legacy, 1280.0);

    assert_eq!(overlay.state().color_text, "");
    assert!(matches!(
        backend.initial_value(Field::MaxWidth),
        Some(FieldValue::Number(n)) if n.is_nan()
    ));
    assert!(matches!(
        backend.initial_value(Field::GeneralLineHeight),
        Some(FieldValue::Number(n)) if n.is_nan()
    ));
    assert_eq!(
        backend.initial_value(Field::FontFamilyPrimary),
        Some(FieldValue::Text(String::new()))
    );
}

#[test]
fn test_hidden_overlay_has_no_side_effects() {
    tracing_init();
    let (doc, backend, overlay) = overlay_with(styled_document(), false, MirrorPolicy::Legacy, 1920.0);

    assert!(!overlay.has_panel());
    assert_eq!(backend.panels_created(), 0);
    assert!(!backend.change(Field::MaxWidth, FieldValue::Number(2000.0)));
    assert!(doc.writes().is_empty());
    assert!(!doc.has_body_class(DARK_MODE_CLASS));
}

#[test]
fn test_legacy_mirror_refreshes_color_text_control() {
    tracing_init();
    let (_, backend, _overlay) = visible_overlay();

    backend.change(Field::ColorBackground, FieldValue::Text("#202020".into()));

    assert_eq!(
        backend.events().last(),
        Some(&PanelEvent::Display {
            field: Field::ColorText,
            value: FieldValue::Text("#202020".into()),
        })
    );
}

#[test]
fn test_exact_mirror_and_own_edits_refresh_nothing() {
    tracing_init();
    let (_, backend, _overlay) = overlay_with(styled_document(), true, MirrorPolicy::Exact, 1280.0);

    backend.change(Field::ColorBackground, FieldValue::Text("#202020".into()));
    backend.change(Field::ColorText, FieldValue::Text("#ff0000".into()));
    backend.change(Field::DarkMode, FieldValue::Bool(true));

    let displayed = backend
        .events()
        .iter()
        .any(|e| matches!(e, PanelEvent::Display { .. }));
    assert!(!displayed);
}
