//! Control definitions for the panel
//!
//! One [`ControlDef`] per [`Field`], in registration order. The table carries
//! everything a widget backend needs to render the control and everything the
//! binder needs to turn a changed value back into a style declaration.

use crate::state::{Field, FieldValue};

/// Title of the panel folder holding every control.
pub const FOLDER_TITLE: &str = "Root Variables";

/// Body class toggled by the dark mode control.
pub const DARK_MODE_CLASS: &str = "dark-mode";

pub const PRIMARY_FONTS: &[&str] = &["Arial", "Verdana", "Georgia", "Courier New", "Impact"];

pub const SECONDARY_FONTS: &[&str] = &["Times New Roman", "Tahoma", "Lucida Console", "Impact"];

#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    Color,
    /// Bounded numeric slider. `unit` is appended when writing to the document.
    Slider {
        min: f64,
        max: f64,
        unit: &'static str,
    },
    /// Dropdown over a closed set of options.
    Choice(&'static [&'static str]),
    Toggle,
}

/// Definition of a single panel control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlDef {
    pub field: Field,
    pub label: &'static str,
    pub kind: ControlKind,
}

impl ControlDef {
    /// Style value to write for a changed control, or `None` for controls
    /// that do not write a custom property.
    pub fn css_value(&self, value: &FieldValue) -> Option<String> {
        match &self.kind {
            ControlKind::Toggle => None,
            ControlKind::Slider { unit, .. } => Some(format!("{}{unit}", value.as_text())),
            ControlKind::Color | ControlKind::Choice(_) => Some(value.as_text()),
        }
    }
}

pub const CONTROLS: &[ControlDef] = &[
    ControlDef {
        field: Field::ColorText,
        label: "Color_Text",
        kind: ControlKind::Color,
    },
    ControlDef {
        field: Field::ColorBackground,
        label: "Color_Background",
        kind: ControlKind::Color,
    },
    ControlDef {
        field: Field::ColorDebug,
        label: "Debug_Color",
        kind: ControlKind::Color,
    },
    ControlDef {
        field: Field::MaxWidth,
        label: "Max_Width (px)",
        kind: ControlKind::Slider {
            min: 1000.0,
            max: 3000.0,
            unit: "px",
        },
    },
    ControlDef {
        field: Field::GeneralLineHeight,
        label: "General_Line_Height",
        kind: ControlKind::Slider {
            min: 1.0,
            max: 2.0,
            unit: "",
        },
    },
    ControlDef {
        field: Field::FontFamilyPrimary,
        label: "Font_Family_Primary",
        kind: ControlKind::Choice(PRIMARY_FONTS),
    },
    ControlDef {
        field: Field::FontFamilySecondary,
        label: "Font_Family_Secondary",
        kind: ControlKind::Choice(SECONDARY_FONTS),
    },
    ControlDef {
        field: Field::DarkMode,
        label: "Dark Mode",
        kind: ControlKind::Toggle,
    },
];
