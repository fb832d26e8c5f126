//! Editable mirror of the root custom properties

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::{parse_float_prefix, parse_int_prefix};
use crate::variables::{Document, VariableAccessor};

/// One editable field of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ColorText,
    ColorBackground,
    ColorDebug,
    MaxWidth,
    GeneralLineHeight,
    FontFamilyPrimary,
    FontFamilySecondary,
    DarkMode,
}

impl Field {
    /// Every field, in control registration order.
    pub const ALL: [Field; 8] = [
        Field::ColorText,
        Field::ColorBackground,
        Field::ColorDebug,
        Field::MaxWidth,
        Field::GeneralLineHeight,
        Field::FontFamilyPrimary,
        Field::FontFamilySecondary,
        Field::DarkMode,
    ];

    /// Key used in the serialized state and as the widget binding property.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ColorText => "colorText",
            Self::ColorBackground => "colorBackground",
            Self::ColorDebug => "colorDebug",
            Self::MaxWidth => "maxWidth",
            Self::GeneralLineHeight => "generalLineHeight",
            Self::FontFamilyPrimary => "fontFamilyPrimary",
            Self::FontFamilySecondary => "fontFamilySecondary",
            Self::DarkMode => "darkMode",
        }
    }

    /// Backing custom property, if any. Dark mode toggles a body class instead.
    pub fn variable(&self) -> Option<&'static str> {
        match self {
            Self::ColorText => Some("--color-text"),
            Self::ColorBackground => Some("--color-background"),
            Self::ColorDebug => Some("--color-debug"),
            Self::MaxWidth => Some("--max-width"),
            Self::GeneralLineHeight => Some("--general-line-height"),
            Self::FontFamilyPrimary => Some("--font-family-primary"),
            Self::FontFamilySecondary => Some("--font-family-secondary"),
            Self::DarkMode => None,
        }
    }

    /// Reverse lookup from a custom property name.
    pub fn from_variable(name: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.variable() == Some(name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value carried between the state, the widget controls and the document.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// Render the value the way it is written into a style declaration.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Numeric view; `None` stands for "not a number".
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if !n.is_nan() => Some(*n),
            Self::Number(_) | Self::Bool(_) => None,
            Self::Text(s) => parse_float_prefix(s),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }
}

/// Flat snapshot of the tweakable root variables.
///
/// Populated once from the document when the overlay is built; afterwards
/// only control changes mutate it, so it can drift from the document until a
/// field is edited again.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    pub color_text: String,
    pub color_background: String,
    pub color_debug: String,
    /// Pixels with the unit stripped; `None` when the variable is not numeric.
    pub max_width: Option<f64>,
    pub general_line_height: Option<f64>,
    pub font_family_primary: String,
    pub font_family_secondary: String,
    pub dark_mode: bool,
}

impl OverlayState {
    /// Read every backed field through the accessor.
    pub fn from_document<D: Document>(accessor: &VariableAccessor<D>) -> Self {
        let fetch = |field: Field| {
            field
                .variable()
                .map(|name| accessor.fetch_variable(name))
                .unwrap_or_default()
        };

        Self {
            color_text: fetch(Field::ColorText),
            color_background: fetch(Field::ColorBackground),
            color_debug: fetch(Field::ColorDebug),
            max_width: parse_int_prefix(&fetch(Field::MaxWidth).replacen("px", "", 1))
                .map(|px| px as f64),
            general_line_height: parse_float_prefix(&fetch(Field::GeneralLineHeight)),
            font_family_primary: fetch(Field::FontFamilyPrimary),
            font_family_secondary: fetch(Field::FontFamilySecondary),
            dark_mode: false,
        }
    }

    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::ColorText => FieldValue::Text(self.color_text.clone()),
            Field::ColorBackground => FieldValue::Text(self.color_background.clone()),
            Field::ColorDebug => FieldValue::Text(self.color_debug.clone()),
            Field::MaxWidth => FieldValue::Number(self.max_width.unwrap_or(f64::NAN)),
            Field::GeneralLineHeight => {
                FieldValue::Number(self.general_line_height.unwrap_or(f64::NAN))
            }
            Field::FontFamilyPrimary => FieldValue::Text(self.font_family_primary.clone()),
            Field::FontFamilySecondary => FieldValue::Text(self.font_family_secondary.clone()),
            Field::DarkMode => FieldValue::Bool(self.dark_mode),
        }
    }

    /// Store a value, coercing it to the field's type.
    pub fn set(&mut self, field: Field, value: &FieldValue) {
        match field {
            Field::ColorText => self.color_text = value.as_text(),
            Field::ColorBackground => self.color_background = value.as_text(),
            Field::ColorDebug => self.color_debug = value.as_text(),
            Field::MaxWidth => self.max_width = value.as_number(),
            Field::GeneralLineHeight => self.general_line_height = value.as_number(),
            Field::FontFamilyPrimary => self.font_family_primary = value.as_text(),
            Field::FontFamilySecondary => self.font_family_secondary = value.as_text(),
            Field::DarkMode => self.dark_mode = value.as_bool(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;
    use crate::variables::MirrorPolicy;
    use std::rc::Rc;

    fn accessor(doc: FakeDocument) -> VariableAccessor<FakeDocument> {
        VariableAccessor::new(Rc::new(doc), MirrorPolicy::Legacy)
    }

    #[test]
    fn test_from_document_reads_every_variable() {
        let doc = FakeDocument::new()
            .with_property("--color-text", " #111111 ")
            .with_property("--color-background", "#fafafa")
            .with_property("--color-debug", "rgba(255, 0, 0, 0.3)")
            .with_property("--max-width", "1440px")
            .with_property("--general-line-height", "1.4")
            .with_property("--font-family-primary", "\"Georgia\"")
            .with_property("--font-family-secondary", "'Tahoma'");

        let state = OverlayState::from_document(&accessor(doc));

        assert_eq!(state.color_text, "#111111");
        assert_eq!(state.color_background, "#fafafa");
        assert_eq!(state.color_debug, "rgba(255, 0, 0, 0.3)");
        assert_eq!(state.max_width, Some(1440.0));
        assert_eq!(state.general_line_height, Some(1.4));
        assert_eq!(state.font_family_primary, "Georgia");
        assert_eq!(state.font_family_secondary, "Tahoma");
        assert!(!state.dark_mode);
    }

    #[test]
    fn test_unset_numeric_variables_are_not_numbers() {
        let state = OverlayState::from_document(&accessor(FakeDocument::new()));
        assert_eq!(state.max_width, None);
        assert_eq!(state.general_line_height, None);
        assert!(matches!(state.get(Field::MaxWidth), FieldValue::Number(n) if n.is_nan()));
        assert_eq!(state.color_text, "");
    }

    #[test]
    fn test_max_width_drops_fraction() {
        let doc = FakeDocument::new().with_property("--max-width", "1280.9px");
        let state = OverlayState::from_document(&accessor(doc));
        assert_eq!(state.max_width, Some(1280.0));
    }

    #[test]
    fn test_set_coerces_to_field_type() {
        let mut state = OverlayState::default();
        state.set(Field::MaxWidth, &FieldValue::Text("1500px".into()));
        state.set(Field::ColorText, &FieldValue::Number(2.5));
        state.set(Field::DarkMode, &FieldValue::Bool(true));
        assert_eq!(state.max_width, Some(1500.0));
        assert_eq!(state.color_text, "2.5");
        assert!(state.dark_mode);
    }

    #[test]
    fn test_serialized_keys_match_field_keys() {
        let json = serde_json::to_value(OverlayState::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), Field::ALL.len());
        for field in Field::ALL {
            assert!(object.contains_key(field.key()), "missing {}", field.key());
        }
    }

    #[test]
    fn test_from_variable_round_trips() {
        for field in Field::ALL {
            if let Some(name) = field.variable() {
                assert_eq!(Field::from_variable(name), Some(field));
            }
        }
        assert_eq!(Field::from_variable("--unknown"), None);
    }
}
