use ordered_float::OrderedFloat;

use crate::core::{DeclaredType, PropertyValue, ValueKind};
use crate::error::{ChartError, ChartResult};

/// Edit as it arrives from an editor widget.
///
/// Free-text editors hand over raw text; checkboxes and choice lists hand
/// over typed values. Nothing is interpreted until commit time.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Text(String),
    Value(Option<PropertyValue>),
}

impl RawInput {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn value(value: impl Into<PropertyValue>) -> Self {
        Self::Value(Some(value.into()))
    }

    #[must_use]
    pub fn absent() -> Self {
        Self::Value(None)
    }

    /// Text shown in a free-text editor.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Value(value) => value
                .as_ref()
                .map_or_else(String::new, ToString::to_string),
        }
    }
}

impl From<Option<PropertyValue>> for RawInput {
    fn from(value: Option<PropertyValue>) -> Self {
        Self::Value(value)
    }
}

impl From<PropertyValue> for RawInput {
    fn from(value: PropertyValue) -> Self {
        Self::Value(Some(value))
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Converts a raw edit into a value of `declared` type.
///
/// Text is parsed locale-independently (`.` decimal separator, `true` /
/// `false` in any ASCII case, enumeration variants by name). Empty text
/// becomes an absent value for nullable fields and is an error otherwise;
/// text fields keep text verbatim.
pub fn coerce(raw: &RawInput, declared: DeclaredType) -> ChartResult<Option<PropertyValue>> {
    match raw {
        RawInput::Text(text) => coerce_text(text, declared),
        RawInput::Value(Some(PropertyValue::Text(text))) => coerce_text(text, declared),
        RawInput::Value(None) => {
            if declared.nullable {
                Ok(None)
            } else {
                Err(coercion_error(declared, ""))
            }
        }
        RawInput::Value(Some(value)) => coerce_value(value, declared).map(Some),
    }
}

fn coercion_error(declared: DeclaredType, input: &str) -> ChartError {
    ChartError::Coercion {
        expected: declared.to_string(),
        input: input.to_owned(),
    }
}

fn coerce_text(text: &str, declared: DeclaredType) -> ChartResult<Option<PropertyValue>> {
    if declared.kind == ValueKind::Text {
        if text.is_empty() && declared.nullable {
            return Ok(None);
        }
        return Ok(Some(PropertyValue::Text(text.to_owned())));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return if declared.nullable {
            Ok(None)
        } else {
            Err(coercion_error(declared, text))
        };
    }

    let parsed = match declared.kind {
        ValueKind::Integer => trimmed.parse::<i32>().ok().map(PropertyValue::Integer),
        ValueKind::Single => trimmed
            .parse::<f32>()
            .ok()
            .map(|value| PropertyValue::Single(OrderedFloat(value))),
        ValueKind::Double => trimmed
            .parse::<f64>()
            .ok()
            .map(|value| PropertyValue::Double(OrderedFloat(value))),
        ValueKind::Boolean => parse_bool(trimmed).map(PropertyValue::Boolean),
        ValueKind::Enumeration(spec) => spec.resolve(trimmed).map(PropertyValue::Enumeration),
        ValueKind::Text | ValueKind::Other(_) => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| coercion_error(declared, text))
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn coerce_value(value: &PropertyValue, declared: DeclaredType) -> ChartResult<PropertyValue> {
    if value.matches_kind(declared.kind) {
        return Ok(value.clone());
    }
    let converted = match (declared.kind, value) {
        (ValueKind::Text, other) => Some(PropertyValue::Text(other.to_string())),
        (ValueKind::Integer, PropertyValue::Single(_) | PropertyValue::Double(_)) => value
            .as_f64()
            .filter(|number| number.fract() == 0.0)
            .filter(|number| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(number))
            .map(|number| PropertyValue::Integer(number as i32)),
        (ValueKind::Double, PropertyValue::Integer(_) | PropertyValue::Single(_)) => {
            value.as_f64().map(PropertyValue::double)
        }
        (ValueKind::Single, PropertyValue::Integer(number)) => {
            Some(PropertyValue::single(*number as f32))
        }
        (ValueKind::Single, PropertyValue::Double(number)) => {
            let narrowed = number.0 as f32;
            if narrowed.is_infinite() && number.0.is_finite() {
                None
            } else {
                Some(PropertyValue::single(narrowed))
            }
        }
        (ValueKind::Enumeration(spec), PropertyValue::Enumeration(name)) => {
            spec.resolve(name).map(PropertyValue::Enumeration)
        }
        _ => None,
    };
    converted.ok_or_else(|| coercion_error(declared, &value.to_string()))
}
