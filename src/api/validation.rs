use thiserror::Error;

use crate::core::{FieldRole, PropertyValue};

use super::RawInput;

/// A field-specific rule rejected a staged edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("bin count must be a whole number, got `{input}`")]
    BinCountNotInteger { input: String },

    #[error("bin count must be positive, got {value}")]
    BinCountNotPositive { value: i64 },

    #[error("bin count must not exceed {max}, got {value}")]
    BinCountTooLarge { value: i64, max: u32 },

    #[error("bin threshold must be a finite number, got {value}")]
    ThresholdNotFinite { value: f64 },
}

/// Checks a staged edit against the rule of its field role.
///
/// Bin counts must be whole numbers in `1..=max_bin_count`. Thresholds that
/// are numeric must be finite; anything non-numeric is left to coercion.
/// All other fields are always valid.
pub fn validate_staged(
    role: FieldRole,
    staged: &RawInput,
    max_bin_count: u32,
) -> Result<(), ValidationError> {
    match role {
        FieldRole::Plain => Ok(()),
        FieldRole::BinCount => validate_bin_count(staged, max_bin_count),
        FieldRole::BinThreshold => validate_threshold(staged),
    }
}

fn validate_bin_count(staged: &RawInput, max_bin_count: u32) -> Result<(), ValidationError> {
    let count = match staged {
        RawInput::Text(text) => text.trim().parse::<i64>().ok(),
        RawInput::Value(Some(PropertyValue::Text(text))) => text.trim().parse::<i64>().ok(),
        RawInput::Value(Some(value)) => value
            .as_f64()
            .filter(|number| number.is_finite() && number.fract() == 0.0)
            .map(|number| number as i64),
        RawInput::Value(None) => None,
    };
    let Some(count) = count else {
        return Err(ValidationError::BinCountNotInteger {
            input: staged.display_text(),
        });
    };
    if count <= 0 {
        return Err(ValidationError::BinCountNotPositive { value: count });
    }
    if count > i64::from(max_bin_count) {
        return Err(ValidationError::BinCountTooLarge {
            value: count,
            max: max_bin_count,
        });
    }
    Ok(())
}

fn validate_threshold(staged: &RawInput) -> Result<(), ValidationError> {
    let number = match staged {
        RawInput::Text(text) => text.trim().parse::<f64>().ok(),
        RawInput::Value(Some(PropertyValue::Text(text))) => text.trim().parse::<f64>().ok(),
        RawInput::Value(Some(value)) => value.as_f64(),
        RawInput::Value(None) => None,
    };
    match number {
        Some(value) if !value.is_finite() => Err(ValidationError::ThresholdNotFinite { value }),
        _ => Ok(()),
    }
}
