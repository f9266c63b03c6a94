//! Shared field validation helpers.
//!
//! Every validated setter in the crate goes through these checks. Bounds
//! are declared as named constants next to the fields that own them; the
//! helpers only enforce them and build the matching error.

use crate::error::ProgressError;

/// Minimum alphanumeric content required of every user-facing text field.
pub(crate) const MIN_ALPHANUMERIC: usize = 3;

/// Check a user-facing text field against length and content rules.
///
/// The length is counted in characters, not bytes. The field must also
/// contain at least [`MIN_ALPHANUMERIC`] alphanumeric characters, which
/// rejects names made of punctuation or whitespace alone.
pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ProgressError> {
    let len = value.chars().count();
    if len < min {
        return Err(ProgressError::TextTooShort {
            field,
            min,
            actual: len,
        });
    }
    if len > max {
        return Err(ProgressError::TextTooLong {
            field,
            max,
            actual: len,
        });
    }
    let alphanumeric = value.chars().filter(|c| c.is_alphanumeric()).count();
    if alphanumeric < MIN_ALPHANUMERIC {
        return Err(ProgressError::TextNotAlphanumeric {
            field,
            min: MIN_ALPHANUMERIC,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Check a float field against inclusive bounds.
pub(crate) fn check_f64(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ProgressError> {
    if value < min || value > max {
        return Err(ProgressError::OutOfBounds {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Check an integer field against inclusive bounds.
pub(crate) fn check_i64(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ProgressError> {
    if value < min || value > max {
        return Err(ProgressError::OutOfBounds {
            field,
            min: min as f64,
            max: max as f64,
            value: value as f64,
        });
    }
    Ok(())
}
