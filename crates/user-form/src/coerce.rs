//! Numeric coercion for text-backed inputs.
//!
//! Number inputs hand over text. Coercion follows the form's own rules:
//! blank text and `null` read as zero, booleans read as one or zero, and
//! anything else must parse as a finite number. Text may be decimal or an
//! unsigned `0x`, `0o` or `0b` integer literal.

use crate::error::CoercionError;
use crate::input::RawNumber;

/// Coerce a raw value into a finite number.
///
/// # Errors
///
/// Returns [`CoercionError::NotANumber`] when the text does not parse as a
/// number or the value is not finite.
///
/// # Examples
///
/// ```
/// use user_form::{RawNumber, coerce_number};
///
/// assert_eq!(coerce_number(&RawNumber::from(" 3 ")), Ok(3.0));
/// assert_eq!(coerce_number(&RawNumber::from("")), Ok(0.0));
/// assert_eq!(coerce_number(&RawNumber::from("0x10")), Ok(16.0));
/// assert_eq!(coerce_number(&RawNumber::Bool(true)), Ok(1.0));
/// assert!(coerce_number(&RawNumber::from("three")).is_err());
/// ```
pub fn coerce_number(raw: &RawNumber) -> Result<f64, CoercionError> {
    let value = match raw {
        RawNumber::Number(value) => *value,
        RawNumber::Text(text) => parse_text(text)?,
        RawNumber::Bool(flag) => f64::from(u8::from(*flag)),
        RawNumber::Null => 0.0,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(not_a_number(raw))
    }
}

/// Reject values below `min`.
///
/// # Errors
///
/// Returns [`CoercionError::BelowMinimum`] when `value < min`.
pub fn check_minimum(value: f64, min: f64) -> Result<f64, CoercionError> {
    if value < min {
        Err(CoercionError::BelowMinimum { min, actual: value })
    } else {
        Ok(value)
    }
}

fn parse_text(text: &str) -> Result<f64, CoercionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    parse_radix_literal(trimmed)
        .or_else(|| trimmed.parse::<f64>().ok())
        .ok_or_else(|| CoercionError::NotANumber {
            value: text.to_owned(),
        })
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    const PREFIXES: [(&str, u32); 6] = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    let (digits, radix) = PREFIXES
        .iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|digits| (digits, *radix)))?;
    // from_str_radix accepts a leading sign; prefixed literals never carry one.
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let value = u128::from_str_radix(digits, radix).ok()?;
    value.to_string().parse().ok()
}

fn not_a_number(raw: &RawNumber) -> CoercionError {
    CoercionError::NotANumber {
        value: raw.to_string(),
    }
}
