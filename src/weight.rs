//! Weight display and training-max input parsing.

use crate::error::WeightError;
use crate::models::Weight;

/// 1775 deci-pounds is 177.5 lb.
pub const DECI_POUNDS: &str = "DECI_POUNDS";

impl Weight {
    pub fn deci_pounds(value: u32) -> Self {
        Weight {
            unit: DECI_POUNDS.to_string(),
            value: value as f64,
        }
    }
}

/// Pounds as a plain decimal string, the form the server accepts in requests.
pub fn pounds_string(weight: &Weight) -> String {
    if weight.unit == DECI_POUNDS {
        trim_decimal(weight.value / 10.0)
    } else {
        trim_decimal(weight.value)
    }
}

/// "177.5 lb", "200 lb", or "<value> <unit>" for units we don't know.
pub fn format_weight(weight: &Weight) -> String {
    if weight.unit == DECI_POUNDS {
        format!("{} lb", pounds_string(weight))
    } else {
        format!("{} {}", trim_decimal(weight.value), weight.unit)
    }
}

fn trim_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Parses lifter input like "177.5" into deci-pounds.
///
/// Same rules the server applies: an optional whole part and an optional
/// single-digit fraction, neither negative.
pub fn parse_training_max(input: &str) -> Result<Weight, WeightError> {
    let input = input.trim();
    let (whole_str, frac_str) = match input.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (input, ""),
    };
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(WeightError::Empty);
    }

    let whole = if whole_str.is_empty() {
        0
    } else {
        parse_digits(whole_str).ok_or_else(|| WeightError::Whole(whole_str.to_string()))?
    };

    let frac = if frac_str.is_empty() {
        0
    } else {
        if !frac_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WeightError::Fraction(frac_str.to_string()));
        }
        // "225.05" is not 225.5
        if frac_str.len() > 1 {
            return Err(WeightError::FractionTooLong(frac_str.to_string()));
        }
        parse_digits(frac_str).ok_or_else(|| WeightError::Fraction(frac_str.to_string()))?
    };

    let value = whole
        .checked_mul(10)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| WeightError::Whole(whole_str.to_string()))?;
    Ok(Weight::deci_pounds(value))
}

fn parse_digits(s: &str) -> Option<u32> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
