//! Numeric input checks

/// Returns true when `value` parses as a number below zero.
///
/// Values that do not parse (`""`, `"-"`, `"abc"`) are not negative, and
/// neither is `"-0"`.
pub fn is_negative(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n < 0.0)
        .unwrap_or(false)
}
