//! Presence checks

/// A field value counts as empty only when it is the empty string.
///
/// Whitespace is a value: `" "` satisfies a required field.
pub fn is_empty_value(value: &str) -> bool {
    value.is_empty()
}

/// Returns true when a required field has no value.
pub fn is_missing(required: bool, value: &str) -> bool {
    required && is_empty_value(value)
}
