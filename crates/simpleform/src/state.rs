// File: src/state.rs
// Purpose: Mutable runtime state of one field

use serde::Serialize;

use crate::validation::Verdict;

/// Runtime state of a field, owned by the form.
///
/// `error`, `warning` and `message` are only ever written through
/// [`FieldState::apply`]. `message` is sticky: once set it keeps its last
/// text until a new error or warning replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: String,
    pub changed: bool,
    pub touched: bool,
    pub error: bool,
    pub warning: bool,
    pub message: Option<String>,
}

impl FieldState {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Store a validated value
    pub fn apply(&mut self, value: String, verdict: Verdict) {
        self.value = value;
        self.error = verdict.is_error();
        self.warning = verdict.is_warning();
        if let Some(message) = verdict.message() {
            self.message = Some(message.to_string());
        }
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Message to show right now: only for touched fields with a finding
    pub fn visible_message(&self) -> Option<&str> {
        if self.touched && (self.error || self.warning) {
            self.message.as_deref()
        } else {
            None
        }
    }
}
