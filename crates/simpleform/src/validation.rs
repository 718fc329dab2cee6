// File: src/validation.rs
// Purpose: Per-field validation rules
//
// Error and warning are computed independently on every call. The required
// check runs first and a rejecting custom predicate runs second, so when both
// fire the predicate's message is the one reported.

use simpleform_validation::{is_empty_value, is_missing, is_plausible_email};

use crate::config::FormTexts;
use crate::schema::{FieldSpec, FieldType};

/// Outcome of validating one value: the error and warning texts, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl Verdict {
    /// Error text wins over warning text
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().or(self.warning.as_deref())
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_warning(&self) -> bool {
        self.warning.is_some()
    }
}

/// Validate `value` against `spec`
pub fn check_field(spec: &FieldSpec, value: &str, texts: &FormTexts) -> Verdict {
    let mut error = is_missing(spec.required, value).then(|| texts.required_field.clone());

    if let Some(validate) = &spec.validate {
        if !validate(value) {
            error = Some(
                spec.error_text
                    .clone()
                    .unwrap_or_else(|| texts.invalid_field.clone()),
            );
        }
    }

    let warning = if is_empty_value(value) {
        (!spec.field_type.is_single_checkbox()).then(|| texts.empty_field.clone())
    } else if spec.field_type == FieldType::Email && !is_plausible_email(value) {
        Some(texts.dodgy_email.clone())
    } else {
        None
    };

    Verdict { error, warning }
}
