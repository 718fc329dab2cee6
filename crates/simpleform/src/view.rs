// File: src/view.rs
// Purpose: Render-ready snapshot of a form (no markup)

use serde::Serialize;
use std::time::Duration;

use crate::form::SimpleForm;
use crate::schema::FieldSpec;
use crate::state::FieldState;

/// Visual status of a touched field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Danger,
    Warning,
    Success,
}

impl FieldStatus {
    /// Error takes precedence over warning
    pub fn of(state: &FieldState) -> Option<Self> {
        if !state.touched {
            None
        } else if state.error {
            Some(FieldStatus::Danger)
        } else if state.warning {
            Some(FieldStatus::Warning)
        } else {
            Some(FieldStatus::Success)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView<'a> {
    pub id: usize,
    pub key: &'a str,
    pub label: String,
    pub control: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub hint: Option<&'a str>,
    pub choices: Option<&'a [String]>,
    pub rows: Option<u32>,
    pub auto_complete: Option<&'a str>,
    pub status: Option<FieldStatus>,
    /// Whether the message should be on screen
    pub message_visible: bool,
    /// Last message; kept while it animates out
    pub message: Option<&'a str>,
}

impl<'a> FieldView<'a> {
    pub fn new(spec: &'a FieldSpec, state: &'a FieldState) -> Self {
        Self {
            id: spec.id,
            key: &spec.key,
            label: spec.display_label(),
            control: spec.field_type.tag(),
            value: &state.value,
            placeholder: &spec.placeholder,
            hint: spec.display_hint(),
            choices: spec.field_type.choices(),
            rows: spec.field_type.rows(),
            auto_complete: spec.auto_complete.as_deref(),
            status: FieldStatus::of(state),
            message_visible: state.visible_message().is_some(),
            message: state.message.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView<'a> {
    pub fields: Vec<FieldView<'a>>,
    pub submit_text: &'a str,
    pub noscript: &'a str,
    /// Note shown when at least one field is required
    pub mandatory_note: Option<&'a str>,
    pub error_count: usize,
    /// Banner text, present while the banner is shown and there are errors
    pub banner: Option<String>,
    pub message_duration: Duration,
    pub banner_duration: Duration,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a SimpleForm) -> Self {
        let config = form.config();
        let fields: Vec<_> = form
            .fields()
            .iter()
            .zip(form.states())
            .map(|(spec, state)| FieldView::new(spec, state))
            .collect();

        let error_count = form.error_count();
        let banner = (form.banner().is_shown() && error_count > 0)
            .then(|| config.texts.total_errors(error_count));
        let mandatory_note = form
            .fields()
            .iter()
            .any(|f| f.required)
            .then_some(config.texts.mandatory_fields.as_str());

        Self {
            fields,
            submit_text: &config.texts.submit,
            noscript: &config.texts.noscript,
            mandatory_note,
            error_count,
            banner,
            message_duration: config.animation.message_duration(),
            banner_duration: config.animation.banner_duration(),
        }
    }
}

impl SimpleForm {
    pub fn view(&self) -> FormView<'_> {
        FormView::new(self)
    }
}
