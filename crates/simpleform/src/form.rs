// File: src/form.rs
// Purpose: Form controller - field arena, input events and submit
//
// Events are processed one at a time through `&mut self`; there is no
// interior mutability. Share the form with timers through `SharedForm`.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use simpleform_validation::is_negative;

use crate::config::FormConfig;
use crate::error::{FormError, SchemaError};
use crate::schema::{FieldSpec, Schema};
use crate::state::FieldState;
use crate::validation::check_field;

/// Index of a field in schema order
pub type FieldId = usize;

/// Submitted values: field `name` to value, in schema order
pub type FormValues = IndexMap<String, String>;

type SubmitHandler = Box<dyn FnMut(&FormValues) + Send>;

/// What happened to a proposed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied,
    /// Filtered out before validation; state is unchanged
    Ignored,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(FormValues),
    Rejected { errors: usize },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// A submit outcome plus the pending banner reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub reveal: BannerReveal,
}

/// Permission to show the error banner again after `delay`.
///
/// Only the reveal from the latest submit has any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerReveal {
    generation: u64,
    pub delay: Duration,
}

/// Show/hide flag for the "N errors" banner
#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    shown: bool,
    generation: u64,
}

impl ErrorBanner {
    /// Hide the banner and hand out a reveal for later
    fn hide(&mut self, delay: Duration) -> BannerReveal {
        self.shown = false;
        self.generation += 1;
        BannerReveal {
            generation: self.generation,
            delay,
        }
    }

    fn reveal(&mut self, reveal: BannerReveal) -> bool {
        if reveal.generation != self.generation {
            return false;
        }
        self.shown = true;
        true
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

/// A form: immutable field specs plus one mutable state per field.
pub struct SimpleForm {
    fields: Vec<FieldSpec>,
    states: Vec<FieldState>,
    keys: HashMap<String, FieldId>,
    config: FormConfig,
    banner: ErrorBanner,
    submit_errors: usize,
    on_submit: Option<SubmitHandler>,
}

impl SimpleForm {
    /// Build a form from a schema
    pub fn new(schema: &Schema, config: FormConfig) -> Result<Self, SchemaError> {
        Ok(Self::from_fields(schema.fields()?, config))
    }

    /// Build a form from already resolved specs. Ids are reassigned by position.
    pub fn from_fields(mut fields: Vec<FieldSpec>, config: FormConfig) -> Self {
        for (id, spec) in fields.iter_mut().enumerate() {
            spec.id = id;
        }
        let states = fields
            .iter()
            .map(|spec| FieldState::with_value(spec.default_value.clone()))
            .collect();
        let keys = fields.iter().map(|spec| (spec.key.clone(), spec.id)).collect();

        Self {
            fields,
            states,
            keys,
            config,
            banner: ErrorBanner {
                shown: true,
                generation: 0,
            },
            submit_errors: 0,
            on_submit: None,
        }
    }

    /// Callback run with the values of every successful submit
    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&FormValues) + Send + 'static,
    {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn states(&self) -> &[FieldState] {
        &self.states
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldSpec> {
        self.fields.get(id)
    }

    pub fn state(&self, id: FieldId) -> Option<&FieldState> {
        self.states.get(id)
    }

    pub fn field_id(&self, key: &str) -> Result<FieldId, FormError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| FormError::UnknownKey(key.to_string()))
    }

    pub fn state_by_key(&self, key: &str) -> Option<&FieldState> {
        self.keys.get(key).and_then(|&id| self.states.get(id))
    }

    fn check_id(&self, id: FieldId) -> Result<(), FormError> {
        if id < self.fields.len() {
            Ok(())
        } else {
            Err(FormError::UnknownField(id))
        }
    }

    /// User typed or pasted a new value
    pub fn change(&mut self, id: FieldId, value: impl Into<String>) -> Result<ChangeOutcome, FormError> {
        self.check_id(id)?;
        let spec = &self.fields[id];
        let state = &mut self.states[id];
        let mut value = value.into();

        if spec.field_type.is_numeric() && is_negative(&value) {
            debug!(field = %spec.key, %value, "negative input ignored");
            return Ok(ChangeOutcome::Ignored);
        }

        if let Some(hook) = &spec.on_change {
            value = hook(&value, &state.value);
        }

        let verdict = check_field(spec, &value, &self.config.texts);
        debug!(field = %spec.key, error = verdict.is_error(), warning = verdict.is_warning(), "field changed");
        state.apply(value, verdict);
        state.changed = true;

        Ok(ChangeOutcome::Applied)
    }

    pub fn change_by_key(&mut self, key: &str, value: impl Into<String>) -> Result<ChangeOutcome, FormError> {
        let id = self.field_id(key)?;
        self.change(id, value)
    }

    /// Field lost focus. Only a field that has been validated becomes touched.
    /// Returns whether the field is now touched.
    pub fn blur(&mut self, id: FieldId) -> Result<bool, FormError> {
        self.check_id(id)?;
        let state = &mut self.states[id];
        if state.changed {
            state.touch();
        }
        Ok(state.touched)
    }

    /// Click on a checkbox of an options field. Clicking the selected
    /// choice again clears the value.
    pub fn toggle_option(&mut self, id: FieldId, option: &str) -> Result<(), FormError> {
        self.check_id(id)?;
        let spec = &self.fields[id];
        let choices = spec
            .field_type
            .choices()
            .ok_or_else(|| FormError::NotOptions(spec.key.clone()))?;
        if !choices.iter().any(|c| c == option) {
            return Err(FormError::UnknownOption {
                key: spec.key.clone(),
                option: option.to_string(),
            });
        }

        let state = &mut self.states[id];
        let value = if state.value == option {
            String::new()
        } else {
            option.to_string()
        };

        let verdict = check_field(spec, &value, &self.config.texts);
        debug!(field = %spec.key, selected = %value, "option toggled");
        state.apply(value, verdict);
        state.changed = true;
        state.touch();

        Ok(())
    }

    /// Validate every field, touch all of them and submit when none has an
    /// error. The error banner is hidden here; apply the returned reveal
    /// after its delay (see [`crate::timer::submit_shared`]).
    pub fn submit(&mut self) -> SubmitReport {
        let reveal = self.banner.hide(self.config.animation.banner_retrigger_delay());

        let mut errors = 0;
        for (spec, state) in self.fields.iter().zip(self.states.iter_mut()) {
            let value = std::mem::take(&mut state.value);
            let verdict = check_field(spec, &value, &self.config.texts);
            if verdict.is_error() {
                errors += 1;
            }
            state.apply(value, verdict);
            state.touch();
        }
        self.submit_errors = errors;

        let outcome = if errors == 0 {
            let values = self.values();
            info!(fields = values.len(), "form submitted");
            if let Some(handler) = self.on_submit.as_mut() {
                handler(&values);
            }
            SubmitOutcome::Submitted(values)
        } else {
            info!(errors, "form has errors, submit withheld");
            SubmitOutcome::Rejected { errors }
        };

        SubmitReport { outcome, reveal }
    }

    /// Show the error banner again. Stale reveals are ignored.
    pub fn reveal_banner(&mut self, reveal: BannerReveal) -> bool {
        self.banner.reveal(reveal)
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    /// Error count recorded by the last submit
    pub fn submit_errors(&self) -> usize {
        self.submit_errors
    }

    /// Touched fields currently in error
    pub fn error_count(&self) -> usize {
        self.states.iter().filter(|s| s.touched && s.error).count()
    }

    /// Current values keyed by field name
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .zip(&self.states)
            .map(|(spec, state)| (spec.name.clone(), state.value.clone()))
            .collect()
    }
}

impl fmt::Debug for SimpleForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleForm")
            .field("fields", &self.fields)
            .field("states", &self.states)
            .field("banner", &self.banner)
            .field("submit_errors", &self.submit_errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldOverrides, SchemaEntry};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn form(pairs: &[(&str, &str)]) -> SimpleForm {
        let schema = Schema::from_pairs(pairs.iter().copied());
        SimpleForm::new(&schema, FormConfig::default()).unwrap()
    }

    #[test]
    fn test_defaults_seed_state() {
        let form = form(&[("city", "text||||London")]);
        assert_eq!(form.state(0).unwrap().value, "London");
        assert!(!form.state(0).unwrap().changed);
    }

    #[test]
    fn test_change_validates() {
        let mut form = form(&[("mail", "*email")]);
        form.change(0, "nope").unwrap();
        let state = form.state(0).unwrap();
        assert!(state.changed);
        assert!(!state.touched);
        assert!(state.warning);
        assert!(!state.error);

        form.change(0, "").unwrap();
        assert!(form.state(0).unwrap().error);
    }

    #[test]
    fn test_negative_numbers_are_ignored() {
        let mut form = form(&[("qty", "number"), ("price", "$"), ("note", "text")]);
        form.change(0, "3").unwrap();
        assert_eq!(form.change(0, "-1").unwrap(), ChangeOutcome::Ignored);
        assert_eq!(form.state(0).unwrap().value, "3");

        assert_eq!(form.change(1, "-5").unwrap(), ChangeOutcome::Ignored);
        assert_eq!(form.state(1).unwrap(), &FieldState::default());

        assert_eq!(form.change(2, "-1").unwrap(), ChangeOutcome::Applied);
    }

    #[test]
    fn test_on_change_transforms_value() {
        let schema = Schema::from_pairs([(
            "code",
            FieldOverrides::new().on_change(|new, old| {
                if new.len() > 4 {
                    old.to_string()
                } else {
                    new.to_uppercase()
                }
            }),
        )]);
        let mut form = SimpleForm::new(&schema, FormConfig::default()).unwrap();
        form.change(0, "ab").unwrap();
        assert_eq!(form.state(0).unwrap().value, "AB");
        form.change(0, "abcde").unwrap();
        assert_eq!(form.state(0).unwrap().value, "AB");
    }

    #[test]
    fn test_blur_touches_only_changed_fields() {
        let mut form = form(&[("a", "text"), ("b", "text")]);
        assert!(!form.blur(0).unwrap());
        form.change(1, "x").unwrap();
        assert!(form.blur(1).unwrap());
        assert!(!form.state(0).unwrap().touched);
    }

    #[test]
    fn test_toggle_option_round_trip() {
        let mut form = form(&[("size", "[S,M,L]")]);
        form.toggle_option(0, "M").unwrap();
        assert_eq!(form.state(0).unwrap().value, "M");
        assert!(form.state(0).unwrap().touched);

        form.toggle_option(0, "L").unwrap();
        assert_eq!(form.state(0).unwrap().value, "L");

        form.toggle_option(0, "L").unwrap();
        assert_eq!(form.state(0).unwrap().value, "");
        assert!(form.state(0).unwrap().warning);
    }

    #[test]
    fn test_toggle_option_errors() {
        let mut form = form(&[("size", "[S,M]"), ("name", "text")]);
        assert_eq!(
            form.toggle_option(0, "XL"),
            Err(FormError::UnknownOption {
                key: "size".into(),
                option: "XL".into()
            })
        );
        assert_eq!(form.toggle_option(1, "S"), Err(FormError::NotOptions("name".into())));
        assert_eq!(form.toggle_option(7, "S"), Err(FormError::UnknownField(7)));
    }

    #[test]
    fn test_submit_clean_form_calls_handler_once() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let schema = Schema::from_pairs([
            ("name", SchemaEntry::from("*text")),
            ("mail", SchemaEntry::from(FieldOverrides::new().type_str("*email").name("email"))),
        ]);
        let mut form = SimpleForm::new(&schema, FormConfig::default())
            .unwrap()
            .on_submit(move |values| sink.lock().unwrap().push(values.clone()));

        form.change_by_key("name", "Ada").unwrap();
        form.change_by_key("mail", "ada@example.com").unwrap();
        let report = form.submit();

        assert!(report.outcome.is_submitted());
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let keys: Vec<_> = calls[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "email"]);
        assert_eq!(calls[0]["email"], "ada@example.com");
    }

    #[test]
    fn test_submit_with_errors_touches_everything() {
        let called = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&called);
        let mut form = form(&[("name", "*text"), ("mail", "*email"), ("note", "text")])
            .on_submit(move |_| *flag.lock().unwrap() = true);

        form.change(2, "hi").unwrap();
        let report = form.submit();

        assert_eq!(report.outcome, SubmitOutcome::Rejected { errors: 2 });
        assert!(!*called.lock().unwrap());
        assert!(form.states().iter().all(|s| s.touched));
        assert_eq!(form.submit_errors(), 2);
        assert_eq!(form.error_count(), 2);
        assert_eq!(form.state(0).unwrap().visible_message(), Some("Required field"));
    }

    #[test]
    fn test_banner_hides_then_reveals_latest_only() {
        let mut form = form(&[("name", "*text")]);
        assert!(form.banner().is_shown());

        let first = form.submit().reveal;
        assert!(!form.banner().is_shown());
        let second = form.submit().reveal;

        assert!(!form.reveal_banner(first));
        assert!(!form.banner().is_shown());
        assert!(form.reveal_banner(second));
        assert!(form.banner().is_shown());
    }

    #[test]
    fn test_unknown_key() {
        let mut form = form(&[("a", "text")]);
        assert_eq!(form.change_by_key("zzz", "1"), Err(FormError::UnknownKey("zzz".into())));
    }
}
