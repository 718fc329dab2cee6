// File: src/schema/field.rs
// Purpose: Parsed field descriptors

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Custom acceptance test for a field value. `false` marks the field as an error.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Transform applied to user input before validation: `(new, old) -> value`.
pub type ChangeHook = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Placeholder shown for date fields when the schema gives none.
pub const DATE_PLACEHOLDER: &str = "dd/mm/yyyy";

/// Kind of control a field renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Date,
    /// Multi-line text with a row count
    Textarea { rows: u32 },
    /// Checkbox group; at most one choice is selected
    Options { choices: Vec<String> },
    /// Symbol-prefixed amount (`$`, `£`)
    Currency { symbol: String },
    /// Any other input type tag (`password`, `tel`, ...), validated like text
    Input { tag: String },
}

impl FieldType {
    /// Type tag as written in a compact schema string
    pub fn tag(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Textarea { .. } => "textarea",
            FieldType::Options { .. } => "options",
            FieldType::Currency { symbol } => symbol.as_str(),
            FieldType::Input { tag } => tag.as_str(),
        }
    }

    /// Number and currency fields reject negative input
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Currency { .. })
    }

    pub fn choices(&self) -> Option<&[String]> {
        match self {
            FieldType::Options { choices } => Some(choices),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<u32> {
        match self {
            FieldType::Textarea { rows } => Some(*rows),
            _ => None,
        }
    }

    /// A lone checkbox may be left empty without a warning
    pub fn is_single_checkbox(&self) -> bool {
        self.choices().map_or(false, |c| c.len() == 1)
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Textarea { rows } => write!(f, "textarea({})", rows),
            FieldType::Options { choices } => write!(f, "[{}]", choices.join(",")),
            other => f.write_str(other.tag()),
        }
    }
}

/// Fully resolved, immutable description of one form field.
///
/// Built once from a [`SchemaEntry`](super::SchemaEntry); the form never
/// changes it afterwards.
#[derive(Clone)]
pub struct FieldSpec {
    /// Position in schema order, used as the state handle
    pub id: usize,
    pub key: String,
    /// Key used in the submitted value mapping
    pub name: String,
    pub required: bool,
    pub field_type: FieldType,
    pub placeholder: String,
    pub hint: Option<String>,
    pub label: String,
    pub default_value: String,
    /// Browser autofill token (`email`, `postal-code`, `off`, ...)
    pub auto_complete: Option<String>,
    /// Message shown when `validate` rejects a value
    pub error_text: Option<String>,
    pub validate: Option<Validator>,
    pub on_change: Option<ChangeHook>,
}

impl FieldSpec {
    /// Spec with every optional part at its default
    pub fn new(id: usize, key: impl Into<String>, field_type: FieldType) -> Self {
        let key = key.into();
        let placeholder = match field_type {
            FieldType::Date => DATE_PLACEHOLDER.to_string(),
            _ => String::new(),
        };

        Self {
            id,
            name: key.clone(),
            label: super::humanize_key(&key),
            key,
            required: false,
            field_type,
            placeholder,
            hint: None,
            default_value: String::new(),
            auto_complete: None,
            error_text: None,
            validate: None,
            on_change: None,
        }
    }

    /// Label as displayed, with the required marker
    pub fn display_label(&self) -> String {
        if self.required {
            format!("*{}", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Hint line under the control. Date fields fall back to their placeholder.
    pub fn display_hint(&self) -> Option<&str> {
        match (&self.hint, &self.field_type) {
            (Some(hint), _) => Some(hint),
            (None, FieldType::Date) if !self.placeholder.is_empty() => Some(&self.placeholder),
            _ => None,
        }
    }

    pub fn is_options(&self) -> bool {
        matches!(self.field_type, FieldType::Options { .. })
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("field_type", &self.field_type)
            .field("placeholder", &self.placeholder)
            .field("hint", &self.hint)
            .field("label", &self.label)
            .field("default_value", &self.default_value)
            .field("auto_complete", &self.auto_complete)
            .field("error_text", &self.error_text)
            .field("validate", &self.validate.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spec_defaults() {
        let spec = FieldSpec::new(0, "first-name", FieldType::Text);
        assert_eq!(spec.name, "first-name");
        assert_eq!(spec.label, "First Name");
        assert_eq!(spec.placeholder, "");
        assert!(!spec.required);
        assert!(spec.display_hint().is_none());
    }

    #[test]
    fn test_date_placeholder_doubles_as_hint() {
        let spec = FieldSpec::new(0, "dob", FieldType::Date);
        assert_eq!(spec.placeholder, DATE_PLACEHOLDER);
        assert_eq!(spec.display_hint(), Some(DATE_PLACEHOLDER));
    }

    #[test]
    fn test_display_label_marks_required() {
        let mut spec = FieldSpec::new(0, "mail", FieldType::Email);
        spec.required = true;
        assert_eq!(spec.display_label(), "*Mail");
    }

    #[test]
    fn test_single_checkbox() {
        let single = FieldType::Options { choices: vec!["Agree".into()] };
        let many = FieldType::Options { choices: vec!["A".into(), "B".into()] };
        assert!(single.is_single_checkbox());
        assert!(!many.is_single_checkbox());
        assert!(!FieldType::Text.is_single_checkbox());
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(FieldType::Currency { symbol: "£".into() }.tag(), "£");
        assert_eq!(FieldType::Textarea { rows: 5 }.to_string(), "textarea(5)");
        assert!(FieldType::Currency { symbol: "$".into() }.is_numeric());
        assert!(!FieldType::Email.is_numeric());
    }
}
