//! Loading schemas and value files, and printing field states

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indexmap::IndexMap;
use serde_json::Value;
use simpleform::{FieldStatus, FormConfig, Schema, SimpleForm};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Build a form from a schema file and the config at `config` (missing = defaults)
pub fn load_form(schema: &Path, config: &Path) -> Result<SimpleForm> {
    let config = FormConfig::load(config)?;
    let schema = Schema::load(schema).with_context(|| format!("Failed to load schema: {:?}", schema))?;
    Ok(SimpleForm::new(&schema, config)?)
}

/// Read a JSON object of field key to value, keeping file order
pub fn read_values(path: &Path) -> Result<IndexMap<String, Value>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read values file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Values file must be a JSON object: {:?}", path))
}

/// Feed values to the form the way a user would: typing into inputs and
/// clicking options.
pub fn fill(form: &mut SimpleForm, values: &IndexMap<String, Value>) -> Result<()> {
    for (key, value) in values {
        let id = form.field_id(key)?;
        let is_options = form.field(id).map(|f| f.is_options()).unwrap_or(false);

        if is_options {
            let wanted = selected_option(form, id, value)?;
            let current = form.state(id).map(|s| s.value.clone()).unwrap_or_default();
            match wanted {
                Some(option) if option == current => {}
                Some(option) => form.toggle_option(id, &option)?,
                // Clicking the selected choice again clears it
                None if !current.is_empty() => form.toggle_option(id, &current)?,
                None => {}
            }
        } else {
            let text = scalar_text(key, value)?;
            debug!(field = %key, value = %text, "filling field");
            form.change(id, text)?;
        }
    }
    Ok(())
}

fn scalar_text(key: &str, value: &Value) -> Result<String> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => bail!("value of `{}` must be a string, number, boolean or null", key),
    })
}

// `true` ticks a single checkbox, a string picks the named option and
// `false`, `null` or `""` mean nothing selected.
fn selected_option(form: &SimpleForm, id: usize, value: &Value) -> Result<Option<String>> {
    let choices = form
        .field(id)
        .and_then(|f| f.field_type.choices())
        .unwrap_or_default();

    Ok(match value {
        Value::Bool(true) if choices.len() == 1 => Some(choices[0].clone()),
        Value::Bool(false) | Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => bail!("unsupported value for options field: {}", other),
    })
}

/// One line per field: status marker, label, value and visible message
pub fn print_fields(form: &SimpleForm) {
    let view = form.view();
    for field in &view.fields {
        let marker = match field.status {
            Some(FieldStatus::Danger) => "✗".red(),
            Some(FieldStatus::Warning) => "!".yellow(),
            Some(FieldStatus::Success) => "✓".green(),
            None => "·".dimmed(),
        };
        let value = if field.value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            field.value.cyan().to_string()
        };
        println!("  {} {} = {}", marker, field.label.bold(), value);

        if field.message_visible {
            if let Some(message) = field.message {
                let message = match field.status {
                    Some(FieldStatus::Danger) => message.red(),
                    _ => message.yellow(),
                };
                println!("      {}", message);
            }
        }
    }
}
