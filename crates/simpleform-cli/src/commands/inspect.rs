use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::input::load_form;

pub fn execute(schema: &Path, config: &Path, json: bool) -> Result<()> {
    let form = load_form(schema, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&form.view())?);
        return Ok(());
    }

    println!("{}", format!("Schema {:?}", schema).green().bold());
    println!();

    for field in form.fields() {
        let required = if field.required { "required".red() } else { "optional".dimmed() };
        println!(
            "  {} {} ({}, {})",
            format!("#{}", field.id).dimmed(),
            field.key.cyan().bold(),
            field.field_type,
            required
        );
        println!("      label: {}", field.display_label());
        if !field.placeholder.is_empty() {
            println!("      placeholder: {}", field.placeholder);
        }
        if let Some(hint) = field.display_hint() {
            println!("      hint: {}", hint);
        }
        if let Some(choices) = field.field_type.choices() {
            println!("      choices: {}", choices.join(", "));
        }
        if !field.default_value.is_empty() {
            println!("      default: {}", field.default_value);
        }
    }

    println!();
    println!("{} field(s)", form.fields().len());
    Ok(())
}
