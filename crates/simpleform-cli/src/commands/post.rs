use anyhow::{Context, Result};
use colored::Colorize;
use restform::{JsonMessage, RestConfig, RestForm, StatusBoard, SubmitState};
use std::path::Path;
use std::sync::Arc;
use url::Url;

use crate::input::{fill, load_form, print_fields, read_values};

const FORM_TYPE: &str = "cli";

pub fn execute(
    schema: &Path,
    values: &Path,
    config: &Path,
    endpoint: Option<&str>,
    message_field: &str,
) -> Result<()> {
    let rest_config = rest_config(config, endpoint)?;

    let mut form = load_form(schema, config)?;
    fill(&mut form, &read_values(values)?)?;
    let form = Arc::new(tokio::sync::Mutex::new(form));

    println!("{}", format!("Posting to {}", rest_config.endpoint).green().bold());
    println!();

    let board = Arc::new(StatusBoard::new());
    let handler = JsonMessage::new(message_field, rest_config.success_text.clone());
    let rest = RestForm::new(rest_config, handler, board.sink(FORM_TYPE))?;

    let state = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(rest.submit_form(&form));

    match state {
        SubmitState::Succeeded(message) => {
            println!("{} {}", "✓".green(), message);
        }
        SubmitState::Failed(message) => {
            let heading = &rest.config().error_text;
            println!("{} {}: {}", "✗".red(), heading.red().bold(), message);
            std::process::exit(1);
        }
        SubmitState::Invalid { errors } => {
            print_fields(&form.blocking_lock());
            println!();
            println!("{}", form.blocking_lock().config().texts.total_errors(errors).red().bold());
            std::process::exit(1);
        }
        SubmitState::Dropped => {
            println!("{}", "Submission already in flight".yellow());
        }
    }

    if let Some(status) = board.status(FORM_TYPE) {
        tracing::debug!(level = %status.level, at = %status.updated_at, "final status");
    }

    Ok(())
}

/// `[rest]` from the config file, or defaults around an explicit endpoint
fn rest_config(config: &Path, endpoint: Option<&str>) -> Result<RestConfig> {
    let Some(endpoint) = endpoint else {
        return RestConfig::load(config);
    };
    let endpoint: Url = endpoint
        .parse()
        .with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;

    let mut rest = match RestConfig::load_optional(config)? {
        Some(rest) => rest,
        None => RestConfig::new(endpoint.clone()),
    };
    rest.endpoint = endpoint;
    Ok(rest)
}
