use anyhow::Result;
use colored::Colorize;
use simpleform::SubmitOutcome;
use std::path::Path;

use crate::input::{fill, load_form, print_fields, read_values};

pub fn execute(schema: &Path, values: &Path, config: &Path, json: bool) -> Result<()> {
    let mut form = load_form(schema, config)?;
    fill(&mut form, &read_values(values)?)?;

    let report = form.submit();
    // No animation here; show the banner straight away
    form.reveal_banner(report.reveal);

    if json {
        println!("{}", serde_json::to_string_pretty(&form.view())?);
        return Ok(());
    }

    println!("{}", "Checking form...".green().bold());
    println!();
    print_fields(&form);
    println!();

    match report.outcome {
        SubmitOutcome::Submitted(values) => {
            println!("{}", "Form is valid".green().bold());
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        SubmitOutcome::Rejected { .. } => {
            if let Some(banner) = form.view().banner {
                println!("{}", banner.red().bold());
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
