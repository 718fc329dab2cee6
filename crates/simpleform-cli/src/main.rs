mod commands;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "simpleform")]
#[command(version, about = "SimpleForm CLI - inspect, validate and submit form schemas", long_about = None)]
struct Cli {
    /// Config file with [texts], [animation] and [rest] tables
    #[arg(short, long, global = true, default_value = "simpleform.toml")]
    config: PathBuf,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the fields a schema resolves to
    Inspect {
        /// Schema file (.json or .toml)
        schema: PathBuf,

        /// Print the initial form view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill a form from a JSON object and run submit validation
    Check {
        /// Schema file (.json or .toml)
        schema: PathBuf,

        /// JSON object mapping field keys to values
        values: PathBuf,

        /// Print the resulting form view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate and POST the values to a REST endpoint
    Post {
        /// Schema file (.json or .toml)
        schema: PathBuf,

        /// JSON object mapping field keys to values
        values: PathBuf,

        /// Overrides `endpoint` from the [rest] table
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Reply property holding the success message
        #[arg(long, default_value = "message")]
        message_field: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect { schema, json } => {
            commands::inspect::execute(&schema, &cli.config, json)?;
        }
        Commands::Check { schema, values, json } => {
            commands::check::execute(&schema, &values, &cli.config, json)?;
        }
        Commands::Post {
            schema,
            values,
            endpoint,
            message_field,
        } => {
            commands::post::execute(&schema, &values, &cli.config, endpoint.as_deref(), &message_field)?;
        }
    }

    Ok(())
}
