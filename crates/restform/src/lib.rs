//! # restform
//!
//! Sends the values of a [`simpleform::SimpleForm`] to a REST endpoint.
//!
//! ## Flow
//!
//! 1. The form is validated; nothing is sent while any field has an error.
//! 2. The status sink receives an `info` status with a spinner.
//! 3. Values are POSTed as JSON. A non-2xx reply fails with its status text.
//! 4. A [`ResponseHandler`] turns the reply into a message, reported as
//!    `success`; any failure is reported as `danger`.
//!
//! A second submit while one is in flight is dropped.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use restform::{FixedMessage, RestConfig, RestForm, StatusBoard};
//! use simpleform::{FormConfig, Schema, SimpleForm};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let schema = Schema::from_pairs([("name", "*text"), ("mail", "*email")]);
//! let form = Arc::new(tokio::sync::Mutex::new(SimpleForm::new(&schema, FormConfig::default())?));
//!
//! let board = Arc::new(StatusBoard::new());
//! let config = RestConfig::new("https://example.com/contact".parse()?);
//! let rest = RestForm::new(config, FixedMessage::new("Thanks!"), board.sink("contact"))?;
//!
//! rest.submit_form(&form).await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod status;

pub use client::{RestForm, RestFormView, SubmitState};
pub use config::RestConfig;
pub use error::SubmitError;
pub use handler::{FixedMessage, JsonMessage, ResponseHandler};
pub use status::{BoardSink, FormStatus, StatusBoard, StatusLevel, StatusSink};
