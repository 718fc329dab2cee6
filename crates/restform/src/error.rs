//! Submission failures
//!
//! These never reach the form's caller: `RestForm` turns them into a
//! `danger` status whose message is the error's display text.

use hyper::ext::ReasonPhrase;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Connection, TLS, timeout or body read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered outside 200..300; the message is the status text
    #[error("{text}")]
    Status { code: u16, text: String },

    #[error("failed to encode form values: {0}")]
    Encode(#[from] serde_json::Error),

    /// Refused by a response handler or a before-fetch hook
    #[error("{0}")]
    Rejected(String),
}

impl SubmitError {
    /// `reason` is the phrase the server sent, when it differs from the
    /// canonical one for `status`
    pub fn status(status: reqwest::StatusCode, reason: Option<&str>) -> Self {
        let text = reason
            .filter(|r| !r.trim().is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unexpected response");
        SubmitError::Status {
            code: status.as_u16(),
            text: text.to_string(),
        }
    }

    /// Status error for a non-2xx response, keeping a custom reason phrase
    pub fn from_response(response: &reqwest::Response) -> Self {
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok());
        Self::status(response.status(), reason)
    }
}
