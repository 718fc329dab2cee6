//! Hooks around the HTTP call

use async_trait::async_trait;
use simpleform::FormValues;

use crate::error::SubmitError;

/// Caller-supplied interpretation of a submission.
///
/// `before_fetch` may rewrite the values (add a token, rename fields) before
/// they are encoded. `on_response` receives only 2xx responses and returns
/// the message shown to the user.
#[async_trait]
pub trait ResponseHandler: Send + Sync {
    async fn before_fetch(&self, values: FormValues) -> Result<FormValues, SubmitError> {
        Ok(values)
    }

    async fn on_response(&self, response: reqwest::Response) -> Result<String, SubmitError>;
}

/// Ignores the body and always reports the same message
#[derive(Debug, Clone)]
pub struct FixedMessage(String);

impl FixedMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[async_trait]
impl ResponseHandler for FixedMessage {
    async fn on_response(&self, _response: reqwest::Response) -> Result<String, SubmitError> {
        Ok(self.0.clone())
    }
}

/// Reads a string property from a JSON reply, e.g. `{"message": "Saved"}`.
/// Falls back to `fallback` when the property is missing or not a string.
#[derive(Debug, Clone)]
pub struct JsonMessage {
    pub field: String,
    pub fallback: String,
}

impl JsonMessage {
    pub fn new(field: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            fallback: fallback.into(),
        }
    }
}

#[async_trait]
impl ResponseHandler for JsonMessage {
    async fn on_response(&self, response: reqwest::Response) -> Result<String, SubmitError> {
        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get(&self.field)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback.clone()))
    }
}
