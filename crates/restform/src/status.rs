//! Status reporting
//!
//! A `StatusSink` receives `(level, message, spinning)` updates from a
//! RestForm. `StatusBoard` is the stock sink: it keeps the latest status per
//! form type, plus an optional order payload for checkout-style forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Severity of a status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Success,
    Danger,
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLevel::Info => write!(f, "info"),
            StatusLevel::Success => write!(f, "success"),
            StatusLevel::Danger => write!(f, "danger"),
        }
    }
}

/// Receiver of submission progress
pub trait StatusSink: Send + Sync {
    fn set_status(&self, level: StatusLevel, message: Option<String>, spinning: bool);

    /// Return to the form (the "go back" action)
    fn clear(&self);

    /// Bring `origin` into view; best effort, may be ignored
    fn scroll_to(&self, _origin: &str) {}
}

/// Latest status of one form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormStatus {
    pub level: StatusLevel,
    pub message: Option<String>,
    pub spinner: bool,
    pub updated_at: DateTime<Utc>,
}

/// Status records keyed by form type
#[derive(Debug, Default)]
pub struct StatusBoard {
    statuses: RwLock<HashMap<String, FormStatus>>,
    orders: RwLock<HashMap<String, serde_json::Value>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the status of `form_type`
    pub fn set_status(&self, form_type: &str, level: StatusLevel, message: Option<String>, spinner: bool) {
        let status = FormStatus {
            level,
            message,
            spinner,
            updated_at: Utc::now(),
        };
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(form_type.to_string(), status);
    }

    pub fn clear(&self, form_type: &str) {
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(form_type);
    }

    pub fn status(&self, form_type: &str) -> Option<FormStatus> {
        self.statuses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(form_type)
            .cloned()
    }

    /// Attach an order payload to a form, replacing any previous one
    pub fn fill_order(&self, form_type: &str, order: serde_json::Value) {
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(form_type.to_string(), order);
    }

    pub fn order(&self, form_type: &str) -> Option<serde_json::Value> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(form_type)
            .cloned()
    }

    /// Sink that writes to this board under `form_type`
    pub fn sink(self: &Arc<Self>, form_type: impl Into<String>) -> BoardSink {
        BoardSink {
            board: Arc::clone(self),
            form_type: form_type.into(),
        }
    }
}

/// [`StatusSink`] bound to one entry of a [`StatusBoard`]
#[derive(Debug, Clone)]
pub struct BoardSink {
    board: Arc<StatusBoard>,
    form_type: String,
}

impl BoardSink {
    pub fn form_type(&self) -> &str {
        &self.form_type
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.board.status(&self.form_type)
    }
}

impl StatusSink for BoardSink {
    fn set_status(&self, level: StatusLevel, message: Option<String>, spinning: bool) {
        self.board.set_status(&self.form_type, level, message, spinning);
    }

    fn clear(&self) {
        self.board.clear(&self.form_type);
    }
}
