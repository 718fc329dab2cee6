//! RestForm - POSTs submitted form values and reports the outcome

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use simpleform::{submit_shared, FormValues, SharedForm, SubmitOutcome};

use crate::config::RestConfig;
use crate::error::SubmitError;
use crate::handler::ResponseHandler;
use crate::status::{FormStatus, StatusLevel, StatusSink};

/// How a submit attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    /// Another submission was in flight
    Dropped,
    /// The form had validation errors; nothing was sent
    Invalid { errors: usize },
    Succeeded(String),
    Failed(String),
}

/// What to show in place of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestFormView<'a> {
    Alert {
        level: StatusLevel,
        /// Error heading, for failures only
        heading: Option<&'a str>,
        message: String,
        back_text: &'a str,
    },
    Form {
        welcome: Option<&'a str>,
    },
}

/// Clears the busy flag however the submission ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RestForm<H> {
    config: RestConfig,
    http: reqwest::Client,
    handler: H,
    sink: Arc<dyn StatusSink>,
    busy: AtomicBool,
}

impl<H: ResponseHandler> RestForm<H> {
    pub fn new(config: RestConfig, handler: H, sink: impl StatusSink + 'static) -> Result<Self, SubmitError> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(config, handler, Arc::new(sink), http))
    }

    /// Use a preconfigured HTTP client and a shared sink
    pub fn with_client(
        config: RestConfig,
        handler: H,
        sink: Arc<dyn StatusSink>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            config,
            http,
            handler,
            sink,
            busy: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate a shared form and, when it is clean, send its values
    pub async fn submit_form(&self, form: &SharedForm) -> SubmitState {
        match submit_shared(form).await {
            SubmitOutcome::Submitted(values) => self.submit(values).await,
            SubmitOutcome::Rejected { errors } => SubmitState::Invalid { errors },
        }
    }

    /// Send already validated values.
    ///
    /// Failures are reported to the sink and returned, never raised.
    pub async fn submit(&self, values: FormValues) -> SubmitState {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(endpoint = %self.config.endpoint, "submission already in flight, dropping");
            return SubmitState::Dropped;
        }
        let _guard = BusyGuard(&self.busy);

        self.sink
            .set_status(StatusLevel::Info, Some(self.config.wait_text.clone()), true);
        self.schedule_scroll();

        let submission = Uuid::new_v4();
        info!(%submission, endpoint = %self.config.endpoint, fields = values.len(), "submitting form");

        match self.call_api(values).await {
            Ok(message) => {
                info!(%submission, "submission accepted");
                self.sink.set_status(StatusLevel::Success, Some(message.clone()), false);
                SubmitState::Succeeded(message)
            }
            Err(err) => {
                warn!(%submission, error = %err, "submission failed");
                let message = err.to_string();
                self.sink.set_status(StatusLevel::Danger, Some(message.clone()), false);
                SubmitState::Failed(message)
            }
        }
    }

    async fn call_api(&self, values: FormValues) -> Result<String, SubmitError> {
        let values = self.handler.before_fetch(values).await?;
        let body = serde_json::to_string(&values)?;

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmitError::from_response(&response));
        }

        self.handler.on_response(response).await
    }

    // Fire-and-forget; a sink dropped in the meantime is simply skipped.
    fn schedule_scroll(&self) {
        let sink = Arc::downgrade(&self.sink);
        let origin = self.config.scroll_origin.clone();
        let delay = self.config.scroll_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sink) = sink.upgrade() {
                sink.scroll_to(&origin);
            }
        });
    }

    /// Leave the status view and show the form again
    pub fn go_back(&self) {
        self.sink.clear();
    }

    /// Alert while a status message exists, otherwise the form
    pub fn view<'a>(&'a self, status: Option<&FormStatus>) -> RestFormView<'a> {
        match status.and_then(|s| s.message.clone().map(|m| (s.level, m))) {
            Some((level, message)) => RestFormView::Alert {
                level,
                heading: (level == StatusLevel::Danger).then_some(self.config.error_text.as_str()),
                message,
                back_text: &self.config.back_text,
            },
            None => RestFormView::Form {
                welcome: self.config.welcome_text.as_deref(),
            },
        }
    }
}
