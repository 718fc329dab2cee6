// File: src/timer.rs
// Purpose: Delayed banner reveal for forms shared with tokio tasks

use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::form::{BannerReveal, SimpleForm, SubmitOutcome};

/// A form shared between the event handler and its timers
pub type SharedForm = Arc<Mutex<SimpleForm>>;

/// Show the error banner after `reveal.delay`.
///
/// The task only holds a weak handle: if the form is dropped first, the
/// reveal does nothing. It cannot be cancelled.
pub fn spawn_banner_reveal(form: &SharedForm, reveal: BannerReveal) -> JoinHandle<()> {
    let weak: Weak<Mutex<SimpleForm>> = Arc::downgrade(form);
    tokio::spawn(async move {
        tokio::time::sleep(reveal.delay).await;
        match weak.upgrade() {
            Some(form) => {
                form.lock().await.reveal_banner(reveal);
            }
            None => tracing::debug!("form dropped before banner reveal"),
        }
    })
}

/// Submit a shared form: hide the banner, validate, then schedule the reveal
pub async fn submit_shared(form: &SharedForm) -> SubmitOutcome {
    let report = form.lock().await.submit();
    spawn_banner_reveal(form, report.reveal);
    report.outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormConfig, Schema};
    use std::time::Duration;

    fn shared(schema: Schema) -> SharedForm {
        Arc::new(Mutex::new(SimpleForm::new(&schema, FormConfig::default()).unwrap()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_comes_back_after_delay() {
        let form = shared(Schema::from_pairs([("name", "*text")]));

        let outcome = submit_shared(&form).await;
        assert_eq!(outcome, SubmitOutcome::Rejected { errors: 1 });
        assert!(!form.lock().await.banner().is_shown());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(form.lock().await.banner().is_shown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_after_drop_is_a_no_op() {
        let form = shared(Schema::from_pairs([("name", "*text")]));
        let report = form.lock().await.submit();
        let handle = spawn_banner_reveal(&form, report.reveal);
        drop(form);

        assert!(handle.await.is_ok());
    }
}
