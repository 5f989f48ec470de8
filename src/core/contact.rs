use crate::domain::model::{ContactMessage, SubmitState};
use crate::domain::ports::Notifier;
use crate::utils::error::{FolioError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(3000);

/// Free-text payload sent to the messaging endpoint.
pub fn payload(message: &ContactMessage) -> String {
    format!(
        "New contact message\nSubject: {}\nFrom: {} <{}>\n\n{}",
        message.subject, message.name, message.email, message.message
    )
}

/// Submit-control state machine: Ready → Sending → (Sent | Failed) → Ready
/// after the feedback delay. Failures are terminal per attempt (no retry) and
/// never leave the control stuck outside Ready.
pub struct ContactForm<N: Notifier> {
    notifier: N,
    state: Arc<Mutex<SubmitState>>,
    error_text: Arc<Mutex<Option<String>>>,
    feedback_delay: Duration,
}

impl<N: Notifier> ContactForm<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_feedback_delay(notifier, DEFAULT_FEEDBACK_DELAY)
    }

    pub fn with_feedback_delay(notifier: N, feedback_delay: Duration) -> Self {
        Self {
            notifier,
            state: Arc::new(Mutex::new(SubmitState::Ready)),
            error_text: Arc::new(Mutex::new(None)),
            feedback_delay,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(SubmitState::Ready)
    }

    /// Error text shown while the control is in the Failed state.
    pub fn error_text(&self) -> Option<String> {
        self.error_text.lock().ok().and_then(|text| text.clone())
    }

    pub async fn submit(&self, message: &ContactMessage) {
        self.set_state(SubmitState::Sending);
        self.set_error(None);

        match self.notifier.notify(&payload(message)).await {
            Ok(()) => {
                tracing::info!("Contact message delivered");
                self.set_state(SubmitState::Sent);
            }
            Err(e) => {
                tracing::warn!("Contact message delivery failed: {}", e);
                self.set_error(Some(e.to_string()));
                self.set_state(SubmitState::Failed);
            }
        }

        self.schedule_revert();
    }

    fn set_state(&self, state: SubmitState) {
        if let Ok(mut current) = self.state.lock() {
            *current = state;
        }
    }

    fn set_error(&self, text: Option<String>) {
        if let Ok(mut current) = self.error_text.lock() {
            *current = text;
        }
    }

    /// Fire-and-forget revert timer. Holds the state weakly so a dropped form
    /// does not keep a timer alive, and leaves an in-flight resubmission
    /// alone instead of flipping it back to Ready.
    fn schedule_revert(&self) {
        let state = Arc::downgrade(&self.state);
        let error_text = Arc::downgrade(&self.error_text);
        let delay = self.feedback_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            if let Ok(mut state) = state.lock() {
                if *state != SubmitState::Sending {
                    *state = SubmitState::Ready;
                    if let Some(error_text) = error_text.upgrade() {
                        if let Ok(mut error_text) = error_text.lock() {
                            *error_text = None;
                        }
                    }
                }
            };
        });
    }
}

/// Posts the payload as a JSON `{ "text": ... }` body. Which messaging
/// vendor sits behind the endpoint is configuration, not code.
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| FolioError::Submission {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::Submission {
                message: format!("Messaging endpoint returned {}", status),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubNotifier {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl StubNotifier {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        async fn notify(&self, _text: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FolioError::Submission {
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn message() -> ContactMessage {
        ContactMessage {
            subject: "Hello".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Nice site".to_string(),
        }
    }

    #[test]
    fn test_payload_contains_all_four_fields() {
        let text = payload(&message());
        assert!(text.contains("Hello"));
        assert!(text.contains("Ada"));
        assert!(text.contains("ada@example.com"));
        assert!(text.contains("Nice site"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_reverts_to_ready() {
        let form = ContactForm::new(StubNotifier::new(false));
        assert_eq!(form.state(), SubmitState::Ready);

        form.submit(&message()).await;
        assert_eq!(form.state(), SubmitState::Sent);

        tokio::time::sleep(DEFAULT_FEEDBACK_DELAY + Duration::from_millis(10)).await;
        assert_eq!(form.state(), SubmitState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submit_shows_error_then_reverts() {
        let form = ContactForm::new(StubNotifier::new(true));

        form.submit(&message()).await;
        assert_eq!(form.state(), SubmitState::Failed);
        assert!(form.error_text().unwrap().contains("connection refused"));

        tokio::time::sleep(DEFAULT_FEEDBACK_DELAY + Duration::from_millis(10)).await;
        assert_eq!(form.state(), SubmitState::Ready);
        assert!(form.error_text().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_retry_on_failure() {
        let notifier = StubNotifier::new(true);
        let calls = notifier.calls.clone();
        let form = ContactForm::new(notifier);

        form.submit(&message()).await;
        tokio::time::sleep(DEFAULT_FEEDBACK_DELAY * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_revert_timer_leaves_new_submission_alone() {
        let form = ContactForm::with_feedback_delay(
            StubNotifier::new(false),
            Duration::from_millis(100),
        );

        form.submit(&message()).await;
        assert_eq!(form.state(), SubmitState::Sent);

        // A second submission goes out while the first revert timer is still
        // pending; the stale timer must not knock Sending back to Ready.
        form.set_state(SubmitState::Sending);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(form.state(), SubmitState::Sending);
    }
}
