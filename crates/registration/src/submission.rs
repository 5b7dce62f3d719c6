//! Submission pipeline.
//!
//! ```text
//! Idle -> Validating -> Submitting -> Succeeded | Failed -> Idle
//!            |
//!            +-> Idle   (any field invalid, nothing sent)
//! ```
//!
//! The pipeline is split in two halves so a front end can run the outbound
//! call wherever it likes (a background task, a test double):
//! [`RegistrationSession::begin_submission`] hands out the payload and marks
//! the session in flight, [`RegistrationSession::complete_submission`] takes
//! the transport result. [`RegistrationSession::submit`] chains both.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::cache::DraftStore;
use crate::draft::RegistrationPayload;
use crate::errors::TransportError;
use crate::field::FieldId;
use crate::session::RegistrationSession;

/// How long the confirmation view stays up before the form resets.
pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(5);

pub const SUBMIT_LABEL: &str = "Submit Registration";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const SUBMISSION_FAILED_ALERT: &str =
    "There was an error submitting your registration. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What the transport could observe about a dispatched request.
///
/// The remote side is opaque; `status` is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub status: Option<u16>,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Succeeded(SubmitReceipt),
    Failed(TransportError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }
}

/// One asynchronous outbound call per submission.
pub trait Submitter {
    fn submit(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<SubmitReceipt, TransportError>> + Send;
}

impl<S: DraftStore> RegistrationSession<S> {
    /// Idle -> Validating -> Submitting.
    ///
    /// Re-runs every validator. Returns `None` when a submission is already
    /// in flight or any field is invalid; the only feedback in that case is
    /// the field messages left by validation.
    pub fn begin_submission(&mut self) -> Option<RegistrationPayload> {
        if self.form.in_flight() {
            return None;
        }
        self.phase = SubmissionPhase::Validating;

        // No short-circuit: every field gets its feedback refreshed.
        let text_ok = FieldId::TEXT_FIELDS
            .iter()
            .fold(true, |ok, f| self.form.validate_field(*f) && ok);
        let terms_ok = self.form.terms_accepted();
        if !terms_ok {
            self.form.validate_field(FieldId::Terms);
        }

        if !(text_ok && terms_ok) {
            info!("Submission dropped: form is not valid");
            self.phase = SubmissionPhase::Idle;
            return None;
        }

        self.form.set_in_flight(true);
        self.phase = SubmissionPhase::Submitting;
        Some(self.form.payload(&self.user_agent))
    }

    /// Submitting -> Succeeded | Failed -> Idle.
    pub fn complete_submission(
        &mut self,
        result: Result<SubmitReceipt, TransportError>,
    ) -> SubmissionOutcome {
        let outcome = match result {
            Ok(receipt) => {
                self.phase = SubmissionPhase::Succeeded;
                info!("Registration submitted (status {:?})", receipt.status);
                self.cache.clear();
                self.confirmation_visible = true;
                SubmissionOutcome::Succeeded(receipt)
            }
            Err(e) => {
                self.phase = SubmissionPhase::Failed;
                error!("Submission error: {e}");
                self.alert = Some(SUBMISSION_FAILED_ALERT.to_string());
                SubmissionOutcome::Failed(e)
            }
        };

        self.form.set_in_flight(false);
        self.phase = SubmissionPhase::Idle;
        outcome
    }

    /// Run the whole pipeline against `submitter`.
    ///
    /// `None` means the submission was dropped before any network call.
    pub async fn submit<T: Submitter>(&mut self, submitter: &T) -> Option<SubmissionOutcome> {
        let payload = self.begin_submission()?;
        let result = submitter.submit(&payload).await;
        Some(self.complete_submission(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DraftCache, MemoryStore};
    use crate::form::Feedback;
    use std::sync::Mutex;

    /// Records payloads and answers with a fixed result.
    struct FakeSubmitter {
        fail: bool,
        sent: Mutex<Vec<RegistrationPayload>>,
    }

    impl FakeSubmitter {
        fn ok() -> Self {
            Self {
                fail: false,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<RegistrationPayload> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Submitter for FakeSubmitter {
        async fn submit(
            &self,
            payload: &RegistrationPayload,
        ) -> Result<SubmitReceipt, TransportError> {
            self.sent.lock().unwrap().push(payload.clone());
            if self.fail {
                Err(TransportError::Other("connection refused".into()))
            } else {
                Ok(SubmitReceipt { status: Some(200) })
            }
        }
    }

    fn jane() -> RegistrationSession<MemoryStore> {
        let mut s = RegistrationSession::new(DraftCache::new(MemoryStore::new()), "signup/test");
        s.input(FieldId::FullName, "Jane Doe");
        s.input(FieldId::MobileNumber, "9876543210");
        s.input(FieldId::EmailId, "jane@x.com");
        s.input(FieldId::TradingviewId, "jane_01");
        s.set_terms(true);
        s
    }

    #[tokio::test]
    async fn happy_path_clears_cache_and_shows_confirmation() {
        let mut s = jane();
        assert!(s.can_submit());

        let submitter = FakeSubmitter::ok();
        let outcome = s.submit(&submitter).await.expect("not dropped");
        assert!(outcome.is_success());

        let sent = submitter.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tradingview_id, "jane_01");
        assert!(sent[0].terms_accepted);

        assert!(s.cache().load().is_none());
        assert!(s.confirmation_visible());
        assert!(!s.form().in_flight());
        assert_eq!(s.phase(), SubmissionPhase::Idle);

        s.reset_after_confirmation();
        assert!(!s.confirmation_visible());
        assert_eq!(s.form().value(FieldId::FullName), "");
        assert!(!s.can_submit());
    }

    #[tokio::test]
    async fn transport_error_keeps_draft_and_reenables_submit() {
        let mut s = jane();
        let submitter = FakeSubmitter::failing();
        let outcome = s.submit(&submitter).await.expect("not dropped");
        assert!(!outcome.is_success());

        assert_eq!(s.take_alert().as_deref(), Some(SUBMISSION_FAILED_ALERT));
        assert_eq!(s.take_alert(), None);
        assert_eq!(s.cache().load().unwrap().full_name, "Jane Doe");
        assert!(!s.confirmation_visible());
        assert!(s.can_submit());
        assert_eq!(s.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn invalid_form_is_dropped_without_network_call() {
        let mut s = jane();
        s.input(FieldId::MobileNumber, "5876543210");
        let submitter = FakeSubmitter::ok();
        assert!(s.submit(&submitter).await.is_none());
        assert!(submitter.sent().is_empty());
        assert!(s.form().feedback(FieldId::MobileNumber).is_error());
        assert_eq!(s.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn tradingview_id_is_required_for_submission() {
        let mut s = jane();
        s.input(FieldId::TradingviewId, "");
        let submitter = FakeSubmitter::ok();
        assert!(s.submit(&submitter).await.is_none());
        assert!(submitter.sent().is_empty());
    }

    #[test]
    fn unchecked_terms_show_required_on_submit() {
        let mut s = jane();
        s.form.set_terms(false);
        assert!(s.begin_submission().is_none());
        assert!(matches!(
            s.form().feedback(FieldId::Terms),
            Feedback::Error(e) if e.is_required()
        ));
    }

    #[test]
    fn in_flight_guard_blocks_second_submission() {
        let mut s = jane();
        let first = s.begin_submission();
        assert!(first.is_some());
        assert_eq!(s.phase(), SubmissionPhase::Submitting);
        assert_eq!(s.submit_label(), SUBMITTING_LABEL);
        assert!(!s.can_submit());
        assert!(s.begin_submission().is_none());

        s.complete_submission(Ok(SubmitReceipt { status: None }));
        assert!(!s.form().in_flight());
    }
}
