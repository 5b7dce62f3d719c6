//! # Registration
//!
//! Core of the registration form, independent of any UI toolkit.
//!
//! - [`validation`]: one pure validator per field
//! - [`form`]: raw values, displayed feedback, submit enablement
//! - [`cache`]: best-effort draft persistence in a durable key-value slot
//! - [`session`]: the explicit state object a front end drives
//! - [`submission`]: the validate/submit/settle state machine
//! - [`transport`]: the HTTP call to the spreadsheet endpoint

pub mod cache;
pub mod draft;
pub mod errors;
pub mod field;
pub mod form;
pub mod session;
pub mod submission;
pub mod transport;
pub mod validation;

pub use cache::{DRAFT_KEY, DraftCache, DraftStore, FileStore, MemoryStore};
pub use draft::{RegistrationDraft, RegistrationPayload};
pub use errors::{StorageError, TransportError, ValidationError};
pub use field::FieldId;
pub use form::{Feedback, FormState};
pub use session::{Page, RESTORE_REVALIDATE_DELAY, RegistrationSession};
pub use submission::{
    CONFIRMATION_DELAY, SUBMISSION_FAILED_ALERT, SUBMIT_LABEL, SUBMITTING_LABEL, SubmissionOutcome,
    SubmissionPhase, SubmitReceipt, Submitter,
};
pub use transport::{DEFAULT_ENDPOINT, HttpSubmitter};
pub use validation::{Validation, validate};
