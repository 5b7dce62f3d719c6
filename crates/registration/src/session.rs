//! Registration session.
//!
//! The one state object of a running form: built at startup and handed by
//! reference to whatever front end drives it. Owns the form state, the draft
//! cache, the submission phase and the bits of view state the core has to
//! know about (current page, confirmation view, pending alert).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{DraftCache, DraftStore};
use crate::field::FieldId;
use crate::form::FormState;
use crate::submission::{SUBMIT_LABEL, SUBMITTING_LABEL, SubmissionPhase};
use crate::validation::format_mobile_input;

/// Delay before restored fields are re-validated, letting the UI settle first.
pub const RESTORE_REVALIDATE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Form,
    Terms,
}

#[derive(Debug)]
pub struct RegistrationSession<S> {
    pub(crate) form: FormState,
    pub(crate) cache: DraftCache<S>,
    pub(crate) phase: SubmissionPhase,
    pub(crate) page: Page,
    pub(crate) confirmation_visible: bool,
    pub(crate) alert: Option<String>,
    pub(crate) user_agent: String,
}

impl<S: DraftStore> RegistrationSession<S> {
    pub fn new(cache: DraftCache<S>, user_agent: impl Into<String>) -> Self {
        Self {
            form: FormState::new(),
            cache,
            phase: SubmissionPhase::Idle,
            page: Page::Form,
            confirmation_visible: false,
            alert: None,
            user_agent: user_agent.into(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn cache(&self) -> &DraftCache<S> {
        &self.cache
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Rehydrate the form from the cached draft.
    ///
    /// Returns true if a draft was found. Restored fields are not validated
    /// here; call [`Self::revalidate_restored`] after [`RESTORE_REVALIDATE_DELAY`].
    pub fn restore_draft(&mut self) -> bool {
        let Some(draft) = self.cache.load() else {
            return false;
        };
        let restored = self.form.apply_draft(&draft);
        info!("Restored saved form data ({} fields)", restored.len());
        true
    }

    /// Validate every text field that has content so indicators match it.
    pub fn revalidate_restored(&mut self) {
        for field in FieldId::TEXT_FIELDS {
            if !self.form.value(field).is_empty() {
                self.form.validate_field(field);
            }
        }
    }

    /// A keystroke in a text field: filter, store, validate, cache the draft.
    pub fn input(&mut self, field: FieldId, raw: &str) {
        if !field.is_text() {
            self.set_terms(raw.trim() == "true");
            return;
        }
        let value = if field == FieldId::MobileNumber {
            format_mobile_input(raw)
        } else {
            raw.to_string()
        };
        self.form.set_value(field, value);
        self.form.validate_field(field);
        self.cache.save(&self.form.draft());
    }

    /// Focus left a field.
    pub fn blur(&mut self, field: FieldId) {
        self.form.validate_field(field);
    }

    pub fn set_terms(&mut self, accepted: bool) {
        self.form.set_terms(accepted);
        self.form.validate_field(FieldId::Terms);
    }

    pub fn toggle_terms(&mut self) {
        let accepted = !self.form.terms_accepted();
        self.set_terms(accepted);
    }

    /// Navigation hook for the presentation layer.
    pub fn show_page(&mut self, page: Page) {
        debug!("Showing page {page:?}");
        self.page = page;
    }

    pub fn current_page(&self) -> Page {
        self.page
    }

    /// Read-only validity for the submit control.
    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.form.in_flight() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn confirmation_visible(&self) -> bool {
        self.confirmation_visible
    }

    /// Hand the pending alert to the UI (once).
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Called once the confirmation delay has passed: empty form, confirmation hidden.
    pub fn reset_after_confirmation(&mut self) {
        self.form.reset();
        self.confirmation_visible = false;
    }
}
