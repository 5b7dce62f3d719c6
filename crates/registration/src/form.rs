//! Form state tracker.
//!
//! Holds the raw field values exactly as typed, the in-flight flag and the
//! feedback currently displayed next to each field. Values are kept as
//! strings; the terms checkbox is stored as `"true"` / `"false"`.
//!
//! Two notions of validity coexist on purpose:
//! - displayed feedback only flags a text field once it has content, so an
//!   untouched empty field is shown neutral;
//! - `is_form_valid` treats an empty field as invalid, so submission stays
//!   disabled until every field is filled in.

use std::collections::HashMap;

use crate::draft::{RegistrationDraft, RegistrationPayload};
use crate::errors::ValidationError;
use crate::field::FieldId;
use crate::validation::{self, FieldResult};

/// What the presentation layer shows next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Neutral,
    Valid,
    Error(ValidationError),
}

impl Feedback {
    pub fn message(&self) -> Option<String> {
        match self {
            Feedback::Error(e) => Some(e.to_string()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

#[derive(Debug, Default, Clone)]
pub struct FormState {
    values: HashMap<FieldId, String>,
    feedback: HashMap<FieldId, Feedback>,
    in_flight: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a field (empty string if never set).
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Store a raw value. Does not validate; callers decide when feedback updates.
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn terms_accepted(&self) -> bool {
        self.value(FieldId::Terms) == "true"
    }

    pub fn set_terms(&mut self, accepted: bool) {
        self.set_value(FieldId::Terms, if accepted { "true" } else { "false" });
    }

    pub fn feedback(&self, field: FieldId) -> Feedback {
        self.feedback.get(&field).copied().unwrap_or_default()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    /// Run the field's validator and update its displayed feedback.
    pub fn validate_field(&mut self, field: FieldId) -> bool {
        let raw = self.value(field);
        let result = validation::validate(field, raw);
        let shown = !field.is_text() || !raw.is_empty();

        let feedback = match (&result, shown) {
            (Err(e), true) => Feedback::Error(*e),
            (Ok(()), true) if field.is_text() => Feedback::Valid,
            _ => Feedback::Neutral,
        };
        self.feedback.insert(field, feedback);

        result.is_ok()
    }

    /// Validate without touching displayed feedback.
    pub fn check(&self, field: FieldId) -> FieldResult {
        validation::validate(field, self.value(field))
    }

    /// A text field only counts when it has non-blank content and passes its
    /// pattern; terms must be accepted.
    pub fn is_form_valid(&self) -> bool {
        let text_ok = FieldId::TEXT_FIELDS
            .iter()
            .all(|f| {
                !validation::trim_blank(self.value(*f)).is_empty() && self.check(*f).is_ok()
            });
        text_ok && self.terms_accepted()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_form_valid() && !self.in_flight
    }

    /// Clear every value and every indicator. The in-flight flag is left alone.
    pub fn reset(&mut self) {
        self.values.clear();
        self.feedback.clear();
    }

    pub fn draft(&self) -> RegistrationDraft {
        RegistrationDraft {
            full_name: self.value(FieldId::FullName).to_string(),
            mobile_number: self.value(FieldId::MobileNumber).to_string(),
            email_id: self.value(FieldId::EmailId).to_string(),
            tradingview_id: self.value(FieldId::TradingviewId).to_string(),
        }
    }

    /// Copy the non-empty cached values into the form. Returns the fields restored.
    pub fn apply_draft(&mut self, draft: &RegistrationDraft) -> Vec<FieldId> {
        let mut restored = Vec::new();
        for field in FieldId::TEXT_FIELDS {
            if let Some(v) = draft.get(field).filter(|v| !v.is_empty()) {
                self.set_value(field, v);
                restored.push(field);
            }
        }
        restored
    }

    /// Snapshot for submission: text trimmed, mobile reduced to its digits.
    pub fn payload(&self, user_agent: &str) -> RegistrationPayload {
        RegistrationPayload {
            full_name: validation::trim_blank(self.value(FieldId::FullName)).to_string(),
            mobile_number: validation::digits_only(self.value(FieldId::MobileNumber)),
            email_id: validation::trim_blank(self.value(FieldId::EmailId)).to_string(),
            tradingview_id: validation::trim_blank(self.value(FieldId::TradingviewId)).to_string(),
            terms_accepted: self.terms_accepted(),
            user_agent: user_agent.to_string(),
        }
    }
}
