use serde::{Deserialize, Serialize};

use crate::field::FieldId;

/// The in-progress record as it is cached between sessions.
///
/// Only the four text fields are kept; the terms checkbox is never cached.
/// Missing keys deserialize as empty strings so older or partial slots still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub mobile_number: String,
    pub email_id: String,
    pub tradingview_id: String,
}

impl RegistrationDraft {
    pub fn get(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::FullName => Some(&self.full_name),
            FieldId::MobileNumber => Some(&self.mobile_number),
            FieldId::EmailId => Some(&self.email_id),
            FieldId::TradingviewId => Some(&self.tradingview_id),
            FieldId::Terms => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
            && self.mobile_number.is_empty()
            && self.email_id.is_empty()
            && self.tradingview_id.is_empty()
    }
}

/// Immutable snapshot sent to the spreadsheet endpoint.
///
/// Wire keys are fixed by the receiving script; `tradingviewid` is lowercase there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    #[serde(rename = "emailId")]
    pub email_id: String,
    #[serde(rename = "tradingviewid")]
    pub tradingview_id: String,
    #[serde(rename = "termsAccepted")]
    pub terms_accepted: bool,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}
