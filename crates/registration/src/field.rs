//! Field identifiers of the registration form.
//!
//! Keys match the element ids and JSON keys the form has always used
//! (`fullName`, `mobileNumber`, ...), so cached drafts and log lines stay
//! readable across front ends.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldId {
    FullName,
    MobileNumber,
    EmailId,
    TradingviewId,
    Terms,
}

impl FieldId {
    /// The four free-text fields, in display order.
    pub const TEXT_FIELDS: [FieldId; 4] = [
        FieldId::FullName,
        FieldId::MobileNumber,
        FieldId::EmailId,
        FieldId::TradingviewId,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::MobileNumber => "mobileNumber",
            FieldId::EmailId => "emailId",
            FieldId::TradingviewId => "tradingviewId",
            FieldId::Terms => "terms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FullName => "Full Name",
            FieldId::MobileNumber => "Mobile Number",
            FieldId::EmailId => "Email ID",
            FieldId::TradingviewId => "TradingView ID",
            FieldId::Terms => "I accept the terms and conditions",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, FieldId::Terms)
    }

    pub fn required_message(&self) -> &'static str {
        match self {
            FieldId::FullName => "Full name is required",
            FieldId::MobileNumber => "Mobile number is required",
            FieldId::EmailId => "Email ID is required",
            FieldId::TradingviewId => "TradingView ID is required",
            FieldId::Terms => "You must accept the terms and conditions to proceed",
        }
    }

    /// Terms has no "invalid" state, only "required".
    pub fn invalid_message(&self) -> &'static str {
        match self {
            FieldId::FullName => "Please enter a valid name (2-50 characters, letters only)",
            FieldId::MobileNumber => "Please enter a valid 10-digit Indian mobile number",
            FieldId::EmailId => "Please enter a valid email address",
            FieldId::TradingviewId => {
                "Please enter a valid TradingView username (3-30 characters, letters, numbers, underscore only)"
            }
            FieldId::Terms => self.required_message(),
        }
    }

    /// Iterate all fields (text fields first, terms last).
    pub fn all() -> impl Iterator<Item = FieldId> {
        FieldId::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn keys_round_trip_through_strum() {
        for field in FieldId::all() {
            assert_eq!(field.to_string(), field.key());
            assert_eq!(FieldId::from_str(field.key()).unwrap(), field);
        }
    }

    #[test]
    fn only_terms_is_not_text() {
        let text: Vec<_> = FieldId::all().filter(FieldId::is_text).collect();
        assert_eq!(text, FieldId::TEXT_FIELDS.to_vec());
    }
}
