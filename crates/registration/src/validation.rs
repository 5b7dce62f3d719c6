//! Field validators.
//!
//! Pure predicates over raw input strings. Each validator normalizes its input
//! the same way the form always has (trim, or strip non-digits for the mobile
//! number), reports `Required` for empty input and `Invalid` when the pattern
//! does not match. Nothing here touches UI state; displayed feedback lives in
//! `form::FormState`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::ValidationError;
use crate::field::FieldId;

pub type FieldResult = Result<(), ValidationError>;

/// Maximum number of digits the mobile input filter keeps.
pub const MOBILE_DIGITS: usize = 10;

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z\s\x{FEFF}]{2,50}$").expect("name pattern");
    static ref MOBILE_RE: Regex = Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern");
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("email pattern");
    static ref TRADINGVIEW_RE: Regex =
        Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("tradingview pattern");
}

/// Flat view of a validation result for presentation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl From<FieldResult> for Validation {
    fn from(result: FieldResult) -> Self {
        match result {
            Ok(()) => Validation {
                valid: true,
                message: String::new(),
            },
            Err(e) => Validation {
                valid: false,
                message: e.to_string(),
            },
        }
    }
}

/// Validate `raw` as the value of `field`.
///
/// For `FieldId::Terms` the raw value is the stringified checkbox state;
/// only `"true"` counts as checked.
pub fn validate(field: FieldId, raw: &str) -> FieldResult {
    match field {
        FieldId::FullName => validate_full_name(raw),
        FieldId::MobileNumber => validate_mobile(raw),
        FieldId::EmailId => validate_email(raw),
        FieldId::TradingviewId => validate_tradingview_id(raw),
        FieldId::Terms => validate_terms(raw.trim() == "true"),
    }
}

pub fn validate_full_name(raw: &str) -> FieldResult {
    check_pattern(FieldId::FullName, trim_blank(raw), &NAME_RE)
}

/// Non-digits are stripped first so pasted formatting is tolerated, but the
/// stripped value must still be exactly ten digits.
pub fn validate_mobile(raw: &str) -> FieldResult {
    check_pattern(FieldId::MobileNumber, &digits_only(raw), &MOBILE_RE)
}

pub fn validate_email(raw: &str) -> FieldResult {
    check_pattern(FieldId::EmailId, trim_blank(raw), &EMAIL_RE)
}

pub fn validate_tradingview_id(raw: &str) -> FieldResult {
    check_pattern(FieldId::TradingviewId, trim_blank(raw), &TRADINGVIEW_RE)
}

pub fn validate_terms(checked: bool) -> FieldResult {
    if checked {
        Ok(())
    } else {
        Err(ValidationError::Required(FieldId::Terms))
    }
}

fn check_pattern(field: FieldId, normalized: &str, pattern: &Regex) -> FieldResult {
    if normalized.is_empty() {
        Err(ValidationError::Required(field))
    } else if !pattern.is_match(normalized) {
        Err(ValidationError::Invalid(field))
    } else {
        Ok(())
    }
}

/// `str::trim` plus the byte order mark, which browsers count as blank too.
pub fn trim_blank(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Strip every character that is not an ASCII digit.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Keystroke filter for the mobile input: digits only, at most ten of them.
pub fn format_mobile_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MOBILE_DIGITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_name_rules() {
        assert_eq!(validate_full_name("Jane Doe"), Ok(()));
        assert_eq!(validate_full_name("  Jane  "), Ok(()));
        assert_eq!(
            validate_full_name("   "),
            Err(ValidationError::Required(FieldId::FullName))
        );
        assert_eq!(
            validate_full_name("J"),
            Err(ValidationError::Invalid(FieldId::FullName))
        );
        assert_eq!(
            validate_full_name("Jane D0e"),
            Err(ValidationError::Invalid(FieldId::FullName))
        );
        assert_eq!(validate_full_name(&"a".repeat(50)), Ok(()));
        assert!(validate_full_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn mobile_strips_formatting_before_matching() {
        assert_eq!(validate_mobile("9876543210"), Ok(()));
        assert_eq!(validate_mobile("98765-43210"), Ok(()));
        assert_eq!(validate_mobile("(987) 654 3210"), Ok(()));
        // 12 digits once the country code is kept
        assert_eq!(
            validate_mobile("+91 98765 43210"),
            Err(ValidationError::Invalid(FieldId::MobileNumber))
        );
        assert_eq!(
            validate_mobile("abc"),
            Err(ValidationError::Required(FieldId::MobileNumber))
        );
    }

    #[test]
    fn mobile_leading_digit_must_be_six_to_nine() {
        for lead in '0'..='5' {
            let number = format!("{lead}876543210");
            assert!(validate_mobile(&number).is_err(), "{number} accepted");
        }
        for lead in '6'..='9' {
            let number = format!("{lead}876543210");
            assert_eq!(validate_mobile(&number), Ok(()));
        }
        assert!(validate_mobile("58765432101").is_err());
        assert!(validate_mobile("587654321").is_err());
    }

    #[test]
    fn byte_order_mark_counts_as_blank() {
        assert_eq!(validate_email("\u{FEFF}a@b.co"), Ok(()));
        assert_eq!(
            validate_email("a\u{FEFF}b@c.co"),
            Err(ValidationError::Invalid(FieldId::EmailId))
        );
        assert_eq!(validate_full_name("Jane\u{FEFF}Doe"), Ok(()));
        assert_eq!(
            validate_tradingview_id("\u{FEFF}"),
            Err(ValidationError::Required(FieldId::TradingviewId))
        );
    }

    #[test]
    fn email_is_permissive_but_needs_a_dot_after_the_at() {
        assert_eq!(validate_email("a@b.co"), Ok(()));
        assert_eq!(validate_email(" a@b.co "), Ok(()));
        assert_eq!(validate_email("jane.doe+x@mail.example.org"), Ok(()));
        assert_eq!(
            validate_email("a@b"),
            Err(ValidationError::Invalid(FieldId::EmailId))
        );
        assert!(validate_email("a b@c.de").is_err());
        assert!(validate_email("a@@b.de").is_err());
        assert_eq!(
            validate_email(""),
            Err(ValidationError::Required(FieldId::EmailId))
        );
    }

    #[test]
    fn tradingview_id_rules() {
        assert_eq!(validate_tradingview_id("jane_01"), Ok(()));
        assert_eq!(validate_tradingview_id(" abc "), Ok(()));
        assert!(validate_tradingview_id("ab").is_err());
        assert!(validate_tradingview_id("jane-01").is_err());
        assert!(validate_tradingview_id(&"x".repeat(31)).is_err());
        assert_eq!(validate_tradingview_id(&"x".repeat(30)), Ok(()));
    }

    #[test]
    fn terms_only_has_a_required_state() {
        assert_eq!(validate_terms(true), Ok(()));
        let err = validate_terms(false).unwrap_err();
        assert!(err.is_required());
        assert_eq!(
            err.to_string(),
            "You must accept the terms and conditions to proceed"
        );
        assert_eq!(validate(FieldId::Terms, "true"), Ok(()));
        assert!(validate(FieldId::Terms, "false").is_err());
        assert!(validate(FieldId::Terms, "").is_err());
    }

    #[test]
    fn validators_are_idempotent() {
        let inputs = ["", " ", "Jane Doe", "9876543210", "a@b", "jane_01", "+91 98765 43210"];
        for field in FieldId::all() {
            for input in inputs {
                assert_eq!(validate(field, input), validate(field, input));
            }
        }
    }

    #[test]
    fn messages_match_the_form_copy() {
        let v: Validation = validate(FieldId::MobileNumber, "5876543210").into();
        assert!(!v.valid);
        assert_eq!(v.message, "Please enter a valid 10-digit Indian mobile number");

        let v: Validation = validate(FieldId::EmailId, "").into();
        assert_eq!(v.message, "Email ID is required");

        let v: Validation = validate(FieldId::FullName, "Jane").into();
        assert!(v.valid);
        assert!(v.message.is_empty());
    }

    #[test]
    fn mobile_input_filter_keeps_ten_digits() {
        assert_eq!(format_mobile_input("98765 43210"), "9876543210");
        assert_eq!(format_mobile_input("+91 98765 43210"), "9198765432");
        assert_eq!(format_mobile_input("abc"), "");
        assert_eq!(digits_only("+91 98765 43210"), "919876543210");
    }
}
