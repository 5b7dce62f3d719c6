//! Headless subcommands: everything `signup` can do without taking over the
//! terminal.

use std::io::Write;
use std::process::ExitCode;

use color_eyre::Result;
use registration::{DraftCache, DraftStore, FieldId, FileStore, Validation, validate};
use tracing::info;

use crate::config::Config;

pub const SETUP_INSTRUCTIONS: &str = "\
Spreadsheet endpoint setup

The form posts every registration to a Google Apps Script web app that
appends a row to a sheet.

1. Create a sheet whose first row holds these headers:
     Timestamp | Full Name | Mobile Number | Email ID | TradingView ID |
     Terms Accepted | User Agent
2. Open Extensions > Apps Script and add a doPost(e) handler that parses
   e.postData.contents as JSON and appends
     new Date(), fullName, mobileNumber, emailId, tradingviewid,
     termsAccepted, userAgent
   to the sheet. Note that the key is `tradingviewid`, all lowercase.
3. Deploy > New deployment > Web app, execute as yourself, access
   \"Anyone\". Copy the /exec URL.
4. Point the form at it, either with `signup run --endpoint <URL>`, the
   `endpoint` key in config.toml, or the SIGNUP_ENDPOINT variable.

The request is sent without reading the response, so the form reports
success as soon as the request went out.
";

/// `signup validate <field> <value>`: print the result, fail when invalid.
pub fn validate_value(out: &mut impl Write, field: FieldId, value: &str) -> Result<ExitCode> {
    let result = Validation::from(validate(field, value));
    if result.valid {
        writeln!(out, "valid")?;
        Ok(ExitCode::SUCCESS)
    } else {
        writeln!(out, "{}", result.message)?;
        Ok(ExitCode::FAILURE)
    }
}

/// `signup draft show`: pretty-print the cached draft, if any.
pub fn show_draft<S: DraftStore>(out: &mut impl Write, cache: &DraftCache<S>) -> Result<ExitCode> {
    match cache.load() {
        Some(draft) => writeln!(out, "{}", serde_json::to_string_pretty(&draft)?)?,
        None => writeln!(out, "No saved draft")?,
    }
    Ok(ExitCode::SUCCESS)
}

/// `signup draft clear`
pub fn clear_draft<S: DraftStore>(
    out: &mut impl Write,
    cache: &mut DraftCache<S>,
) -> Result<ExitCode> {
    cache.clear();
    writeln!(out, "Saved draft cleared")?;
    Ok(ExitCode::SUCCESS)
}

pub fn print_setup(out: &mut impl Write) -> Result<ExitCode> {
    out.write_all(SETUP_INSTRUCTIONS.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

/// Draft cache backed by the configured storage directory.
pub fn file_cache(config: &Config) -> DraftCache<FileStore> {
    let dir = config.storage_dir();
    info!("Using draft storage at {}", dir.display());
    DraftCache::new(FileStore::new(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use registration::{MemoryStore, RegistrationDraft};

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<ExitCode>) -> (ExitCode, String) {
        let mut buf = Vec::new();
        let code = f(&mut buf).unwrap();
        (code, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn validate_prints_valid() {
        let (code, text) = output(|o| validate_value(o, FieldId::MobileNumber, "9876543210"));
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(text, "valid\n");
    }

    #[test]
    fn validate_prints_message_and_fails() {
        let (code, text) = output(|o| validate_value(o, FieldId::MobileNumber, "5876543210"));
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(text.trim_end(), FieldId::MobileNumber.invalid_message());

        let (code, text) = output(|o| validate_value(o, FieldId::EmailId, "   "));
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(text.trim_end(), "Email ID is required");
    }

    #[test]
    fn show_and_clear_draft() {
        let mut cache = DraftCache::new(MemoryStore::new());
        let (_, text) = output(|o| show_draft(o, &cache));
        assert_eq!(text, "No saved draft\n");

        cache.save(&RegistrationDraft {
            full_name: "Jane Doe".into(),
            ..Default::default()
        });
        let (_, text) = output(|o| show_draft(o, &cache));
        assert!(text.contains("\"fullName\": \"Jane Doe\""));

        let (code, _) = output(|o| clear_draft(o, &mut cache));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(cache.load().is_none());
    }

    #[test]
    fn setup_mentions_the_lowercase_key() {
        let (_, text) = output(|o| print_setup(o));
        assert!(text.contains("tradingviewid"));
        assert!(text.contains("TradingView ID"));
    }
}
