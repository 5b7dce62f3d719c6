//! Root state of the terminal front end.
//!
//! Wraps the [`RegistrationSession`] (which owns everything the form itself
//! knows) together with the bits only the terminal needs: keyboard focus,
//! scroll offset of the terms page, the alert currently on screen and the
//! loop lifecycle flags. The reducer is the only writer.

use registration::{DraftCache, DraftStore, FieldId, FileStore, MemoryStore, RegistrationSession};

use crate::config::Config;

/// Draft storage chosen at startup (file slot or in-memory with `--no-cache`).
pub type Store = Box<dyn DraftStore>;

/// Focusable controls of the form view, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    TermsLink,
    Submit,
}

pub const FOCUS_ORDER: [Focus; 7] = [
    Focus::Field(FieldId::FullName),
    Focus::Field(FieldId::MobileNumber),
    Focus::Field(FieldId::EmailId),
    Focus::Field(FieldId::TradingviewId),
    Focus::Field(FieldId::Terms),
    Focus::TermsLink,
    Focus::Submit,
];

pub struct RootState {
    pub session: RegistrationSession<Store>,
    pub focus_index: usize,
    pub terms_scroll: u16,
    /// Message of the modal alert, if one is open.
    pub alert: Option<String>,
    pub quit_requested: bool,
    pub last_resize: Option<(u16, u16)>,
}

impl RootState {
    pub fn new(session: RegistrationSession<Store>) -> Self {
        Self {
            session,
            focus_index: 0,
            terms_scroll: 0,
            alert: None,
            quit_requested: false,
            last_resize: None,
        }
    }

    pub fn focus(&self) -> Focus {
        FOCUS_ORDER[self.focus_index % FOCUS_ORDER.len()]
    }

    /// The text field under the cursor, if any.
    pub fn focused_text_field(&self) -> Option<FieldId> {
        match self.focus() {
            Focus::Field(f) if f.is_text() => Some(f),
            _ => None,
        }
    }
}

/// Build the store for this run: a `FileStore` under `<data_dir>/storage`,
/// or process memory when caching is disabled.
pub fn draft_store(config: &Config, no_cache: bool) -> Store {
    if no_cache {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(config.storage_dir()))
    }
}

pub fn initial_root_state(store: Store, user_agent: &str) -> RootState {
    RootState::new(RegistrationSession::new(DraftCache::new(store), user_agent))
}
