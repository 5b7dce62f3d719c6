//! Local draft cache.
//!
//! A `DraftStore` is a durable key-value slot (think browser local storage).
//! `DraftCache` keeps the in-progress draft in one fixed slot on top of it and
//! is strictly best-effort: every storage failure is logged and swallowed.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::draft::RegistrationDraft;
use crate::errors::StorageError;

/// Fixed slot key for the cached draft.
pub const DRAFT_KEY: &str = "registrationFormData";

/// Durable string key-value storage.
pub trait DraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one `<key>.json` file per slot inside `dir`.
///
/// Writes go to a temporary file which is renamed into place while holding an
/// advisory lock, so a concurrently running instance never reads half a draft.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.lock"))
    }
}

impl DraftStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path(key))?;
        lock.lock_exclusive()?;

        let result = write_replace(&self.slot_path(key), value);

        lock.unlock()?;
        result
    }

    /// Deletes the slot and its lock file.
    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        remove_if_present(&self.slot_path(key))?;
        remove_if_present(&self.lock_path(key))
    }
}

fn remove_if_present(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn write_replace(target: &Path, value: &str) -> Result<(), StorageError> {
    let tmp = target.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, target)?;
    Ok(())
}

/// In-process store. Nothing survives the process; used for `--no-cache` and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

impl<S: DraftStore + ?Sized> DraftStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Best-effort cache of the current draft under [`DRAFT_KEY`].
#[derive(Debug)]
pub struct DraftCache<S> {
    store: S,
}

impl<S: DraftStore> DraftCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the slot with `draft`. Failures are logged, never returned.
    pub fn save(&mut self, draft: &RegistrationDraft) {
        let result = serde_json::to_string(draft)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(DRAFT_KEY, &json));
        if let Err(e) = result {
            warn!("Could not save form data: {e}");
        }
    }

    /// Read the slot back. Absent, unreadable or malformed content yields `None`.
    pub fn load(&self) -> Option<RegistrationDraft> {
        let raw = match self.store.get(DRAFT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not load saved data: {e}");
                return None;
            }
        };
        match serde_json::from_str::<RegistrationDraft>(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Ignoring malformed saved data: {e}");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        match self.store.remove(DRAFT_KEY) {
            Ok(()) => debug!("Cleared saved form data"),
            Err(e) => warn!("Could not clear saved data: {e}"),
        }
    }
}
