//! Persistent theme preference storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::theme::Theme;

/// Key the preference is stored under.
pub const PREFERENCE_KEY: &str = "theme";

/// Error from reading or writing the preference store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read preference file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write preference file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("preference file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Persistent key-value storage for the theme preference.
///
/// An absent value is a normal case, not an error: it means the user has
/// never made an explicit choice. A stored value other than `"dark"` reads
/// as [`Theme::Light`] — value-present always beats the system signal, even
/// when the value is garbage.
pub trait PreferenceStore {
    /// Returns the stored preference, or `None` if never set.
    fn load(&self) -> Result<Option<Theme>, StoreError>;

    /// Persists the preference.
    fn save(&mut self, theme: Theme) -> Result<(), StoreError>;
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a raw value already present under the
    /// preference key.
    pub fn with_value(value: &str) -> Self {
        let mut store = Self::new();
        store
            .entries
            .insert(PREFERENCE_KEY.to_string(), value.to_string());
        store
    }

    /// The raw stored string, if any.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(PREFERENCE_KEY).map(|s| s.as_str())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self
            .entries
            .get(PREFERENCE_KEY)
            .map(|value| Theme::from_marker(Some(value))))
    }

    fn save(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.entries
            .insert(PREFERENCE_KEY.to_string(), theme.as_str().to_string());
        Ok(())
    }
}

/// JSON file-backed key-value store.
///
/// The file holds a flat string map (`{"theme": "dark"}`); keys other than
/// [`PREFERENCE_KEY`] survive writes untouched. A missing file simply means
/// no preference has been stored yet.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(PREFERENCE_KEY)
            .map(|value| Theme::from_marker(Some(value))))
    }

    fn save(&mut self, theme: Theme) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(PREFERENCE_KEY.to_string(), theme.as_str().to_string());
        let text = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
