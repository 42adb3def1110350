use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Locale;

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("preference storage is unavailable")]
    Unavailable,
}

/// The `locale` cookie that mirrors the stored choice for server rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleCookie {
    pub locale: Locale,
}

impl LocaleCookie {
    pub const NAME: &'static str = "locale";

    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl fmt::Display for LocaleCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; path=/; max-age={}",
            Self::NAME,
            self.locale,
            LOCALE_COOKIE_MAX_AGE
        )
    }
}

/// Durable client-side key-value storage plus a cookie jar.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn set_cookie(&mut self, cookie: &LocaleCookie) -> Result<(), StoreError>;
}

/// Storage that lives for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    cookies: BTreeMap<String, String>,
    /// Simulates storage that rejects writes (e.g. private browsing).
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_cookie(&mut self, cookie: &LocaleCookie) -> Result<(), StoreError> {
        self.cookies
            .insert(LocaleCookie::NAME.to_string(), cookie.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    storage: BTreeMap<String, String>,
    #[serde(default)]
    cookies: BTreeMap<String, String>,
}

/// Preferences persisted to a JSON file, written through on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: StoreFile,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing or unreadable file starts an empty store; the file is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                log::debug!("Ignoring unreadable preferences {}: {}", path.display(), err);
                StoreFile::default()
            }),
            Err(_) => StoreFile::default(),
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.data.cookies.get(name).map(String::as_str)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.data)?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, content)
        };
        write().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.storage.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.data.storage.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn set_cookie(&mut self, cookie: &LocaleCookie) -> Result<(), StoreError> {
        self.data
            .cookies
            .insert(LocaleCookie::NAME.to_string(), cookie.to_string());
        self.flush()
    }
}
