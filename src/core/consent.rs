use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::persist::{PreferenceStore, StoreError};

/// Optional cookie categories a visitor can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ConsentCategory {
    Preferences,
    Statistics,
    Marketing,
}

impl fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsentCategory::Preferences => write!(f, "preferences"),
            ConsentCategory::Statistics => write!(f, "statistics"),
            ConsentCategory::Marketing => write!(f, "marketing"),
        }
    }
}

/// The stored cookie-consent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookiePreferences {
    pub necessary: bool,
    pub preferences: bool,
    pub statistics: bool,
    pub marketing: bool,
}

impl Default for CookiePreferences {
    fn default() -> Self {
        Self::reject_all()
    }
}

impl CookiePreferences {
    pub fn accept_all() -> Self {
        Self {
            necessary: true,
            preferences: true,
            statistics: true,
            marketing: true,
        }
    }

    /// Only the strictly necessary cookies.
    pub fn reject_all() -> Self {
        Self {
            necessary: true,
            preferences: false,
            statistics: false,
            marketing: false,
        }
    }

    /// Build a selection from the categories the visitor switched on.
    pub fn with_categories(categories: &[ConsentCategory]) -> Self {
        let mut prefs = Self::reject_all();
        for category in categories {
            prefs.set(*category, true);
        }
        prefs
    }

    pub fn get(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Preferences => self.preferences,
            ConsentCategory::Statistics => self.statistics,
            ConsentCategory::Marketing => self.marketing,
        }
    }

    pub fn set(&mut self, category: ConsentCategory, on: bool) {
        match category {
            ConsentCategory::Preferences => self.preferences = on,
            ConsentCategory::Statistics => self.statistics = on,
            ConsentCategory::Marketing => self.marketing = on,
        }
    }

    pub fn toggle(&mut self, category: ConsentCategory) {
        self.set(category, !self.get(category));
    }

    /// The selection as saved: necessary cookies are always on.
    pub fn selected(&self) -> Self {
        Self {
            necessary: true,
            ..*self
        }
    }
}

/// The consent prompt is due until something has been stored.
pub fn needs_prompt<P: PreferenceStore + ?Sized>(store: &P, key: &str) -> bool {
    store.get(key).is_none_or(|value| value.is_empty())
}

/// Read the stored choice. Unparsable values read as `None`.
pub fn load_consent<P: PreferenceStore + ?Sized>(
    store: &P,
    key: &str,
) -> Option<CookiePreferences> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(prefs) => Some(prefs),
        Err(err) => {
            log::debug!("Ignoring unreadable consent value: {}", err);
            None
        }
    }
}

pub fn save_consent<P: PreferenceStore + ?Sized>(
    store: &mut P,
    key: &str,
    prefs: &CookiePreferences,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(&prefs.selected())?;
    store.set(key, &encoded)
}
