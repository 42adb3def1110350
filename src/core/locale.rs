use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A supported site locale.
///
/// Codes are matched case-sensitively, the same way the server-side
/// translations endpoint matches them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    It,
    En,
    De,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: \"{0}\" (expected one of: it, en, de)")]
pub struct UnknownLocale(pub String);

impl Locale {
    /// Every supported locale, in switcher order.
    pub const ALL: [Locale; 3] = [Locale::It, Locale::En, Locale::De];

    /// Locale used when nothing valid has been persisted.
    pub const FALLBACK: Locale = Locale::It;

    pub fn code(self) -> &'static str {
        match self {
            Locale::It => "it",
            Locale::En => "en",
            Locale::De => "de",
        }
    }

    /// Parse a persisted code, returning `None` for anything unsupported.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
