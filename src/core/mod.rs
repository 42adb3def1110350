//! Translation resolver and locale lifecycle.
//!
//! Nothing in this module touches a concrete document model: markup is
//! reached only through [`TranslationTarget`].

mod apply;
pub mod consent;
mod controller;
mod dictionary;
mod key_pattern;
mod loader;
mod locale;
pub mod persist;

pub use apply::{ApplyReport, MarkedNode, MarkerAttributes, TranslationTarget, apply_all};
pub use controller::{ControllerSettings, LoadOutcome, LoadTicket, LocaleController};
pub use dictionary::{Dictionary, FlatEntry, lookup, resolve};
pub use key_pattern::KeyPattern;
pub use loader::{DirectorySource, HttpSource, LoadError, Source, TranslationSource, load};
pub use locale::{Locale, UnknownLocale};
