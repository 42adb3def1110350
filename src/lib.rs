//! Gardablick i18n - locale resolution and translation loading
//!
//! Loads per-locale translation dictionaries from the site's translations
//! API, resolves dotted key paths against them and writes the results into
//! marked-up templates. The chosen locale is persisted the way the site's
//! pages persist it: a durable key-value entry mirrored to a `locale` cookie.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Resolver, loaders, locale lifecycle and preference storage
//! - `markup`: HTML adapter and template discovery

pub mod cli;
pub mod config;
pub mod core;
pub mod markup;
