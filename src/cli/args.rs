//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: write a default `.gardablickrc.json`
//! - `resolve`: translate individual keys
//! - `keys`: list every key a locale defines
//! - `render`: apply translations to the site templates
//! - `locale`: show or switch the persisted locale
//! - `consent`: show or record cookie-consent preferences

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::{Locale, consent::ConsentCategory};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; the config file is searched upward from here
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Dotted key paths, e.g. cookie.title
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Locale to load (default: the persisted locale)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Only list keys matching this pattern, e.g. "cookie.*"
    pub pattern: Option<String>,

    /// Locale to load (default: the persisted locale)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Locales to render (default: all)
    /// Can be specified multiple times: --locale it --locale en
    #[arg(long = "locale", value_enum)]
    pub locales: Vec<Locale>,

    /// Actually write rendered files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Subcommand)]
pub enum LocaleAction {
    /// Show the persisted locale and load its translations
    Show,
    /// Persist a new locale and load its translations
    Set {
        #[arg(value_enum)]
        locale: Locale,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConsentAction {
    /// Show the recorded cookie preferences
    Show,
    /// Accept every cookie category
    AcceptAll,
    /// Accept only strictly necessary cookies
    Reject,
    /// Accept the selected categories
    Accept {
        /// Can be specified multiple times: --category statistics --category marketing
        #[arg(long = "category", value_enum)]
        categories: Vec<ConsentCategory>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .gardablickrc.json configuration file
    Init,
    /// Resolve translation keys against a locale's dictionary
    Resolve(ResolveCommand),
    /// List the keys and values a locale defines
    Keys(KeysCommand),
    /// Apply translations to templates (dry-run unless --apply)
    Render(RenderCommand),
    /// Show or change the persisted locale
    Locale {
        #[command(subcommand)]
        action: LocaleAction,
    },
    /// Show or record cookie-consent preferences
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
}
