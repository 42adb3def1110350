use std::{future::Future, path::PathBuf};

use anyhow::{Context, Result};

use super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        Dictionary, Locale, LocaleController, Source, load,
        persist::{FileStore, PreferenceStore},
    },
};

/// Everything a command needs: where the project lives and how it is configured.
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let result = load_config(&common.root)?;
        if !result.from_file {
            log::info!("No {} found, using default configuration", CONFIG_FILE_NAME);
        }
        Ok(Self {
            root: common.root.clone(),
            config: result.config,
            verbose: common.verbose,
        })
    }

    pub fn source(&self) -> Result<Source> {
        self.config.source(&self.root)
    }

    pub fn store(&self) -> FileStore {
        FileStore::open(self.config.store_path(&self.root))
    }

    /// The persisted locale, or the configured fallback.
    pub fn stored_locale(&self) -> Locale {
        self.store()
            .get(&self.config.storage_key)
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or(self.config.fallback_locale)
    }

    pub fn controller(&self) -> Result<LocaleController<Source, FileStore>> {
        Ok(LocaleController::new(
            self.source()?,
            self.store(),
            self.config.controller_settings(),
        ))
    }

    /// Load one locale's dictionary; failures come back as `{}`.
    pub fn load_dictionary(&self, locale: Locale) -> Result<Dictionary> {
        let source = self.source()?;
        block_on(async { load(&source, locale).await })
    }
}

/// Drive a future to completion on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
