//! The locale lifecycle for one page session.
//!
//! The controller owns the current locale and dictionary. Every switch
//! hands out a [`LoadTicket`] with a monotonically increasing sequence
//! number; when a load completes, only the most recent ticket may install
//! its dictionary. A slow response for an abandoned locale is dropped.

use super::{
    ApplyReport, Dictionary, LoadError, Locale, MarkerAttributes, TranslationSource,
    TranslationTarget, apply_all,
    persist::{LocaleCookie, PreferenceStore},
};

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Durable storage key for the chosen locale.
    pub storage_key: String,
    pub fallback: Locale,
    pub markers: MarkerAttributes,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            storage_key: "gardablick-locale".to_string(),
            fallback: Locale::FALLBACK,
            markers: MarkerAttributes::default(),
        }
    }
}

/// Identifies one dictionary load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub locale: Locale,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The dictionary is now current.
    Applied,
    /// A newer load was started; this result was discarded.
    Stale,
}

pub struct LocaleController<S, P> {
    source: S,
    store: P,
    settings: ControllerSettings,
    current: Locale,
    dictionary: Dictionary,
    next_seq: u64,
    active: Option<LoadTicket>,
}

impl<S: TranslationSource, P: PreferenceStore> LocaleController<S, P> {
    pub fn new(source: S, store: P, settings: ControllerSettings) -> Self {
        let current = settings.fallback;
        Self {
            source,
            store,
            settings,
            current,
            dictionary: Dictionary::empty(),
            next_seq: 0,
            active: None,
        }
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// The load whose result will be accepted, if one is in flight.
    pub fn pending(&self) -> Option<LoadTicket> {
        self.active
    }

    /// Translate a key against the current dictionary.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.dictionary.resolve(key)
    }

    /// Restore the persisted locale, or the fallback when nothing valid is
    /// stored, and start loading it.
    pub fn init_locale(&mut self) -> LoadTicket {
        let saved = self.store.get(&self.settings.storage_key);
        self.current = saved
            .as_deref()
            .and_then(Locale::from_code)
            .unwrap_or(self.settings.fallback);

        if let Some(code) = saved.as_deref()
            && Locale::from_code(code).is_none()
        {
            log::debug!("Ignoring unsupported stored locale \"{}\"", code);
        }

        self.write_cookie();
        self.begin_load()
    }

    /// Persist `locale`, make it current and start loading it.
    pub fn set_locale(&mut self, locale: Locale) -> LoadTicket {
        self.current = locale;
        if let Err(err) = self.store.set(&self.settings.storage_key, locale.code()) {
            log::debug!("Locale choice not persisted: {}", err);
        }
        self.write_cookie();
        self.begin_load()
    }

    /// Fetch the dictionary for `ticket` without touching controller state.
    pub async fn fetch(&self, ticket: LoadTicket) -> Result<Dictionary, LoadError> {
        self.source.fetch(ticket.locale).await
    }

    /// Settle a load. Failures install the empty dictionary.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Dictionary, LoadError>,
    ) -> LoadOutcome {
        if self.active != Some(ticket) {
            log::debug!(
                "Discarding stale translations for '{}' (load #{})",
                ticket.locale,
                ticket.seq
            );
            return LoadOutcome::Stale;
        }

        self.dictionary = result.unwrap_or_else(|err| {
            log::warn!("Using empty translations for '{}': {}", ticket.locale, err);
            Dictionary::empty()
        });
        self.active = None;
        LoadOutcome::Applied
    }

    /// Write the current dictionary into `target`.
    pub fn apply<T: TranslationTarget + ?Sized>(&self, target: &mut T) -> ApplyReport {
        target.set_lang(self.current);
        apply_all(target, &self.dictionary, &self.settings.markers)
    }

    /// Restore the persisted locale, load it and apply it to `target`.
    pub async fn start<T: TranslationTarget + ?Sized>(&mut self, target: &mut T) -> ApplyReport {
        let ticket = self.init_locale();
        self.finish(ticket, target).await
    }

    /// Switch to `locale`, load it and apply it to `target`.
    ///
    /// Choosing the locale that is already current does nothing once a load
    /// has been started for it.
    pub async fn switch<T: TranslationTarget + ?Sized>(
        &mut self,
        locale: Locale,
        target: &mut T,
    ) -> ApplyReport {
        if locale == self.current && self.next_seq > 0 {
            log::debug!("'{}' is already the current locale", locale);
            return ApplyReport::default();
        }
        let ticket = self.set_locale(locale);
        self.finish(ticket, target).await
    }

    async fn finish<T: TranslationTarget + ?Sized>(
        &mut self,
        ticket: LoadTicket,
        target: &mut T,
    ) -> ApplyReport {
        target.set_lang(ticket.locale);
        let result = self.fetch(ticket).await;
        match self.complete(ticket, result) {
            LoadOutcome::Applied => self.apply(target),
            LoadOutcome::Stale => ApplyReport::default(),
        }
    }

    fn write_cookie(&mut self) {
        if let Err(err) = self.store.set_cookie(&LocaleCookie::new(self.current)) {
            log::debug!("Locale cookie not written: {}", err);
        }
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.next_seq += 1;
        let ticket = LoadTicket {
            locale: self.current,
            seq: self.next_seq,
        };
        self.active = Some(ticket);
        ticket
    }
}
