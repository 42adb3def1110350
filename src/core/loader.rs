//! Fetching per-locale dictionaries.
//!
//! Every source reports failures as a [`LoadError`] so callers can log
//! diagnostics, while [`load`] folds any failure into the empty dictionary
//! so translation application always gets a well-formed input.

use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::StatusCode;
use thiserror::Error;

use super::{Dictionary, Locale};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed translations from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Somewhere a locale's dictionary can be fetched from.
pub trait TranslationSource {
    fn fetch(&self, locale: Locale) -> impl Future<Output = Result<Dictionary, LoadError>> + Send;
}

/// Fetch `locale` from `source`, folding every failure into `{}`.
pub async fn load<S: TranslationSource>(source: &S, locale: Locale) -> Dictionary {
    match source.fetch(locale).await {
        Ok(dictionary) => dictionary,
        Err(err) => {
            log::warn!("Using empty translations for '{}': {}", locale, err);
            Dictionary::empty()
        }
    }
}

/// The site's translations API: `GET {api_base}/translations/{locale}/`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    api_base: String,
}

impl HttpSource {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gardablick-i18n/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LoadError::Transport {
                url: api_base.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, locale: Locale) -> String {
        format!("{}/translations/{}/", self.api_base, locale.code())
    }
}

impl TranslationSource for HttpSource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary, LoadError> {
        let url = self.url_for(locale);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.clone(),
                source,
            })?;

        // Only a plain 200 carries a dictionary; 204 or 206 do not.
        if response.status() != StatusCode::OK {
            return Err(LoadError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.clone(),
                source,
            })?;

        Dictionary::from_json_str(&body).map_err(|source| LoadError::Malformed {
            origin: url,
            source,
        })
    }
}

/// Locale files laid out as `{root}/{locale}.json`, the layout the
/// translations endpoint serves from.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, locale: Locale) -> PathBuf {
        self.root.join(format!("{}.json", locale.code()))
    }
}

impl TranslationSource for DirectorySource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary, LoadError> {
        let path = self.path_for(locale);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;

        Dictionary::from_json_str(&content).map_err(|source| LoadError::Malformed {
            origin: path.display().to_string(),
            source,
        })
    }
}

/// The source selected by configuration.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    Directory(DirectorySource),
}

impl Source {
    pub fn describe(&self, locale: Locale) -> String {
        match self {
            Source::Http(http) => http.url_for(locale),
            Source::Directory(dir) => dir.path_for(locale).display().to_string(),
        }
    }
}

impl TranslationSource for Source {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary, LoadError> {
        match self {
            Source::Http(http) => http.fetch(locale).await,
            Source::Directory(dir) => dir.fetch(locale).await,
        }
    }
}
