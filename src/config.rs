use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::core::{
    ControllerSettings, DirectorySource, HttpSource, Locale, MarkerAttributes, Source,
};

pub const CONFIG_FILE_NAME: &str = ".gardablickrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Read `{localesRoot}/{locale}.json` instead of calling the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales_root: Option<String>,
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: Locale,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_consent_key")]
    pub consent_key: String,
    #[serde(default = "default_text_attribute")]
    pub text_attribute: String,
    #[serde(default = "default_placeholder_attribute")]
    pub placeholder_attribute: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_output_root")]
    pub output_root: String,
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_fallback_locale() -> Locale {
    Locale::FALLBACK
}

fn default_storage_key() -> String {
    "gardablick-locale".to_string()
}

fn default_consent_key() -> String {
    "gardablick-cookie-consent".to_string()
}

fn default_text_attribute() -> String {
    MarkerAttributes::default().text
}

fn default_placeholder_attribute() -> String {
    MarkerAttributes::default().placeholder
}

fn default_includes() -> Vec<String> {
    vec!["templates".to_string()]
}

fn default_output_root() -> String {
    "./dist".to_string()
}

fn default_store_path() -> String {
    "./.gardablick/preferences.json".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            locales_root: None,
            fallback_locale: default_fallback_locale(),
            storage_key: default_storage_key(),
            consent_key: default_consent_key(),
            text_attribute: default_text_attribute(),
            placeholder_attribute: default_placeholder_attribute(),
            includes: default_includes(),
            ignores: Vec::new(),
            output_root: default_output_root(),
            store_path: default_store_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.locales_root.is_none() {
            let url = Url::parse(&self.api_base)
                .with_context(|| format!("Invalid URL in 'apiBase': \"{}\"", self.api_base))?;
            if !matches!(url.scheme(), "http" | "https") {
                bail!("'apiBase' must be an http(s) URL: \"{}\"", self.api_base);
            }
        }

        if self.text_attribute.trim().is_empty() || self.placeholder_attribute.trim().is_empty() {
            bail!("Marker attribute names must not be empty");
        }

        if self.request_timeout_secs == 0 {
            bail!("'requestTimeoutSecs' must be greater than zero");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }

    pub fn markers(&self) -> MarkerAttributes {
        MarkerAttributes {
            text: self.text_attribute.clone(),
            placeholder: self.placeholder_attribute.clone(),
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            storage_key: self.storage_key.clone(),
            fallback: self.fallback_locale,
            markers: self.markers(),
        }
    }

    /// Build the translation source, resolving relative paths against `root`.
    pub fn source(&self, root: &Path) -> Result<Source> {
        match &self.locales_root {
            Some(dir) => Ok(Source::Directory(DirectorySource::new(resolve_path(root, dir)))),
            None => {
                let http = HttpSource::new(
                    &self.api_base,
                    Duration::from_secs(self.request_timeout_secs),
                )
                .context("Failed to build HTTP client")?;
                Ok(Source::Http(http))
            }
        }
    }

    pub fn store_path(&self, root: &Path) -> PathBuf {
        resolve_path(root, &self.store_path)
    }

    pub fn output_root(&self, root: &Path) -> PathBuf {
        resolve_path(root, &self.output_root)
    }
}

/// Join a configured path onto `root` unless it is already absolute.
pub fn resolve_path(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p.strip_prefix(".").unwrap_or(p))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
