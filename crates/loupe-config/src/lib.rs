use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::gesture::GestureConfig;
use self::ocr::OcrConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod gesture;
pub mod ocr;
pub mod translator;
pub mod ui;

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gesture: GestureConfig,
    pub ocr: OcrConfig,
    pub translator: TranslatorConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load `path`, or `config.json` in the working directory if it exists,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.exists().then_some(fallback)
            }
        };

        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                tracing::info!("No config file found, using defaults");
                Config::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LOUPE_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(lang) = lookup("LOUPE_FROM_LANG") {
            self.translator.from_lang = lang;
        }
        if let Some(lang) = lookup("LOUPE_TO_LANG") {
            self.translator.to_lang = lang;
        }
        if let Some(email) = lookup("LOUPE_MYMEMORY_EMAIL") {
            self.translator.email = Some(email).filter(|e| !e.is_empty());
        }
        if let Some(lang) = lookup("LOUPE_TESSERACT_LANG") {
            self.ocr.language = lang;
        }
        if let Some(value) = lookup("LOUPE_CACHE_CAPACITY") {
            self.translator.cache_capacity =
                value.parse().map_err(|_| ConfigError::InvalidOverride {
                    key: "LOUPE_CACHE_CAPACITY",
                    value,
                })?;
        }
        if let Some(value) = lookup("LOUPE_TIMEOUT_SECONDS") {
            self.translator.timeout_seconds =
                value.parse().map_err(|_| ConfigError::InvalidOverride {
                    key: "LOUPE_TIMEOUT_SECONDS",
                    value,
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translator.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "translator.cache_capacity must be at least 1".into(),
            ));
        }
        if self.translator.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "translator.timeout_seconds must be at least 1".into(),
            ));
        }
        if self.translator.from_lang.trim().is_empty() || self.translator.to_lang.trim().is_empty()
        {
            return Err(ConfigError::Invalid("language codes must not be empty".into()));
        }
        if self.ocr.language.trim().is_empty() {
            return Err(ConfigError::Invalid("ocr.language must not be empty".into()));
        }
        if self.ocr.upscale == 0 {
            return Err(ConfigError::Invalid("ocr.upscale must be at least 1".into()));
        }
        if self.gesture.modifiers.is_empty() {
            return Err(ConfigError::Invalid(
                "gesture.modifiers must name at least one key".into(),
            ));
        }
        if let Some(key) = self.gesture.modifiers.iter().find(|k| !k.is_modifier()) {
            return Err(ConfigError::Invalid(format!(
                "gesture.modifiers contains non-modifier key {key:?}"
            )));
        }
        Ok(())
    }
}
