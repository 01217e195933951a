use std::path::{Path, PathBuf};

use anyhow::Context;
use twelf::{Layer, config};

use crate::domain::settings::{Language, Settings, THRESHOLD_MAX, THRESHOLD_MIN};

const CONFIG_FILE: &str = "book_browser.yaml";
const ENV_PREFIX: &str = "BOOK_BROWSER_";

const DEFAULT_CATALOG_BASE_URL: &str = "https://book-review-back-production.up.railway.app";
const DEFAULT_BOOKS_PATH: &str = "/books";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SEED: &str = "2535653423";

#[config]
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote book-generation service
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
    #[serde(default = "default_books_path")]
    pub books_path: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_seed")]
    pub default_seed: String,
    #[serde(default = "default_likes")]
    pub default_likes: f64,
    #[serde(default = "default_reviews")]
    pub default_reviews: f64,
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.into()
}

fn default_books_path() -> String {
    DEFAULT_BOOKS_PATH.into()
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.into()
}

fn default_language() -> String {
    Language::En.code().into()
}

fn default_seed() -> String {
    DEFAULT_SEED.into()
}

fn default_likes() -> f64 {
    5.0
}

fn default_reviews() -> f64 {
    4.7
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_base_url: default_catalog_base_url(),
            books_path: default_books_path(),
            bind_addr: default_bind_addr(),
            default_language: default_language(),
            default_seed: default_seed(),
            default_likes: default_likes(),
            default_reviews: default_reviews(),
        }
    }
}

impl Config {
    /// Load from `book_browser.yaml` (if present) overlaid with `BOOK_BROWSER_*` env vars.
    pub fn load() -> anyhow::Result<Self> {
        let mut layers = Vec::new();
        if Path::new(CONFIG_FILE).exists() {
            layers.push(Layer::Yaml(PathBuf::from(CONFIG_FILE)));
        }
        layers.push(Layer::Env(Some(ENV_PREFIX.to_string())));
        Config::with_layers(&layers).with_context(|| "Failed to load configuration")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.catalog_base_url.trim().is_empty() {
            return Err("BOOK_BROWSER_CATALOG_BASE_URL is missing".into());
        }
        if Language::from_code(&self.default_language).is_none() {
            return Err(format!(
                "Unsupported BOOK_BROWSER_DEFAULT_LANGUAGE: {}",
                self.default_language
            ));
        }
        for (name, value) in [
            ("BOOK_BROWSER_DEFAULT_LIKES", self.default_likes),
            ("BOOK_BROWSER_DEFAULT_REVIEWS", self.default_reviews),
        ] {
            if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value) {
                return Err(format!(
                    "{} must be between {} and {}, got {}",
                    name, THRESHOLD_MIN, THRESHOLD_MAX, value
                ));
            }
        }
        Ok(())
    }

    /// Settings snapshot the session starts with.
    pub fn initial_settings(&self) -> Settings {
        Settings {
            language: Language::from_code(&self.default_language).unwrap_or_default(),
            seed: self.default_seed.clone(),
            likes: self.default_likes,
            reviews: self.default_reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = Config::default();
        assert!(c.validate().is_ok());
        let s = c.initial_settings();
        assert_eq!(s.language, Language::En);
        assert_eq!(s.seed, "2535653423");
        assert_eq!(s.likes, 5.0);
        assert_eq!(s.reviews, 4.7);
    }

    #[test]
    fn rejects_empty_base_url() {
        let c = Config {
            catalog_base_url: "  ".into(),
            ..Config::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_unknown_language() {
        let c = Config {
            default_language: "xx".into(),
            ..Config::default()
        };
        let err = c.validate().unwrap_err();
        assert!(err.contains("xx"));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let c = Config {
            default_reviews: 11.0,
            ..Config::default()
        };
        assert!(c.validate().is_err());
    }
}
