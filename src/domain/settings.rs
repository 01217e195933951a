// User-adjustable query parameters for the remote catalog

use std::fmt;

pub const THRESHOLD_MIN: f64 = 0.0;
pub const THRESHOLD_MAX: f64 = 10.0;

/// Regions the remote generator supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::De, Language::Fr];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English (US)",
            Language::De => "Deutsch (Germany)",
            Language::Fr => "Français (France)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Immutable snapshot of the generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub language: Language,
    /// Opaque token, never validated
    pub seed: String,
    pub likes: f64,
    pub reviews: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: Language::En,
            seed: "2535653423".into(),
            likes: 5.0,
            reviews: 4.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Language,
    Seed,
    Likes,
    Reviews,
}

impl SettingKey {
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Language => "language",
            SettingKey::Seed => "seed",
            SettingKey::Likes => "likes",
            SettingKey::Reviews => "reviews",
        }
    }
}

/// A single-field replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingUpdate {
    Language(Language),
    Seed(String),
    Likes(f64),
    Reviews(f64),
}

impl SettingUpdate {
    /// Parse raw input-layer text for `key`. Thresholds are range-checked here, never in the session.
    pub fn parse(key: SettingKey, raw: &str) -> Result<Self, String> {
        match key {
            SettingKey::Language => Language::from_code(raw)
                .map(SettingUpdate::Language)
                .ok_or_else(|| format!("unsupported language: {}", raw)),
            SettingKey::Seed => Ok(SettingUpdate::Seed(raw.to_string())),
            SettingKey::Likes => parse_threshold(key, raw).map(SettingUpdate::Likes),
            SettingKey::Reviews => parse_threshold(key, raw).map(SettingUpdate::Reviews),
        }
    }
}

fn parse_threshold(key: SettingKey, raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a number, got {:?}", key.name(), raw))?;
    if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value) {
        return Err(format!(
            "{} must be between {} and {}, got {}",
            key.name(),
            THRESHOLD_MIN,
            THRESHOLD_MAX,
            value
        ));
    }
    Ok(value)
}

impl Settings {
    /// Replace one field, leaving the others untouched.
    pub fn set_field(&self, update: SettingUpdate) -> Settings {
        let mut next = self.clone();
        match update {
            SettingUpdate::Language(language) => next.language = language,
            SettingUpdate::Seed(seed) => next.seed = seed,
            SettingUpdate::Likes(likes) => next.likes = likes,
            SettingUpdate::Reviews(reviews) => next.reviews = reviews,
        }
        next
    }
}
