//! Locale - a BCP 47-style language tag such as `en`, `de`, or `pt-BR`

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub const ENGLISH_TAG: &'static str = "en";

    /// The baseline locale every catalog includes
    pub fn english() -> Self {
        Self(Self::ENGLISH_TAG.to_string())
    }

    /// Parse and normalize a tag: `de_de` becomes `de-DE`
    pub fn parse(tag: &str) -> Result<Self, LocaleParseError> {
        let tag = tag.trim();
        let mut subtags = tag.split(['-', '_']);

        let language = subtags.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LocaleParseError::InvalidTag(tag.to_string()));
        }

        let mut normalized = language.to_ascii_lowercase();
        for subtag in subtags {
            if subtag.is_empty() || subtag.len() > 8 || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(LocaleParseError::InvalidTag(tag.to_string()));
            }
            normalized.push('-');
            if subtag.len() == 2 {
                normalized.push_str(&subtag.to_ascii_uppercase());
            } else {
                normalized.push_str(&subtag.to_ascii_lowercase());
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`pt` for `pt-BR`)
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    #[inline]
    pub fn is_english(&self) -> bool {
        self.0 == Self::ENGLISH_TAG
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleParseError {
    #[error("invalid locale tag: {0:?}")]
    InvalidTag(String),
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
