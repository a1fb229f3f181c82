// ABOUTME: Site locale (two-letter path segment) used to build every request URL.
// ABOUTME: Validates input so a bad locale never reaches the URL templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Two-letter lowercase locale segment, e.g. `es` in `/es/film1.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parse and normalize a locale. Accepts any case and surrounding whitespace.
    pub fn new(value: &str) -> Result<Self, ClientError> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.len() == 2 && normalized.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(normalized))
        } else {
            Err(ClientError::invalid_input(
                "",
                "Locale",
                Some(anyhow::anyhow!("locale must be two letters, got {:?}", value)),
            ))
        }
    }

    /// Spanish site, the assistant's home locale.
    pub fn es() -> Self {
        Self("es".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::es()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}
