use icu_locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two languages a corpus can be opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    /// German, the source side
    De,
    /// English, the reference side
    En,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 2] = [LanguageTag::De, LanguageTag::En];

    /// ISO 639-1 code, as sent to translation providers
    pub fn code(self) -> &'static str {
        match self {
            LanguageTag::De => "de",
            LanguageTag::En => "en",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LanguageTag::De => "German",
            LanguageTag::En => "English",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}' (expected de or en)")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageTag {
    type Err = UnknownLanguage;

    /// Accepts bare codes and region/script qualified tags (`de-AT`, `en_GB`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        let locale: Locale = normalized
            .parse()
            .map_err(|_| UnknownLanguage(s.to_string()))?;
        match locale.id.language.as_str() {
            "de" => Ok(LanguageTag::De),
            "en" => Ok(LanguageTag::En),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}
