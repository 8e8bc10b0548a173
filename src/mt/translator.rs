//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! so the phrase navigator and controller never depend on a specific backend
//! (Google Cloud, the public web endpoint, mock, ...).
//!
//! # Example
//!
//! ```ignore
//! use g2e_translator::mt::{MachineTranslator, GoogleWebProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleWebProvider::new()?;
//!     let result = provider.translate("Guten Morgen", "de", "en").await?;
//!     println!("{}", result); // "Good morning"
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Generic trait for machine translation providers
///
/// Implementations handle the actual translation work, whether through an
/// HTTP API or deterministic logic (Mock). A call either yields the full
/// translated text or fails; there is no partial result.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g., "de", "de-DE")
    /// * `target_locale` - Target language code (e.g., "en", "en-GB")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(MtError)` - `NetworkError` or `ServiceError` if the provider call fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Name of this translation provider, used in log lines
    fn provider_name(&self) -> &str;
}

#[async_trait]
impl<T: MachineTranslator + ?Sized> MachineTranslator for Arc<T> {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        (**self).translate(text, source_locale, target_locale).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// Normalize a locale code by stripping region information
///
/// - `de-DE` → `de`
/// - `en_GB` → `en`
/// - `EN` → `en`
pub fn normalize_locale(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Accepts ASCII alphanumerics, hyphens and underscores only.
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::mock::{MockMode, MockTranslator};

    #[test]
    fn test_normalize_locale_with_region() {
        assert_eq!(normalize_locale("de-DE"), "de");
        assert_eq!(normalize_locale("de-AT"), "de");
        assert_eq!(normalize_locale("en_GB"), "en");
    }

    #[test]
    fn test_normalize_locale_case_insensitive() {
        assert_eq!(normalize_locale("DE"), "de");
        assert_eq!(normalize_locale("EN-US"), "en");
    }

    #[test]
    fn test_validate_locale_valid_codes() {
        assert!(validate_locale("de").is_ok());
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("de_CH").is_ok());
    }

    #[test]
    fn test_validate_locale_invalid_codes() {
        assert!(validate_locale("").is_err());
        assert!(validate_locale("de@invalid").is_err());
        assert!(validate_locale("en#bad").is_err());
    }

    #[test]
    fn test_validate_locale_error_messages() {
        match validate_locale("de@DE") {
            Err(MtError::InvalidLocale(msg)) => {
                assert!(msg.contains("Invalid characters"));
            }
            _ => panic!("Expected InvalidLocale error"),
        }
    }

    #[tokio::test]
    async fn test_arc_forwards_to_inner() {
        let inner: Arc<dyn MachineTranslator> = Arc::new(MockTranslator::new(MockMode::Suffix));
        let result = inner.translate("Hallo", "de", "en").await.unwrap();
        assert_eq!(result, "Hallo_en");
        assert_eq!(inner.provider_name(), "Mock Translator");
    }
}
