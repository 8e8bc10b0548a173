//! Google Cloud Translation API v2 provider
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable (or takes it explicitly). Obtain a key from:
//! https://console.cloud.google.com/
//!
//! # Example
//!
//! ```ignore
//! use g2e_translator::mt::{MachineTranslator, GoogleTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let result = provider.translate("Hallo Welt", "de", "en").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// The key travels in a header so it never appears in the request URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new provider with an explicit API key
    ///
    /// # Errors
    ///
    /// `ConfigError` if the key is empty, `NetworkError` if the HTTP client
    /// cannot be built.
    pub fn new(api_key: String) -> MtResult<Self> {
        Self::with_timeout(api_key, Self::DEFAULT_TIMEOUT)
    }

    /// Same as [`GoogleTranslateProvider::new`] with a custom transport timeout
    pub fn with_timeout(api_key: String, timeout: Duration) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            MtError::ConfigError(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        Self::new(api_key)
    }

    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pull `data.translations[0].translatedText` out of a v2 response body
    fn extract_translation(json: &serde_json::Value) -> MtResult<String> {
        let translations = json["data"]["translations"].as_array().ok_or_else(|| {
            MtError::ServiceError(
                "Invalid API response: missing 'data.translations' array".to_string(),
            )
        })?;

        translations
            .first()
            .and_then(|t| t["translatedText"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::ServiceError(
                    "Invalid API response: missing 'translatedText' field".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.len() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::ServiceError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let body = json!({
            "q": [text],
            "source": normalize_locale(source_locale),
            "target": normalize_locale(target_locale),
            "format": "text"
        });

        debug!(provider = self.provider_name(), chars = text.len(), "sending request");
        let response = self
            .client
            .post(&self.base_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::ServiceError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::ServiceError(format!("Failed to parse API response: {}", e))
        })?;

        Self::extract_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::test_server::respond_once;

    #[test]
    fn test_new_with_valid_key() {
        let provider = GoogleTranslateProvider::new("test-api-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "Google Translate");
    }

    #[test]
    fn test_new_with_empty_key() {
        match GoogleTranslateProvider::new("".to_string()) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(GoogleTranslateProvider::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_extract_translation() {
        let body = json!({
            "data": { "translations": [ { "translatedText": "Hello world" } ] }
        });
        assert_eq!(
            GoogleTranslateProvider::extract_translation(&body).unwrap(),
            "Hello world"
        );
    }

    #[test]
    fn test_extract_translation_missing_array() {
        let body = json!({ "error": { "code": 400 } });
        match GoogleTranslateProvider::extract_translation(&body) {
            Err(MtError::ServiceError(msg)) => assert!(msg.contains("data.translations")),
            other => panic!("Expected ServiceError, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_translation_empty_array() {
        let body = json!({ "data": { "translations": [] } });
        assert!(GoogleTranslateProvider::extract_translation(&body).is_err());
    }

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        assert_eq!(provider.translate("", "de", "en").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_translate_invalid_source_locale() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("Hallo", "invalid@code", "en").await;
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        match provider.translate(&long_text, "de", "en").await {
            Err(MtError::ServiceError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected ServiceError"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:1/translate");
        let err = provider.translate("Hallo", "de", "en").await.unwrap_err();
        assert!(err.is_network(), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_network_error_does_not_leak_key() {
        let provider = GoogleTranslateProvider::new("SECRET-KEY-123".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:1/translate");
        let err = provider.translate("Hallo", "de", "en").await.unwrap_err();
        assert!(err.is_network(), "got {:?}", err);
        assert!(!err.to_string().contains("SECRET-KEY-123"), "got {}", err);
    }

    #[tokio::test]
    async fn test_key_sent_as_header() {
        let body = r#"{"data":{"translations":[{"translatedText":"Hello"}]}}"#;
        let (base_url, request) = respond_once("200 OK", body).await;
        let provider = GoogleTranslateProvider::new("SECRET-KEY-123".to_string())
            .unwrap()
            .with_base_url(format!("{}/translate", base_url));

        assert_eq!(provider.translate("Hallo", "de", "en").await.unwrap(), "Hello");

        let head = request.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert_eq!(request_line, "POST /translate HTTP/1.1");
        assert!(
            head.lines()
                .any(|l| l.eq_ignore_ascii_case("x-goog-api-key: SECRET-KEY-123")),
            "headers: {}",
            head
        );
    }

    #[tokio::test]
    async fn test_quota_rejection_is_service_error() {
        let body = r#"{"error":{"code":403,"message":"Daily Limit Exceeded"}}"#;
        let (base_url, _request) = respond_once("403 Forbidden", body).await;
        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(base_url);

        match provider.translate("Hallo", "de", "en").await {
            Err(MtError::ServiceError(msg)) => {
                assert!(msg.contains("403"), "got {}", msg);
                assert!(msg.contains("Daily Limit Exceeded"), "got {}", msg);
            }
            other => panic!("Expected ServiceError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_service_error() {
        let (base_url, _request) = respond_once("429 Too Many Requests", "{}").await;
        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(base_url);
        let result = provider.translate("Hallo", "de", "en").await;
        assert!(matches!(result, Err(MtError::ServiceError(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_server_failure_is_service_error() {
        let (base_url, _request) = respond_once("503 Service Unavailable", "{}").await;
        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url(base_url);
        let result = provider.translate("Hallo", "de", "en").await;
        assert!(matches!(result, Err(MtError::ServiceError(_))), "got {:?}", result);
    }

    #[test]
    fn test_debug_output_masks_key() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_single_translation() {
        if std::env::var(API_KEY_ENV).is_err() {
            eprintln!("Skipping: {} not set", API_KEY_ENV);
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let result = provider.translate("Hallo", "de", "en").await.unwrap();
        println!("Translation: Hallo → {}", result);
        assert!(!result.is_empty());
    }
}
