//! Keyless Google Translate web endpoint
//!
//! Talks to the public `translate_a/single` endpoint used by browser
//! extensions. No API key is required, which makes it the default provider
//! for casual desktop use. The endpoint is unofficial: responses are a nested
//! JSON array rather than an object, e.g.
//!
//! ```text
//! [[["Hello ","Hallo ",null,null,10],["World","Welt",null,null,10]],null,"de", ...]
//! ```
//!
//! The translation is the concatenation of the first string of every segment
//! in the first element.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, normalize_locale, validate_locale};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GoogleWebProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleWebProvider {
    /// Longer inputs are rejected by the endpoint with a 413/400
    const MAX_CHARS_PER_STRING: usize = 5_000;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> MtResult<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> MtResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("g2e-translator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://translate.googleapis.com/translate_a/single".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_url(&self, text: &str, source_locale: &str, target_locale: &str) -> MtResult<Url> {
        let sl = normalize_locale(source_locale);
        let tl = normalize_locale(target_locale);
        Url::parse_with_params(
            &self.base_url,
            &[
                ("client", "gtx"),
                ("sl", sl.as_str()),
                ("tl", tl.as_str()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| MtError::ConfigError(format!("Invalid endpoint URL '{}': {}", self.base_url, e)))
    }

    /// Join the translated segments of a `translate_a/single` response
    fn extract_translation(json: &serde_json::Value) -> MtResult<String> {
        let segments = json
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                MtError::ServiceError("Invalid response: missing segment array".to_string())
            })?;

        let mut translated = String::new();
        for segment in segments {
            // Trailing transliteration segments have a null first element
            if let Some(part) = segment.get(0).and_then(|p| p.as_str()) {
                translated.push_str(part);
            }
        }

        // Only called for non-empty input, so an empty result is a bad payload
        if translated.is_empty() {
            return Err(MtError::ServiceError(
                "Invalid response: segments contain no text".to_string(),
            ));
        }

        Ok(translated)
    }
}

#[async_trait]
impl MachineTranslator for GoogleWebProvider {
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

        if text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::ServiceError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let url = self.build_url(text, source_locale, target_locale)?;
        debug!(provider = self.provider_name(), chars = text.len(), "sending request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::ServiceError(format!(
                "Endpoint returned {}: {}",
                status, error_text
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::ServiceError(format!("Failed to parse endpoint response: {}", e))
        })?;

        Self::extract_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate (web)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::test_server::respond_once;
    use serde_json::json;

    #[test]
    fn test_extract_single_segment() {
        let body = json!([[["Hello World", "Hallo Welt", null, null, 10]], null, "de"]);
        assert_eq!(
            GoogleWebProvider::extract_translation(&body).unwrap(),
            "Hello World"
        );
    }

    #[test]
    fn test_extract_joins_segments() {
        let body = json!([
            [
                ["Good morning. ", "Guten Morgen. ", null, null, 10],
                ["How are you?", "Wie geht es dir?", null, null, 10],
                [null, null, "Gudn Morgn"]
            ],
            null,
            "de"
        ]);
        assert_eq!(
            GoogleWebProvider::extract_translation(&body).unwrap(),
            "Good morning. How are you?"
        );
    }

    #[test]
    fn test_extract_rejects_object_payload() {
        let body = json!({ "error": "rate limited" });
        assert!(matches!(
            GoogleWebProvider::extract_translation(&body),
            Err(MtError::ServiceError(_))
        ));
    }

    #[test]
    fn test_extract_rejects_textless_segments() {
        let body = json!([[[null, null, "x"]]]);
        assert!(GoogleWebProvider::extract_translation(&body).is_err());
    }

    #[test]
    fn test_extract_rejects_empty_segment_list() {
        assert!(matches!(
            GoogleWebProvider::extract_translation(&json!([[]])),
            Err(MtError::ServiceError(_))
        ));
    }

    #[test]
    fn test_build_url_encodes_query() {
        let provider = GoogleWebProvider::new().unwrap();
        let url = provider.build_url("Grüße & Küsse", "de-DE", "EN").unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("sl".to_string(), "de".to_string())));
        assert!(pairs.contains(&("tl".to_string(), "en".to_string())));
        assert!(pairs.contains(&("q".to_string(), "Grüße & Küsse".to_string())));
        assert!(pairs.contains(&("client".to_string(), "gtx".to_string())));
    }

    #[test]
    fn test_bad_base_url_is_config_error() {
        let provider = GoogleWebProvider::new().unwrap().with_base_url("not a url");
        assert!(matches!(
            provider.build_url("Hallo", "de", "en"),
            Err(MtError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleWebProvider::new().unwrap();
        assert_eq!(provider.translate("", "de", "en").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider = GoogleWebProvider::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:1/translate_a/single");
        let err = provider.translate("Hallo", "de", "en").await.unwrap_err();
        assert!(err.is_network(), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_translate_against_local_endpoint() {
        let body = r#"[[["Hello World","Hallo Welt",null,null,10]],null,"de"]"#;
        let (base_url, request) = respond_once("200 OK", body).await;
        let provider = GoogleWebProvider::new().unwrap().with_base_url(base_url);

        assert_eq!(
            provider.translate("Hallo Welt", "de", "en").await.unwrap(),
            "Hello World"
        );
        let head = request.await.unwrap();
        assert!(head.starts_with("GET /?client=gtx&sl=de&tl=en"), "got {}", head);
    }

    #[tokio::test]
    async fn test_client_error_status_is_service_error() {
        let (base_url, _request) = respond_once("429 Too Many Requests", "{}").await;
        let provider = GoogleWebProvider::new().unwrap().with_base_url(base_url);
        match provider.translate("Hallo", "de", "en").await {
            Err(MtError::ServiceError(msg)) => assert!(msg.contains("429"), "got {}", msg),
            other => panic!("Expected ServiceError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_status_is_service_error() {
        let (base_url, _request) = respond_once("503 Service Unavailable", "").await;
        let provider = GoogleWebProvider::new().unwrap().with_base_url(base_url);
        let result = provider.translate("Hallo", "de", "en").await;
        assert!(matches!(result, Err(MtError::ServiceError(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_empty_segment_payload_is_service_error() {
        let (base_url, _request) = respond_once("200 OK", "[[],null,\"de\"]").await;
        let provider = GoogleWebProvider::new().unwrap().with_base_url(base_url);
        let result = provider.translate("Hallo", "de", "en").await;
        assert!(matches!(result, Err(MtError::ServiceError(_))), "got {:?}", result);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_real_endpoint_translation() {
        let provider = GoogleWebProvider::new().unwrap();
        let result = provider.translate("Hallo Welt", "de", "en").await.unwrap();
        println!("Translation: Hallo Welt → {}", result);
        assert!(!result.is_empty());
    }
}
