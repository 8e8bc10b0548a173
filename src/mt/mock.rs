//! Mock Machine Translator for testing
//!
//! A deterministic, network-free translator. Besides the translation modes it
//! records every call it receives, so tests can assert on whether (and how)
//! the navigator reached the translation service.
//!
//! # Example
//!
//! ```ignore
//! use g2e_translator::mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("Hallo", "de", "en").await.unwrap();
//!     assert_eq!(result, "Hallo_en");
//!     assert_eq!(mock.call_count(), 1);
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append target locale suffix: "Hallo" → "Hallo_en"
    Suffix,

    /// Predefined (text, target_locale) → translation; unknown keys fall back to Suffix
    Mappings(HashMap<(String, String), String>),

    /// Fail every call with `ServiceError`
    Error(String),

    /// Fail every call with `NetworkError`
    Offline(String),

    /// Return input unchanged
    NoOp,
}

/// One recorded `translate` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub text: String,
    pub source_locale: String,
    pub target_locale: String,
}

/// Mock translator that simulates various translation scenarios
///
/// Clones share the same call log.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each translation will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience constructor for a mapping-mode mock with a de→en table
    pub fn with_mappings<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = pairs
            .into_iter()
            .map(|(de, en)| ((de.to_string(), "en".to_string()), en.to_string()))
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn record(&self, text: &str, source: &str, target: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                text: text.to_string(),
                source_locale: source.to_string(),
                target_locale: target.to_string(),
            });
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(MtError::ServiceError(msg.clone())),
            MockMode::Offline(msg) => Err(MtError::NetworkError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        self.record(text, source_locale, target_locale);
        self.apply_delay().await;
        self.apply_translation(text, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
