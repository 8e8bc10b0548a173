//! Deadline wrapper for translation providers
//!
//! Providers carry a transport timeout on their HTTP client, but that only
//! covers the request itself. `TimeoutTranslator` bounds the whole call,
//! whatever the provider does inside it, and reports an overrun as
//! `MtError::NetworkError`.

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct TimeoutTranslator<T> {
    inner: T,
    timeout: Duration,
}

impl<T: MachineTranslator> TimeoutTranslator<T> {
    pub fn new(inner: T, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: MachineTranslator> MachineTranslator for TimeoutTranslator<T> {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        match tokio::time::timeout(
            self.timeout,
            self.inner.translate(text, source_locale, target_locale),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    provider = self.inner.provider_name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "translation timed out"
                );
                Err(MtError::NetworkError(format!(
                    "{} did not respond within {:?}",
                    self.inner.provider_name(),
                    self.timeout
                )))
            }
        }
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
