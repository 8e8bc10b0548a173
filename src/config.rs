//! Application configuration loaded from TOML
//!
//! Resolution order: built-in defaults, then the config file, then
//! environment variables. CLI flags are applied on top by the binary.
//!
//! ```toml
//! provider = "cloud"
//! api_key = "AIza..."
//! timeout_secs = 10
//! ```

use crate::mt::google_translate::API_KEY_ENV;
use crate::mt::{
    GoogleTranslateProvider, GoogleWebProvider, MachineTranslator, MockMode, MockTranslator,
    MtError, MtResult, TimeoutTranslator,
};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const PROVIDER_ENV: &str = "G2E_PROVIDER";
pub const TIMEOUT_ENV: &str = "G2E_TIMEOUT_SECS";

/// Which translation backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Keyless public web endpoint
    #[default]
    Web,
    /// Google Cloud Translation v2, needs an API key
    Cloud,
    /// Offline mock that appends the target locale
    Mock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Web => write!(f, "web"),
            ProviderKind::Cloud => write!(f, "cloud"),
            ProviderKind::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(ProviderKind::Web),
            "cloud" | "google" => Ok(ProviderKind::Cloud),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(ConfigError::Invalid(format!("unknown provider '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderKind,
    /// Only used by the cloud provider
    pub api_key: Option<String>,
    /// Upper bound for one translation call
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default config file location (`<config dir>/g2e-translator/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "g2e", "g2e-translator")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicitly given file must exist; a missing default file just
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), provider = %config.provider, "loaded config");
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(provider) = lookup(PROVIDER_ENV) {
            self.provider = provider.parse()?;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be a whole number, got '{}'", TIMEOUT_ENV, secs))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the configured provider, bounded by `timeout_secs`
    pub fn build_translator(&self) -> MtResult<Arc<dyn MachineTranslator>> {
        let timeout = self.timeout();
        let translator: Arc<dyn MachineTranslator> = match self.provider {
            ProviderKind::Web => Arc::new(TimeoutTranslator::new(
                GoogleWebProvider::with_timeout(timeout)?,
                timeout,
            )),
            ProviderKind::Cloud => {
                let key = self.api_key.clone().ok_or_else(|| {
                    MtError::ConfigError(format!(
                        "cloud provider needs api_key in the config file or {}",
                        API_KEY_ENV
                    ))
                })?;
                Arc::new(TimeoutTranslator::new(
                    GoogleTranslateProvider::with_timeout(key, timeout)?,
                    timeout,
                ))
            }
            ProviderKind::Mock => Arc::new(TimeoutTranslator::new(
                MockTranslator::new(MockMode::Suffix),
                timeout,
            )),
        };
        Ok(translator)
    }
}
