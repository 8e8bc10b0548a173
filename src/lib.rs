//! German → English translation helper with parallel corpus stepping
//!
//! Load a German corpus (and optionally its English counterpart), step
//! through it line by line, and compare a machine translation of each German
//! phrase against the English reference.
//!
//! ```ignore
//! use g2e_translator::{LanguageTag, TranslatorController};
//! use g2e_translator::mt::{MockMode, MockTranslator};
//! use std::sync::Arc;
//!
//! let mut controller = TranslatorController::new(Arc::new(MockTranslator::new(MockMode::Suffix)));
//! controller.open_corpus(LanguageTag::De, Some("phrases.de.txt".as_ref()))?;
//! controller.open_corpus(LanguageTag::En, Some("phrases.en.txt".as_ref()))?;
//! controller.navigate_to(1).await;
//! println!("{} | {:?}", controller.output(), controller.reference());
//! ```

pub mod config;
pub mod controller;
pub mod corpus;
pub mod mt;
pub mod navigator;
pub mod session;

pub use config::{AppConfig, ConfigError, ProviderKind};
pub use controller::{Status, TranslatorController};
pub use corpus::{CorpusError, CorpusHandle, CorpusStore, LanguageTag, PhrasePair};
pub use navigator::{NavigationResult, PhraseNavigator};
