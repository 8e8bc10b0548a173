//! Phrase navigation: jump to line N of the parallel corpus
//!
//! One navigation step looks up the German phrase at an index, looks up the
//! English reference at the same index, and asks the translator for its
//! rendering of the German phrase. A missing or blank German phrase stops the
//! step before any translation request goes out.

use crate::corpus::{CorpusStore, LanguageTag};
use crate::mt::{MachineTranslator, MtError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a single navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// No German phrase at this index (corpus closed, out of range, or blank line)
    NoPhrase { index: usize },
    /// German phrase found and sent for translation
    Phrase {
        index: usize,
        german: String,
        english_reference: Option<String>,
        translation: Result<String, MtError>,
    },
}

impl NavigationResult {
    pub fn index(&self) -> usize {
        match self {
            NavigationResult::NoPhrase { index } | NavigationResult::Phrase { index, .. } => {
                *index
            }
        }
    }

    pub fn german(&self) -> Option<&str> {
        match self {
            NavigationResult::Phrase { german, .. } => Some(german),
            NavigationResult::NoPhrase { .. } => None,
        }
    }

    pub fn english_reference(&self) -> Option<&str> {
        match self {
            NavigationResult::Phrase {
                english_reference, ..
            } => english_reference.as_deref(),
            NavigationResult::NoPhrase { .. } => None,
        }
    }

    pub fn translation(&self) -> Option<&Result<String, MtError>> {
        match self {
            NavigationResult::Phrase { translation, .. } => Some(translation),
            NavigationResult::NoPhrase { .. } => None,
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, NavigationResult::Phrase { .. })
    }
}

pub struct PhraseNavigator {
    translator: Arc<dyn MachineTranslator>,
    source: LanguageTag,
    target: LanguageTag,
}

impl PhraseNavigator {
    /// German → English navigator
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self {
            translator,
            source: LanguageTag::De,
            target: LanguageTag::En,
        }
    }

    pub fn translator(&self) -> &Arc<dyn MachineTranslator> {
        &self.translator
    }

    /// Translate free text in the navigator's language direction
    pub async fn translate(&self, text: &str) -> Result<String, MtError> {
        self.translator
            .translate(text, self.source.code(), self.target.code())
            .await
    }

    /// Run one "jump to line `index`" step against `store`
    pub async fn navigate_to(&self, store: &CorpusStore, index: usize) -> NavigationResult {
        let pair = store.phrase_pair(index);
        let has_reference = pair.is_complete();
        let german = match pair.german {
            Some(phrase) if !phrase.trim().is_empty() => phrase,
            found => {
                debug!(
                    index,
                    open = store.is_open(self.source),
                    blank = found.is_some(),
                    "no source phrase, skipping translation"
                );
                return NavigationResult::NoPhrase { index };
            }
        };

        info!(
            index,
            provider = self.translator.provider_name(),
            has_reference,
            "translating phrase"
        );
        let translation = self.translate(&german).await;
        if let Err(e) = &translation {
            warn!(index, error = %e, "translation failed");
        }

        NavigationResult::Phrase {
            index,
            german,
            english_reference: pair.english,
            translation,
        }
    }
}
