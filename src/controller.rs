//! Interaction controller
//!
//! Owns the corpus store, the navigator, and the text a front end shows
//! (German input, English output, reference line, status). Front ends call
//! these methods from their event handlers and render the fields afterwards;
//! no state lives in the front end itself.

use crate::corpus::{CorpusResult, CorpusStore, LanguageTag};
use crate::mt::{MachineTranslator, MtError};
use crate::navigator::{NavigationResult, PhraseNavigator};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// What the last user action did, for a status line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Opened {
        language: LanguageTag,
        lines: usize,
    },
    OpenCancelled,
    OpenFailed(String),
    NothingToTranslate,
    Translated,
    TranslationFailed(MtError),
    NoPhrase {
        index: usize,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "ready"),
            Status::Opened { language, lines } => {
                write!(f, "{} corpus loaded ({} lines)", language.name(), lines)
            }
            Status::OpenCancelled => write!(f, "no file selected"),
            Status::OpenFailed(msg) => write!(f, "could not open corpus: {}", msg),
            Status::NothingToTranslate => write!(f, "nothing to translate"),
            Status::Translated => write!(f, "translated"),
            Status::TranslationFailed(e) => write!(f, "translation failed: {}", e),
            Status::NoPhrase { index } => write!(f, "no German phrase at line {}", index),
        }
    }
}

pub struct TranslatorController {
    store: CorpusStore,
    navigator: PhraseNavigator,
    german_input: String,
    english_output: String,
    reference: Option<String>,
    current_index: Option<usize>,
    status: Status,
}

impl TranslatorController {
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self {
            store: CorpusStore::new(),
            navigator: PhraseNavigator::new(translator),
            german_input: String::new(),
            english_output: String::new(),
            reference: None,
            current_index: None,
            status: Status::Ready,
        }
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    pub fn input(&self) -> &str {
        &self.german_input
    }

    pub fn output(&self) -> &str {
        &self.english_output
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn provider_name(&self) -> &str {
        self.navigator.translator().provider_name()
    }

    /// Handle a file picked for `language`
    ///
    /// `None` or an empty path means the user cancelled and nothing changes.
    /// Returns whether a corpus was loaded. On error the previously loaded
    /// corpus for that language stays active.
    pub fn open_corpus(&mut self, language: LanguageTag, path: Option<&Path>) -> CorpusResult<bool> {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            self.status = Status::OpenCancelled;
            return Ok(false);
        };

        match self.store.open(language, path) {
            Ok(handle) => {
                self.status = Status::Opened {
                    language,
                    lines: handle.line_count(),
                };
            }
            Err(e) => {
                warn!(error = %e, "corpus open failed");
                self.status = Status::OpenFailed(e.to_string());
                return Err(e);
            }
        }

        if self.store.is_misaligned() {
            warn!(
                de_lines = self.store.line_count(LanguageTag::De),
                en_lines = self.store.line_count(LanguageTag::En),
                "corpora differ in length, references may not line up"
            );
        }
        Ok(true)
    }

    pub fn line_count(&self, language: LanguageTag) -> usize {
        self.store.line_count(language)
    }

    pub fn phrase_at(&self, language: LanguageTag, index: usize) -> Option<&str> {
        self.store.phrase_at(language, index)
    }

    /// Replace the German input text
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.german_input = text.into();
    }

    /// Translate is offered only while the input holds some text
    pub fn can_translate(&self) -> bool {
        !self.german_input.trim().is_empty()
    }

    /// Translate arbitrary text without touching the view
    pub async fn translate(
        &self,
        text: &str,
        source: LanguageTag,
        target: LanguageTag,
    ) -> Result<String, MtError> {
        self.navigator
            .translator()
            .translate(text, source.code(), target.code())
            .await
    }

    /// Translate the current input into the output field
    ///
    /// Returns `Ok(false)` without contacting the provider when the input is
    /// blank. On failure the output field keeps its previous text.
    pub async fn translate_input(&mut self) -> Result<bool, MtError> {
        if !self.can_translate() {
            self.status = Status::NothingToTranslate;
            return Ok(false);
        }

        let result = self.navigator.translate(&self.german_input).await;
        self.apply_translation(result).map(|_| true)
    }

    fn apply_translation(&mut self, result: Result<String, MtError>) -> Result<(), MtError> {
        match result {
            Ok(text) => {
                self.english_output = text;
                self.status = Status::Translated;
                Ok(())
            }
            Err(e) => {
                self.status = Status::TranslationFailed(e.clone());
                Err(e)
            }
        }
    }

    /// Jump to corpus line `index`
    ///
    /// On a phrase, the input is pre-filled with it, the reference is shown
    /// (or cleared), and the translation is applied like
    /// [`translate_input`](Self::translate_input). Otherwise only the status
    /// changes.
    pub async fn navigate_to(&mut self, index: usize) -> NavigationResult {
        let result = self.navigator.navigate_to(&self.store, index).await;

        if (1..=self.store.line_count(LanguageTag::De)).contains(&index) {
            self.current_index = Some(index);
        }

        match &result {
            NavigationResult::NoPhrase { index } => {
                self.status = Status::NoPhrase { index: *index };
            }
            NavigationResult::Phrase {
                german,
                english_reference,
                translation,
                ..
            } => {
                self.german_input = german.clone();
                self.reference = english_reference.clone();
                let _ = self.apply_translation(translation.clone());
                info!(index, status = %self.status, "navigated");
            }
        }

        result
    }

    /// Next line, or line 1 if nothing has been visited yet
    pub async fn step_forward(&mut self) -> NavigationResult {
        let next = self.current_index.map_or(1, |i| i + 1);
        self.navigate_to(next).await
    }

    /// Previous line, never going below line 1
    pub async fn step_back(&mut self) -> NavigationResult {
        let prev = self.current_index.map_or(1, |i| i.saturating_sub(1).max(1));
        self.navigate_to(prev).await
    }
}
