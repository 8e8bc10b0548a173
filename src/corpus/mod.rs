//! Parallel corpus storage
//!
//! A corpus is a plain UTF-8 text file with one phrase per line. The store
//! keeps at most one corpus per language; line N of the German file is taken
//! to be aligned with line N of the English file, but nothing verifies it.
//!
//! ```ignore
//! use g2e_translator::corpus::{CorpusStore, LanguageTag};
//!
//! let mut store = CorpusStore::new();
//! store.open(LanguageTag::De, "phrases.de.txt".as_ref())?;
//! assert_eq!(store.phrase_at(LanguageTag::De, 1), Some("Hallo"));
//! ```

pub mod error;
pub mod handle;
pub mod language;

pub use error::{CorpusError, CorpusResult};
pub use handle::CorpusHandle;
pub use language::{LanguageTag, UnknownLanguage};

use std::path::Path;
use tracing::{debug, info};

/// German phrase and English reference read at the same index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePair {
    pub index: usize,
    pub german: Option<String>,
    pub english: Option<String>,
}

impl PhrasePair {
    pub fn is_complete(&self) -> bool {
        self.german.is_some() && self.english.is_some()
    }
}

/// Owns the open corpus handle for each language
///
/// Every query is valid before anything has been opened: counts are 0 and
/// lookups are `None`.
#[derive(Debug, Default)]
pub struct CorpusStore {
    german: Option<CorpusHandle>,
    english: Option<CorpusHandle>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, language: LanguageTag) -> &Option<CorpusHandle> {
        match language {
            LanguageTag::De => &self.german,
            LanguageTag::En => &self.english,
        }
    }

    fn slot_mut(&mut self, language: LanguageTag) -> &mut Option<CorpusHandle> {
        match language {
            LanguageTag::De => &mut self.german,
            LanguageTag::En => &mut self.english,
        }
    }

    /// Load `path` and make it the corpus for `language`
    ///
    /// The new file is read completely before the old handle is dropped, so a
    /// failed open leaves the previous corpus in place.
    pub fn open(&mut self, language: LanguageTag, path: &Path) -> CorpusResult<&CorpusHandle> {
        let handle = CorpusHandle::load(language, path)?;
        info!(
            language = %language,
            path = %path.display(),
            lines = handle.line_count(),
            "opened corpus"
        );
        Ok(self.install(handle))
    }

    /// Install an already-built handle, replacing whatever was there
    pub fn install(&mut self, handle: CorpusHandle) -> &CorpusHandle {
        let slot = self.slot_mut(handle.language());
        if let Some(previous) = slot.take() {
            debug!(
                language = %previous.language(),
                path = %previous.path().display(),
                "released previous corpus"
            );
        }
        slot.insert(handle)
    }

    pub fn handle(&self, language: LanguageTag) -> Option<&CorpusHandle> {
        self.slot(language).as_ref()
    }

    pub fn is_open(&self, language: LanguageTag) -> bool {
        self.slot(language).is_some()
    }

    pub fn line_count(&self, language: LanguageTag) -> usize {
        self.handle(language).map_or(0, CorpusHandle::line_count)
    }

    /// Phrase at a 1-based index, `None` when closed or out of range
    pub fn phrase_at(&self, language: LanguageTag, index: usize) -> Option<&str> {
        let phrase = self.handle(language).and_then(|h| h.phrase_at(index));
        debug!(language = %language, index, found = phrase.is_some(), "phrase lookup");
        phrase
    }

    /// Look both languages up independently at `index`
    pub fn phrase_pair(&self, index: usize) -> PhrasePair {
        PhrasePair {
            index,
            german: self.phrase_at(LanguageTag::De, index).map(str::to_string),
            english: self.phrase_at(LanguageTag::En, index).map(str::to_string),
        }
    }

    /// Both corpora open with different lengths
    pub fn is_misaligned(&self) -> bool {
        match (&self.german, &self.english) {
            (Some(de), Some(en)) => de.line_count() != en.line_count(),
            _ => false,
        }
    }
}
