use crate::corpus::error::{CorpusError, CorpusResult};
use crate::corpus::language::LanguageTag;
use std::fs;
use std::path::{Path, PathBuf};

/// One fully loaded corpus file
///
/// Phrases are read eagerly at open time and never change afterwards; the
/// underlying file is closed before the handle exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusHandle {
    language: LanguageTag,
    path: PathBuf,
    phrases: Vec<String>,
}

impl CorpusHandle {
    /// Load a UTF-8 text file, one phrase per line
    ///
    /// # Errors
    /// `CorpusError::Io` if the file does not exist, cannot be read, or is
    /// not valid UTF-8.
    pub fn load(language: LanguageTag, path: &Path) -> CorpusResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_text(language, path, &content))
    }

    /// Build a handle from already-read text
    pub fn from_text(language: LanguageTag, path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            language,
            path: path.into(),
            phrases: split_phrases(content),
        }
    }

    pub fn language(&self) -> LanguageTag {
        self.language
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Phrase at a 1-based line index
    pub fn phrase_at(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.phrases.get(i))
            .map(String::as_str)
    }
}

/// Split file content into phrases
///
/// `\n` and `\r\n` both end a line, a trailing newline adds no empty phrase,
/// and a leading byte order mark is dropped. Blank lines in the middle stay,
/// so line N keeps lining up with line N of the parallel file.
fn split_phrases(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.lines().map(str::to_string).collect()
}
