use std::path::PathBuf;

/// Failures while opening a corpus file
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// File missing, unreadable, or not valid UTF-8
    #[error("Failed to read corpus '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            CorpusError::Io { path, .. } => path,
        }
    }
}

pub type CorpusResult<T> = Result<T, CorpusError>;
