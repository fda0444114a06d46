use std::path::PathBuf;

use crate::thesaurus::ThesaurusError;

/// A dictionary could not be loaded.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoaderError {
    /// [`crate::loader::select`] got an unknown loader name.
    #[error("Invalid loader selection: {0}")]
    InvalidLoaderSelection(String),

    /// An artifact file exists but cannot be opened.
    #[error("Cannot open {}", path.display())]
    Open {
        /// The file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading an opened artifact failed.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// A JSON artifact does not parse.
    #[error("Malformed JSON artifact")]
    Json(#[from] serde_json::Error),

    /// The artifacts do not form a dictionary.
    #[error("Cannot build dictionary")]
    Thesaurus(#[from] ThesaurusError),
}
