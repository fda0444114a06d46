//! Errors of automaton decoding.

/// An automaton could not be read.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DawgError {
    /// The data does not start with the automaton magic number.
    #[error("Not an automaton file: bad magic number")]
    BadMagic,

    /// The format version is not supported.
    #[error("Unsupported automaton version {0}")]
    UnsupportedVersion(u16),

    /// The file holds a different payload kind.
    #[error("Payload kind mismatch: expected {expected}, found {found}")]
    PayloadMismatch {
        /// Kind the caller asked for.
        expected: u16,
        /// Kind stored in the header.
        found: u16,
    },

    /// A transition symbol is not a valid character.
    #[error("Invalid transition symbol {0:#x}")]
    InvalidSymbol(u32),

    /// Counts or indices in the file are inconsistent.
    #[error("Corrupt automaton: {0}")]
    Corrupt(String),

    /// Reading failed or the data ended early.
    #[error("IO error")]
    Io(#[from] std::io::Error),
}
