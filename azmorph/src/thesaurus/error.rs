use super::ArtifactKind;
use crate::dawg::DawgError;

/// A dictionary could not be assembled.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ThesaurusError {
    /// No artifact goes by this name.
    #[error("Unknown artifact kind: {0}")]
    UnknownArtifactKind(String),

    /// The data given for an artifact has the wrong shape.
    #[error("Artifact {kind} cannot be built from {found}")]
    MismatchedArtifact {
        /// The artifact being added.
        kind: ArtifactKind,
        /// Shape of the data given, see [`crate::thesaurus::ArtifactData::shape`].
        found: &'static str,
    },

    /// A required artifact was never added.
    #[error("Missing artifact: {0}")]
    MissingArtifact(ArtifactKind),

    /// The internal and external tag lists are not aligned.
    #[error("Tag tables differ in length: {internal} internal, {external} external")]
    TagTableMismatch {
        /// Number of internal tags.
        internal: usize,
        /// Number of external tags.
        external: usize,
    },

    /// The flat paradigm array does not decode.
    #[error("Malformed paradigms: {0}")]
    MalformedParadigms(String),

    /// An automaton artifact does not decode.
    #[error("Cannot read automaton {kind}")]
    Automaton {
        /// The artifact being decoded.
        kind: ArtifactKind,
        /// Why decoding failed.
        #[source]
        source: DawgError,
    },
}
