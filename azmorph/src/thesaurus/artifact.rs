use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use super::ThesaurusError;
use crate::grammeme::Grammeme;

/// The pieces a dictionary is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Grammeme list, `grammemes.json`.
    Grammemes,
    /// Tags in internal names.
    TagsInt,
    /// Tags in external names, aligned with [`ArtifactKind::TagsInt`].
    TagsExt,
    /// Suffix strings referenced by paradigms.
    Suffixes,
    /// The flat paradigm array.
    Paradigms,
    /// The word automaton.
    Words,
    /// Word-tag probabilities.
    Probabilities,
    /// Suffix predictions for words starting with the paradigm prefix of this index.
    PredictionSuffixes(u8),
    /// Free-form dictionary metadata.
    Meta,
}

impl ArtifactKind {
    /// Every artifact a dictionary directory may hold.
    pub const ALL: [ArtifactKind; 11] = [
        ArtifactKind::Grammemes,
        ArtifactKind::TagsInt,
        ArtifactKind::TagsExt,
        ArtifactKind::Suffixes,
        ArtifactKind::Paradigms,
        ArtifactKind::Words,
        ArtifactKind::Probabilities,
        ArtifactKind::PredictionSuffixes(0),
        ArtifactKind::PredictionSuffixes(1),
        ArtifactKind::PredictionSuffixes(2),
        ArtifactKind::Meta,
    ];

    /// File name of the artifact inside a dictionary directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Grammemes => "grammemes.json",
            ArtifactKind::TagsInt => "gramtab-opencorpora-int.json",
            ArtifactKind::TagsExt => "gramtab-opencorpora-ext.json",
            ArtifactKind::Suffixes => "suffixes.json",
            ArtifactKind::Paradigms => "paradigms.array",
            ArtifactKind::Words => "words.dawg",
            ArtifactKind::Probabilities => "p_t_given_w.intdawg",
            ArtifactKind::PredictionSuffixes(0) => "prediction-suffixes-0.dawg",
            ArtifactKind::PredictionSuffixes(1) => "prediction-suffixes-1.dawg",
            ArtifactKind::PredictionSuffixes(_) => "prediction-suffixes-2.dawg",
            ArtifactKind::Meta => "meta.json",
        }
    }

    /// Whether a dictionary cannot be built without this artifact.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ArtifactKind::Grammemes
                | ArtifactKind::TagsInt
                | ArtifactKind::TagsExt
                | ArtifactKind::Suffixes
                | ArtifactKind::Paradigms
                | ArtifactKind::Words
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Grammemes => f.write_str("grammemes"),
            ArtifactKind::TagsInt => f.write_str("tags-int"),
            ArtifactKind::TagsExt => f.write_str("tags-ext"),
            ArtifactKind::Suffixes => f.write_str("suffixes"),
            ArtifactKind::Paradigms => f.write_str("paradigms"),
            ArtifactKind::Words => f.write_str("words"),
            ArtifactKind::Probabilities => f.write_str("probabilities"),
            ArtifactKind::PredictionSuffixes(i) => write!(f, "prediction-suffixes-{}", i),
            ArtifactKind::Meta => f.write_str("meta"),
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = ThesaurusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtifactKind::ALL
            .iter()
            .find(|kind| kind.to_string() == s)
            .copied()
            .ok_or_else(|| ThesaurusError::UnknownArtifactKind(s.to_string()))
    }
}

/// Decoded content of an artifact.
#[derive(Debug, Clone)]
pub enum ArtifactData<'a> {
    /// Decoded grammemes.
    Grammemes(Vec<Grammeme>),
    /// Tag or suffix strings.
    Strings(Vec<SmolStr>),
    /// The flat paradigm array.
    Integers(Vec<u16>),
    /// Encoded automaton bytes.
    Automaton(&'a [u8]),
    /// Any other JSON document.
    Json(serde_json::Value),
}

impl<'a> ArtifactData<'a> {
    /// Describes the data for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            ArtifactData::Grammemes(_) => "a grammeme list",
            ArtifactData::Strings(_) => "a string list",
            ArtifactData::Integers(_) => "an integer array",
            ArtifactData::Automaton(_) => "automaton bytes",
            ArtifactData::Json(_) => "a JSON document",
        }
    }
}
