//! The dictionary: automata, paradigms and tag tables of one language.
use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::dawg::{Dawg, SuffixStats, WordForms};
use crate::grammeme::{Grammeme, GrammemeTable};
use crate::paradigm::{Paradigm, ParadigmTable};
use crate::tag::Tag;

mod artifact;
mod error;

pub use self::artifact::{ArtifactData, ArtifactKind};
pub use self::error::ThesaurusError;

/// A loaded dictionary.
pub struct Thesaurus {
    words: Dawg<WordForms>,
    probabilities: Option<Dawg<u32>>,
    prediction_suffixes: [Dawg<SuffixStats>; 3],
    grammemes: GrammemeTable,
    tags: Vec<Arc<Tag>>,
    suffixes: Vec<SmolStr>,
    paradigms: ParadigmTable,
    meta: Option<serde_json::Value>,
}

impl fmt::Debug for Thesaurus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thesaurus")
            .field("words", &self.words.state_count())
            .field("grammemes", &self.grammemes.len())
            .field("tags", &self.tags.len())
            .field("suffixes", &self.suffixes.len())
            .field("paradigms", &self.paradigms.len())
            .field("probabilities", &self.probabilities.is_some())
            .finish()
    }
}

impl Thesaurus {
    /// Starts assembling a dictionary from its artifacts.
    pub fn builder() -> ThesaurusBuilder {
        ThesaurusBuilder::default()
    }

    /// The word automaton.
    pub fn words(&self) -> &Dawg<WordForms> {
        &self.words
    }

    /// Word-tag probabilities, when the dictionary has them.
    pub fn probabilities(&self) -> Option<&Dawg<u32>> {
        self.probabilities.as_ref()
    }

    /// Suffix predictions for words starting with the given paradigm prefix.
    pub fn prediction_suffixes(&self, prefix: usize) -> Option<&Dawg<SuffixStats>> {
        self.prediction_suffixes.get(prefix)
    }

    /// The grammeme table.
    pub fn grammemes(&self) -> &GrammemeTable {
        &self.grammemes
    }

    /// The tag with the given id.
    pub fn tag(&self, id: usize) -> Option<&Arc<Tag>> {
        self.tags.get(id)
    }

    /// Number of tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// The suffix string with the given id.
    pub fn suffix(&self, id: usize) -> Option<&str> {
        self.suffixes.get(id).map(SmolStr::as_str)
    }

    /// Number of suffixes.
    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }

    /// The paradigm with the given id.
    pub fn paradigm(&self, id: usize) -> Option<&Paradigm> {
        self.paradigms.get(id)
    }

    /// Every paradigm.
    pub fn paradigms(&self) -> &ParadigmTable {
        &self.paradigms
    }

    /// Contents of `meta.json`, if present.
    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.meta.as_ref()
    }

    /// Builds a tag outside the dictionary tag table against this grammeme set.
    pub fn make_tag(&self, internal: &str, external: &str) -> Arc<Tag> {
        Arc::new(Tag::make(internal, external, &self.grammemes))
    }
}

/// Collects artifacts until [`ThesaurusBuilder::build`].
#[derive(Debug, Default)]
pub struct ThesaurusBuilder {
    grammemes: Option<Vec<Grammeme>>,
    tags_int: Option<Vec<SmolStr>>,
    tags_ext: Option<Vec<SmolStr>>,
    suffixes: Option<Vec<SmolStr>>,
    paradigms: Option<ParadigmTable>,
    words: Option<Dawg<WordForms>>,
    probabilities: Option<Dawg<u32>>,
    prediction_suffixes: [Option<Dawg<SuffixStats>>; 3],
    meta: Option<serde_json::Value>,
}

fn automaton<V: crate::dawg::Payload>(
    kind: ArtifactKind,
    bytes: &[u8],
) -> Result<Dawg<V>, ThesaurusError> {
    Dawg::from_bytes(bytes).map_err(|source| ThesaurusError::Automaton { kind, source })
}

impl ThesaurusBuilder {
    /// Adds an artifact by its kind name, e.g. `"prediction-suffixes-1"`.
    pub fn add(&mut self, kind: &str, data: ArtifactData<'_>) -> Result<&mut Self, ThesaurusError> {
        let kind = kind.parse::<ArtifactKind>()?;
        self.insert(kind, data)?;
        Ok(self)
    }

    /// Like [`ThesaurusBuilder::add`], with a parsed kind. Replaces an earlier artifact of the same kind.
    pub fn insert(&mut self, kind: ArtifactKind, data: ArtifactData<'_>) -> Result<(), ThesaurusError> {
        log::debug!("adding artifact {} ({})", kind, data.shape());

        match (kind, data) {
            (ArtifactKind::Grammemes, ArtifactData::Grammemes(v)) => self.grammemes = Some(v),
            (ArtifactKind::TagsInt, ArtifactData::Strings(v)) => self.tags_int = Some(v),
            (ArtifactKind::TagsExt, ArtifactData::Strings(v)) => self.tags_ext = Some(v),
            (ArtifactKind::Suffixes, ArtifactData::Strings(v)) => self.suffixes = Some(v),
            (ArtifactKind::Paradigms, ArtifactData::Integers(v)) => {
                self.paradigms = Some(ParadigmTable::from_flat(&v)?);
            }
            (ArtifactKind::Words, ArtifactData::Automaton(bytes)) => {
                self.words = Some(automaton(kind, bytes)?);
            }
            (ArtifactKind::Probabilities, ArtifactData::Automaton(bytes)) => {
                self.probabilities = Some(automaton(kind, bytes)?);
            }
            (ArtifactKind::PredictionSuffixes(i), ArtifactData::Automaton(bytes)) => {
                let slot = self
                    .prediction_suffixes
                    .get_mut(i as usize)
                    .ok_or_else(|| ThesaurusError::UnknownArtifactKind(kind.to_string()))?;
                *slot = Some(automaton(kind, bytes)?);
            }
            (ArtifactKind::Meta, ArtifactData::Json(v)) => self.meta = Some(v),
            (kind, data) => {
                return Err(ThesaurusError::MismatchedArtifact {
                    kind,
                    found: data.shape(),
                })
            }
        }

        Ok(())
    }

    /// Checks the artifacts and resolves the tag table.
    pub fn build(self) -> Result<Thesaurus, ThesaurusError> {
        let grammemes = self
            .grammemes
            .ok_or(ThesaurusError::MissingArtifact(ArtifactKind::Grammemes))?;
        let tags_int = self
            .tags_int
            .ok_or(ThesaurusError::MissingArtifact(ArtifactKind::TagsInt))?;
        let tags_ext = self
            .tags_ext
            .ok_or(ThesaurusError::MissingArtifact(ArtifactKind::TagsExt))?;
        let suffixes = self
            .suffixes
            .ok_or(ThesaurusError::MissingArtifact(ArtifactKind::Suffixes))?;
        let paradigms = self
            .paradigms
            .ok_or(ThesaurusError::MissingArtifact(ArtifactKind::Paradigms))?;
        let words = self
            .words
            .ok_or(ThesaurusError::MissingArtifact(ArtifactKind::Words))?;

        if tags_int.len() != tags_ext.len() {
            return Err(ThesaurusError::TagTableMismatch {
                internal: tags_int.len(),
                external: tags_ext.len(),
            });
        }

        if self.probabilities.is_none() {
            log::warn!("no probabilities loaded, dictionary parses keep their raw scores");
        }

        let grammemes = GrammemeTable::new(grammemes);
        let tags = tags_int
            .iter()
            .zip(tags_ext.iter())
            .map(|(int, ext)| Arc::new(Tag::make(int, ext, &grammemes)))
            .collect::<Vec<_>>();

        let broken = (0..paradigms.len())
            .filter_map(|i| paradigms.get(i))
            .filter(|p| {
                (0..p.form_count()).any(|form| {
                    p.tag_id(form).map_or(true, |id| id >= tags.len())
                        || p.suffix_id(form).map_or(true, |id| id >= suffixes.len())
                })
            })
            .count();

        if broken > 0 {
            log::warn!("{} paradigms refer to missing tags or suffixes", broken);
        }

        Ok(Thesaurus {
            words,
            probabilities: self.probabilities,
            prediction_suffixes: self.prediction_suffixes.map(Option::unwrap_or_default),
            grammemes,
            tags,
            suffixes,
            paradigms,
            meta: self.meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn fixture_builds() {
        let thesaurus = test_utils::thesaurus();
        assert_eq!(thesaurus.tag_count(), test_utils::TAGS.len());
        assert_eq!(thesaurus.suffix(3), Some("ом"));
        assert_eq!(thesaurus.paradigm(0).unwrap().form_count(), 12);
        assert!(thesaurus.words().contains("дом"));
        assert!(thesaurus.prediction_suffixes(1).unwrap().get("ому").is_none());
        assert!(thesaurus.prediction_suffixes(3).is_none());
        assert_eq!(
            thesaurus.tag(0).unwrap().ext().to_string(),
            "СУЩ,неод,мр ед,им"
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut builder = Thesaurus::builder();
        let err = builder
            .add("morphemes", ArtifactData::Strings(vec![]))
            .err()
            .unwrap();
        assert!(matches!(err, ThesaurusError::UnknownArtifactKind(_)));
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let mut builder = Thesaurus::builder();
        let err = builder
            .add("words", ArtifactData::Strings(vec![]))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ThesaurusError::MismatchedArtifact {
                kind: ArtifactKind::Words,
                ..
            }
        ));
    }

    #[test]
    fn missing_artifacts() {
        let builder = Thesaurus::builder();
        assert!(matches!(
            builder.build(),
            Err(ThesaurusError::MissingArtifact(ArtifactKind::Grammemes))
        ));
    }

    #[test]
    fn tag_tables_must_align() {
        let mut builder = test_utils::thesaurus_builder();
        builder
            .add(
                "tags-ext",
                ArtifactData::Strings(vec![SmolStr::from("СУЩ")]),
            )
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(ThesaurusError::TagTableMismatch { external: 1, .. })
        ));
    }

    #[test]
    fn corrupt_automaton() {
        let mut builder = Thesaurus::builder();
        let err = builder
            .add("words", ArtifactData::Automaton(b"junk"))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ThesaurusError::Automaton {
                kind: ArtifactKind::Words,
                ..
            }
        ));
    }
}
