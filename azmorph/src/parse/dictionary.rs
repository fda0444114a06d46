use std::fmt;
use std::sync::{Arc, OnceLock};

use smol_str::SmolStr;

use super::{InflectTarget, Parse, ParseKind};
use crate::constants::{STUTTER_PENALTY, TYPO_PENALTY};
use crate::paradigm::Paradigm;
use crate::thesaurus::Thesaurus;
use crate::types::Score;

/// Score of a dictionary hit that needed the given repairs.
#[inline(always)]
pub fn dictionary_score(stutter: u32, typos: u32) -> Score {
    TYPO_PENALTY.powi(typos as i32) * STUTTER_PENALTY.powi(stutter.min(1) as i32)
}

/// A word found in the dictionary as a form of some paradigm.
#[derive(Clone)]
pub struct DictionaryParse {
    thesaurus: Arc<Thesaurus>,
    paradigm: usize,
    form: usize,
    prefix: SmolStr,
    suffix: SmolStr,
    base: OnceLock<SmolStr>,
}

impl fmt::Debug for DictionaryParse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryParse")
            .field("paradigm", &self.paradigm)
            .field("form", &self.form)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .finish()
    }
}

impl DictionaryParse {
    /// Builds the parse of `word` as form `form` of paradigm `paradigm`.
    /// Returns `None` when the paradigm or its tag is missing.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn create(
        thesaurus: &Arc<Thesaurus>,
        word: &str,
        paradigm: usize,
        form: usize,
        stutter: u32,
        typos: u32,
        prefix: &str,
        suffix: &str,
    ) -> Option<Parse> {
        let tag_id = thesaurus.paradigm(paradigm)?.tag_id(form)?;
        let tag = Arc::clone(thesaurus.tag(tag_id)?);

        Some(Parse {
            word: word.into(),
            tag,
            score: dictionary_score(stutter, typos),
            stutter,
            typos,
            parser: None,
            kind: ParseKind::Dictionary(DictionaryParse {
                thesaurus: Arc::clone(thesaurus),
                paradigm,
                form,
                prefix: prefix.into(),
                suffix: suffix.into(),
                base: OnceLock::new(),
            }),
        })
    }

    /// Index of the paradigm in the dictionary.
    pub fn paradigm_index(&self) -> usize {
        self.paradigm
    }

    /// Index of the form within the paradigm.
    pub fn form_index(&self) -> usize {
        self.form
    }

    /// Number of forms in the paradigm, 0 when it is missing.
    pub fn form_count(&self) -> usize {
        self.paradigm().map_or(0, Paradigm::form_count)
    }

    /// Text printed before the word, e.g. a known prefix split off by a guesser.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text printed after the word, e.g. a hyphenated particle.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub(super) fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.into();
    }

    pub(super) fn set_suffix(&mut self, suffix: &str) {
        self.suffix = suffix.into();
    }

    fn paradigm(&self) -> Option<&Paradigm> {
        self.thesaurus.paradigm(self.paradigm)
    }

    fn form_prefix(&self, form: usize) -> &'static str {
        self.paradigm().map_or("", |p| p.prefix(form))
    }

    fn form_suffix(&self, form: usize) -> &str {
        self.paradigm()
            .and_then(|p| p.suffix_id(form))
            .and_then(|id| self.thesaurus.suffix(id))
            .unwrap_or("")
    }

    pub(super) fn base(&self, word: &str) -> &str {
        self.base.get_or_init(|| {
            let skip = self.form_prefix(self.form).chars().count();
            let strip = self.form_suffix(self.form).chars().count();
            let keep = word.chars().count().saturating_sub(skip + strip);
            word.chars().skip(skip).take(keep).collect()
        })
    }

    pub(super) fn inflect(&self, parse: &Parse, target: InflectTarget<'_>) -> Option<Parse> {
        let paradigm = self.paradigm()?;

        let form = match target {
            InflectTarget::Form(form) => form,
            InflectTarget::Matching(query) => (0..paradigm.form_count()).find(|&form| {
                paradigm
                    .tag_id(form)
                    .and_then(|id| self.thesaurus.tag(id))
                    .map_or(false, |tag| tag.matches(query))
            })?,
        };

        if form >= paradigm.form_count() {
            return None;
        }

        let word = format!(
            "{}{}{}",
            paradigm.prefix(form),
            self.base(&parse.word),
            self.form_suffix(form)
        );

        let mut inflected = DictionaryParse::create(
            &self.thesaurus,
            &word,
            self.paradigm,
            form,
            0,
            0,
            &self.prefix,
            &self.suffix,
        )?;
        inflected.parser = parse.parser.clone();
        Some(inflected)
    }

    pub(super) fn fmt_word(&self, word: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            return write!(f, "{}{}", word, self.suffix);
        }

        let form_prefix = self.form_prefix(self.form);
        let rest = word.strip_prefix(form_prefix).unwrap_or(word);
        write!(f, "{}{}{}{}", form_prefix, self.prefix, rest, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagQuery;
    use crate::test_utils;

    #[test]
    fn score_penalties() {
        assert_eq!(dictionary_score(0, 0), 1.0);
        assert!((dictionary_score(1, 0) - 0.6).abs() < 1e-9);
        assert!((dictionary_score(3, 0) - 0.6).abs() < 1e-9);
        assert!((dictionary_score(0, 2) - 0.09).abs() < 1e-9);
    }

    #[test]
    fn inflects_by_form_and_query() {
        let thesaurus = test_utils::thesaurus();
        let parse = test_utils::dictionary_parse(&thesaurus, "домами", 0, 10);

        assert_eq!(parse.base(), Some("дом"));
        assert_eq!(parse.inflect(InflectTarget::Form(7)).unwrap().to_string(), "домов");
        assert!(parse.inflect(InflectTarget::Form(12)).is_none());

        let loct = parse
            .inflect(InflectTarget::Matching(TagQuery::All(&["sing", "loct"])))
            .unwrap();
        assert_eq!(loct.to_string(), "доме");
        assert_eq!(loct.as_dictionary().unwrap().form_index(), 5);
        assert_eq!(loct.score(), 1.0);

        assert!(parse
            .inflect(InflectTarget::Matching(TagQuery::All(&["VERB"])))
            .is_none());
    }

    #[test]
    fn every_entry_inflects_to_itself() {
        let thesaurus = test_utils::thesaurus();
        let mut checked = 0;

        for (word, forms) in thesaurus.words().entries() {
            for wf in forms {
                let (paradigm, form) = (wf.paradigm as usize, wf.form as usize);
                let parse = test_utils::dictionary_parse(&thesaurus, &word, paradigm, form);
                let same = parse.inflect(InflectTarget::Form(form)).unwrap();
                assert_eq!(same.to_string(), word.as_str(), "paradigm {} form {}", paradigm, form);
                checked += 1;
            }
        }

        assert!(checked > 0);
    }

    #[test]
    fn inflection_resets_repairs() {
        let thesaurus = test_utils::thesaurus();
        let parse = DictionaryParse::create(&thesaurus, "дом", 0, 0, 1, 1, "", "").unwrap();
        assert!((parse.score() - 0.18).abs() < 1e-9);

        let gent = parse.inflect(InflectTarget::Form(1)).unwrap();
        assert_eq!(gent.to_string(), "дома");
        assert!(gent.is_exact());
    }

    #[test]
    fn overrides_are_printed_and_kept() {
        let thesaurus = test_utils::thesaurus();
        let mut parse = test_utils::dictionary_parse(&thesaurus, "дома", 0, 1);
        parse.set_prefix("анти");
        assert_eq!(parse.to_string(), "антидома");

        let datv = parse.inflect(InflectTarget::Form(2)).unwrap();
        assert_eq!(datv.to_string(), "антидому");

        let mut particle = test_utils::dictionary_parse(&thesaurus, "смотри", 3, 0);
        particle.set_suffix("-ка");
        assert_eq!(particle.to_string(), "смотри-ка");
        assert_eq!(particle.word(), "смотри");
    }

    #[test]
    fn prefix_override_follows_paradigm_prefix() {
        let thesaurus = test_utils::thesaurus();
        let mut parse = test_utils::dictionary_parse(&thesaurus, "наилучший", 4, 1);
        parse.set_prefix("сверх");
        assert_eq!(parse.to_string(), "наисверхлучший");
    }

    #[test]
    fn missing_paradigm() {
        let thesaurus = test_utils::thesaurus();
        assert!(DictionaryParse::create(&thesaurus, "дом", 99, 0, 0, 0, "", "").is_none());
        assert!(DictionaryParse::create(&thesaurus, "дом", 0, 99, 0, 0, "", "").is_none());
    }
}
