use std::sync::Arc;

use super::{Parser, ParserConfig};
use crate::case_handling::{is_capitalized, lower_case};
use crate::dawg::{DawgMatch, WordForms};
use crate::parse::{DictionaryParse, Parse};
use crate::thesaurus::Thesaurus;

/// Reads a word as forms found in the word automaton.
#[derive(Debug, Clone)]
pub struct DictionaryParser {
    thesaurus: Arc<Thesaurus>,
}

impl DictionaryParser {
    /// Looks words up in the word automaton of `thesaurus`.
    pub fn new(thesaurus: Arc<Thesaurus>) -> DictionaryParser {
        DictionaryParser { thesaurus }
    }

    /// The dictionary looked up.
    pub fn thesaurus(&self) -> &Arc<Thesaurus> {
        &self.thesaurus
    }

    /// Fuzzy lookup of `word` as given, with the budgets of `config`.
    pub fn lookup<'a>(&'a self, word: &str, config: &ParserConfig) -> Vec<DawgMatch<'a, WordForms>> {
        self.thesaurus
            .words()
            .lookup(word, &config.replacements, config.stutter, config.typos)
    }

    /// One parse per form of every lookup hit, with optional overrides.
    pub(crate) fn parses(
        &self,
        matches: &[DawgMatch<'_, WordForms>],
        prefix: &str,
        suffix: &str,
    ) -> Vec<Parse> {
        let mut parses = vec![];

        for m in matches {
            for form in m.value.iter() {
                match DictionaryParse::create(
                    &self.thesaurus,
                    &m.key,
                    form.paradigm as usize,
                    form.form as usize,
                    m.stutter,
                    m.typos,
                    prefix,
                    suffix,
                ) {
                    Some(parse) => parses.push(parse),
                    None => log::warn!(
                        "{}: no paradigm {} form {} in dictionary",
                        m.key,
                        form.paradigm,
                        form.form
                    ),
                }
            }
        }

        parses
    }
}

impl Parser for DictionaryParser {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let capitalized = is_capitalized(word, config.ignore_case);
        let word = lower_case(word);

        let matches = self.lookup(&word, config);
        let mut parses = self.parses(&matches, "", "");
        parses.retain(|p| config.ignore_case || capitalized || !p.tag().is_capitalized());
        parses
    }
}
