use std::sync::Arc;

use hashbrown::HashSet;

use super::{Parser, ParserConfig};
use crate::case_handling::{is_capitalized, lower_case};
use crate::constants::PARADIGM_PREFIXES;
use crate::parse::{DictionaryParse, Parse};
use crate::thesaurus::Thesaurus;

const MAX_SUFFIX_LEN: usize = 5;

/// Score weight of a suffix hit by suffix length.
const COEFFICIENTS: [f64; MAX_SUFFIX_LEN + 1] = [0.0, 0.2, 0.3, 0.4, 0.5, 0.6];

/// Predicts unknown words from the endings of known ones.
///
/// The word is split into a stem and an ending of at most five letters. The
/// ending is looked up in the suffix automaton of the matching paradigm
/// prefix, and every paradigm that had the ending becomes a candidate
/// weighted by how often it did. Longer endings are tried first; once an
/// ending matched, shorter endings are only tried while they keep matching.
#[derive(Debug, Clone)]
pub struct SuffixKnown {
    thesaurus: Arc<Thesaurus>,
}

impl SuffixKnown {
    /// Guesses from the suffix statistics of `thesaurus`.
    pub fn new(thesaurus: Arc<Thesaurus>) -> SuffixKnown {
        SuffixKnown { thesaurus }
    }
}

impl Parser for SuffixKnown {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let capitalized = is_capitalized(word, config.ignore_case);
        let word = lower_case(word);

        let mut parses = vec![];
        let mut used = HashSet::new();
        let mut min_len = 1;

        for (index, prefix) in PARADIGM_PREFIXES.iter().enumerate() {
            let base = match word.strip_prefix(prefix) {
                Some(base) => base.chars().collect::<Vec<_>>(),
                None => continue,
            };

            let dawg = match self.thesaurus.prediction_suffixes(index) {
                Some(dawg) => dawg,
                None => continue,
            };

            let mut len = MAX_SUFFIX_LEN + 1;
            while len > min_len {
                len -= 1;

                if len >= base.len() {
                    continue;
                }

                let (stem, ending) = base.split_at(base.len() - len);
                let stem = stem.iter().collect::<String>();
                let ending = ending.iter().collect::<String>();

                let mut found = vec![];
                let mut max = 1;

                for m in dawg.find_all(&ending, &config.replacements, Some(0), 0) {
                    for stat in m.value.iter() {
                        let candidate = format!("{}{}{}", prefix, stem, m.key);
                        let mut parse = match DictionaryParse::create(
                            &self.thesaurus,
                            &candidate,
                            stat.paradigm as usize,
                            stat.form as usize,
                            0,
                            0,
                            "",
                            "",
                        ) {
                            Some(parse) => parse,
                            None => continue,
                        };

                        if !parse.tag().is_productive() {
                            continue;
                        }

                        if !config.ignore_case && parse.tag().is_capitalized() && !capitalized {
                            continue;
                        }

                        if !used.insert(format!("{}:{}:{}", parse, stat.paradigm, stat.form)) {
                            continue;
                        }

                        max = max.max(stat.frequency);
                        parse.set_score(f64::from(stat.frequency) * COEFFICIENTS[len]);
                        found.push(parse);
                    }
                }

                if !found.is_empty() {
                    log::trace!("{}: {} predictions for -{}", word, found.len(), ending);

                    for parse in found.iter_mut() {
                        let score = parse.score() / f64::from(max);
                        parse.set_score(score);
                    }
                    parses.extend(found);
                    min_len = (len - 1).max(1);
                }
            }
        }

        parses
    }
}
