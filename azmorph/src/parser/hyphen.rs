//! Hyphenated words: particles, `по-` adverbs and compounds.
use std::sync::Arc;

use hashbrown::HashSet;
use smol_str::SmolStr;

use super::prefix::KNOWN_PREFIXES;
use super::{DictionaryParser, Parser, ParserConfig};
use crate::case_handling::lower_case;
use crate::constants::AGREEMENT_GRAMMEMES;
use crate::parse::{CombinedParse, Parse};
use crate::tag::{Tag, TagQuery};

/// Particles split off by [`HyphenParticle`].
pub const PARTICLES: [&str; 8] = ["-то", "-ка", "-таки", "-де", "-тко", "-тка", "-с", "-ста"];

const PARTICLE_PENALTY: f64 = 0.9;
const ADVERB_PENALTY: f64 = 0.9;
const FIXED_LEFT_PENALTY: f64 = 0.3;
const LAST_PART_PENALTY: f64 = 0.2;

const ADVERB_PREFIX: &str = "по-";
const MIN_ADVERB_LEN: usize = 5;

/// A word followed by a particle: `смотри-ка`, `кто-то`.
#[derive(Debug, Clone)]
pub struct HyphenParticle {
    dictionary: DictionaryParser,
}

impl HyphenParticle {
    /// Splits particles off words found by `dictionary`.
    pub fn new(dictionary: DictionaryParser) -> HyphenParticle {
        HyphenParticle { dictionary }
    }
}

impl Parser for HyphenParticle {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let word = lower_case(word);
        let mut parses = vec![];

        for particle in PARTICLES.iter() {
            let base = match word.strip_suffix(particle) {
                Some(base) if !base.is_empty() => base,
                _ => continue,
            };

            let matches = self.dictionary.lookup(base, config);
            for mut parse in self.dictionary.parses(&matches, "", particle) {
                parse.scale_score(PARTICLE_PENALTY);
                parses.push(parse);
            }
        }

        parses
    }
}

/// `по-` with an adjective in the dative: `по-новому`.
#[derive(Debug, Clone)]
pub struct HyphenAdverb {
    dictionary: DictionaryParser,
    tag: Arc<Tag>,
}

impl HyphenAdverb {
    /// Reads `по-` adverbs against the adjectives `dictionary` knows.
    pub fn new(dictionary: DictionaryParser) -> HyphenAdverb {
        let tag = dictionary.thesaurus().make_tag("ADVB", "Н");
        HyphenAdverb { dictionary, tag }
    }
}

impl Parser for HyphenAdverb {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let word = lower_case(word);

        if word.chars().count() < MIN_ADVERB_LEN {
            return vec![];
        }

        let rest = match word.strip_prefix(ADVERB_PREFIX) {
            Some(rest) => rest,
            None => return vec![],
        };

        let matches = self.dictionary.lookup(rest, config);
        let mut used: HashSet<SmolStr> = HashSet::new();
        let mut parses = vec![];

        for m in matches.iter() {
            if used.contains(&m.key) {
                continue;
            }

            let adjective = self
                .dictionary
                .parses(std::slice::from_ref(m), "", "")
                .into_iter()
                .find(|p| p.matches(TagQuery::All(&["ADJF", "sing", "datv"])));

            if let Some(adjective) = adjective {
                used.insert(m.key.clone());
                parses.push(
                    Parse::new(
                        format!("{}{}", ADVERB_PREFIX, m.key),
                        Arc::clone(&self.tag),
                        adjective.score() * ADVERB_PENALTY,
                    )
                    .with_repairs(m.stutter, m.typos),
                );
            }
        }

        parses
    }
}

/// Compounds of dictionary words: `город-герой`, `интернет-магазин`.
#[derive(Debug, Clone)]
pub struct HyphenWords {
    dictionary: DictionaryParser,
}

fn within(count: u32, ceiling: Option<u32>) -> bool {
    ceiling.map_or(true, |max| count <= max)
}

impl HyphenWords {
    /// Parses both halves of a compound with `dictionary`.
    pub fn new(dictionary: DictionaryParser) -> HyphenWords {
        HyphenWords { dictionary }
    }

    fn pair(&self, left: &str, right: &str, config: &ParserConfig) -> Vec<Parse> {
        let lefts = self.dictionary.parse(left, config);
        let rights = self.dictionary.parse(right, config);
        let mut parses = vec![];

        for l in lefts.iter().filter(|l| !l.tag().has("Abbr")) {
            for r in rights.iter() {
                if !l.agrees_with(r, &AGREEMENT_GRAMMEMES) {
                    continue;
                }

                if !within(l.stutter() + r.stutter(), config.stutter)
                    || !within(l.typos() + r.typos(), config.typos.ceiling())
                {
                    continue;
                }

                parses.push(CombinedParse::create(l.clone(), r.clone()));
            }
        }

        let prefix = format!("{}-", left);
        for mut r in rights.into_iter().filter(|r| r.as_dictionary().is_some()) {
            r.scale_score(FIXED_LEFT_PENALTY);
            r.set_prefix(&prefix);
            parses.push(r);
        }

        parses
    }
}

impl Parser for HyphenWords {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let word = lower_case(word);

        let bound = KNOWN_PREFIXES
            .iter()
            .any(|prefix| prefix.ends_with('-') && word.starts_with(prefix));
        if bound {
            return vec![];
        }

        let parts = word.split('-').collect::<Vec<_>>();

        match parts.as_slice() {
            [left, right] if !left.is_empty() && !right.is_empty() => {
                self.pair(left, right, config)
            }
            [.., last] if parts.len() > 2 => {
                let head = &word[..word.len() - last.len()];
                self.dictionary
                    .parse(last, config)
                    .into_iter()
                    .map(|mut parse| {
                        parse.scale_score(LAST_PART_PENALTY);
                        parse.set_prefix(head);
                        parse
                    })
                    .collect()
            }
            _ => vec![],
        }
    }
}
