//! The analyzer: runs the strategy cascade over a word and scores the result.
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::case_handling::lower_case;
use crate::constants::PROBABILITY_SCALE;
use crate::parse::{dictionary_score, Parse};
use crate::parser::{
    AbbrParser, DictionaryParser, HyphenAdverb, HyphenParticle, HyphenWords, InitialsKind,
    InitialsParser, Parser, ParserConfig, PrefixKnown, PrefixUnknown, RegexParser, Strategy,
    SuffixKnown,
};
use crate::tag::Tag;
use crate::thesaurus::Thesaurus;

const INITIALS_SCORE: f64 = 0.5;

/// Errors raised while setting up or running the analyzer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MorphError {
    /// A configured step names a strategy with no parser behind it.
    #[error("Parser not registered: {0}")]
    ParserNotRegistered(Strategy),
    /// Parsing was attempted before a dictionary was attached.
    #[error("Thesaurus not loaded")]
    ThesaurusNotLoaded,
    /// A built-in pattern failed to compile.
    #[error("Invalid pattern")]
    Pattern(#[from] regex::Error),
}

/// Morphological analyzer over one dictionary.
pub struct Morph {
    thesaurus: Option<Arc<Thesaurus>>,
    unknown: Option<Arc<Tag>>,
    parsers: HashMap<Strategy, Box<dyn Parser>>,
    config: ParserConfig,
}

impl fmt::Debug for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morph")
            .field("thesaurus", &self.thesaurus)
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Morph {
    fn default() -> Self {
        Morph::new()
    }
}

impl Morph {
    /// An analyzer with no dictionary; [`Morph::initialize`] must follow.
    pub fn new() -> Morph {
        Morph::with_config(ParserConfig::default())
    }

    /// Like [`Morph::new`], with the given default configuration.
    pub fn with_config(config: ParserConfig) -> Morph {
        Morph {
            thesaurus: None,
            unknown: None,
            parsers: HashMap::new(),
            config,
        }
    }

    /// An analyzer with every built-in strategy registered against `thesaurus`.
    pub fn from_thesaurus(thesaurus: Arc<Thesaurus>) -> Result<Morph, MorphError> {
        let mut morph = Morph::new();
        morph.initialize(thesaurus)?;
        Ok(morph)
    }

    /// Attaches the dictionary and registers the built-in strategies over it.
    /// Strategies registered under custom names are kept.
    pub fn initialize(&mut self, thesaurus: Arc<Thesaurus>) -> Result<(), MorphError> {
        let dictionary = DictionaryParser::new(Arc::clone(&thesaurus));

        self.insert(Strategy::Dictionary, dictionary.clone());
        self.insert(
            Strategy::AbbrName,
            InitialsParser::new(&thesaurus, InitialsKind::Name, INITIALS_SCORE),
        );
        self.insert(
            Strategy::AbbrPatronymic,
            InitialsParser::new(&thesaurus, InitialsKind::Patronymic, INITIALS_SCORE),
        );
        self.insert(Strategy::IntNumber, RegexParser::int_number(&thesaurus)?);
        self.insert(Strategy::RealNumber, RegexParser::real_number(&thesaurus)?);
        self.insert(Strategy::Punctuation, RegexParser::punctuation(&thesaurus)?);
        self.insert(Strategy::RomanNumber, RegexParser::roman_number(&thesaurus)?);
        self.insert(Strategy::Latin, RegexParser::latin(&thesaurus)?);
        self.insert(Strategy::HyphenParticle, HyphenParticle::new(dictionary.clone()));
        self.insert(Strategy::HyphenAdverb, HyphenAdverb::new(dictionary.clone()));
        self.insert(Strategy::HyphenWords, HyphenWords::new(dictionary.clone()));
        self.insert(Strategy::PrefixKnown, PrefixKnown::new(dictionary.clone()));
        self.insert(Strategy::PrefixUnknown, PrefixUnknown::new(dictionary));
        self.insert(Strategy::SuffixKnown, SuffixKnown::new(Arc::clone(&thesaurus)));
        self.insert(Strategy::Abbr, AbbrParser::new(&thesaurus));

        self.unknown = Some(thesaurus.make_tag("UNKN", "НЕИЗВ"));
        self.thesaurus = Some(thesaurus);

        log::debug!("{} strategies registered", self.parsers.len());
        Ok(())
    }

    fn insert<P: Parser + 'static>(&mut self, strategy: Strategy, parser: P) {
        self.parsers.insert(strategy, Box::new(parser));
    }

    /// Registers `parser` under `strategy`, returning the one it replaces.
    pub fn register<P: Parser + 'static>(
        &mut self,
        strategy: Strategy,
        parser: P,
    ) -> Option<Box<dyn Parser>> {
        self.parsers.insert(strategy, Box::new(parser))
    }

    /// True when a parser is registered for `strategy`.
    pub fn is_registered(&self, strategy: &Strategy) -> bool {
        self.parsers.contains_key(strategy)
    }

    /// The attached dictionary, if any.
    pub fn thesaurus(&self) -> Option<&Arc<Thesaurus>> {
        self.thesaurus.as_ref()
    }

    /// The configuration used by [`Morph::parse`].
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replaces the default configuration.
    pub fn set_config(&mut self, config: ParserConfig) {
        self.config = config;
    }

    /// All readings of `word` under the default configuration, best first.
    pub fn parse(&self, word: &str) -> Result<Vec<Parse>, MorphError> {
        self.parse_with_config(word, &self.config)
    }

    /// All readings of `word`, best first.
    pub fn parse_with_config(
        &self,
        word: &str,
        config: &ParserConfig,
    ) -> Result<Vec<Parse>, MorphError> {
        let thesaurus = self.thesaurus.as_ref().ok_or(MorphError::ThesaurusNotLoaded)?;
        let mut parses = vec![];

        for step in config.parsers.iter() {
            let parser = match self.parsers.get(&step.strategy) {
                Some(parser) => parser,
                None => {
                    log::warn!("{}", MorphError::ParserNotRegistered(step.strategy.clone()));
                    continue;
                }
            };

            let found = parser.parse(word, config);
            log::debug!("{}: {} gave {} parses", word, step.strategy, found.len());

            let exact = found.iter().any(Parse::is_exact);
            parses.extend(found.into_iter().map(|mut parse| {
                parse.set_parser(step.strategy.clone());
                parse
            }));

            if step.terminal && exact {
                break;
            }
        }

        if parses.is_empty() && config.force_parse {
            if let Some(unknown) = &self.unknown {
                let mut parse = Parse::new(lower_case(word), Arc::clone(unknown), 0.0);
                parse.set_parser(Strategy::Custom("Unknown".into()));
                parses.push(parse);
            }
        }

        rescore(thesaurus, &mut parses);

        if config.normalize_score {
            let (dictionary, other): (Vec<_>, Vec<_>) =
                parses.iter_mut().partition(|p| from_dictionary(p));
            normalize(dictionary);
            normalize(other);
        }

        parses.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
        Ok(parses)
    }
}

fn from_dictionary(parse: &Parse) -> bool {
    parse.parser() == Some(&Strategy::Dictionary)
}

/// Weighs dictionary parses by how often the word occurs with that tag.
fn rescore(thesaurus: &Thesaurus, parses: &mut [Parse]) {
    let probabilities = match thesaurus.probabilities() {
        Some(p) => p,
        None => return,
    };

    for parse in parses.iter_mut().filter(|p| from_dictionary(p)) {
        let key = format!("{}:{}", parse, parse.tag());
        if let Some(count) = probabilities.get(&key) {
            let score = f64::from(*count) / PROBABILITY_SCALE
                * dictionary_score(parse.stutter(), parse.typos());
            parse.set_score(score);
        }
    }
}

fn normalize(group: Vec<&mut Parse>) {
    let total: f64 = group.iter().map(|p| p.score()).sum();
    if total == 0.0 {
        return;
    }

    for parse in group {
        let score = parse.score() / total;
        parse.set_score(score);
    }
}
