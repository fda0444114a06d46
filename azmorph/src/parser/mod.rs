//! Parsing strategies and the step list that orders them.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::parse::Parse;

mod abbr;
pub mod config;
mod dictionary;
mod hyphen;
mod initials;
mod prefix;
mod regexp;
mod suffix;

pub use self::abbr::AbbrParser;
pub use self::config::ParserConfig;
pub use self::dictionary::DictionaryParser;
pub use self::hyphen::{HyphenAdverb, HyphenParticle, HyphenWords, PARTICLES};
pub use self::initials::{InitialsKind, InitialsParser};
pub use self::prefix::{PrefixKnown, PrefixUnknown, KNOWN_PREFIXES};
pub use self::regexp::RegexParser;
pub use self::suffix::SuffixKnown;

/// One way of reading a word.
pub trait Parser: Send + Sync {
    /// Every reading of `word` this strategy can find.
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse>;
}

impl<F> Parser for F
where
    F: Fn(&str, &ParserConfig) -> Vec<Parse> + Send + Sync,
{
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        self(word, config)
    }
}

/// Name of a parsing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SmolStr", into = "SmolStr")]
pub enum Strategy {
    /// Lookup in the word automaton.
    Dictionary,
    /// Single-letter name initials.
    AbbrName,
    /// Single-letter patronymic initials.
    AbbrPatronymic,
    /// Integers.
    IntNumber,
    /// Decimal fractions.
    RealNumber,
    /// Punctuation marks.
    Punctuation,
    /// Roman numerals.
    RomanNumber,
    /// Words in Latin script.
    Latin,
    /// A word followed by a hyphenated particle, as in `кто-то`.
    HyphenParticle,
    /// Adverbs of the form `по-русски`.
    HyphenAdverb,
    /// Compounds of two hyphenated words.
    HyphenWords,
    /// A known prefix followed by a dictionary word.
    PrefixKnown,
    /// An arbitrary short prefix followed by a dictionary word.
    PrefixUnknown,
    /// Guessing from suffix statistics.
    SuffixKnown,
    /// Abbreviations written in capitals.
    Abbr,
    /// A strategy registered by the caller under its own name.
    Custom(SmolStr),
}

impl Strategy {
    /// Every strategy [`crate::Morph`] registers on its own.
    pub const BUILTIN: [Strategy; 15] = [
        Strategy::Dictionary,
        Strategy::AbbrName,
        Strategy::AbbrPatronymic,
        Strategy::IntNumber,
        Strategy::RealNumber,
        Strategy::Punctuation,
        Strategy::RomanNumber,
        Strategy::Latin,
        Strategy::HyphenParticle,
        Strategy::HyphenAdverb,
        Strategy::HyphenWords,
        Strategy::PrefixKnown,
        Strategy::PrefixUnknown,
        Strategy::SuffixKnown,
        Strategy::Abbr,
    ];

    /// Name used in configurations and output.
    pub fn name(&self) -> &str {
        match self {
            Strategy::Dictionary => "Dictionary",
            Strategy::AbbrName => "AbbrName",
            Strategy::AbbrPatronymic => "AbbrPatronymic",
            Strategy::IntNumber => "IntNumber",
            Strategy::RealNumber => "RealNumber",
            Strategy::Punctuation => "Punctuation",
            Strategy::RomanNumber => "RomanNumber",
            Strategy::Latin => "Latin",
            Strategy::HyphenParticle => "HyphenParticle",
            Strategy::HyphenAdverb => "HyphenAdverb",
            Strategy::HyphenWords => "HyphenWords",
            Strategy::PrefixKnown => "PrefixKnown",
            Strategy::PrefixUnknown => "PrefixUnknown",
            Strategy::SuffixKnown => "SuffixKnown",
            Strategy::Abbr => "Abbr",
            Strategy::Custom(name) => name,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Strategy::BUILTIN
            .iter()
            .find(|strategy| strategy.name() == s)
            .cloned()
            .unwrap_or_else(|| Strategy::Custom(s.into())))
    }
}

impl From<SmolStr> for Strategy {
    fn from(s: SmolStr) -> Self {
        match s.parse() {
            Ok(strategy) => strategy,
            Err(never) => match never {},
        }
    }
}

impl From<Strategy> for SmolStr {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Custom(name) => name,
            other => SmolStr::new(other.name()),
        }
    }
}

/// A strategy in the cascade. A terminal step that yields an exact parse
/// ends the cascade. Written `Name` for terminal steps and `Name?` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SmolStr", into = "SmolStr")]
pub struct ParserStep {
    /// Strategy to run.
    pub strategy: Strategy,
    /// Stop the cascade when this step yields an exact parse.
    pub terminal: bool,
}

impl ParserStep {
    /// A step that may end the cascade.
    pub fn terminal(strategy: Strategy) -> ParserStep {
        ParserStep {
            strategy,
            terminal: true,
        }
    }

    /// A step the cascade always continues past.
    pub fn optional(strategy: Strategy) -> ParserStep {
        ParserStep {
            strategy,
            terminal: false,
        }
    }

    /// The default cascade.
    pub fn defaults() -> Vec<ParserStep> {
        use Strategy::*;

        vec![
            ParserStep::optional(Dictionary),
            ParserStep::optional(AbbrName),
            ParserStep::terminal(AbbrPatronymic),
            ParserStep::terminal(IntNumber),
            ParserStep::terminal(RealNumber),
            ParserStep::terminal(Punctuation),
            ParserStep::optional(RomanNumber),
            ParserStep::terminal(Latin),
            ParserStep::terminal(HyphenParticle),
            ParserStep::terminal(HyphenAdverb),
            ParserStep::terminal(HyphenWords),
            ParserStep::terminal(PrefixKnown),
            ParserStep::optional(PrefixUnknown),
            ParserStep::optional(SuffixKnown),
            ParserStep::terminal(Abbr),
        ]
    }
}

impl fmt::Display for ParserStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terminal {
            write!(f, "{}", self.strategy)
        } else {
            write!(f, "{}?", self.strategy)
        }
    }
}

impl FromStr for ParserStep {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, terminal) = match s.strip_suffix('?') {
            Some(name) => (name, false),
            None => (s, true),
        };

        let strategy = name.parse()?;
        Ok(ParserStep { strategy, terminal })
    }
}

impl From<SmolStr> for ParserStep {
    fn from(s: SmolStr) -> Self {
        match s.parse() {
            Ok(step) => step,
            Err(never) => match never {},
        }
    }
}

impl From<ParserStep> for SmolStr {
    fn from(step: ParserStep) -> Self {
        SmolStr::from(step.to_string())
    }
}
