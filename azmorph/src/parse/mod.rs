//! Candidate interpretations of a word.
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::parser::Strategy;
use crate::tag::{Expect, Tag, TagQuery};
use crate::types::Score;

mod combined;
mod dictionary;

pub use self::combined::CombinedParse;
pub use self::dictionary::{dictionary_score, DictionaryParse};

/// The form an inflection should produce.
#[derive(Debug, Clone, Copy)]
pub enum InflectTarget<'a> {
    /// A form index of the paradigm.
    Form(usize),
    /// The first form whose tag satisfies the query.
    Matching(TagQuery<'a>),
}

/// Russian plural classes of a number, as used for agreement with numerals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    /// 1, 21, 31, but not 11.
    One,
    /// 2 to 4, 22 to 24, but not 12 to 14.
    Few,
    /// Everything else, zero included.
    Many,
}

impl PluralCategory {
    /// Plural class of `n`.
    pub fn from_number(n: u64) -> PluralCategory {
        let n = n % 100;

        if n % 10 == 0 || n % 10 > 4 || (n > 4 && n < 21) {
            PluralCategory::Many
        } else if n % 10 == 1 {
            PluralCategory::One
        } else {
            PluralCategory::Few
        }
    }
}

/// Where a parse came from, and so how it inflects.
#[derive(Debug, Clone)]
pub enum ParseKind {
    /// A parse with no paradigm behind it; it does not inflect.
    Plain,
    /// A form of a dictionary paradigm.
    Dictionary(DictionaryParse),
    /// A hyphenated compound of two parses.
    Combined(Box<CombinedParse>),
}

/// One reading of a word: its tag, score and the repairs it needed.
#[derive(Debug, Clone)]
pub struct Parse {
    word: SmolStr,
    tag: Arc<Tag>,
    score: Score,
    stutter: u32,
    typos: u32,
    parser: Option<Strategy>,
    kind: ParseKind,
}

impl Parse {
    /// A parse that does not inflect.
    pub fn new(word: impl Into<SmolStr>, tag: Arc<Tag>, score: Score) -> Parse {
        Parse {
            word: word.into(),
            tag,
            score,
            stutter: 0,
            typos: 0,
            parser: None,
            kind: ParseKind::Plain,
        }
    }

    pub(crate) fn with_repairs(mut self, stutter: u32, typos: u32) -> Parse {
        self.stutter = stutter;
        self.typos = typos;
        self
    }

    /// The word as found in the dictionary, without prefix or suffix overrides.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The grammatical tag.
    pub fn tag(&self) -> &Arc<Tag> {
        &self.tag
    }

    /// Confidence, higher is better.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Doubled letters dropped to find the word.
    pub fn stutter(&self) -> u32 {
        self.stutter
    }

    /// Typos repaired to find the word.
    pub fn typos(&self) -> u32 {
        self.typos
    }

    /// The strategy that produced this parse.
    pub fn parser(&self) -> Option<&Strategy> {
        self.parser.as_ref()
    }

    /// How the parse was found.
    pub fn kind(&self) -> &ParseKind {
        &self.kind
    }

    /// The dictionary details, for dictionary parses.
    pub fn as_dictionary(&self) -> Option<&DictionaryParse> {
        match &self.kind {
            ParseKind::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Both halves, for hyphenated compounds.
    pub fn as_combined(&self) -> Option<&CombinedParse> {
        match &self.kind {
            ParseKind::Combined(c) => Some(c),
            _ => None,
        }
    }

    /// Whether the parse was read without any stutter or typo repair.
    pub fn is_exact(&self) -> bool {
        self.stutter == 0 && self.typos == 0
    }

    /// Stem of a dictionary parse, without paradigm prefix and suffix.
    pub fn base(&self) -> Option<&str> {
        self.as_dictionary().map(|d| d.base(&self.word))
    }

    pub(crate) fn set_score(&mut self, score: Score) {
        self.score = score;
    }

    pub(crate) fn scale_score(&mut self, factor: Score) {
        self.score *= factor;
    }

    pub(crate) fn set_parser(&mut self, parser: Strategy) {
        self.parser = Some(parser);
    }

    /// Replaces the text printed before the stem. No effect on non-dictionary parses.
    pub(crate) fn set_prefix(&mut self, prefix: &str) {
        if let ParseKind::Dictionary(d) = &mut self.kind {
            d.set_prefix(prefix);
        }
    }

    /// Replaces the text printed after the word. No effect on non-dictionary parses.
    pub(crate) fn set_suffix(&mut self, suffix: &str) {
        if let ParseKind::Dictionary(d) = &mut self.kind {
            d.set_suffix(suffix);
        }
    }

    /// Tests the tag against `query`.
    pub fn matches(&self, query: TagQuery<'_>) -> bool {
        self.tag.matches(query)
    }

    /// Whether this parse agrees with `other` on every named grammeme.
    pub fn agrees_with(&self, other: &Parse, grammemes: &[&str]) -> bool {
        self.tag.matches(TagQuery::Agree(&other.tag, grammemes))
    }

    /// The form of the same lexeme selected by `target`. Plain parses return themselves.
    pub fn inflect(&self, target: InflectTarget<'_>) -> Option<Parse> {
        match &self.kind {
            ParseKind::Plain => Some(self.clone()),
            ParseKind::Dictionary(d) => d.inflect(self, target),
            ParseKind::Combined(c) => c.inflect(self, target),
        }
    }

    /// Inflects to the dictionary form; with `keep_pos` the part of speech
    /// may not change (a participle stays a participle).
    pub fn normalize(&self, keep_pos: bool) -> Option<Parse> {
        match self.tag.pos() {
            Some(pos) if keep_pos => {
                let fields = [("POS", Expect::Is(pos))];
                self.inflect(InflectTarget::Matching(TagQuery::Fields(&fields)))
            }
            _ => self.inflect(InflectTarget::Form(0)),
        }
    }

    /// Inflects the word to agree with a numeral of the given plural class.
    pub fn pluralize(&self, category: PluralCategory) -> Option<Parse> {
        let tag = &self.tag;

        if !tag.has("NOUN") && !tag.has("ADJF") && !tag.has("PRTF") {
            return Some(self.clone());
        }

        let number = match category {
            PluralCategory::One => "sing",
            _ => "plur",
        };

        let names = if tag.has("NOUN") && !tag.has("nomn") && !tag.has("accs") {
            [number, tag.case()?]
        } else if category == PluralCategory::One {
            ["sing", if tag.has("nomn") { "nomn" } else { "accs" }]
        } else if tag.has("NOUN") && category == PluralCategory::Few {
            ["sing", "gent"]
        } else if (tag.has("ADJF") || tag.has("PRTF"))
            && tag.has("femn")
            && category == PluralCategory::Few
        {
            ["plur", "nomn"]
        } else {
            ["plur", "gent"]
        };

        self.inflect(InflectTarget::Matching(TagQuery::All(&names)))
    }

    /// Like [`Parse::pluralize`], for the number `n`.
    pub fn pluralize_number(&self, n: u64) -> Option<Parse> {
        self.pluralize(PluralCategory::from_number(n))
    }

    /// Every form of the paradigm behind this parse, in paradigm order.
    pub fn lexeme(&self) -> Vec<Parse> {
        let count = match &self.kind {
            ParseKind::Plain => return vec![self.clone()],
            ParseKind::Dictionary(d) => d.form_count(),
            ParseKind::Combined(c) => match c.right().as_dictionary() {
                Some(d) => d.form_count(),
                None => return vec![self.clone()],
            },
        };

        (0..count)
            .filter_map(|i| self.inflect(InflectTarget::Form(i)))
            .collect()
    }

    /// A serializable snapshot.
    pub fn summary(&self) -> ParseSummary {
        ParseSummary {
            word: self.to_string(),
            tag: self.tag.to_string(),
            ext: self.tag.ext().to_string(),
            score: self.score,
            stutter: self.stutter,
            typos: self.typos,
            parser: self.parser.as_ref().map(|p| p.to_string()),
            normal_form: self.normalize(false).map(|p| p.to_string()),
        }
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseKind::Plain => f.write_str(&self.word),
            ParseKind::Dictionary(d) => d.fmt_word(&self.word, f),
            ParseKind::Combined(c) => write!(f, "{}-{}", c.left().word(), c.right()),
        }
    }
}

/// Serializable view of a parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    /// The word as printed.
    pub word: String,
    /// Tag in internal names.
    pub tag: String,
    /// Tag in external names.
    pub ext: String,
    /// See [`Parse::score`].
    pub score: Score,
    /// See [`Parse::stutter`].
    pub stutter: u32,
    /// See [`Parse::typos`].
    pub typos: u32,
    /// Strategy that produced the parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    /// Dictionary form of the word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_form: Option<String>,
}
