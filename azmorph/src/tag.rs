//! Grammatical tags.
//!
//! A tag is written as two comma-separated grammeme lists joined by a space:
//! the invariant part of the lexeme first, then the part that changes with
//! inflection, e.g. `NOUN,inan,masc sing,nomn`. Every grammeme also fills in
//! its ancestor categories, so the tag above answers `CAse = nomn` and
//! `POST = NOUN`.
use std::fmt;
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use serde::{Serialize, Serializer};
use smol_str::SmolStr;

use crate::grammeme::GrammemeTable;

const NON_PRODUCTIVE: [&str; 13] = [
    "NUMR", "NPRO", "PRED", "PREP", "CONJ", "PRCL", "INTJ", "Apro", "NUMB", "ROMN", "LATN",
    "PNCT", "UNKN",
];

const CAPITALIZED: [&str; 5] = ["Name", "Surn", "Patr", "Geox", "Init"];

/// Grammatical categories with a typed accessor on [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Part of speech.
    Pos,
    /// Animate or inanimate.
    Animacy,
    /// Masculine, feminine or neuter.
    Gender,
    /// Singular or plural.
    Number,
    /// Grammatical case.
    Case,
    /// Perfective or imperfective.
    Aspect,
    /// Transitive or intransitive.
    Transitivity,
    /// First, second or third person.
    Person,
    /// Past, present or future.
    Tense,
    /// Indicative or imperative.
    Mood,
    /// Inclusive or exclusive imperative.
    Involvement,
    /// Active or passive.
    Voice,
}

impl Category {
    /// Every category, in accessor order.
    pub const ALL: [Category; 12] = [
        Category::Pos,
        Category::Animacy,
        Category::Gender,
        Category::Number,
        Category::Case,
        Category::Aspect,
        Category::Transitivity,
        Category::Person,
        Category::Tense,
        Category::Mood,
        Category::Involvement,
        Category::Voice,
    ];

    /// Name of the category grammeme in the dictionary.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Pos => "POST",
            Category::Animacy => "ANim",
            Category::Gender => "GNdr",
            Category::Number => "NMbr",
            Category::Case => "CAse",
            Category::Aspect => "ASpc",
            Category::Transitivity => "TRns",
            Category::Person => "PErs",
            Category::Tense => "TEns",
            Category::Mood => "MOod",
            Category::Involvement => "INvl",
            Category::Voice => "VOic",
        }
    }
}

/// What a tag holds under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagValue<'a> {
    /// The grammeme itself is part of the tag.
    Flag,
    /// An ancestor category, holding the grammeme directly below it.
    Field(&'a str),
}

/// A condition on one field of a tag, see [`TagQuery::Fields`].
#[derive(Debug, Clone, Copy)]
pub enum Expect<'a> {
    /// The field holds exactly this value.
    Is(&'a str),
    /// The field holds one of these values.
    OneOf(&'a [&'a str]),
    /// The name is, or is not, carried by the tag.
    Present(bool),
}

/// A test against a [`Tag`], see [`Tag::matches`].
#[derive(Debug, Clone, Copy)]
pub enum TagQuery<'a> {
    /// Every name is carried by the tag.
    All(&'a [&'a str]),
    /// Every field satisfies its expectation.
    Fields(&'a [(&'a str, Expect<'a>)]),
    /// Both tags hold the same value under every name.
    Agree(&'a Tag, &'a [&'a str]),
}

/// A parsed grammatical tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    stat: Vec<SmolStr>,
    flex: Vec<SmolStr>,
    flags: HashSet<SmolStr>,
    fields: HashMap<SmolStr, SmolStr>,
    ext: Option<Arc<Tag>>,
}

fn split_grammemes(s: &str) -> Vec<SmolStr> {
    s.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(SmolStr::from)
        .collect()
}

impl Tag {
    /// Parses an encoded tag, resolving ancestor categories through `grammemes`.
    pub fn create(encoded: &str, grammemes: &GrammemeTable) -> Tag {
        let encoded = encoded.trim();
        let (stat, flex) = encoded.split_once(' ').unwrap_or((encoded, ""));

        let mut tag = Tag {
            stat: split_grammemes(stat),
            flex: split_grammemes(flex),
            flags: HashSet::new(),
            fields: HashMap::new(),
            ext: None,
        };

        for gram in tag.stat.iter().chain(tag.flex.iter()) {
            tag.flags.insert(gram.clone());

            for (parent, child) in grammemes.ancestors(gram) {
                tag.fields.insert(parent.into(), child.into());
            }
        }

        if let Some(pos) = tag.fields.get("POST").cloned() {
            tag.fields.insert("POS".into(), pos);
        }

        tag
    }

    /// Builds a tag from its internal spelling and attaches the mirrored
    /// tag in external names.
    pub fn make(internal: &str, external: &str, grammemes: &GrammemeTable) -> Tag {
        let mut tag = Tag::create(internal, grammemes);
        tag.ext = Some(Arc::new(Tag::create(external, grammemes)));
        tag
    }

    /// Grammemes of the invariant part.
    pub fn stat(&self) -> &[SmolStr] {
        &self.stat
    }

    /// Grammemes that change with inflection.
    pub fn flex(&self) -> &[SmolStr] {
        &self.flex
    }

    /// The tag in external names, or this tag when none was attached.
    pub fn ext(&self) -> &Tag {
        self.ext.as_deref().unwrap_or(self)
    }

    /// The grammemes as written, invariant part first.
    pub fn grammemes(&self) -> impl Iterator<Item = &str> {
        self.stat.iter().chain(self.flex.iter()).map(SmolStr::as_str)
    }

    /// What the tag holds under `name`, either as a grammeme or as a category.
    pub fn get(&self, name: &str) -> Option<TagValue<'_>> {
        if let Some(value) = self.fields.get(name) {
            return Some(TagValue::Field(value.as_str()));
        }
        if self.flags.contains(name) {
            return Some(TagValue::Flag);
        }
        None
    }

    /// True when `name` is a grammeme or a filled category of the tag.
    #[inline(always)]
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.flags.contains(name)
    }

    /// Value of an ancestor category such as `CAse`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(SmolStr::as_str)
    }

    /// Value of a typed category.
    pub fn category(&self, category: Category) -> Option<&str> {
        self.field(category.name())
    }

    /// Part of speech, e.g. `NOUN`.
    pub fn pos(&self) -> Option<&str> {
        self.category(Category::Pos)
    }

    /// Case, e.g. `nomn`.
    pub fn case(&self) -> Option<&str> {
        self.category(Category::Case)
    }

    /// `sing` or `plur`.
    pub fn number(&self) -> Option<&str> {
        self.category(Category::Number)
    }

    /// `masc`, `femn` or `neut`.
    pub fn gender(&self) -> Option<&str> {
        self.category(Category::Gender)
    }

    /// Evaluates `query` against this tag.
    pub fn matches(&self, query: TagQuery<'_>) -> bool {
        match query {
            TagQuery::All(names) => names.iter().all(|name| self.has(name)),
            TagQuery::Fields(fields) => fields.iter().all(|(name, expect)| match expect {
                Expect::Is(value) => self.field(name) == Some(*value),
                Expect::OneOf(values) => match self.field(name) {
                    Some(v) => values.contains(&v),
                    None => false,
                },
                Expect::Present(present) => self.has(name) == *present,
            }),
            TagQuery::Agree(other, names) => {
                names.iter().all(|name| self.get(name) == other.get(name))
            }
        }
    }

    /// Whether new words of this class can be formed in the language.
    pub fn is_productive(&self) -> bool {
        !NON_PRODUCTIVE.iter().any(|g| self.has(g))
    }

    /// Whether words with this tag are proper names written with a capital.
    pub fn is_capitalized(&self) -> bool {
        CAPITALIZED.iter().any(|g| self.has(g))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stat = self.stat.join(",");
        let flex = self.flex.join(",");

        if flex.is_empty() {
            f.write_str(&stat)
        } else if stat.is_empty() {
            f.write_str(&flex)
        } else {
            write!(f, "{} {}", stat, flex)
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
