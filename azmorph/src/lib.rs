/*! Morphological analysis of Russian words over fuzzy DAWG dictionaries.

Words are looked up in a compressed word automaton, with optional repair
of doubled letters and typos, and every hit is expanded through its
paradigm into a [`Parse`]: a grammatical tag, a score, and the means to
inflect, normalize and pluralize the word. Words missing from the
dictionary go through a cascade of guessing strategies (known and unknown
prefixes, suffix statistics, hyphenated compounds, initials,
abbreviations, numbers, punctuation).

# Usage examples

```no_run
use std::path::Path;
use azmorph::{loader, Morph};

let thesaurus = loader::select("fs")?.load(Path::new("dicts/ru"))?;
let morph = Morph::from_thesaurus(thesaurus)?;

for parse in morph.parse("стали")? {
    println!("{} {} {}", parse.word(), parse.tag(), parse.score());
}
# Ok::<(), Box<dyn std::error::Error>>(())
```

Dictionaries and automata can be compiled and inspected with the
`dawg-tools` binary in the same repository; `azmorph-bin` is a command
line analyzer.
*/

#![warn(missing_docs)]

pub mod case_handling;
pub mod dawg;
pub mod grammeme;
pub mod loader;
pub mod morph;
pub mod paradigm;
pub mod parse;
pub mod parser;
pub mod tag;
pub mod thesaurus;
pub mod vfs;

pub(crate) mod constants;
pub(crate) mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::morph::{Morph, MorphError};
pub use crate::parse::{InflectTarget, Parse, ParseSummary, PluralCategory};
pub use crate::parser::{Parser, ParserConfig, ParserStep, Strategy};
pub use crate::tag::{Expect, Tag, TagQuery};
pub use crate::thesaurus::Thesaurus;
pub use crate::types::Score;
