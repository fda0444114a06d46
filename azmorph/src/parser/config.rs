//! Analysis options.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ParserStep;
use crate::dawg::{Replacements, TypoBudget};

/// Options that shape a single analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    /// Lower-case the word before lookup and skip proper-name checks.
    pub ignore_case: bool,
    /// Letters that may stand in for others at no cost, `е` for `ё` by default.
    pub replacements: Replacements,
    /// Stutter repairs a lookup may spend; `None` allows any number.
    pub stutter: Option<u32>,
    /// Typo repairs a lookup may spend.
    pub typos: TypoBudget,
    /// The strategy cascade, in order.
    pub parsers: Vec<ParserStep>,
    /// Return an `UNKN` parse instead of nothing.
    pub force_parse: bool,
    /// Rescale dictionary and other scores to sum to one per group.
    pub normalize_score: bool,
}

impl Default for ParserConfig {
    fn default() -> ParserConfig {
        let mut replacements = Replacements::new();
        replacements.insert('е', SmolStr::new("ё"));

        ParserConfig {
            ignore_case: false,
            replacements,
            stutter: None,
            typos: TypoBudget::Fixed(0),
            parsers: ParserStep::defaults(),
            force_parse: false,
            normalize_score: false,
        }
    }
}
