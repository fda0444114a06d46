use std::sync::Arc;

use regex::Regex;

use super::{Parser, ParserConfig};
use crate::case_handling::upper_case;
use crate::parse::Parse;
use crate::tag::Tag;
use crate::thesaurus::Thesaurus;

const INT_NUMBER: &str = r"^[−-]?[0-9]+$";
const REAL_NUMBER: &str = r"^[−-]?([0-9]*[.,][0-9]+)$";
const PUNCTUATION: &str =
    r##"^[\x{2000}-\x{206F}\x{2E00}-\x{2E7F}\\'!"#$%&()*+,\-./:;<=>?@\[\]^_`{|}~]+$"##;
const ROMAN_NUMBER: &str = r"^M{0,4}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$";
const LATIN: &str = r"[A-Za-z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{024F}]$";

const SCORE: f64 = 0.9;

/// Words recognised by their shape alone, each class with one fixed tag.
#[derive(Debug, Clone)]
pub struct RegexParser {
    regex: Regex,
    tag: Arc<Tag>,
    score: f64,
}

impl RegexParser {
    /// Tags every word matching `regex` with `tag`.
    pub fn new(regex: Regex, tag: Arc<Tag>, score: f64) -> RegexParser {
        RegexParser { regex, tag, score }
    }

    fn builtin(pattern: &str, tag: Arc<Tag>) -> Result<RegexParser, regex::Error> {
        Ok(RegexParser::new(Regex::new(pattern)?, tag, SCORE))
    }

    /// Integers with an optional minus sign, tagged `NUMB,intg`.
    pub fn int_number(thesaurus: &Thesaurus) -> Result<RegexParser, regex::Error> {
        Self::builtin(INT_NUMBER, thesaurus.make_tag("NUMB,intg", "ЧИСЛО,цел"))
    }

    /// Decimal fractions with a point or comma, tagged `NUMB,real`.
    pub fn real_number(thesaurus: &Thesaurus) -> Result<RegexParser, regex::Error> {
        Self::builtin(REAL_NUMBER, thesaurus.make_tag("NUMB,real", "ЧИСЛО,вещ"))
    }

    /// Punctuation marks, tagged `PNCT`.
    pub fn punctuation(thesaurus: &Thesaurus) -> Result<RegexParser, regex::Error> {
        Self::builtin(PUNCTUATION, thesaurus.make_tag("PNCT", "ЗПР"))
    }

    /// Roman numerals, tagged `ROMN`.
    pub fn roman_number(thesaurus: &Thesaurus) -> Result<RegexParser, regex::Error> {
        Self::builtin(ROMAN_NUMBER, thesaurus.make_tag("ROMN", "РИМ"))
    }

    /// Words ending in a Latin letter, tagged `LATN`.
    pub fn latin(thesaurus: &Thesaurus) -> Result<RegexParser, regex::Error> {
        Self::builtin(LATIN, thesaurus.make_tag("LATN", "ЛАТ"))
    }
}

impl Parser for RegexParser {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let word = if config.ignore_case {
            upper_case(word)
        } else {
            word.into()
        };

        if word.is_empty() || !self.regex.is_match(&word) {
            return vec![];
        }

        vec![Parse::new(word, Arc::clone(&self.tag), self.score)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn accepts(parser: &RegexParser, word: &str) -> bool {
        !parser.parse(word, &ParserConfig::default()).is_empty()
    }

    #[test]
    fn numbers() {
        let thesaurus = test_utils::thesaurus();
        let int = RegexParser::int_number(&thesaurus).unwrap();
        let real = RegexParser::real_number(&thesaurus).unwrap();

        let parses = int.parse("42", &ParserConfig::default());
        assert_eq!(parses.len(), 1);
        assert_eq!(parses[0].score(), 0.9);
        assert_eq!(parses[0].tag().to_string(), "NUMB,intg");
        assert_eq!(parses[0].tag().pos(), Some("NUMB"));

        assert!(accepts(&int, "-7"));
        assert!(accepts(&int, "−7"));
        assert!(!accepts(&int, "4.2"));
        assert!(!accepts(&int, ""));

        assert!(accepts(&real, "4.2"));
        assert!(accepts(&real, "-0,5"));
        assert!(accepts(&real, ".5"));
        assert!(!accepts(&real, "42"));
        assert!(!accepts(&real, "4."));
    }

    #[test]
    fn punctuation() {
        let parser = RegexParser::punctuation(&test_utils::thesaurus()).unwrap();
        for word in [",", "...", "?!", "—", "(", "\\"] {
            assert!(accepts(&parser, word), "{}", word);
        }
        assert!(!accepts(&parser, "а,"));
    }

    #[test]
    fn roman_numbers() {
        let parser = RegexParser::roman_number(&test_utils::thesaurus()).unwrap();
        for word in ["XIV", "MMXXIV", "IX"] {
            assert!(accepts(&parser, word), "{}", word);
        }
        assert!(!accepts(&parser, "IIII"));
        assert!(!accepts(&parser, "xiv"));
        assert!(!accepts(&parser, ""));

        let config = ParserConfig {
            ignore_case: true,
            ..ParserConfig::default()
        };
        assert_eq!(parser.parse("xiv", &config)[0].word(), "XIV");
    }

    #[test]
    fn latin() {
        let parser = RegexParser::latin(&test_utils::thesaurus()).unwrap();
        assert!(accepts(&parser, "hello"));
        assert!(accepts(&parser, "café"));
        assert!(!accepts(&parser, "привет"));
        assert!(!accepts(&parser, "2"));
    }
}
