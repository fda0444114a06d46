use std::sync::Arc;

use super::abbr::CASES;
use super::{Parser, ParserConfig};
use crate::case_handling::upper_case;
use crate::constants::INITIALS;
use crate::parse::Parse;
use crate::tag::Tag;
use crate::thesaurus::Thesaurus;

const GENDERS: [(&str, &str); 2] = [("masc", "мр"), ("femn", "жр")];

/// Whether an initial stands for a first name or a patronymic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialsKind {
    /// First name, tagged `Name`.
    Name,
    /// Patronymic, tagged `Patr`.
    Patronymic,
}

impl InitialsKind {
    fn grammemes(self) -> (&'static str, &'static str) {
        match self {
            InitialsKind::Name => ("Name", "имя"),
            InitialsKind::Patronymic => ("Patr", "отч"),
        }
    }
}

/// A single capital letter read as an initial, as in `А. С. Пушкин`.
#[derive(Debug, Clone)]
pub struct InitialsParser {
    tags: Vec<Arc<Tag>>,
    score: f64,
}

impl InitialsParser {
    /// Builds one tag per gender and case, all scored `score`.
    pub fn new(thesaurus: &Thesaurus, kind: InitialsKind, score: f64) -> InitialsParser {
        let (internal, external) = kind.grammemes();
        let mut tags = Vec::with_capacity(GENDERS.len() * CASES.len());

        for (gender, ext_gender) in GENDERS.iter() {
            for (case, ext_case) in CASES.iter() {
                tags.push(thesaurus.make_tag(
                    &format!("NOUN,anim,{},Sgtm,{},Fixd,Abbr,Init sing,{}", gender, internal, case),
                    &format!("СУЩ,од,{},sg,{},0,аббр,иниц ед,{}", ext_gender, external, ext_case),
                ));
            }
        }

        InitialsParser { tags, score }
    }
}

impl Parser for InitialsParser {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        if word.chars().count() != 1 {
            return vec![];
        }

        let word = if config.ignore_case {
            upper_case(word)
        } else {
            word.into()
        };

        if !word.chars().all(|c| INITIALS.contains(c)) {
            return vec![];
        }

        self.tags
            .iter()
            .map(|tag| Parse::new(word.clone(), Arc::clone(tag), self.score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagQuery;
    use crate::test_utils;

    #[test]
    fn name_initials() {
        let parser = InitialsParser::new(&test_utils::thesaurus(), InitialsKind::Name, 0.5);
        let parses = parser.parse("А", &ParserConfig::default());

        assert_eq!(parses.len(), 12);
        assert!(parses.iter().all(|p| p.matches(TagQuery::All(&["Name", "Init"]))));
        assert!(parses[0].tag().is_capitalized());
        assert_eq!(
            parses[6].tag().to_string(),
            "NOUN,anim,femn,Sgtm,Name,Fixd,Abbr,Init sing,nomn"
        );
        assert_eq!(parses[6].tag().ext().to_string(), "СУЩ,од,жр,sg,имя,0,аббр,иниц ед,им");
    }

    #[test]
    fn patronymic_initials() {
        let parser = InitialsParser::new(&test_utils::thesaurus(), InitialsKind::Patronymic, 0.5);
        let parses = parser.parse("С", &ParserConfig::default());
        assert!(parses.iter().all(|p| p.matches(TagQuery::All(&["Patr"]))));
        assert!(parses.iter().all(|p| !p.matches(TagQuery::All(&["Name"]))));
    }

    #[test]
    fn only_capital_letters() {
        let parser = InitialsParser::new(&test_utils::thesaurus(), InitialsKind::Name, 0.5);
        let config = ParserConfig::default();

        assert!(parser.parse("а", &config).is_empty());
        assert!(parser.parse("Ь", &config).is_empty());
        assert!(parser.parse("АБ", &config).is_empty());
        assert!(parser.parse("", &config).is_empty());

        let config = ParserConfig {
            ignore_case: true,
            ..ParserConfig::default()
        };
        assert_eq!(parser.parse("а", &config)[0].word(), "А");
    }
}
