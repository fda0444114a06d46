use std::sync::Arc;

use super::{Parser, ParserConfig};
use crate::case_handling::upper_case;
use crate::constants::INITIALS;
use crate::parse::Parse;
use crate::tag::Tag;
use crate::thesaurus::Thesaurus;

pub(crate) const CASES: [(&str, &str); 6] = [
    ("nomn", "им"),
    ("gent", "рд"),
    ("datv", "дт"),
    ("accs", "вн"),
    ("ablt", "тв"),
    ("loct", "пр"),
];

const GENDERS: [(&str, &str); 3] = [("masc", "мр"), ("femn", "жр"), ("neut", "ср")];
const NUMBERS: [(&str, &str); 2] = [("sing", "ед"), ("plur", "мн")];
const MAX_CAPITALS: usize = 5;

/// Indeclinable abbreviations written in capitals, such as `ООН` or `МГУ`.
#[derive(Debug, Clone)]
pub struct AbbrParser {
    tags: Vec<Arc<Tag>>,
}

impl AbbrParser {
    /// Reads abbreviations against the tags of `thesaurus`.
    pub fn new(thesaurus: &Thesaurus) -> AbbrParser {
        let mut tags = Vec::with_capacity(GENDERS.len() * CASES.len() * NUMBERS.len());

        for (gender, ext_gender) in GENDERS.iter() {
            for (case, ext_case) in CASES.iter() {
                for (number, ext_number) in NUMBERS.iter() {
                    tags.push(thesaurus.make_tag(
                        &format!("NOUN,inan,{},Fixd,Abbr {},{}", gender, number, case),
                        &format!("СУЩ,неод,{},0,аббр {},{}", ext_gender, ext_number, ext_case),
                    ));
                }
            }
        }

        AbbrParser { tags }
    }

    fn emit(&self, word: &str, score: f64) -> Vec<Parse> {
        self.tags
            .iter()
            .map(|tag| Parse::new(word, Arc::clone(tag), score))
            .collect()
    }
}

fn is_initial(c: char) -> bool {
    INITIALS.contains(c)
}

impl Parser for AbbrParser {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let len = word.chars().count();

        // single letters are initials
        if len < 2 || word.contains('-') {
            return vec![];
        }

        let first = word.chars().next().map_or(false, is_initial);
        let last = word.chars().last().map_or(false, is_initial);

        if first && last {
            let capitals = word.chars().filter(|c| is_initial(*c)).count();
            if capitals <= MAX_CAPITALS {
                return self.emit(word, 0.5);
            }
            return vec![];
        }

        if !config.ignore_case || len > MAX_CAPITALS {
            return vec![];
        }

        let word = upper_case(word);
        if word.chars().all(is_initial) {
            return self.emit(&word, 0.2);
        }

        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagQuery;
    use crate::test_utils;

    fn parser() -> AbbrParser {
        AbbrParser::new(&test_utils::thesaurus())
    }

    #[test]
    fn capital_abbreviations() {
        let parses = parser().parse("ООН", &ParserConfig::default());
        assert_eq!(parses.len(), 36);
        assert!(parses.iter().all(|p| p.score() == 0.5 && p.word() == "ООН"));

        assert_eq!(parses[0].tag().to_string(), "NOUN,inan,masc,Fixd,Abbr sing,nomn");
        assert_eq!(parses[0].tag().ext().to_string(), "СУЩ,неод,мр,0,аббр ед,им");
        assert!(parses[35].matches(TagQuery::All(&["neut", "plur", "loct"])));
    }

    #[test]
    fn rejected_shapes() {
        let config = ParserConfig::default();
        assert!(parser().parse("О", &config).is_empty());
        assert!(parser().parse("ООН-ЮНЕСКО", &config).is_empty());
        assert!(parser().parse("ОТВЕТСТВЕННОСТЬ", &config).is_empty());
        assert!(parser().parse("ЦСКАВДВ", &config).is_empty());
        assert!(parser().parse("ВУЗы", &config).is_empty());
        assert!(parser().parse("оон", &config).is_empty());
    }

    #[test]
    fn lowercase_when_ignoring_case() {
        let config = ParserConfig {
            ignore_case: true,
            ..ParserConfig::default()
        };

        let parses = parser().parse("оон", &config);
        assert_eq!(parses.len(), 36);
        assert_eq!(parses[0].word(), "ООН");
        assert_eq!(parses[0].score(), 0.2);

        assert!(parser().parse("объём", &config).is_empty());
        assert!(parser().parse("москва", &config).is_empty());
    }
}
