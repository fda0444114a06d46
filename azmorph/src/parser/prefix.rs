use super::{DictionaryParser, Parser, ParserConfig};
use crate::case_handling::{is_capitalized, lower_case};
use crate::parse::Parse;

/// Productive word-forming prefixes. Entries ending in `-` are written with a hyphen.
pub const KNOWN_PREFIXES: [&str; 144] = [
    "авиа", "авто", "аква", "анти", "анти-", "антропо", "архи", "арт", "арт-", "астро",
    "аудио", "аэро", "без", "бес", "био", "вело", "взаимо", "вне", "внутри", "видео", "вице-",
    "вперед", "впереди", "гекто", "гелио", "гео", "гетеро", "гига", "гигро", "гипер", "гипо",
    "гомо", "дву", "двух", "де", "дез", "дека", "деци", "дис", "до", "евро", "за", "зоо",
    "интер", "инфра", "квази", "квази-", "кило", "кино", "контр", "контр-", "космо", "космо-",
    "крипто", "лейб-", "лже", "лже-", "макро", "макси", "макси-", "мало", "меж", "медиа",
    "медиа-", "мега", "мета", "мета-", "метео", "метро", "микро", "милли", "мини", "мини-",
    "моно", "мото", "много", "мульти", "нано", "нарко", "не", "небез", "недо", "нейро",
    "нео", "низко", "обер-", "обще", "одно", "около", "орто", "палео", "пан", "пара", "пента",
    "пере", "пиро", "поли", "полу", "после", "пост", "пост-", "порно", "пра", "пра-", "пред",
    "пресс-", "противо", "противо-", "прото", "псевдо", "псевдо-", "радио", "разно", "ре",
    "ретро", "ретро-", "само", "санти", "сверх", "сверх-", "спец", "суб", "супер", "супер-",
    "супра", "теле", "тетра", "топ-", "транс", "транс-", "ультра", "унтер-", "штаб-", "экзо",
    "эко", "эндо", "эконом-", "экс", "экс-", "экстра", "экстра-", "электро", "энерго",
    "этно",
];

const KNOWN_PREFIX_PENALTY: f64 = 0.7;
const UNKNOWN_PREFIX_PENALTY: f64 = 0.3;
const MAX_UNKNOWN_PREFIX: usize = 5;
const MIN_REMAINDER: usize = 3;

/// Keeps parses of a remainder that could take a prefix and scales them.
fn prefixed<'a>(
    remainder: Vec<Parse>,
    prefix: &'a str,
    penalty: f64,
    capitalized: bool,
    ignore_case: bool,
) -> impl Iterator<Item = Parse> + 'a {
    remainder
        .into_iter()
        .filter(move |p| p.tag().is_productive())
        .filter(move |p| ignore_case || capitalized || !p.tag().is_capitalized())
        .map(move |mut p| {
            p.scale_score(penalty);
            p.set_prefix(prefix);
            p
        })
}

/// A dictionary word behind a known prefix: `сверхзвуковой`, `антидом`.
#[derive(Debug, Clone)]
pub struct PrefixKnown {
    dictionary: DictionaryParser,
}

impl PrefixKnown {
    /// Strips [`KNOWN_PREFIXES`] and looks the rest up in `dictionary`.
    pub fn new(dictionary: DictionaryParser) -> PrefixKnown {
        PrefixKnown { dictionary }
    }
}

impl Parser for PrefixKnown {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let capitalized = is_capitalized(word, config.ignore_case);
        let word = lower_case(word);
        let len = word.chars().count();
        let mut parses = vec![];

        for prefix in KNOWN_PREFIXES.iter() {
            if len < prefix.chars().count() + MIN_REMAINDER {
                continue;
            }

            if let Some(end) = word.strip_prefix(prefix) {
                let remainder = self.dictionary.parse(end, config);
                parses.extend(prefixed(
                    remainder,
                    prefix,
                    KNOWN_PREFIX_PENALTY,
                    capitalized,
                    config.ignore_case,
                ));
            }
        }

        parses
    }
}

/// A dictionary word behind any short prefix.
#[derive(Debug, Clone)]
pub struct PrefixUnknown {
    dictionary: DictionaryParser,
}

impl PrefixUnknown {
    /// Strips prefixes of up to five letters and looks the rest up in `dictionary`.
    pub fn new(dictionary: DictionaryParser) -> PrefixUnknown {
        PrefixUnknown { dictionary }
    }
}

impl Parser for PrefixUnknown {
    fn parse(&self, word: &str, config: &ParserConfig) -> Vec<Parse> {
        let capitalized = is_capitalized(word, config.ignore_case);
        let word = lower_case(word);
        let len = word.chars().count();
        let mut parses = vec![];

        for (n, (at, _)) in word.char_indices().enumerate().skip(1) {
            if n > MAX_UNKNOWN_PREFIX || len < n + MIN_REMAINDER {
                break;
            }

            let (prefix, end) = word.split_at(at);
            let remainder = self.dictionary.parse(end, config);
            parses.extend(prefixed(
                remainder,
                prefix,
                UNKNOWN_PREFIX_PENALTY,
                capitalized,
                config.ignore_case,
            ));
        }

        parses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn dictionary() -> DictionaryParser {
        DictionaryParser::new(test_utils::thesaurus())
    }

    #[test]
    fn known_prefix() {
        let parser = PrefixKnown::new(dictionary());
        let parses = parser.parse("антидома", &ParserConfig::default());

        assert_eq!(parses.len(), 3);
        assert!(parses.iter().all(|p| p.to_string() == "антидома"));
        assert!(parses.iter().all(|p| (p.score() - 0.7).abs() < 1e-9));
        assert_eq!(parses[0].word(), "дома");
    }

    #[test]
    fn known_prefix_needs_long_remainder() {
        let parser = PrefixKnown::new(dictionary());
        assert!(parser.parse("антион", &ParserConfig::default()).is_empty());
        assert!(parser.parse("антиёж", &ParserConfig::default()).is_empty());
    }

    #[test]
    fn unknown_prefix() {
        let parser = PrefixUnknown::new(dictionary());
        let parses = parser.parse("кудому", &ParserConfig::default());

        assert_eq!(parses.len(), 1);
        assert_eq!(parses[0].to_string(), "кудому");
        assert_eq!(parses[0].word(), "дому");
        assert!((parses[0].score() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn unknown_prefix_length_limits() {
        let parser = PrefixUnknown::new(dictionary());
        let config = ParserConfig {
            stutter: Some(0),
            ..ParserConfig::default()
        };
        assert!(parser.parse("абвгдеждом", &config).is_empty());
        assert_eq!(parser.parse("абвгддом", &config).len(), 2);
    }

    #[test]
    fn shared_prefix_table() {
        assert!(KNOWN_PREFIXES.contains(&"анти-"));
        assert!(KNOWN_PREFIXES.iter().all(|p| !p.is_empty()));
    }
}
