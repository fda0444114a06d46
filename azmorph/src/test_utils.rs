//! A miniature Russian dictionary shared by the unit tests.
use std::collections::BTreeMap;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::dawg::{Dawg, DawgBuilder, SuffixStat, SuffixStats, WordForm, WordForms};
use crate::grammeme::{Grammeme, GrammemeTable};
use crate::morph::Morph;
use crate::paradigm::{Paradigm, ParadigmTable};
use crate::parse::{DictionaryParse, Parse};
use crate::thesaurus::{ArtifactData, Thesaurus, ThesaurusBuilder};

const GRAMMEMES: &[(&str, Option<&str>, &str, &str)] = &[
    ("POST", None, "ЧР", "часть речи"),
    ("NOUN", Some("POST"), "СУЩ", "имя существительное"),
    ("ADJF", Some("POST"), "ПРИЛ", "имя прилагательное (полное)"),
    ("ADJS", Some("POST"), "КР_ПРИЛ", "имя прилагательное (краткое)"),
    ("VERB", Some("POST"), "ГЛ", "глагол (личная форма)"),
    ("INFN", Some("POST"), "ИНФ", "глагол (инфинитив)"),
    ("PRTF", Some("POST"), "ПРИЧ", "причастие (полное)"),
    ("ADVB", Some("POST"), "Н", "наречие"),
    ("NPRO", Some("POST"), "МС", "местоимение-существительное"),
    ("PREP", Some("POST"), "ПР", "предлог"),
    ("CONJ", Some("POST"), "СОЮЗ", "союз"),
    ("PRCL", Some("POST"), "ЧАСТ", "частица"),
    ("INTJ", Some("POST"), "МЕЖД", "междометие"),
    ("NUMR", Some("POST"), "ЧИСЛ", "числительное"),
    ("PRED", Some("POST"), "ПРЕДК", "предикатив"),
    ("ANim", None, "Од-неод", "категория одушевлённости"),
    ("anim", Some("ANim"), "од", "одушевлённое"),
    ("inan", Some("ANim"), "неод", "неодушевлённое"),
    ("GNdr", None, "хр", "род"),
    ("masc", Some("GNdr"), "мр", "мужской род"),
    ("femn", Some("GNdr"), "жр", "женский род"),
    ("neut", Some("GNdr"), "ср", "средний род"),
    ("NMbr", None, "Число", "число"),
    ("sing", Some("NMbr"), "ед", "единственное число"),
    ("plur", Some("NMbr"), "мн", "множественное число"),
    ("CAse", None, "Падеж", "категория падежа"),
    ("nomn", Some("CAse"), "им", "именительный падеж"),
    ("gent", Some("CAse"), "рд", "родительный падеж"),
    ("datv", Some("CAse"), "дт", "дательный падеж"),
    ("accs", Some("CAse"), "вн", "винительный падеж"),
    ("ablt", Some("CAse"), "тв", "творительный падеж"),
    ("loct", Some("CAse"), "пр", "предложный падеж"),
    ("loc2", Some("loct"), "пр2", "второй предложный падеж"),
    ("ASpc", None, "Вид", "категория вида"),
    ("perf", Some("ASpc"), "сов", "совершенный вид"),
    ("impf", Some("ASpc"), "несов", "несовершенный вид"),
    ("MOod", None, "Накл", "категория наклонения"),
    ("indc", Some("MOod"), "изъяв", "изъявительное наклонение"),
    ("impr", Some("MOod"), "повел", "повелительное наклонение"),
    ("PErs", None, "Лицо", "категория лица"),
    ("1per", Some("PErs"), "1л", "1 лицо"),
    ("2per", Some("PErs"), "2л", "2 лицо"),
    ("3per", Some("PErs"), "3л", "3 лицо"),
    ("TEns", None, "Время", "категория времени"),
    ("pres", Some("TEns"), "наст", "настоящее время"),
    ("past", Some("TEns"), "прош", "прошедшее время"),
    ("futr", Some("TEns"), "буд", "будущее время"),
    ("Sgtm", None, "sg", "singularia tantum"),
    ("Fixd", None, "0", "неизменяемое"),
    ("Abbr", None, "аббр", "аббревиатура"),
    ("Name", None, "имя", "имя"),
    ("Surn", None, "фам", "фамилия"),
    ("Patr", None, "отч", "отчество"),
    ("Geox", None, "гео", "топоним"),
    ("Init", None, "иниц", "инициал"),
    ("Qual", None, "кач", "качественное"),
    ("Supr", None, "превосх", "превосходная степень"),
    ("Apro", None, "мест-п", "местоименное"),
    ("Anph", None, "Анаф", "анафорическое"),
];

pub const TAGS: [(&str, &str); 24] = [
    ("NOUN,inan,masc sing,nomn", "СУЩ,неод,мр ед,им"),
    ("NOUN,inan,masc sing,gent", "СУЩ,неод,мр ед,рд"),
    ("NOUN,inan,masc sing,datv", "СУЩ,неод,мр ед,дт"),
    ("NOUN,inan,masc sing,accs", "СУЩ,неод,мр ед,вн"),
    ("NOUN,inan,masc sing,ablt", "СУЩ,неод,мр ед,тв"),
    ("NOUN,inan,masc sing,loct", "СУЩ,неод,мр ед,пр"),
    ("NOUN,inan,masc plur,nomn", "СУЩ,неод,мр мн,им"),
    ("NOUN,inan,masc plur,gent", "СУЩ,неод,мр мн,рд"),
    ("NOUN,inan,masc plur,datv", "СУЩ,неод,мр мн,дт"),
    ("NOUN,inan,masc plur,accs", "СУЩ,неод,мр мн,вн"),
    ("NOUN,inan,masc plur,ablt", "СУЩ,неод,мр мн,тв"),
    ("NOUN,inan,masc plur,loct", "СУЩ,неод,мр мн,пр"),
    ("ADJF,Qual masc,sing,nomn", "ПРИЛ,кач мр,ед,им"),
    ("ADJF,Qual masc,sing,gent", "ПРИЛ,кач мр,ед,рд"),
    ("ADJF,Qual masc,sing,datv", "ПРИЛ,кач мр,ед,дт"),
    ("ADJF,Qual femn,sing,nomn", "ПРИЛ,кач жр,ед,им"),
    ("ADJF,Qual plur,nomn", "ПРИЛ,кач мн,им"),
    ("NOUN,anim,masc,Name sing,nomn", "СУЩ,од,мр,имя ед,им"),
    ("NOUN,anim,masc,Name sing,gent", "СУЩ,од,мр,имя ед,рд"),
    ("VERB,impf sing,impr", "ГЛ,несов ед,повел"),
    ("NOUN,inan,masc sing,loc2", "СУЩ,неод,мр ед,пр2"),
    ("ADJF,Qual neut,sing,nomn", "ПРИЛ,кач ср,ед,им"),
    ("ADJF,Supr,Qual masc,sing,nomn", "ПРИЛ,превосх,кач мр,ед,им"),
    ("NPRO,masc,3per,Anph sing,nomn", "МС,мр,3л,Анаф ед,им"),
];

pub const SUFFIXES: [&str; 17] = [
    "", "а", "у", "ом", "е", "ов", "ам", "ами", "ах", "ый", "ого", "ому", "ая", "ые", "и", "ое",
    "ий",
];

/// `(suffix ids, tag ids, prefix ids)` per paradigm.
const PARADIGMS: &[(&[u16], &[u16], &[u16])] = &[
    (
        &[0, 1, 2, 0, 3, 4, 1, 5, 6, 1, 7, 8],
        &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ),
    (
        &[9, 10, 11, 12, 13, 15],
        &[12, 13, 14, 15, 16, 21],
        &[0, 0, 0, 0, 0, 0],
    ),
    (&[0, 1], &[17, 18], &[0, 0]),
    (&[14], &[19], &[0]),
    (&[16, 16], &[12, 22], &[0, 2]),
    (&[0], &[23], &[0]),
];

/// Stems and the paradigm every form of them is stored under.
const LEXEMES: [(&str, u16); 7] = [
    ("дом", 0),
    ("город", 0),
    ("нов", 1),
    ("иван", 2),
    ("смотр", 3),
    ("лучш", 4),
    ("он", 5),
];

pub fn grammemes() -> Vec<Grammeme> {
    GRAMMEMES
        .iter()
        .map(|(internal, parent, external, full)| {
            Grammeme::new(internal, *parent, external, full)
        })
        .collect()
}

pub fn grammeme_table() -> GrammemeTable {
    GrammemeTable::new(grammemes())
}

pub fn paradigms() -> ParadigmTable {
    ParadigmTable::new(
        PARADIGMS
            .iter()
            .map(|(suffixes, tags, prefixes)| {
                let data = [*suffixes, *tags, *prefixes].concat();
                Paradigm::new(data).unwrap()
            })
            .collect(),
    )
}

pub fn words() -> Dawg<WordForms> {
    let paradigms = paradigms();
    let mut forms: BTreeMap<String, WordForms> = BTreeMap::new();

    for (stem, index) in LEXEMES.iter() {
        let paradigm = paradigms.get(*index as usize).unwrap();
        for form in 0..paradigm.form_count() {
            let suffix = SUFFIXES[paradigm.suffix_id(form).unwrap()];
            let word = format!("{}{}{}", paradigm.prefix(form), stem, suffix);
            forms
                .entry(word)
                .or_default()
                .push(WordForm::new(*index, form as u16));
        }
    }

    forms.insert("ёж".to_string(), vec![WordForm::new(0, 0)]);

    let mut builder = DawgBuilder::new();
    for (word, value) in forms {
        builder.insert(&word, value);
    }
    builder.build()
}

pub fn probabilities() -> Dawg<u32> {
    let mut builder = DawgBuilder::new();
    builder.insert("дом:NOUN,inan,masc sing,accs", 300_000);
    builder.insert("дом:NOUN,inan,masc sing,nomn", 700_000);
    builder.build()
}

pub fn prediction_suffixes(prefix: usize) -> Dawg<SuffixStats> {
    let entries: &[(&str, (u16, u16, u16))] = match prefix {
        0 => &[
            ("ами", (40, 0, 10)),
            ("ом", (20, 0, 4)),
            ("ому", (30, 1, 2)),
            ("ый", (50, 1, 0)),
        ],
        2 => &[("ий", (10, 4, 1))],
        _ => &[],
    };

    let mut builder = DawgBuilder::new();
    for (suffix, (frequency, paradigm, form)) in entries.iter() {
        builder.insert(suffix, vec![SuffixStat::new(*frequency, *paradigm, *form)]);
    }
    builder.build()
}

/// A builder holding every fixture artifact, ready to build.
pub fn thesaurus_builder() -> ThesaurusBuilder {
    let words = words().to_bytes().unwrap();
    let probabilities = probabilities().to_bytes().unwrap();
    let suffixes_0 = prediction_suffixes(0).to_bytes().unwrap();
    let suffixes_2 = prediction_suffixes(2).to_bytes().unwrap();

    let mut builder = Thesaurus::builder();
    builder
        .add("grammemes", ArtifactData::Grammemes(grammemes()))
        .unwrap()
        .add(
            "tags-int",
            ArtifactData::Strings(TAGS.iter().map(|(int, _)| SmolStr::from(*int)).collect()),
        )
        .unwrap()
        .add(
            "tags-ext",
            ArtifactData::Strings(TAGS.iter().map(|(_, ext)| SmolStr::from(*ext)).collect()),
        )
        .unwrap()
        .add(
            "suffixes",
            ArtifactData::Strings(SUFFIXES.iter().map(|s| SmolStr::from(*s)).collect()),
        )
        .unwrap()
        .add("paradigms", ArtifactData::Integers(paradigms().to_flat()))
        .unwrap()
        .add("words", ArtifactData::Automaton(&words))
        .unwrap()
        .add("probabilities", ArtifactData::Automaton(&probabilities))
        .unwrap()
        .add("prediction-suffixes-0", ArtifactData::Automaton(&suffixes_0))
        .unwrap()
        .add("prediction-suffixes-2", ArtifactData::Automaton(&suffixes_2))
        .unwrap();

    builder
}

pub fn thesaurus() -> Arc<Thesaurus> {
    Arc::new(thesaurus_builder().build().unwrap())
}

pub fn morph() -> Morph {
    Morph::from_thesaurus(thesaurus()).unwrap()
}

/// Exact dictionary parse of `word` as the given paradigm form.
pub fn dictionary_parse(thesaurus: &Arc<Thesaurus>, word: &str, paradigm: usize, form: usize) -> Parse {
    DictionaryParse::create(thesaurus, word, paradigm, form, 0, 0, "", "").unwrap()
}
