//! Case folding and capitalization checks for Cyrillic words.
use smol_str::SmolStr;

/// Lower-cases every character.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Upper-cases every character.
#[inline(always)]
pub fn upper_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_uppercase().collect::<String>())
        .collect::<SmolStr>()
}

/// True when upper-casing leaves the word unchanged.
pub fn is_all_caps(word: &str) -> bool {
    upper_case(word) == word
}

/// A capital first letter followed by a tail that is not all capitals, as in
/// a proper name (`Иван`, but neither `иван` nor `ООН`).
///
/// Always false when case is ignored.
pub fn is_capitalized(word: &str, ignore_case: bool) -> bool {
    if ignore_case {
        return false;
    }

    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => !is_all_caps(chars.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        assert_eq!(lower_case("ПоМоГи"), "помоги");
        assert_eq!(upper_case("ёж"), "ЁЖ");
        assert!(is_all_caps("ООН"));
        assert!(is_all_caps("42"));
        assert!(!is_all_caps("Оон"));
    }

    #[test]
    fn capitalization() {
        assert!(is_capitalized("Иван", false));
        assert!(is_capitalized("Ив", false));
        assert!(!is_capitalized("Иван", true));
        assert!(!is_capitalized("иван", false));
        assert!(!is_capitalized("ООН", false));
        assert!(!is_capitalized("И", false));
        assert!(!is_capitalized("", false));
    }
}
