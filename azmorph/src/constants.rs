/// Paradigm prefix strings indexed by the prefix id stored in a paradigm.
pub const PARADIGM_PREFIXES: [&str; 3] = ["", "по", "наи"];

/// Word length thresholds above which an automatic typo budget escalates.
pub const AUTO_TYPOS: [usize; 2] = [4, 9];

pub const TYPO_PENALTY: f64 = 0.3;
pub const STUTTER_PENALTY: f64 = 0.6;
pub const COMBINED_PENALTY: f64 = 0.8;

/// Occurrence counts in the probability automaton are scaled by this.
pub const PROBABILITY_SCALE: f64 = 1_000_000.0;

/// Capital letters a Russian abbreviation or initial is made of.
pub const INITIALS: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЭЮЯ";

/// Grammemes that must agree between the parts of a hyphenated compound.
pub const AGREEMENT_GRAMMEMES: [&str; 5] = ["POST", "NMbr", "CAse", "PErs", "TEns"];

pub const DAWG_MAGIC: &[u8; 4] = b"AZDW";
pub const DAWG_VERSION: u16 = 1;
pub const DAWG_HEADER_SIZE: usize = 20;
pub const STATE_RECORD_SIZE: usize = 12;
pub const TRANSITION_RECORD_SIZE: usize = 8;
pub const NO_VALUE: u32 = u32::MAX;
pub const NODE_POOL_SIZE: usize = 128;

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    #[test]
    fn test_DAWG_HEADER_SIZE() {
        use std::mem;

        let c = DAWG_MAGIC.len() + 2 * mem::size_of::<u16>() + 3 * mem::size_of::<u32>();

        assert!(DAWG_HEADER_SIZE == c);
    }

    #[test]
    fn test_STATE_RECORD_SIZE() {
        use crate::types::StateIndex;
        use std::mem;

        assert!(STATE_RECORD_SIZE == 3 * mem::size_of::<StateIndex>());
        assert!(TRANSITION_RECORD_SIZE == mem::size_of::<u32>() + mem::size_of::<StateIndex>());
    }

    #[test]
    fn test_INITIALS() {
        assert_eq!(INITIALS.chars().count(), 30);
        assert!(!INITIALS.contains('Ь'));
    }
}
