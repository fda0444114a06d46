/// Index of a state in an automaton.
pub type StateIndex = u32;
/// Index of a paradigm in the dictionary.
pub type ParadigmIndex = u16;
/// Index of a form within its paradigm.
pub type FormIndex = u16;
/// Confidence of a parse, higher is better.
pub type Score = f64;
