//! Minimized acyclic word automaton with approximate lookup.
//!
//! A [`Dawg`] maps string keys to payloads. Besides exact lookup it can
//! enumerate every key reachable from a query within a budget of
//! stutter repairs (a doubled letter) and typo repairs (one substitution,
//! insertion, deletion or transposition each), following replacement
//! rules such as `е → ё` for free.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::constants::{AUTO_TYPOS, NO_VALUE};
use crate::types::StateIndex;

use self::worker::DawgWorker;

pub mod builder;
mod codec;
pub mod error;
mod node;
pub mod payload;
mod worker;

pub use self::builder::DawgBuilder;
pub use self::codec::payload_kind;
pub use self::error::DawgError;
pub use self::payload::{Payload, PayloadKind, SuffixStat, SuffixStats, WordForm, WordForms};

/// Characters of a query that may be read as another string at no cost.
pub type Replacements = HashMap<char, SmolStr>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct State {
    pub(crate) first: u32,
    pub(crate) count: u32,
    pub(crate) value: u32,
}

impl State {
    pub(crate) const fn empty() -> State {
        State {
            first: 0,
            count: 0,
            value: NO_VALUE,
        }
    }
}

/// An edge of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub(crate) symbol: char,
    pub(crate) target: StateIndex,
}

impl Transition {
    /// Character consumed by the edge.
    #[inline(always)]
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// State the edge leads to.
    #[inline(always)]
    pub fn target(&self) -> StateIndex {
        self.target
    }
}

/// How many typo repairs a lookup may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TypoBudgetRepr", into = "TypoBudgetRepr")]
pub enum TypoBudget {
    /// At most this many repairs.
    Fixed(u32),
    /// Start without repairs and allow more of them only for longer words
    /// that found nothing.
    Auto,
}

impl Default for TypoBudget {
    fn default() -> Self {
        TypoBudget::Fixed(0)
    }
}

impl TypoBudget {
    /// Upper bound on typos a single match can carry, `None` when unbounded.
    pub fn ceiling(&self) -> Option<u32> {
        match self {
            TypoBudget::Fixed(n) => Some(*n),
            TypoBudget::Auto => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AutoRepr {
    Auto,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TypoBudgetRepr {
    Fixed(u32),
    Named(AutoRepr),
}

impl From<TypoBudgetRepr> for TypoBudget {
    fn from(repr: TypoBudgetRepr) -> Self {
        match repr {
            TypoBudgetRepr::Fixed(n) => TypoBudget::Fixed(n),
            TypoBudgetRepr::Named(AutoRepr::Auto) => TypoBudget::Auto,
        }
    }
}

impl From<TypoBudget> for TypoBudgetRepr {
    fn from(budget: TypoBudget) -> Self {
        match budget {
            TypoBudget::Fixed(n) => TypoBudgetRepr::Fixed(n),
            TypoBudget::Auto => TypoBudgetRepr::Named(AutoRepr::Auto),
        }
    }
}

/// A key found by approximate lookup together with the repairs it needed.
#[derive(Debug, Clone, PartialEq)]
pub struct DawgMatch<'a, V> {
    /// The key as stored, after repairs.
    pub key: SmolStr,
    /// Payload of the key.
    pub value: &'a V,
    /// Doubled letters dropped from the query.
    pub stutter: u32,
    /// Typos repaired.
    pub typos: u32,
}

/// A directed acyclic word graph mapping keys to payloads of type `V`.
#[derive(Debug, Clone)]
pub struct Dawg<V> {
    states: Vec<State>,
    transitions: Vec<Transition>,
    values: Vec<V>,
}

impl<V> Default for Dawg<V> {
    fn default() -> Self {
        Dawg {
            states: vec![State::empty()],
            transitions: vec![],
            values: vec![],
        }
    }
}

impl<V> Dawg<V> {
    pub(crate) fn from_parts(
        states: Vec<State>,
        transitions: Vec<Transition>,
        values: Vec<V>,
    ) -> Dawg<V> {
        Dawg {
            states,
            transitions,
            values,
        }
    }

    /// The start state, always 0.
    #[inline(always)]
    pub fn root(&self) -> StateIndex {
        0
    }

    /// Number of states, the root included.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of edges.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Number of distinct payloads.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn states(&self) -> &[State] {
        &self.states
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    pub(crate) fn all_transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Outgoing transitions of `state`, sorted by symbol.
    #[inline(always)]
    pub fn transitions(&self, state: StateIndex) -> &[Transition] {
        match self.states.get(state as usize) {
            Some(s) => {
                let start = s.first as usize;
                let end = start + s.count as usize;
                self.transitions.get(start..end).unwrap_or(&[])
            }
            None => &[],
        }
    }

    /// The state reached from `state` over `symbol`.
    #[inline(always)]
    pub fn follow(&self, state: StateIndex, symbol: char) -> Option<StateIndex> {
        let transitions = self.transitions(state);
        transitions
            .binary_search_by_key(&symbol, |t| t.symbol)
            .ok()
            .map(|i| transitions[i].target)
    }

    /// The state reached from `state` over every character of `s`.
    pub fn follow_str(&self, state: StateIndex, s: &str) -> Option<StateIndex> {
        s.chars().try_fold(state, |state, ch| self.follow(state, ch))
    }

    /// Payload of `state`, if it ends a key.
    #[inline(always)]
    pub fn value(&self, state: StateIndex) -> Option<&V> {
        let s = self.states.get(state as usize)?;
        if s.value == NO_VALUE {
            return None;
        }
        self.values.get(s.value as usize)
    }

    /// True when `state` ends a key.
    #[inline(always)]
    pub fn is_final(&self, state: StateIndex) -> bool {
        self.value(state).is_some()
    }

    /// Exact lookup.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.follow_str(self.root(), key)
            .and_then(|state| self.value(state))
    }

    /// True when `key` is stored exactly.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Every key with its payload, in symbol order.
    pub fn entries(&self) -> Vec<(SmolStr, &V)> {
        let mut out = vec![];
        let mut stack: Vec<(StateIndex, String)> = vec![(self.root(), String::new())];

        while let Some((state, key)) = stack.pop() {
            if let Some(value) = self.value(state) {
                out.push((SmolStr::from(key.as_str()), value));
            }

            for t in self.transitions(state).iter().rev() {
                let mut next = key.clone();
                next.push(t.symbol);
                stack.push((t.target, next));
            }
        }

        out
    }

    /// Enumerates keys reachable from `query` within the given budgets.
    ///
    /// A `stutter` of `None` allows any number of stutter repairs. Each key is
    /// reported once, with its cheapest repair counts.
    pub fn find_all(
        &self,
        query: &str,
        replacements: &Replacements,
        stutter: Option<u32>,
        typos: u32,
    ) -> Vec<DawgMatch<'_, V>> {
        let worker = DawgWorker::new(
            self,
            query.chars().collect(),
            replacements,
            stutter.unwrap_or(u32::MAX),
            typos,
        );
        worker.find_all()
    }

    /// Like [`Dawg::find_all`], resolving an automatic typo budget.
    pub fn lookup(
        &self,
        query: &str,
        replacements: &Replacements,
        stutter: Option<u32>,
        typos: TypoBudget,
    ) -> Vec<DawgMatch<'_, V>> {
        match typos {
            TypoBudget::Fixed(n) => self.find_all(query, replacements, stutter, n),
            TypoBudget::Auto => {
                let len = query.chars().count();
                let mut found = self.find_all(query, replacements, stutter, 0);

                for (i, threshold) in AUTO_TYPOS.iter().enumerate() {
                    if !found.is_empty() || len <= *threshold {
                        break;
                    }
                    log::trace!("{}: escalating to {} typos", query, i + 1);
                    found = self.find_all(query, replacements, stutter, i as u32 + 1);
                }

                found
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_replacements() -> Replacements {
        Replacements::new()
    }

    fn yo() -> Replacements {
        let mut r = Replacements::new();
        r.insert('е', SmolStr::from("ё"));
        r
    }

    fn sample() -> Dawg<u32> {
        let mut builder = DawgBuilder::new();
        for (i, word) in ["дом", "дома", "домом", "дым", "ёж", "кот", "кошка"]
            .iter()
            .enumerate()
        {
            builder.insert(word, i as u32);
        }
        builder.build()
    }

    fn keys<V>(matches: &[DawgMatch<'_, V>]) -> Vec<String> {
        matches.iter().map(|m| m.key.to_string()).collect()
    }

    #[test]
    fn exact_lookup() {
        let dawg = sample();
        assert_eq!(dawg.get("дома"), Some(&1));
        assert_eq!(dawg.get("до"), None);
        assert!(dawg.contains("кошка"));
        assert!(!dawg.contains("кошк"));
        assert!(!dawg.contains(""));
    }

    #[test]
    fn zero_budget_hits_only_exact_keys() {
        let dawg = sample();
        let r = no_replacements();

        for word in ["дом", "дома", "домом", "дым", "ёж", "кот", "кошка"] {
            let found = dawg.find_all(word, &r, Some(0), 0);
            assert_eq!(keys(&found), vec![word.to_string()]);
            assert_eq!(found[0].stutter, 0);
            assert_eq!(found[0].typos, 0);
        }

        for word in ["до", "домаа", "дим", "еж", "коты"] {
            assert!(dawg.find_all(word, &r, Some(0), 0).is_empty(), "{}", word);
        }
    }

    #[test]
    fn replacement_is_free() {
        let dawg = sample();
        let found = dawg.find_all("еж", &yo(), Some(0), 0);
        assert_eq!(keys(&found), vec!["ёж"]);
        assert_eq!(found[0].typos, 0);
    }

    #[test]
    fn matches_outlive_replacements() {
        let dawg = sample();
        let found = {
            let replacements = yo();
            dawg.find_all("еж", &replacements, Some(0), 0)
        };

        assert_eq!(keys(&found), vec!["ёж"]);
        assert_eq!(found[0].value, &4);
    }

    #[test]
    fn stutter_repairs() {
        let dawg = sample();
        let r = no_replacements();

        let found = dawg.find_all("доммм", &r, None, 0);
        assert_eq!(keys(&found), vec!["дом"]);
        assert_eq!(found[0].stutter, 2);

        assert!(dawg.find_all("доммм", &r, Some(1), 0).is_empty());
        assert!(dawg.find_all("домм", &r, Some(0), 0).is_empty());
    }

    #[test]
    fn typo_repairs() {
        let dawg = sample();
        let r = no_replacements();

        // substitution
        let found = dawg.find_all("дим", &r, Some(0), 1);
        assert_eq!(keys(&found), vec!["дом", "дым"]);
        assert!(found.iter().all(|m| m.typos == 1));

        // transposition
        let found = dawg.find_all("кто", &r, Some(0), 1);
        assert_eq!(keys(&found), vec!["кот"]);

        // missing letter at the end
        let found = dawg.find_all("кошк", &r, Some(0), 1);
        assert_eq!(keys(&found), vec!["кошка"]);

        // extra letter
        let found = dawg.find_all("домаx", &r, Some(0), 1);
        assert!(keys(&found).contains(&"дома".to_string()));

        for m in dawg.find_all("дамом", &r, Some(0), 1) {
            assert!(strsim::damerau_levenshtein("дамом", &m.key) <= 1);
        }
    }

    #[test]
    fn cheapest_repair_wins() {
        let dawg = sample();
        let found = dawg.find_all("дом", &no_replacements(), Some(0), 2);
        let exact = found.iter().find(|m| m.key == "дом").unwrap();
        assert_eq!(exact.typos, 0);
    }

    #[test]
    fn auto_budget_escalates_for_long_words() {
        let dawg = sample();
        let r = no_replacements();

        let found = dawg.lookup("домох", &r, Some(0), TypoBudget::Auto);
        assert!(keys(&found).contains(&"домом".to_string()));

        assert!(dawg.lookup("дмо", &r, Some(0), TypoBudget::Auto).is_empty());
        assert_eq!(
            keys(&dawg.lookup("дом", &r, Some(0), TypoBudget::Auto)),
            vec!["дом"]
        );
    }

    #[test]
    fn entries_in_order() {
        let dawg = sample();
        let entries: Vec<String> = dawg.entries().into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            entries,
            vec!["дом", "дома", "домом", "дым", "кот", "кошка", "ёж"]
        );
    }

    #[test]
    fn empty_automaton() {
        let dawg: Dawg<u32> = Dawg::default();
        assert_eq!(dawg.state_count(), 1);
        assert!(dawg.find_all("а", &no_replacements(), None, 2).is_empty());
    }

    #[test]
    fn typo_budget_serde() {
        let auto: TypoBudget = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(auto, TypoBudget::Auto);
        let fixed: TypoBudget = serde_json::from_str("2").unwrap();
        assert_eq!(fixed, TypoBudget::Fixed(2));
        assert_eq!(serde_json::to_string(&TypoBudget::Auto).unwrap(), "\"auto\"");
        assert_eq!(TypoBudget::Auto.ceiling(), None);
    }
}
