//! Incremental construction of a minimized automaton.
use std::collections::BTreeMap;
use std::hash::Hash;

use hashbrown::HashMap;

use super::{Dawg, State, Transition};
use crate::constants::NO_VALUE;
use crate::types::StateIndex;

#[derive(Debug)]
struct TrieNode<V> {
    edges: BTreeMap<char, usize>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn new() -> TrieNode<V> {
        TrieNode {
            edges: BTreeMap::new(),
            value: None,
        }
    }
}

/// Registry key of a reduced state: two states with the same payload and
/// the same outgoing transitions are merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StateSignature {
    value: u32,
    edges: Vec<(char, StateIndex)>,
}

/// Collects key/payload pairs and builds a [`Dawg`] from them.
///
/// Inserting a key twice replaces its payload.
#[derive(Debug)]
pub struct DawgBuilder<V> {
    nodes: Vec<TrieNode<V>>,
    len: usize,
}

impl<V> Default for DawgBuilder<V> {
    fn default() -> Self {
        DawgBuilder::new()
    }
}

impl<V> DawgBuilder<V> {
    /// An empty builder.
    pub fn new() -> DawgBuilder<V> {
        DawgBuilder {
            nodes: vec![TrieNode::new()],
            len: 0,
        }
    }

    /// Number of distinct keys inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before the first insert.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `key`, returning the payload it replaces.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut current = 0;

        for ch in key.chars() {
            current = match self.nodes[current].edges.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[current].edges.insert(ch, next);
                    next
                }
            };
        }

        let previous = self.nodes[current].value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }
}

impl<V: Clone + Eq + Hash> DawgBuilder<V> {
    /// Minimizes the collected keys into an automaton.
    pub fn build(self) -> Dawg<V> {
        let mut reducer = Reducer {
            nodes: &self.nodes,
            register: HashMap::new(),
            signatures: vec![],
            values: vec![],
            value_ids: HashMap::new(),
        };

        reducer.reduce(0);

        let Reducer {
            signatures, values, ..
        } = reducer;

        // Reduced states are numbered children first, so the root came last.
        // Reverse the numbering to put the root at state 0.
        let count = signatures.len() as StateIndex;
        let renumber = |id: StateIndex| count - 1 - id;

        let mut states = Vec::with_capacity(signatures.len());
        let mut transitions = vec![];

        for signature in signatures.iter().rev() {
            states.push(State {
                first: transitions.len() as u32,
                count: signature.edges.len() as u32,
                value: signature.value,
            });

            for &(symbol, target) in &signature.edges {
                transitions.push(Transition {
                    symbol,
                    target: renumber(target),
                });
            }
        }

        log::debug!(
            "built automaton: {} keys, {} states, {} transitions, {} values",
            self.len,
            states.len(),
            transitions.len(),
            values.len()
        );

        Dawg::from_parts(states, transitions, values)
    }
}

struct Reducer<'a, V> {
    nodes: &'a [TrieNode<V>],
    register: HashMap<StateSignature, StateIndex>,
    signatures: Vec<StateSignature>,
    values: Vec<V>,
    value_ids: HashMap<V, u32>,
}

impl<'a, V: Clone + Eq + Hash> Reducer<'a, V> {
    fn intern(&mut self, value: &V) -> u32 {
        if let Some(&id) = self.value_ids.get(value) {
            return id;
        }

        let id = self.values.len() as u32;
        self.values.push(value.clone());
        self.value_ids.insert(value.clone(), id);
        id
    }

    fn reduce(&mut self, node: usize) -> StateIndex {
        let nodes = self.nodes;
        let mut edges = Vec::with_capacity(nodes[node].edges.len());

        for (&symbol, &child) in &nodes[node].edges {
            edges.push((symbol, self.reduce(child)));
        }

        let value = match &nodes[node].value {
            Some(v) => self.intern(v),
            None => NO_VALUE,
        };

        let signature = StateSignature { value, edges };

        if let Some(&id) = self.register.get(&signature) {
            return id;
        }

        let id = self.signatures.len() as StateIndex;
        self.signatures.push(signature.clone());
        self.register.insert(signature, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_common_suffixes() {
        let mut builder = DawgBuilder::new();
        builder.insert("дома", 1u32);
        builder.insert("рома", 1u32);
        builder.insert("тома", 1u32);
        let dawg = builder.build();

        // root, a single state after any first letter, then "о", "м", "а"
        assert_eq!(dawg.state_count(), 5);
        assert_eq!(dawg.value_count(), 1);
        assert_eq!(dawg.get("рома"), Some(&1));
    }

    #[test]
    fn different_payloads_are_not_merged() {
        let mut builder = DawgBuilder::new();
        builder.insert("да", 1u32);
        builder.insert("на", 2u32);
        let dawg = builder.build();

        assert_eq!(dawg.get("да"), Some(&1));
        assert_eq!(dawg.get("на"), Some(&2));
        assert_eq!(dawg.value_count(), 2);
    }

    #[test]
    fn insert_replaces() {
        let mut builder = DawgBuilder::new();
        assert_eq!(builder.insert("кот", 1u32), None);
        assert_eq!(builder.insert("кот", 2u32), Some(1));
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.build().get("кот"), Some(&2));
    }

    #[test]
    fn empty_key() {
        let mut builder = DawgBuilder::new();
        builder.insert("", 7u32);
        let dawg = builder.build();
        assert_eq!(dawg.get(""), Some(&7));
        assert_eq!(dawg.state_count(), 1);
    }
}
