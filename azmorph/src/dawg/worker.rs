use std::iter;

use hashbrown::HashMap;
use lifeguard::{Pool, Recycled};
use smol_str::SmolStr;

use super::node::SearchNode;
use super::{Dawg, DawgMatch, Replacements};
use crate::constants::NODE_POOL_SIZE;
use crate::types::StateIndex;

#[inline(always)]
fn search_start_node(pool: &Pool<SearchNode>) -> Vec<Recycled<'_, SearchNode>> {
    let mut nodes = Vec::with_capacity(256);
    nodes.push(SearchNode::empty(pool));
    nodes
}

pub(crate) struct DawgWorker<'a, 'r, V> {
    dawg: &'a Dawg<V>,
    input: Vec<char>,
    replacements: &'r Replacements,
    max_stutter: u32,
    max_typos: u32,
}

impl<'a, 'r, V> DawgWorker<'a, 'r, V> {
    #[inline(always)]
    pub(crate) fn new(
        dawg: &'a Dawg<V>,
        input: Vec<char>,
        replacements: &'r Replacements,
        max_stutter: u32,
        max_typos: u32,
    ) -> DawgWorker<'a, 'r, V> {
        DawgWorker {
            dawg,
            input,
            replacements,
            max_stutter,
            max_typos,
        }
    }

    #[inline(always)]
    fn consume_input<'p>(
        &self,
        pool: &'p Pool<SearchNode>,
        next_node: &SearchNode,
        symbol: char,
        output_nodes: &mut Vec<Recycled<'p, SearchNode>>,
    ) {
        if let Some(target) = self.dawg.follow(next_node.state, symbol) {
            output_nodes.push(next_node.advance(pool, iter::once(symbol), target, 1, 0, 0));
        }

        if let Some(replacement) = self.replacements.get(&symbol) {
            if let Some(target) = self.dawg.follow_str(next_node.state, replacement) {
                output_nodes.push(next_node.advance(pool, replacement.chars(), target, 1, 0, 0));
            }
        }
    }

    #[inline(always)]
    fn consume_stutter<'p>(
        &self,
        pool: &'p Pool<SearchNode>,
        next_node: &SearchNode,
        symbol: char,
        output_nodes: &mut Vec<Recycled<'p, SearchNode>>,
    ) {
        if next_node.typos > 0 || next_node.stutter >= self.max_stutter {
            return;
        }

        if next_node.last_symbol() == Some(symbol) {
            output_nodes.push(next_node.advance(
                pool,
                iter::empty(),
                next_node.state,
                1,
                1,
                0,
            ));
        }
    }

    #[inline(always)]
    fn consume_typos<'p>(
        &self,
        pool: &'p Pool<SearchNode>,
        next_node: &SearchNode,
        output_nodes: &mut Vec<Recycled<'p, SearchNode>>,
    ) {
        if next_node.stutter > 0 || next_node.typos >= self.max_typos {
            return;
        }

        let position = next_node.input_state as usize;
        let symbol = self.input.get(position).copied();

        for transition in self.dawg.transitions(next_node.state) {
            // letter missing from the input
            output_nodes.push(next_node.advance(
                pool,
                iter::once(transition.symbol),
                transition.target,
                0,
                0,
                1,
            ));

            // wrong letter
            if let Some(symbol) = symbol {
                if transition.symbol != symbol {
                    output_nodes.push(next_node.advance(
                        pool,
                        iter::once(transition.symbol),
                        transition.target,
                        1,
                        0,
                        1,
                    ));
                }
            }
        }

        let symbol = match symbol {
            Some(v) => v,
            None => return,
        };

        // extra letter
        output_nodes.push(next_node.advance(pool, iter::empty(), next_node.state, 1, 0, 1));

        // swapped letters
        if let Some(&following) = self.input.get(position + 1) {
            if following != symbol {
                let target = self
                    .dawg
                    .follow(next_node.state, following)
                    .and_then(|state| self.dawg.follow(state, symbol));

                if let Some(target) = target {
                    output_nodes.push(next_node.advance(
                        pool,
                        [following, symbol],
                        target,
                        2,
                        0,
                        1,
                    ));
                }
            }
        }
    }

    pub(crate) fn find_all(&self) -> Vec<DawgMatch<'a, V>> {
        let dawg = self.dawg;
        let pool = Pool::with_size_and_max(NODE_POOL_SIZE, NODE_POOL_SIZE);
        let mut nodes = search_start_node(&pool);
        let mut found: HashMap<SmolStr, ((u32, u32), StateIndex)> = HashMap::new();
        let mut iteration_count = 0usize;

        while let Some(next_node) = nodes.pop() {
            iteration_count += 1;

            let position = next_node.input_state as usize;

            if position == self.input.len() {
                if dawg.is_final(next_node.state) {
                    let key: SmolStr = next_node.string.iter().copied().collect();
                    let cost = (next_node.typos, next_node.stutter);
                    let entry = found.entry(key).or_insert((cost, next_node.state));

                    if entry.0 > cost {
                        *entry = (cost, next_node.state);
                    }
                }
            } else {
                let symbol = self.input[position];
                self.consume_input(&pool, &next_node, symbol, &mut nodes);
                self.consume_stutter(&pool, &next_node, symbol, &mut nodes);
            }

            self.consume_typos(&pool, &next_node, &mut nodes);
        }

        log::trace!(
            "{}: {} keys after {} iterations",
            self.input.iter().collect::<String>(),
            found.len(),
            iteration_count
        );

        let mut matches: Vec<DawgMatch<'a, V>> = found
            .into_iter()
            .filter_map(|(key, ((typos, stutter), state))| {
                dawg.value(state).map(|value| DawgMatch {
                    key,
                    value,
                    stutter,
                    typos,
                })
            })
            .collect();

        matches.sort_by(|a, b| (a.typos, a.stutter, &a.key).cmp(&(b.typos, b.stutter, &b.key)));
        matches
    }
}
