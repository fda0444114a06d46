use lifeguard::{Pool, Recycled};

use crate::types::StateIndex;

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: StateIndex,
    pub input_state: u32,
    pub stutter: u32,
    pub typos: u32,
    pub string: Vec<char>,
}

impl std::cmp::PartialEq for SearchNode {
    fn eq(&self, other: &SearchNode) -> bool {
        self.state == other.state
            && self.input_state == other.input_state
            && self.stutter == other.stutter
            && self.typos == other.typos
            && self.string == other.string
    }
}

impl std::cmp::Eq for SearchNode {}

impl lifeguard::Recycleable for SearchNode {
    fn new() -> Self {
        SearchNode {
            state: 0,
            input_state: 0,
            stutter: 0,
            typos: 0,
            string: Vec::with_capacity(16),
        }
    }

    fn reset(&mut self) {
        // Every field is overwritten by `advance`.
    }
}

impl SearchNode {
    #[inline(always)]
    pub fn empty(pool: &Pool<SearchNode>) -> Recycled<'_, SearchNode> {
        pool.attach(SearchNode {
            state: 0,
            input_state: 0,
            stutter: 0,
            typos: 0,
            string: vec![],
        })
    }

    #[inline(always)]
    pub fn last_symbol(&self) -> Option<char> {
        self.string.last().copied()
    }

    /// Moves to `target`, appending `symbols` to the matched key and
    /// charging the given repairs.
    #[inline(always)]
    pub fn advance<'a, I>(
        &self,
        pool: &'a Pool<SearchNode>,
        symbols: I,
        target: StateIndex,
        input_increment: u32,
        stutter: u32,
        typos: u32,
    ) -> Recycled<'a, SearchNode>
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = pool.new();

        if node.string != self.string {
            node.string.truncate(0);
            node.string.extend_from_slice(&self.string);
        }

        node.string.extend(symbols);
        node.state = target;
        node.input_state = self.input_state + input_increment;
        node.stutter = self.stutter + stutter;
        node.typos = self.typos + typos;

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_copies_and_charges() {
        let pool = Pool::with_size_and_max(4, 4);
        let root = SearchNode::empty(&pool);
        let a = root.advance(&pool, "до".chars(), 2, 1, 0, 0);
        let b = a.advance(&pool, std::iter::empty(), 2, 1, 1, 0);
        let c = b.advance(&pool, ['м'], 3, 0, 0, 1);

        assert_eq!(a.string, vec!['д', 'о']);
        assert_eq!(b.string, a.string);
        assert_eq!(b.stutter, 1);
        assert_eq!(b.input_state, 2);
        assert_eq!(c.last_symbol(), Some('м'));
        assert_eq!(c.typos, 1);
        assert_eq!(c.stutter, 1);
        assert_eq!(root.string, Vec::<char>::new());
    }
}
