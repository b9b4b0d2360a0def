use crate::walker::{PathfinderKind, SearchNode, SearchStrategy};
use grid_util::Point;
use std::collections::VecDeque;

/// Queue-ordered search. Tiles are expanded in order of discovery, so the backtraced path has the
/// fewest possible steps, ignoring tile costs.
#[derive(Clone, Debug, Default)]
pub struct BreadthFirstSearch {
    open: VecDeque<SearchNode>,
}

impl SearchStrategy for BreadthFirstSearch {
    fn kind(&self) -> PathfinderKind {
        PathfinderKind::BreadthFirst
    }

    fn push(&mut self, node: SearchNode, _goal: Point) {
        self.open.push_back(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.open.pop_front()
    }

    fn clear(&mut self) {
        self.open.clear();
    }

    fn len(&self) -> usize {
        self.open.len()
    }

    fn nodes(&self) -> Vec<SearchNode> {
        self.open.iter().copied().collect()
    }
}
