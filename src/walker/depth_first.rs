use crate::walker::{PathfinderKind, SearchNode, SearchStrategy};
use grid_util::Point;

/// Stack-ordered search: the most recently discovered tile is expanded next. With the fixed
/// compass expansion order the north-east neighbour is explored first. Paths are not shortest.
#[derive(Clone, Debug, Default)]
pub struct DepthFirstSearch {
    open: Vec<SearchNode>,
}

impl SearchStrategy for DepthFirstSearch {
    fn kind(&self) -> PathfinderKind {
        PathfinderKind::DepthFirst
    }

    fn push(&mut self, node: SearchNode, _goal: Point) {
        self.open.push(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.open.pop()
    }

    fn clear(&mut self) {
        self.open.clear();
    }

    fn len(&self) -> usize {
        self.open.len()
    }

    fn nodes(&self) -> Vec<SearchNode> {
        self.open.iter().rev().copied().collect()
    }
}
