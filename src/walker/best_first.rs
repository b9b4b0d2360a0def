use crate::walker::sorted::SortedOpenList;
use crate::walker::{PathfinderKind, SearchNode, SearchStrategy};
use grid_util::Point;

/// Greedy search ordered by the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
/// of a tile to the goal. Tile costs are ignored and the resulting path is not necessarily the
/// shortest.
#[derive(Clone, Debug, Default)]
pub struct BestFirstSearch {
    open: SortedOpenList,
}

impl SearchStrategy for BestFirstSearch {
    fn kind(&self) -> PathfinderKind {
        PathfinderKind::BestFirst
    }

    fn heuristics_supported(&self) -> bool {
        true
    }

    fn push(&mut self, node: SearchNode, goal: Point) {
        let distance = node.position.manhattan_distance(&goal) as u32;
        self.open.insert(distance, node);
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
        self.open.nodes()
    }
}
