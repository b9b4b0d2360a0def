use crate::walker::sorted::SortedOpenList;
use crate::walker::{PathfinderKind, SearchNode, SearchStrategy};
use grid_util::Point;

/// Uniform-cost search ordered by the accumulated cost of the tiles entered since the start.
///
/// A tile keeps the cost it was first discovered with. Since the cost of a step only depends on
/// the tile entered and nodes leave the open list in non-decreasing cost order, the first
/// discovery is already the cheapest one.
#[derive(Clone, Debug, Default)]
pub struct Dijkstra {
    open: SortedOpenList,
}

impl SearchStrategy for Dijkstra {
    fn kind(&self) -> PathfinderKind {
        PathfinderKind::Dijkstra
    }

    fn weighted_graph_supported(&self) -> bool {
        true
    }

    fn push(&mut self, node: SearchNode, _goal: Point) {
        self.open.insert(node.cost, node);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{path_cost, GridWalker, Tile, TiledMap, Walker, WalkerState};
    use grid_util::ValueGrid;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Asserts that an expensive tile in the middle is routed around.
    #[test]
    fn avoids_expensive_tile() {
        //  ___
        // |S..|
        // |.9.|
        // |..G|
        //  ___
        let grid = Rc::new(RefCell::new(TiledMap::new(3, 3, Tile::default())));
        grid.borrow_mut().set_cost(Point::new(1, 1), 9);
        let mut walker = GridWalker::new(Dijkstra::default(), Rc::clone(&grid));
        walker.init().unwrap();
        walker.set_end_position(2, 2).unwrap();
        walker.reset().unwrap();
        assert_eq!(walker.search_to_end(), Ok(WalkerState::GoalReached));
        let path = walker.back_tracing().unwrap();
        assert_eq!(path.len(), 4);
        assert!(!path.contains(&Point::new(1, 1)));
        assert_eq!(path_cost(&*grid.borrow(), &path), 3);
        let goal = walker.closed_nodes().last().copied().unwrap();
        assert_eq!(goal.cost, 3);
    }

    #[test]
    fn expansion_cost_never_decreases() {
        let grid = Rc::new(RefCell::new(TiledMap::new(6, 6, Tile::default())));
        {
            let mut map = grid.borrow_mut();
            for (i, (x, y)) in [(1, 0), (2, 2), (3, 1), (4, 4), (0, 3), (5, 2)]
                .into_iter()
                .enumerate()
            {
                map.set_cost(Point::new(x, y), 2 + i as u32);
            }
        }
        let mut walker = GridWalker::new(Dijkstra::default(), grid);
        walker.init().unwrap();
        walker.set_end_position(5, 5).unwrap();
        walker.reset().unwrap();
        walker.search_to_end().unwrap();
        let costs = walker
            .closed_nodes()
            .iter()
            .map(|n| n.cost)
            .collect::<Vec<_>>();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }
}
