use crate::walker::sorted::SortedOpenList;
use crate::walker::{PathfinderKind, SearchNode, SearchStrategy};
use grid_util::Point;

/// A* ordered by accumulated cost plus the Manhattan distance to the goal.
///
/// Diagonal steps cost the same as straight ones, so the Manhattan distance can overestimate the
/// remaining cost and tiles keep the cost they were first discovered with. Paths are therefore not
/// guaranteed to be as cheap as those found by [Dijkstra](super::dijkstra::Dijkstra).
#[derive(Clone, Debug, Default)]
pub struct AStar {
    open: SortedOpenList,
}

impl AStar {
    fn heuristic(position: &Point, goal: &Point) -> u32 {
        position.manhattan_distance(goal) as u32
    }
}

impl SearchStrategy for AStar {
    fn kind(&self) -> PathfinderKind {
        PathfinderKind::AStar
    }

    fn weighted_graph_supported(&self) -> bool {
        true
    }

    fn heuristics_supported(&self) -> bool {
        true
    }

    fn push(&mut self, node: SearchNode, goal: Point) {
        let estimate = node
            .cost
            .saturating_add(AStar::heuristic(&node.position, &goal));
        self.open.insert(estimate, node);
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

    fn solve(grid: &Rc<RefCell<TiledMap>>, end: Point) -> (GridWalker<AStar>, Vec<Point>) {
        let mut walker = GridWalker::new(AStar::default(), Rc::clone(grid));
        walker.init().unwrap();
        walker.set_end_position(end.x, end.y).unwrap();
        walker.reset().unwrap();
        assert_eq!(walker.search_to_end(), Ok(WalkerState::GoalReached));
        let path = walker.back_tracing().unwrap();
        (walker, path)
    }

    #[test]
    fn single_diagonal_path() {
        let grid = Rc::new(RefCell::new(TiledMap::new(3, 3, Tile::default())));
        let (walker, path) = solve(&grid, Point::new(2, 2));
        assert_eq!(
            path,
            vec![Point::new(2, 2), Point::new(1, 1), Point::new(0, 0)]
        );
        assert_eq!(walker.closed_nodes().len(), 3);
    }

    #[test]
    fn routes_around_expensive_tile() {
        let grid = Rc::new(RefCell::new(TiledMap::new(3, 3, Tile::default())));
        grid.borrow_mut().set_cost(Point::new(1, 1), 9);
        let (_, path) = solve(&grid, Point::new(2, 2));
        assert_eq!(
            path,
            vec![
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(0, 0)
            ]
        );
        assert_eq!(path_cost(&*grid.borrow(), &path), 3);
    }

    #[test]
    fn estimate_orders_open_list() {
        let grid = Rc::new(RefCell::new(TiledMap::new(3, 3, Tile::default())));
        grid.borrow_mut().set_cost(Point::new(1, 1), 9);
        let mut walker = GridWalker::new(AStar::default(), grid);
        walker.init().unwrap();
        walker.set_end_position(2, 2).unwrap();
        walker.reset().unwrap();
        walker.update().unwrap();
        let open = walker.open_nodes();
        let positions = open.iter().map(|n| n.position).collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
        assert_eq!(open[2].cost, 9);
    }
}
