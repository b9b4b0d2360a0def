use crate::error::{Result, WalkerError};
use crate::neighbourhood;
use crate::tile_grid::{Mark, TileGrid};
use crate::tiled_map::TiledMap;
use crate::walker::{PathfinderKind, SearchNode, SearchStrategy, Walker, WalkerState};
use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::Point;
use indexmap::IndexMap;
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClosedEntry {
    parent: usize,
    cost: u32,
}

/// Follows parent indices from `goal` until reaching the node that is its own parent.
fn reverse_path(closed: &FxIndexMap<Point, ClosedEntry>, goal: usize) -> Vec<Point> {
    std::iter::successors(Some(goal), |&i| {
        closed
            .get_index(i)
            .map(|(_, entry)| entry.parent)
            .filter(|&parent| parent != i)
    })
    .filter_map(|i| closed.get_index(i).map(|(p, _)| *p))
    .collect()
}

fn check_in_map<G: TileGrid + ?Sized>(grid: &G, position: Point) -> Result<()> {
    if grid.in_map(position) {
        Ok(())
    } else {
        let (width, height) = grid.map_size();
        Err(WalkerError::InvalidArgument {
            position,
            width,
            height,
        })
    }
}

/// A [Walker] driven by the open-list policy `S`. All strategies share the expansion implemented
/// here: the popped node moves to the closed list, its tile is flagged visited, and every in-map
/// 8-neighbour that is walkable, unvisited and not already open is handed to the strategy.
///
/// The closed list is an insertion-ordered map from position to parent index, so a node's index
/// on the closed list never changes and backtracking walks parent indices directly.
///
/// The grid is shared with the driver and possibly other walkers. Only one walker may search a
/// grid at a time: walkers sharing a grid see each other's visited flags.
pub struct GridWalker<S, G = TiledMap> {
    strategy: S,
    tiled_map: Option<Rc<RefCell<G>>>,
    node_grid: Option<Rc<RefCell<G>>>,
    start: Point,
    end: Point,
    state: WalkerState,
    seeded: bool,
    open_set: FxHashSet<Point>,
    closed: FxIndexMap<Point, ClosedEntry>,
    goal: Option<usize>,
    path: Option<Vec<Point>>,
}

impl<S: SearchStrategy, G: TileGrid> GridWalker<S, G> {
    pub fn new(strategy: S, grid: Rc<RefCell<G>>) -> GridWalker<S, G> {
        let mut walker = GridWalker::without_grid(strategy);
        walker.tiled_map = Some(grid);
        walker
    }

    /// A walker that still needs a grid through [set_tiled_map](Self::set_tiled_map).
    pub fn without_grid(strategy: S) -> GridWalker<S, G> {
        GridWalker {
            strategy,
            tiled_map: None,
            node_grid: None,
            start: Point::new(0, 0),
            end: Point::new(0, 0),
            state: WalkerState::Searching,
            seeded: false,
            open_set: FxHashSet::default(),
            closed: FxIndexMap::default(),
            goal: None,
            path: None,
        }
    }

    /// Sets the grid used by the next call to [init](Walker::init).
    pub fn set_tiled_map(&mut self, grid: Rc<RefCell<G>>) {
        self.tiled_map = Some(grid);
    }

    pub fn tiled_map(&self) -> Option<&Rc<RefCell<G>>> {
        self.tiled_map.as_ref()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Empties both lists, un-visiting every closed tile and clearing its mark unless it is a
    /// Start or End marker.
    fn clear_lists(&mut self) {
        self.strategy.clear();
        self.open_set.clear();
        if let Some(grid) = &self.node_grid {
            let mut grid = grid.borrow_mut();
            for &position in self.closed.keys() {
                grid.set_visited(position, false);
                if !grid.mark(position).is_endpoint() {
                    grid.set_mark(position, Mark::None);
                }
            }
        }
        self.closed.clear();
        self.goal = None;
        self.path = None;
    }

    fn validate_position(&self, position: Point) -> Result<()> {
        match self.node_grid.as_ref().or(self.tiled_map.as_ref()) {
            Some(grid) => check_in_map(&*grid.borrow(), position),
            None => Ok(()),
        }
    }

    /// Admission test for a neighbour of the node being expanded.
    fn visit_grid_node(&mut self, grid: &G, position: Point, parent: usize, parent_cost: u32) {
        if grid.is_visited(position)
            || !grid.is_walkable(position)
            || self.open_set.contains(&position)
        {
            return;
        }
        let node = SearchNode {
            position,
            parent,
            cost: parent_cost.saturating_add(grid.tile_cost(position)),
        };
        self.strategy.push(node, self.end);
        self.open_set.insert(position);
    }
}

impl<S: SearchStrategy, G: TileGrid> Walker for GridWalker<S, G> {
    fn init(&mut self) -> Result<bool> {
        let grid = self.tiled_map.clone().ok_or(WalkerError::GridNotBound)?;
        if self.node_grid.is_some() {
            self.destroy();
        }
        let (width, height) = grid.borrow().map_size();
        self.node_grid = Some(grid);
        info!(
            "{} bound to a {}x{} tile grid",
            self.strategy.kind(),
            width,
            height
        );
        Ok(true)
    }

    fn destroy(&mut self) {
        self.clear_lists();
        self.node_grid = None;
        self.seeded = false;
        self.state = WalkerState::Searching;
    }

    fn reset(&mut self) -> Result<()> {
        let grid = self.node_grid.clone().ok_or(WalkerError::NotInitialized)?;
        {
            let grid = grid.borrow();
            check_in_map(&*grid, self.start)?;
            check_in_map(&*grid, self.end)?;
        }
        self.clear_lists();
        let start = SearchNode {
            position: self.start,
            parent: 0,
            cost: 0,
        };
        self.strategy.push(start, self.end);
        self.open_set.insert(self.start);
        self.state = WalkerState::Searching;
        self.seeded = true;
        debug!(
            "{} reset, searching from {} to {}",
            self.strategy.kind(),
            self.start,
            self.end
        );
        Ok(())
    }

    fn update(&mut self) -> Result<WalkerState> {
        let grid = self.node_grid.clone().ok_or(WalkerError::NotInitialized)?;
        if !self.seeded {
            return Err(WalkerError::NotReset);
        }
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        let node = match self.strategy.pop() {
            Some(node) => node,
            None => {
                info!(
                    "{}: open list exhausted, {} is not reachable from {}",
                    self.strategy.kind(),
                    self.end,
                    self.start
                );
                self.state = WalkerState::Unreachable;
                return Ok(self.state);
            }
        };
        self.open_set.remove(&node.position);

        let mut grid = grid.borrow_mut();
        grid.set_visited(node.position, true);
        let (index, _) = self.closed.insert_full(
            node.position,
            ClosedEntry {
                parent: node.parent,
                cost: node.cost,
            },
        );

        if node.position == self.end {
            info!(
                "{} reached {} after expanding {} nodes",
                self.strategy.kind(),
                self.end,
                self.closed.len()
            );
            self.goal = Some(index);
            self.state = WalkerState::GoalReached;
            return Ok(self.state);
        }
        if node.position != self.start && grid.mark(node.position) == Mark::None {
            grid.set_mark(node.position, Mark::Visited);
        }

        for neighbour in neighbourhood(&*grid, node.position) {
            self.visit_grid_node(&grid, neighbour, index, node.cost);
        }
        Ok(self.state)
    }

    fn back_tracing(&mut self) -> Result<Vec<Point>> {
        if self.state != WalkerState::GoalReached {
            return Err(WalkerError::GoalNotReached(self.state));
        }
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        // The end position may have moved since the search finished.
        let goal = self
            .goal
            .ok_or(WalkerError::GoalNotReached(self.state))?;
        let path = reverse_path(&self.closed, goal);
        debug!(
            "{} backtraced a path of {} tiles",
            self.strategy.kind(),
            path.len()
        );
        self.path = Some(path.clone());
        Ok(path)
    }

    fn set_start_position(&mut self, x: i32, y: i32) -> Result<()> {
        let position = Point::new(x, y);
        self.validate_position(position)?;
        self.start = position;
        Ok(())
    }

    fn set_end_position(&mut self, x: i32, y: i32) -> Result<()> {
        let position = Point::new(x, y);
        self.validate_position(position)?;
        self.end = position;
        Ok(())
    }

    fn start_position(&self) -> Point {
        self.start
    }

    fn end_position(&self) -> Point {
        self.end
    }

    fn state(&self) -> WalkerState {
        self.state
    }

    fn kind(&self) -> PathfinderKind {
        self.strategy.kind()
    }

    fn weighted_graph_supported(&self) -> bool {
        self.strategy.weighted_graph_supported()
    }

    fn heuristics_supported(&self) -> bool {
        self.strategy.heuristics_supported()
    }

    fn open_nodes(&self) -> Vec<SearchNode> {
        self.strategy.nodes()
    }

    fn closed_nodes(&self) -> Vec<SearchNode> {
        self.closed
            .iter()
            .map(|(&position, entry)| SearchNode {
                position,
                parent: entry.parent,
                cost: entry.cost,
            })
            .collect()
    }
}
