use crate::error::{Result, WalkerError};
use crate::tile_grid::TileGrid;
use core::fmt;
use grid_util::Point;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

pub mod astar;
pub mod best_first;
pub mod breadth_first;
pub mod depth_first;
pub mod dijkstra;
pub mod grid_walker;
mod sorted;

use astar::AStar;
use best_first::BestFirstSearch;
use breadth_first::BreadthFirstSearch;
use depth_first::DepthFirstSearch;
use dijkstra::Dijkstra;
use grid_walker::GridWalker;

/// Progress of a search. [WalkerState::GoalReached] and [WalkerState::Unreachable] are terminal
/// until the walker is reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WalkerState {
    Searching,
    GoalReached,
    Unreachable,
}

impl WalkerState {
    pub fn is_terminal(self) -> bool {
        self != WalkerState::Searching
    }
}

impl fmt::Display for WalkerState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            WalkerState::Searching => "still searching",
            WalkerState::GoalReached => "at the goal",
            WalkerState::Unreachable => "unable to reach the goal",
        };
        write!(f, "{}", s)
    }
}

/// A tile on the open or closed list. `parent` is the closed-list index of the node that
/// discovered this one; the start node is its own parent at index 0. `cost` accumulates the costs
/// of the tiles entered from the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchNode {
    pub position: Point,
    pub parent: usize,
    pub cost: u32,
}

/// Open-list policy of a search strategy. The [GridWalker] decides which tiles are admitted, the
/// strategy only decides in which order admitted tiles are expanded.
pub trait SearchStrategy {
    fn kind(&self) -> PathfinderKind;

    /// Whether tile costs influence the expansion order.
    fn weighted_graph_supported(&self) -> bool {
        false
    }
    /// Whether a distance estimate to the goal influences the expansion order.
    fn heuristics_supported(&self) -> bool {
        false
    }

    fn push(&mut self, node: SearchNode, goal: Point);
    fn pop(&mut self) -> Option<SearchNode>;
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Snapshot of the open list in the order it would be popped.
    fn nodes(&self) -> Vec<SearchNode>;
}

/// Step-driven search over a [TileGrid]. A driver calls [reset](Walker::reset) once, then
/// [update](Walker::update) once per tick until a terminal [WalkerState] is returned, and on
/// [WalkerState::GoalReached] fetches the path with [back_tracing](Walker::back_tracing).
pub trait Walker {
    /// Binds the walker to its tile grid, tearing down any previous binding. Returns `true` once
    /// the walker is ready.
    fn init(&mut self) -> Result<bool>;
    /// Drops the search state, restores the tiles it touched and unbinds the grid.
    fn destroy(&mut self);
    /// Discards any search in progress and seeds the open list with the start position.
    fn reset(&mut self) -> Result<()>;
    /// Pops one node from the open list and expands its neighbours.
    fn update(&mut self) -> Result<WalkerState>;
    /// The path from the end position back to the start position, both included.
    fn back_tracing(&mut self) -> Result<Vec<Point>>;

    fn set_start_position(&mut self, x: i32, y: i32) -> Result<()>;
    fn set_end_position(&mut self, x: i32, y: i32) -> Result<()>;
    fn start_position(&self) -> Point;
    fn end_position(&self) -> Point;
    fn state(&self) -> WalkerState;

    fn kind(&self) -> PathfinderKind;
    fn weighted_graph_supported(&self) -> bool;
    fn heuristics_supported(&self) -> bool;

    fn open_nodes(&self) -> Vec<SearchNode>;
    fn closed_nodes(&self) -> Vec<SearchNode>;

    /// Calls [update](Walker::update) until the search ends. Terminates because every tile is
    /// expanded at most once.
    fn search_to_end(&mut self) -> Result<WalkerState> {
        loop {
            let state = self.update()?;
            if state.is_terminal() {
                return Ok(state);
            }
        }
    }
}

/// The available search strategies, in the order a driver lists them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathfinderKind {
    DepthFirst,
    BreadthFirst,
    BestFirst,
    Dijkstra,
    AStar,
}

impl PathfinderKind {
    pub const ALL: [PathfinderKind; 5] = [
        PathfinderKind::DepthFirst,
        PathfinderKind::BreadthFirst,
        PathfinderKind::BestFirst,
        PathfinderKind::Dijkstra,
        PathfinderKind::AStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PathfinderKind::DepthFirst => "Depth First Search",
            PathfinderKind::BreadthFirst => "Breadth First Search",
            PathfinderKind::BestFirst => "Best First Search",
            PathfinderKind::Dijkstra => "Dijkstra",
            PathfinderKind::AStar => "A*",
        }
    }

    /// Creates a walker of this kind on the given grid. The walker still needs
    /// [init](Walker::init) before use.
    pub fn create_walker<G: TileGrid + 'static>(self, grid: Rc<RefCell<G>>) -> Box<dyn Walker> {
        match self {
            PathfinderKind::DepthFirst => {
                Box::new(GridWalker::new(DepthFirstSearch::default(), grid))
            }
            PathfinderKind::BreadthFirst => {
                Box::new(GridWalker::new(BreadthFirstSearch::default(), grid))
            }
            PathfinderKind::BestFirst => {
                Box::new(GridWalker::new(BestFirstSearch::default(), grid))
            }
            PathfinderKind::Dijkstra => Box::new(GridWalker::new(Dijkstra::default(), grid)),
            PathfinderKind::AStar => Box::new(GridWalker::new(AStar::default(), grid)),
        }
    }
}

impl fmt::Display for PathfinderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PathfinderKind {
    type Err = WalkerError;

    fn from_str(s: &str) -> Result<PathfinderKind> {
        let key = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "dfs" | "depthfirst" | "depthfirstsearch" => Ok(PathfinderKind::DepthFirst),
            "bfs" | "breadthfirst" | "breadthfirstsearch" => Ok(PathfinderKind::BreadthFirst),
            "best" | "greedy" | "bestfirst" | "bestfirstsearch" => Ok(PathfinderKind::BestFirst),
            "dijkstra" | "ucs" | "uniformcost" | "uniformcostsearch" => {
                Ok(PathfinderKind::Dijkstra)
            }
            "a*" | "astar" => Ok(PathfinderKind::AStar),
            _ => Err(WalkerError::UnknownPathfinder(s.to_owned())),
        }
    }
}
