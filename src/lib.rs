//! # grid_walker
//!
//! Incremental pathfinding on weighted tile maps. A [Walker] explores a [TileGrid] one node per
//! [update](Walker::update) call so that a game loop can animate the search frame by frame, and
//! reconstructs the found path with [back_tracing](Walker::back_tracing).
//!
//! Five strategies share the same expansion over the
//! [8-neighbourhood](https://en.wikipedia.org/wiki/Moore_neighborhood) and differ only in how
//! their open list orders discovered tiles:
//!
//! | Strategy | Open list | Weighted | Heuristic |
//! |---|---|---|---|
//! | [DepthFirstSearch] | stack | no | no |
//! | [BreadthFirstSearch] | queue | no | no |
//! | [BestFirstSearch] | sorted by Manhattan distance to the goal | no | yes |
//! | [Dijkstra] | sorted by accumulated tile cost | yes | no |
//! | [AStar] | sorted by accumulated cost plus Manhattan distance | yes | yes |
//!
//! Walkers keep the first parent that discovers a tile and never revisit a tile once it has been
//! expanded. Because each step costs the cost of the tile entered, Dijkstra still returns a
//! cheapest path; A* uses the Manhattan distance, which can overestimate under diagonal movement,
//! so its paths may cost more than Dijkstra's.
pub mod error;
pub mod tile_grid;
pub mod tiled_map;
pub mod walker;
pub mod walker_set;

pub use error::{Result, WalkerError};
pub use tile_grid::{Mark, TerrainType, Tile, TileGrid};
pub use tiled_map::TiledMap;
pub use walker::astar::AStar;
pub use walker::best_first::BestFirstSearch;
pub use walker::breadth_first::BreadthFirstSearch;
pub use walker::depth_first::DepthFirstSearch;
pub use walker::dijkstra::Dijkstra;
pub use walker::grid_walker::GridWalker;
pub use walker::{PathfinderKind, SearchNode, SearchStrategy, Walker, WalkerState};
pub use walker_set::WalkerSet;

use grid_util::Point;
use itertools::Itertools;
use smallvec::SmallVec;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Neighbour offsets in expansion order: E, SE, S, SW, W, NW, N, NE, with y growing southwards.
pub const COMPASS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// The in-map 8-neighbours of `pos` in [COMPASS] order, regardless of terrain.
pub fn neighbourhood<G: TileGrid + ?Sized>(grid: &G, pos: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    COMPASS
        .iter()
        .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
        .filter(|p| grid.in_map(*p))
        .collect()
}

/// Sum of the costs of the tiles entered along a path as returned by
/// [back_tracing](Walker::back_tracing), i.e. every tile except the start at the end of the path.
/// Saturates like the cost accumulated by the walkers.
pub fn path_cost<G: TileGrid + ?Sized>(grid: &G, path: &[Point]) -> u32 {
    match path.split_last() {
        Some((_start, entered)) => entered
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(grid.tile_cost(*p))),
        None => 0,
    }
}

/// Checks that a path is non-empty, lies on walkable tiles and only moves between 8-neighbours.
pub fn is_walkable_path<G: TileGrid + ?Sized>(grid: &G, path: &[Point]) -> bool {
    !path.is_empty()
        && path.iter().all(|p| grid.in_map(*p) && grid.is_walkable(*p))
        && path.iter().tuple_windows().all(|(a, b)| {
            let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
            dx.max(dy) == 1
        })
}
