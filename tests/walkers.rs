use grid_util::{Point, ValueGrid};
use grid_walker::{
    path_cost, Mark, PathfinderKind, TerrainType, Tile, TileGrid, TiledMap, Walker, WalkerError,
    WalkerSet, WalkerState,
};
use std::cell::RefCell;
use std::rc::Rc;

fn shared(map: TiledMap) -> Rc<RefCell<TiledMap>> {
    Rc::new(RefCell::new(map))
}

fn prepared(kind: PathfinderKind, grid: &Rc<RefCell<TiledMap>>, start: Point, end: Point) -> Box<dyn Walker> {
    let mut walker = kind.create_walker(Rc::clone(grid));
    walker.init().unwrap();
    walker.set_start_position(start.x, start.y).unwrap();
    walker.set_end_position(end.x, end.y).unwrap();
    walker.reset().unwrap();
    walker
}

/// Obstacle in the middle of a 3x3 grid; every strategy reaches the far corner in three tiles.
#[test]
fn corner_to_corner_around_obstacle() {
    //  ___
    // |S..|
    // |.#.|
    // |..G|
    //  ___
    for kind in PathfinderKind::ALL {
        let mut map = TiledMap::new(3, 3, Tile::default());
        map.set_terrain(Point::new(1, 1), TerrainType::Obstacle);
        let grid = shared(map);
        let mut walker = prepared(kind, &grid, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(walker.search_to_end(), Ok(WalkerState::GoalReached), "{kind}");
        let path = walker.back_tracing().unwrap();
        assert_eq!(path.first(), Some(&Point::new(2, 2)));
        assert_eq!(path.last(), Some(&Point::new(0, 0)));
        assert!(!path.contains(&Point::new(1, 1)));
        if kind != PathfinderKind::DepthFirst {
            assert_eq!(path.len(), 4, "{kind}: {path:?}");
        }
    }
}

#[test]
fn wall_makes_goal_unreachable() {
    //  _____
    // |S.#..|
    // |..#..|
    // |..#.G|
    //  _____
    for kind in PathfinderKind::ALL {
        let mut map = TiledMap::new(5, 3, Tile::default());
        map.set_rect_terrain(2, 0, 1, 3, TerrainType::Obstacle);
        map.generate_components();
        assert!(map.unreachable(&Point::new(0, 0), &Point::new(4, 2)));
        let grid = shared(map);
        let mut walker = prepared(kind, &grid, Point::new(0, 0), Point::new(4, 2));
        assert_eq!(walker.search_to_end(), Ok(WalkerState::Unreachable), "{kind}");
        assert_eq!(walker.closed_nodes().len(), 6);
        assert!(walker.open_nodes().is_empty());
        assert_eq!(
            walker.back_tracing(),
            Err(WalkerError::GoalNotReached(WalkerState::Unreachable))
        );
        // Further updates keep reporting the terminal state.
        assert_eq!(walker.update(), Ok(WalkerState::Unreachable));
    }
}

#[test]
fn goal_on_obstacle_is_unreachable() {
    let mut map = TiledMap::new(3, 3, Tile::default());
    map.set_terrain(Point::new(2, 2), TerrainType::Obstacle);
    let grid = shared(map);
    let mut walker = prepared(PathfinderKind::BreadthFirst, &grid, Point::new(0, 0), Point::new(2, 2));
    assert_eq!(walker.search_to_end(), Ok(WalkerState::Unreachable));
    assert_eq!(walker.closed_nodes().len(), 8);
}

#[test]
fn start_equals_end() {
    for kind in PathfinderKind::ALL {
        let grid = shared(TiledMap::new(4, 4, Tile::default()));
        let mut walker = prepared(kind, &grid, Point::new(2, 1), Point::new(2, 1));
        assert_eq!(walker.update(), Ok(WalkerState::GoalReached));
        assert_eq!(walker.back_tracing(), Ok(vec![Point::new(2, 1)]));
    }
}

#[test]
fn weighted_strategies_agree_on_cost() {
    //  ____
    // |S14.|
    // |.9..|
    // |..2.|
    // |1..G|
    //  ____
    let mut map = TiledMap::new(4, 4, Tile::default());
    map.set_cost(Point::new(1, 0), 1);
    map.set_cost(Point::new(2, 0), 4);
    map.set_cost(Point::new(1, 1), 9);
    map.set_cost(Point::new(2, 2), 2);
    let grid = shared(map);
    let mut costs = Vec::new();
    for kind in [PathfinderKind::Dijkstra, PathfinderKind::AStar] {
        let mut walker = prepared(kind, &grid, Point::new(0, 0), Point::new(3, 3));
        assert_eq!(walker.search_to_end(), Ok(WalkerState::GoalReached));
        let path = walker.back_tracing().unwrap();
        costs.push(path_cost(&*grid.borrow(), &path));
        walker.reset().unwrap();
    }
    // The only three-step route crosses the centre, so four unit tiles is the cheapest.
    assert_eq!(costs, vec![4, 4]);
}

#[test]
fn reset_restores_tiles_for_every_kind() {
    let mut map = TiledMap::new(6, 5, Tile::default());
    map.set_rect_terrain(3, 0, 1, 4, TerrainType::Water);
    map.set_mark(Point::new(0, 0), Mark::Start);
    map.set_mark(Point::new(5, 4), Mark::End);
    let pristine = map.clone();
    let grid = shared(map);
    for kind in PathfinderKind::ALL {
        let mut walker = prepared(kind, &grid, Point::new(0, 0), Point::new(5, 4));
        walker.search_to_end().unwrap();
        assert!(grid.borrow().is_visited(Point::new(5, 4)));
        walker.reset().unwrap();
        let map = grid.borrow();
        for y in 0..map.height() as i32 {
            for x in 0..map.width() as i32 {
                assert_eq!(map.get(x, y), pristine.get(x, y), "{kind} at ({x}, {y})");
            }
        }
    }
}

#[test]
fn walker_set_runs_every_kind() {
    let mut map = TiledMap::new(8, 4, Tile::default());
    map.set_rect_terrain(4, 0, 1, 3, TerrainType::Obstacle);
    let grid = shared(map);
    let mut set = WalkerSet::new(Rc::clone(&grid)).unwrap();
    set.set_end_position(7, 0).unwrap();
    for kind in PathfinderKind::ALL {
        set.set_current_walker(kind).unwrap();
        set.reset_all().unwrap();
        assert_eq!(set.run_to_completion(64), Ok(WalkerState::GoalReached), "{kind}");
        let path = set.path().unwrap();
        assert_eq!(path.first(), Some(&Point::new(7, 0)));
        assert_eq!(path.last(), Some(&Point::new(0, 0)));
        assert!(path.contains(&Point::new(4, 3)));
    }
}

#[test]
fn kinds_parse_from_names() {
    for kind in PathfinderKind::ALL {
        assert_eq!(kind.name().parse::<PathfinderKind>(), Ok(kind));
        let grid = shared(TiledMap::new(2, 2, Tile::default()));
        assert_eq!(kind.create_walker(grid).kind(), kind);
    }
    assert!("teleport".parse::<PathfinderKind>().is_err());
}
