use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use grid_walker::{path_cost, Mark, PathfinderKind, TerrainType, Tile, TileGrid, TiledMap, WalkerSet};
use std::cell::RefCell;
use std::rc::Rc;

// Runs every strategy on the same map and compares the paths they find:
//  ________
// |S..~~...|
// |.##~~#..|
// |..#,,#..|
// |..#,,#.E|
//  ________
// where ~ is water (cost 4) and , is marsh (cost 2).
fn main() {
    env_logger::init();
    let grid = Rc::new(RefCell::new(TiledMap::new(8, 4, Tile::default())));
    {
        let mut map = grid.borrow_mut();
        map.set_rect_terrain(3, 0, 2, 2, TerrainType::Water);
        map.set_rect_terrain(3, 2, 2, 2, TerrainType::Marsh);
        map.set_rect_terrain(1, 1, 2, 1, TerrainType::Obstacle);
        map.set_rect_terrain(2, 2, 1, 2, TerrainType::Obstacle);
        map.set_rect_terrain(5, 1, 1, 3, TerrainType::Obstacle);
        for x in 3..5 {
            for y in 0..2 {
                map.set_cost(Point::new(x, y), 4);
            }
            for y in 2..4 {
                map.set_cost(Point::new(x, y), 2);
            }
        }
        map.set_mark(Point::new(0, 0), Mark::Start);
        map.set_mark(Point::new(7, 3), Mark::End);
    }

    let mut walkers = WalkerSet::new(Rc::clone(&grid)).unwrap();
    walkers.set_start_position(0, 0).unwrap();
    walkers.set_end_position(7, 3).unwrap();
    for kind in PathfinderKind::ALL {
        walkers.set_current_walker(kind).unwrap();
        walkers.reset_all().unwrap();
        let state = walkers.run_to_completion(usize::MAX).unwrap();
        let expanded = walkers.active().closed_nodes().len();
        match walkers.path() {
            Some(path) => println!(
                "{:<22} {} in {} steps, path of {} tiles costing {}",
                kind.name(),
                state,
                expanded,
                path.len(),
                path_cost(&*grid.borrow(), path)
            ),
            None => println!("{:<22} {}", kind.name(), state),
        }
        println!("{}", grid.borrow());
    }
    let (width, height) = grid.borrow().map_size();
    println!("Map size: {}x{}", width, height);
}
