use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use grid_walker::{AStar, GridWalker, TerrainType, Tile, TiledMap, Walker, WalkerState};
use std::cell::RefCell;
use std::rc::Rc;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let grid = Rc::new(RefCell::new(TiledMap::new(3, 3, Tile::default())));
    grid.borrow_mut()
        .set_terrain(Point::new(1, 1), TerrainType::Obstacle);
    println!("{}", grid.borrow());

    let mut walker = GridWalker::new(AStar::default(), Rc::clone(&grid));
    walker.init().unwrap();
    walker.set_start_position(0, 0).unwrap();
    walker.set_end_position(2, 2).unwrap();
    walker.reset().unwrap();
    let mut steps = 0;
    while walker.update().unwrap() == WalkerState::Searching {
        steps += 1;
    }
    println!("Finished after {} steps: {}", steps, walker.state());
    if let Ok(path) = walker.back_tracing() {
        println!("Path:");
        for p in path.iter().rev() {
            println!("{:?}", p);
        }
    }
}
