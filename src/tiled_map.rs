use crate::neighbourhood;
use crate::tile_grid::{Mark, TerrainType, Tile, TileGrid};
use core::fmt;
use grid_util::{Point, SimpleValueGrid, ValueGrid};
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// In-memory [TileGrid] keeping a [Tile] per cell. Besides the raw tiles it maintains connected
/// components of walkable tiles in a [UnionFind] structure so that a driver can tell in advance
/// whether a search will end with the goal out of reach.
#[derive(Clone, Debug)]
pub struct TiledMap {
    pub tiles: SimpleValueGrid<Tile>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    start_mark: Option<Point>,
    end_mark: Option<Point>,
}

impl TiledMap {
    fn tile_ix(&self, pos: Point) -> usize {
        pos.y as usize * self.width() + pos.x as usize
    }

    fn write_mark(&mut self, pos: Point, mark: Mark) {
        let mut tile = self.tiles.get_point(pos);
        tile.mark = mark;
        self.tiles.set_point(pos, tile);
    }

    pub fn tile(&self, pos: Point) -> Tile {
        self.tiles.get_point(pos)
    }

    /// Changes the terrain of a tile, keeping its cost.
    pub fn set_terrain(&mut self, pos: Point, terrain: TerrainType) {
        let mut tile = self.get_point(pos);
        tile.terrain = terrain;
        self.set_point(pos, tile);
    }

    /// Sets the traversal cost of a tile. Costs below 1 are raised to 1.
    pub fn set_cost(&mut self, pos: Point, cost: u32) {
        if cost == 0 {
            warn!("Tile cost at {} must be at least 1, clamping", pos);
        }
        let mut tile = self.tiles.get_point(pos);
        tile.cost = cost.max(1);
        self.tiles.set_point(pos, tile);
    }

    /// Sets the terrain of every tile in the `width` x `height` rectangle with top-left corner
    /// `(x, y)`. Tiles outside the map are ignored.
    pub fn set_rect_terrain(&mut self, x: i32, y: i32, width: i32, height: i32, terrain: TerrainType) {
        for ry in y..y + height {
            for rx in x..x + width {
                let p = Point::new(rx, ry);
                if self.in_map(p) {
                    self.set_terrain(p, terrain);
                }
            }
        }
    }

    /// Position currently holding the [Mark::Start] marker.
    pub fn start_mark(&self) -> Option<Point> {
        self.start_mark
    }

    /// Position currently holding the [Mark::End] marker.
    pub fn end_mark(&self) -> Option<Point> {
        self.end_mark
    }

    /// Clears every visited flag and [Mark::Visited] annotation, leaving Start and End in place.
    pub fn clear_search_flags(&mut self) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let mut tile = self.tiles.get(x, y);
                tile.visited = false;
                if tile.mark == Mark::Visited {
                    tile.mark = Mark::None;
                }
                self.tiles.set(x, y, tile);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.tile_ix(*point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.components_dirty {
            warn!("Querying reachability on dirty components, call refresh_components first");
        }
        if self.in_map(*start)
            && self.in_map(*goal)
            && self.is_walkable(*start)
            && self.is_walkable(*goal)
        {
            !self
                .components
                .equiv(self.tile_ix(*start), self.tile_ix(*goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn refresh_components(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable 8-neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let (w, h) = self.map_size();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if !self.is_walkable(point) {
                    continue;
                }
                let parent_ix = self.tile_ix(point);
                let linked = neighbourhood(self, point)
                    .into_iter()
                    .filter(|p| self.is_walkable(*p))
                    .map(|p| self.tile_ix(p))
                    .collect::<SmallVec<[usize; 8]>>();
                for ix in linked {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl TileGrid for TiledMap {
    fn map_size(&self) -> (usize, usize) {
        (self.tiles.width(), self.tiles.height())
    }
    fn terrain(&self, pos: Point) -> TerrainType {
        self.tiles.get_point(pos).terrain
    }
    fn tile_cost(&self, pos: Point) -> u32 {
        self.tiles.get_point(pos).cost
    }
    fn is_visited(&self, pos: Point) -> bool {
        self.tiles.get_point(pos).visited
    }
    fn set_visited(&mut self, pos: Point, visited: bool) {
        let mut tile = self.tiles.get_point(pos);
        tile.visited = visited;
        self.tiles.set_point(pos, tile);
    }
    fn mark(&self, pos: Point) -> Mark {
        self.tiles.get_point(pos).mark
    }
    /// There is at most one Start and one End tile: placing either marker moves it away from the
    /// tile that held it before.
    fn set_mark(&mut self, pos: Point, mark: Mark) {
        let previous = match mark {
            Mark::Start => self.start_mark.replace(pos),
            Mark::End => self.end_mark.replace(pos),
            _ => None,
        };
        if let Some(prev) = previous {
            if prev != pos && self.mark(prev) == mark {
                self.write_mark(prev, Mark::None);
            }
        }
        if mark != Mark::Start && self.start_mark == Some(pos) {
            self.start_mark = None;
        }
        if mark != Mark::End && self.end_mark == Some(pos) {
            self.end_mark = None;
        }
        self.write_mark(pos, mark);
    }
}

impl fmt::Display for TiledMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| {
                    let tile = self.tiles.get(x, y);
                    match tile.mark {
                        Mark::Start => 'S',
                        Mark::End => 'G',
                        Mark::Visited => 'o',
                        Mark::None => tile.terrain.symbol(),
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl ValueGrid<Tile> for TiledMap {
    fn new(width: usize, height: usize, default_value: Tile) -> Self {
        let mut map = TiledMap {
            tiles: SimpleValueGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
            start_mark: None,
            end_mark: None,
        };
        map.generate_components();
        map
    }
    fn get(&self, x: i32, y: i32) -> Tile {
        self.tiles.get(x, y)
    }
    /// Replaces a tile. Joins newly connected components when a tile becomes walkable and flags
    /// the components as dirty if they are (potentially) broken apart into multiple.
    fn set(&mut self, x: i32, y: i32, tile: Tile) {
        let p = Point::new(x, y);
        let was_walkable = self.tiles.get(x, y).terrain.is_walkable();
        let walkable = tile.terrain.is_walkable();
        self.tiles.set(x, y, tile);
        if was_walkable && !walkable {
            self.components_dirty = true;
        } else if walkable && !was_walkable {
            let p_ix = self.tile_ix(p);
            let linked = neighbourhood(self, p)
                .into_iter()
                .filter(|n| self.is_walkable(*n))
                .map(|n| self.tile_ix(n))
                .collect::<SmallVec<[usize; 8]>>();
            for ix in linked {
                self.components.union(p_ix, ix);
            }
        }
    }
    fn width(&self) -> usize {
        self.tiles.width()
    }
    fn height(&self) -> usize {
        self.tiles.height()
    }
}
