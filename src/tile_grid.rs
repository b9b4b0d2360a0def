use core::fmt;
use grid_util::Point;

/// Terrain classification of a tile. Only [TerrainType::Obstacle] blocks movement, the other
/// kinds differ only in the traversal cost assigned to them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainType {
    Water,
    #[default]
    Grass,
    Marsh,
    Obstacle,
}

impl TerrainType {
    pub fn is_walkable(self) -> bool {
        self != TerrainType::Obstacle
    }

    /// Single character used when printing maps.
    pub fn symbol(self) -> char {
        match self {
            TerrainType::Water => '~',
            TerrainType::Grass => '.',
            TerrainType::Marsh => ',',
            TerrainType::Obstacle => '#',
        }
    }
}

/// Annotation a walker leaves on the tiles it explores. Start and End are placed by the driver and
/// survive both the search and a walker reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    #[default]
    None,
    Start,
    End,
    Visited,
}

impl Mark {
    pub fn is_endpoint(self) -> bool {
        matches!(self, Mark::Start | Mark::End)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: TerrainType,
    /// Cost of stepping onto this tile, at least 1.
    pub cost: u32,
    pub mark: Mark,
    pub visited: bool,
}

impl Tile {
    pub fn new(terrain: TerrainType, cost: u32) -> Tile {
        Tile {
            terrain,
            cost: cost.max(1),
            mark: Mark::None,
            visited: false,
        }
    }
}

impl Default for Tile {
    fn default() -> Tile {
        Tile::new(TerrainType::Grass, 1)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.terrain.symbol())
    }
}

/// The tile map a walker searches. Walkers query terrain and cost and write the visited flag and
/// marks while they explore; only one walker should be searching a given grid at a time.
///
/// Positions passed to these methods are in bounds, walkers check [TileGrid::in_map] before
/// touching a tile.
pub trait TileGrid {
    /// Width and height of the map in tiles.
    fn map_size(&self) -> (usize, usize);
    fn terrain(&self, pos: Point) -> TerrainType;
    fn tile_cost(&self, pos: Point) -> u32;
    fn is_visited(&self, pos: Point) -> bool;
    fn set_visited(&mut self, pos: Point, visited: bool);
    fn mark(&self, pos: Point) -> Mark;
    fn set_mark(&mut self, pos: Point, mark: Mark);

    fn in_map(&self, pos: Point) -> bool {
        let (width, height) = self.map_size();
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
    }
    fn is_walkable(&self, pos: Point) -> bool {
        self.terrain(pos).is_walkable()
    }
}
