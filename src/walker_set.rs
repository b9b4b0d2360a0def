use crate::error::{Result, WalkerError};
use crate::tile_grid::TileGrid;
use crate::tiled_map::TiledMap;
use crate::walker::{PathfinderKind, Walker, WalkerState};
use grid_util::Point;
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

/// One walker of every [PathfinderKind] sharing a grid, with one of them active. Mirrors how a
/// game loop drives the search: positions and resets go to every walker, while only the active
/// walker is stepped once per frame.
pub struct WalkerSet<G: TileGrid + 'static = TiledMap> {
    grid: Rc<RefCell<G>>,
    walkers: Vec<Box<dyn Walker>>,
    active: usize,
    path: Option<Vec<Point>>,
}

impl<G: TileGrid + 'static> WalkerSet<G> {
    /// Creates and initializes all walkers with start and end at the origin. The first kind in
    /// [PathfinderKind::ALL] is active.
    pub fn new(grid: Rc<RefCell<G>>) -> Result<WalkerSet<G>> {
        let mut walkers = Vec::with_capacity(PathfinderKind::ALL.len());
        for kind in PathfinderKind::ALL {
            let mut walker = kind.create_walker(Rc::clone(&grid));
            walker.init()?;
            walker.set_start_position(0, 0)?;
            walker.set_end_position(0, 0)?;
            walkers.push(walker);
        }
        Ok(WalkerSet {
            grid,
            walkers,
            active: 0,
            path: None,
        })
    }

    pub fn grid(&self) -> &Rc<RefCell<G>> {
        &self.grid
    }

    pub fn current_kind(&self) -> PathfinderKind {
        self.walkers[self.active].kind()
    }

    /// Makes the walker of the given kind active and drops the cached path. The outgoing walker is
    /// reset so the shared grid loses its visited flags, and the incoming one is reseeded.
    pub fn set_current_walker(&mut self, kind: PathfinderKind) -> Result<()> {
        let Some(ix) = self.walkers.iter().position(|w| w.kind() == kind) else {
            return Ok(());
        };
        if ix != self.active {
            self.walkers[self.active].reset()?;
            self.active = ix;
            self.walkers[ix].reset()?;
            self.path = None;
            info!("Active walker set to {}", kind);
        }
        Ok(())
    }

    pub fn active(&self) -> &dyn Walker {
        self.walkers[self.active].as_ref()
    }

    pub fn active_mut(&mut self) -> &mut dyn Walker {
        self.walkers[self.active].as_mut()
    }

    fn check_in_map(&self, x: i32, y: i32) -> Result<()> {
        let grid = self.grid.borrow();
        let position = Point::new(x, y);
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

    /// Sets the start position of every walker. Nothing changes if the position is off the map.
    pub fn set_start_position(&mut self, x: i32, y: i32) -> Result<()> {
        self.check_in_map(x, y)?;
        for walker in self.walkers.iter_mut() {
            walker.set_start_position(x, y)?;
        }
        Ok(())
    }

    /// Sets the end position of every walker. Nothing changes if the position is off the map.
    pub fn set_end_position(&mut self, x: i32, y: i32) -> Result<()> {
        self.check_in_map(x, y)?;
        for walker in self.walkers.iter_mut() {
            walker.set_end_position(x, y)?;
        }
        Ok(())
    }

    /// Resets every walker, restoring all tiles any of them visited, and drops the cached path.
    pub fn reset_all(&mut self) -> Result<()> {
        for walker in self.walkers.iter_mut() {
            walker.reset()?;
        }
        self.path = None;
        debug!("All walkers reset");
        Ok(())
    }

    /// Advances the active walker by one tick. Once the goal is reached the path is backtraced a
    /// single time and kept until the next reset or walker switch.
    pub fn step(&mut self) -> Result<WalkerState> {
        let walker = self.walkers[self.active].as_mut();
        let state = match walker.state() {
            WalkerState::Searching => walker.update()?,
            state => state,
        };
        if state == WalkerState::GoalReached && self.path.is_none() {
            self.path = Some(walker.back_tracing()?);
        }
        Ok(state)
    }

    /// Steps until the active walker reaches a terminal state or `max_steps` ticks have passed.
    pub fn run_to_completion(&mut self, max_steps: usize) -> Result<WalkerState> {
        let mut state = self.active().state();
        for _ in 0..max_steps {
            state = self.step()?;
            if state.is_terminal() {
                break;
            }
        }
        Ok(state)
    }

    /// The path found by the active walker, from the end position back to the start.
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }
}
