use grid_util::Point;

use crate::walker::WalkerState;

/// Errors surfaced by a [Walker](crate::Walker) to its driver. Failing to reach the goal is not an
/// error, it is reported through [WalkerState::Unreachable].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalkerError {
    #[error("position {position} lies outside the {width}x{height} tile grid")]
    InvalidArgument {
        position: Point,
        width: usize,
        height: usize,
    },
    #[error("no tile grid has been provided to the walker")]
    GridNotBound,
    #[error("walker is not initialized, call init() first")]
    NotInitialized,
    #[error("no search has been seeded, call reset() first")]
    NotReset,
    #[error("cannot backtrace a path while the walker is {0}")]
    GoalNotReached(WalkerState),
    #[error("unknown pathfinder '{0}'")]
    UnknownPathfinder(String),
}

pub type Result<T> = std::result::Result<T, WalkerError>;
