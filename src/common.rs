//! Common types for the engine: sides, shot outcomes and errors.

use crate::ship::ShipType;

/// One of the two participants of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Bot,
}

/// Result of resolving a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotOutcome {
    /// The shot struck a ship segment.
    pub hit: bool,
    /// Class of the ship this shot sank, if any.
    pub sunk: Option<ShipType>,
}

impl ShotOutcome {
    pub const MISS: ShotOutcome = ShotOutcome {
        hit: false,
        sunk: None,
    };

    pub fn is_sunk(&self) -> bool {
        self.sunk.is_some()
    }
}

/// Reasons a fleet or a single ship cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Fleet does not contain exactly the required ships of each class.
    Composition,
    /// A ship segment lies outside the board.
    OutOfBounds,
    /// A ship segment covers a cell already occupied by a ship.
    Overlap,
    /// A ship segment touches another ship, diagonals included.
    Touching,
}

impl core::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementError::Composition => write!(
                f,
                "fleet must have 1 destroyer, 2 cruisers, 1 battleship and 1 carrier"
            ),
            PlacementError::OutOfBounds => write!(f, "ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "ship placement overlaps another ship"),
            PlacementError::Touching => write!(f, "ship placement touches another ship"),
        }
    }
}

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// No game is stored under this id.
    NotFound(u64),
    /// The operation is not legal in the current game phase.
    InvalidState(&'static str),
    /// The proposed fleet was rejected.
    InvalidPlacement(PlacementError),
    /// The target cell was already resolved.
    AlreadyAttacked { row: usize, col: usize },
    /// Target coordinates are outside the board.
    OutOfBounds { row: usize, col: usize },
    /// Random fleet generation ran out of attempts for this ship.
    ConfigurationExhausted(ShipType),
    /// A ship cell is not covered by any ship of the fleet.
    UnknownShipHit { row: usize, col: usize },
    /// The bot found no unresolved cell to shoot at.
    NoTargetAvailable,
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::InvalidPlacement(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::NotFound(id) => write!(f, "game {} not found", id),
            GameError::InvalidState(reason) => write!(f, "invalid game state: {}", reason),
            GameError::InvalidPlacement(e) => write!(f, "invalid ship placement: {}", e),
            GameError::AlreadyAttacked { row, col } => {
                write!(f, "cell ({}, {}) was already attacked", row, col)
            }
            GameError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
            GameError::ConfigurationExhausted(ship) => {
                write!(f, "unable to place {} after exhausting all attempts", ship)
            }
            GameError::UnknownShipHit { row, col } => {
                write!(f, "no ship covers the hit cell ({}, {})", row, col)
            }
            GameError::NoTargetAvailable => write!(f, "no unresolved cell left to target"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
