//! Ship classes and placed ships.
//!
//! A placed ship is stored as anchor + orientation + class. The cells it
//! covers are always derived through [`Ship::cells`], which is the only
//! occupancy function used by placement and shot resolution alike.

use core::fmt;
use core::str::FromStr;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Row/column step from one segment to the next.
    pub const fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// The four ship classes of the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShipType {
    Destroyer,
    Cruiser,
    Battleship,
    Carrier,
}

impl ShipType {
    pub const ALL: [ShipType; 4] = [
        ShipType::Destroyer,
        ShipType::Cruiser,
        ShipType::Battleship,
        ShipType::Carrier,
    ];

    /// Number of cells a ship of this class covers.
    pub const fn length(self) -> usize {
        match self {
            ShipType::Destroyer => 2,
            ShipType::Cruiser => 3,
            ShipType::Battleship => 4,
            ShipType::Carrier => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Destroyer => "destroyer",
            ShipType::Cruiser => "cruiser",
            ShipType::Battleship => "battleship",
            ShipType::Carrier => "carrier",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown ship class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShipType;

impl fmt::Display for UnknownShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown ship type")
    }
}

impl FromStr for ShipType {
    type Err = UnknownShipType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownShipType)
    }
}

/// A ship anchored on a board, with its running hit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    ship_type: ShipType,
    row: usize,
    col: usize,
    orientation: Orientation,
    hits: usize,
}

impl Ship {
    /// Create an unhit ship anchored at (`row`, `col`).
    ///
    /// No bounds checking happens here; placement rejects ships that leave
    /// the board.
    pub const fn new(ship_type: ShipType, row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            ship_type,
            row,
            col,
            orientation,
            hits: 0,
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    /// Anchor (top-left-most cell) of the ship.
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length()
    }

    /// Cells covered by the ship, anchor first. Coordinates may lie outside
    /// the board for ships that have not been validated.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (dr, dc) = self.orientation.step();
        let (row, col) = (self.row, self.col);
        (0..self.length()).map(move |i| (row + dr * i, col + dc * i))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }

    /// Count one more hit. Returns `true` if this hit sank the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hits += 1;
        self.is_sunk()
    }
}

/// Returns `true` when every ship of `fleet` is sunk.
pub fn fleet_destroyed(fleet: &[Ship]) -> bool {
    fleet.iter().all(Ship::is_sunk)
}
