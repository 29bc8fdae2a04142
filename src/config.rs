use crate::bot::Difficulty;
use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;

/// Required number of ships per class.
pub const FLEET: [(ShipType, usize); 4] = [
    (ShipType::Destroyer, 1),
    (ShipType::Cruiser, 2),
    (ShipType::Battleship, 1),
    (ShipType::Carrier, 1),
];

pub const NUM_SHIPS: usize = 5;

/// Ships in the order the random generator places them.
pub const FLEET_ORDER: [ShipType; NUM_SHIPS] = [
    ShipType::Destroyer,
    ShipType::Cruiser,
    ShipType::Cruiser,
    ShipType::Battleship,
    ShipType::Carrier,
];

/// Total number of ship segments in a full fleet.
pub const TOTAL_SHIP_CELLS: usize = 2 + 3 + 3 + 4 + 5;

/// Attempts the random generator makes per ship before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Medium;

/// Required count of `ship_type` in a fleet.
pub fn required_count(ship_type: ShipType) -> usize {
    FLEET
        .iter()
        .find(|(t, _)| *t == ship_type)
        .map(|(_, n)| *n)
        .unwrap_or(0)
}
