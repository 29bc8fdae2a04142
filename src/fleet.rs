//! Random fleet generation.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::GameError;
use crate::config::{BOARD_SIZE, FLEET_ORDER, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS};
use crate::placement::place_on_board;
use crate::ship::{Orientation, Ship};

/// Produce a legal random fleet.
///
/// Each ship gets up to [`MAX_PLACEMENT_ATTEMPTS`] uniformly sampled anchors
/// and orientations. Running out of attempts means the board configuration
/// can not hold the fleet and is reported as
/// [`GameError::ConfigurationExhausted`].
pub fn generate_random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<Ship>, GameError> {
    let mut board = Board::new();
    let mut ships = Vec::with_capacity(NUM_SHIPS);

    for ship_type in FLEET_ORDER {
        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let row = rng.random_range(0..BOARD_SIZE);
            let col = rng.random_range(0..BOARD_SIZE);
            let orientation = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let ship = Ship::new(ship_type, row, col, orientation);
            if place_on_board(&mut board, &ship) {
                placed = Some(ship);
                break;
            }
        }
        match placed {
            Some(ship) => ships.push(ship),
            None => {
                log::error!("gave up placing {} after {} attempts", ship_type, MAX_PLACEMENT_ATTEMPTS);
                return Err(GameError::ConfigurationExhausted(ship_type));
            }
        }
    }

    Ok(ships)
}
