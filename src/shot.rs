//! Shot resolution against a board and its fleet.

use crate::board::{Board, Cell};
use crate::common::{GameError, ShotOutcome};
use crate::ship::Ship;

/// Fire at (`row`, `col`), updating the board and the hit ship.
///
/// A hit that completes a ship turns all of its cells into [`Cell::Sunk`].
/// Checking whether the whole fleet is gone is left to the caller, see
/// [`crate::fleet_destroyed`].
pub fn resolve_shot(
    board: &mut Board,
    fleet: &mut [Ship],
    row: usize,
    col: usize,
) -> Result<ShotOutcome, GameError> {
    let cell = board.get(row, col).ok_or(GameError::OutOfBounds { row, col })?;
    if cell.is_resolved() {
        return Err(GameError::AlreadyAttacked { row, col });
    }

    if cell == Cell::Empty {
        board.set(row, col, Cell::Miss);
        return Ok(ShotOutcome::MISS);
    }

    let ship = fleet
        .iter_mut()
        .find(|s| s.contains(row, col))
        .ok_or(GameError::UnknownShipHit { row, col })?;

    board.set(row, col, Cell::Hit);
    if ship.register_hit() {
        for (r, c) in ship.cells() {
            board.set(r, c, Cell::Sunk);
        }
        log::debug!("{} at {:?} sunk", ship.ship_type(), ship.origin());
        return Ok(ShotOutcome {
            hit: true,
            sunk: Some(ship.ship_type()),
        });
    }

    Ok(ShotOutcome {
        hit: true,
        sunk: None,
    })
}
