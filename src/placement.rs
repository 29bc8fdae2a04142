//! Ship placement rules: bounds, overlap, no touching (diagonals included)
//! and the fixed fleet composition.

use crate::board::{Board, Cell};
use crate::common::PlacementError;
use crate::config::{required_count, BOARD_SIZE, FLEET};
use crate::ship::Ship;

/// Stamp `ship` onto `board`, or report why it can not go there.
/// The board is left untouched on error.
pub fn try_place_on_board(board: &mut Board, ship: &Ship) -> Result<(), PlacementError> {
    for (row, col) in ship.cells() {
        if !Board::in_bounds(row, col) {
            return Err(PlacementError::OutOfBounds);
        }
        if board.get(row, col) == Some(Cell::Ship) {
            return Err(PlacementError::Overlap);
        }
        if neighbours(row, col).any(|(r, c)| board.get(r, c) == Some(Cell::Ship)) {
            return Err(PlacementError::Touching);
        }
    }
    for (row, col) in ship.cells() {
        board.set(row, col, Cell::Ship);
    }
    Ok(())
}

/// Stamp `ship` onto `board`. Returns `false`, leaving the board unchanged,
/// if the ship leaves the board, overlaps or touches another ship.
pub fn place_on_board(board: &mut Board, ship: &Ship) -> bool {
    try_place_on_board(board, ship).is_ok()
}

/// Check a complete fleet: exact composition, then every ship placed in
/// sequence on a fresh board. Adjacency is symmetric, so the outcome does not
/// depend on the order of `ships`.
pub fn check_placement(ships: &[Ship]) -> Result<(), PlacementError> {
    let composition_ok = FLEET.iter().all(|&(ship_type, _)| {
        ships.iter().filter(|s| s.ship_type() == ship_type).count() == required_count(ship_type)
    }) && ships.len() == FLEET.iter().map(|(_, n)| n).sum::<usize>();
    if !composition_ok {
        return Err(PlacementError::Composition);
    }

    let mut board = Board::new();
    for ship in ships {
        try_place_on_board(&mut board, ship)?;
    }
    Ok(())
}

/// Returns `true` when `ships` is a legal full fleet.
pub fn validate_placement(ships: &[Ship]) -> bool {
    check_placement(ships).is_ok()
}

/// In-bounds 8-neighbourhood of (row, col), excluding the cell itself.
fn neighbours(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let rows = row.saturating_sub(1)..=(row + 1).min(BOARD_SIZE - 1);
    rows.flat_map(move |r| {
        let cols = col.saturating_sub(1)..=(col + 1).min(BOARD_SIZE - 1);
        cols.map(move |c| (r, c))
    })
    .filter(move |&cell| cell != (row, col))
}
