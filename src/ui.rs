#![cfg(feature = "std")]

//! Text rendering and coordinate parsing for the terminal front end.

use std::fmt::Write;

use crate::{
    board::{Board, Cell},
    config::BOARD_SIZE,
    game::GameState,
    ship::{Orientation, Ship, ShipType},
};

/// Format a coordinate as `A1`..`J10` (column letter, 1-based row).
pub fn coord_to_string(row: usize, col: usize) -> String {
    let col = (b'A' + col as u8) as char;
    format!("{}{}", col, row + 1)
}

/// Parse `A1`..`J10` (case-insensitive) into (row, col).
pub fn parse_coord(input: &str) -> Option<(usize, usize)> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 || row > BOARD_SIZE || col >= BOARD_SIZE {
        return None;
    }
    Some((row - 1, col))
}

/// Parse `<coord> <h|v>`, e.g. `B3 v`, into a ship of `ship_type`.
pub fn parse_ship(ship_type: ShipType, input: &str) -> Option<Ship> {
    let mut parts = input.split_whitespace();
    let (row, col) = parse_coord(parts.next()?)?;
    let orientation = match parts.next()?.to_ascii_lowercase().as_str() {
        "h" | "horizontal" => Orientation::Horizontal,
        "v" | "vertical" => Orientation::Vertical,
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Ship::new(ship_type, row, col, orientation))
}

fn symbol(cell: Cell, reveal: bool) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Ship if reveal => 'S',
        Cell::Ship => '.',
        Cell::Hit => 'X',
        Cell::Miss => 'o',
        Cell::Sunk => '#',
    }
}

/// Render a board with column letters and row numbers. Ship cells are only
/// drawn when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::from("   ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in board.rows().iter().enumerate() {
        let _ = write!(out, "{:2} ", r + 1);
        for &cell in row.iter() {
            let _ = write!(out, " {}", symbol(cell, reveal));
        }
        out.push('\n');
    }
    out
}

/// Opponent board (top, ships hidden) and the player's board (bottom).
pub fn render_player_view(state: &GameState) -> String {
    format!(
        "Opponent board:\n{}\nYour board:\n{}",
        render_board(&state.bot_board, false),
        render_board(&state.player_board, true)
    )
}
