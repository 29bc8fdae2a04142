//! Bot targeting: random search, hunt-after-hit and centre-weighted search.
//! The hunt queue is an explicit value owned by the caller and is rebuilt
//! from the board's hit cells on every call, so dropping it loses nothing.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::board::{Board, Cell};
use crate::config::BOARD_SIZE;

/// Bot strength, chosen per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty;

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("difficulty must be one of easy, medium, hard")
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownDifficulty)
    }
}

/// FIFO of follow-up targets next to known hits. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuntQueue {
    entries: VecDeque<(usize, usize)>,
}

impl HuntQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, coord: (usize, usize)) -> bool {
        self.entries.contains(&coord)
    }

    /// Append `coord` unless it is already queued. Returns `true` if added.
    pub fn push(&mut self, coord: (usize, usize)) -> bool {
        if self.contains(coord) {
            return false;
        }
        self.entries.push_back(coord);
        true
    }

    pub fn pop(&mut self) -> Option<(usize, usize)> {
        self.entries.pop_front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Queue the unresolved orthogonal neighbours of every `Hit` cell,
    /// scanning the board row by row.
    pub fn refill(&mut self, board: &Board) {
        for ((row, col), cell) in board.iter() {
            if cell != Cell::Hit {
                continue;
            }
            for coord in orthogonal(row, col) {
                if !board.is_resolved(coord.0, coord.1) {
                    self.push(coord);
                }
            }
        }
    }

    /// Pop entries until one is still unresolved on `board`.
    fn pop_unresolved(&mut self, board: &Board) -> Option<(usize, usize)> {
        while let Some(coord) = self.pop() {
            if !board.is_resolved(coord.0, coord.1) {
                return Some(coord);
            }
        }
        None
    }
}

/// Target selection for one game.
#[derive(Debug, Clone)]
pub struct BotTargeting {
    difficulty: Difficulty,
    queue: HuntQueue,
}

impl BotTargeting {
    /// Targeting with an empty hunt queue.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            queue: HuntQueue::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn queue(&self) -> &HuntQueue {
        &self.queue
    }

    /// Forget pending follow-ups, e.g. when resuming a stored game.
    pub fn reset(&mut self) {
        self.queue.clear();
    }

    /// Choose the next cell to fire at on `board` (the opponent's board as
    /// the bot sees it). Returns `None` only when every cell is resolved.
    pub fn next_shot<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) -> Option<(usize, usize)> {
        match self.difficulty {
            Difficulty::Easy => random_target(board, rng),
            Difficulty::Medium => self.hunt(board).or_else(|| random_target(board, rng)),
            Difficulty::Hard => self
                .hunt(board)
                .or_else(|| weighted_target(board, rng))
                .or_else(|| random_target(board, rng)),
        }
    }

    /// Hunt step shared by medium and hard: try the queue head once, then
    /// rescan all hits and take the next queued follow-up.
    fn hunt(&mut self, board: &Board) -> Option<(usize, usize)> {
        if let Some(coord) = self.queue.pop() {
            if !board.is_resolved(coord.0, coord.1) {
                return Some(coord);
            }
        }
        self.queue.refill(board);
        self.queue.pop_unresolved(board)
    }
}

/// Uniformly random unresolved cell, found by rejection sampling.
pub fn random_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    board.unresolved().next()?;
    loop {
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        if !board.is_resolved(row, col) {
            return Some((row, col));
        }
    }
}

/// Weight of a cell for centre-biased search: `10 - (|row-4.5| + |col-4.5|)`.
///
/// Computed in half-units so it stays integral; always in `1..=9` on a
/// 10×10 board.
pub fn center_weight(row: usize, col: usize) -> usize {
    let twice_center = BOARD_SIZE - 1;
    let twice_distance = (2 * row).abs_diff(twice_center) + (2 * col).abs_diff(twice_center);
    BOARD_SIZE.saturating_sub(twice_distance / 2)
}

/// Pick an unresolved cell from a list where each cell appears
/// [`center_weight`] times.
pub fn weighted_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let mut candidates: Vec<(usize, usize)> = Vec::new();
    for (row, col) in board.unresolved() {
        for _ in 0..center_weight(row, col) {
            candidates.push((row, col));
        }
    }
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

/// In-bounds up/down/left/right neighbours, in that order.
fn orthogonal(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = row.checked_sub(1).map(|r| (r, col));
    let down = (row + 1 < BOARD_SIZE).then_some((row + 1, col));
    let left = col.checked_sub(1).map(|c| (row, c));
    let right = (col + 1 < BOARD_SIZE).then_some((row, col + 1));
    [up, down, left, right].into_iter().flatten()
}
