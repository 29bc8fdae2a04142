//! Fixed-size game board and cell-state semantics.

use core::fmt;

use crate::config::BOARD_SIZE;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
    Sunk,
}

impl Cell {
    /// A resolved cell has been shot at and can not be targeted again.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss | Cell::Sunk)
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ship => 'S',
            Cell::Hit => 'X',
            Cell::Miss => 'o',
            Cell::Sunk => '#',
        }
    }
}

/// A `BOARD_SIZE`×`BOARD_SIZE` grid of cells, indexed by (row, col).
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a board with every cell empty.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE
    }

    /// Cell at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrite the cell at (row, col). Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// `true` if (row, col) is on the board and already shot at.
    pub fn is_resolved(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_resolved)
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &cell)| ((r, c), cell)))
    }

    /// Coordinates of every cell not yet shot at.
    pub fn unresolved(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|(_, cell)| !cell.is_resolved())
            .map(|(coord, _)| coord)
    }

    /// Number of cells in the given state.
    pub fn count(&self, state: Cell) -> usize {
        self.iter().filter(|(_, cell)| *cell == state).count()
    }

    /// Copy of the board with unrevealed ship cells shown as empty.
    pub fn masked(&self) -> Board {
        let mut view = *self;
        for row in view.cells.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == Cell::Ship {
                    *cell = Cell::Empty;
                }
            }
        }
        view
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.cells.iter() {
            f.write_str("  ")?;
            for cell in row.iter() {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
