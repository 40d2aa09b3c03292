//! Core domain types for the canvas board.

use crate::contracts::{Contract, PlaceContract};
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 3;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Text drawn on the surface for this player's mark.
    pub fn label(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }

    /// The other player. Only used by selector chrome; the board never
    /// derives whose turn it is.
    pub fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Holds a player's mark.
    Marked(Player),
}

impl Cell {
    /// True when nothing has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A checked (row, col) pair, both in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    row: usize,
    col: usize,
}

impl CellIndex {
    /// Creates an index if both coordinates are on the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Creates an index, failing with `OutOfBounds` when off the board.
    #[track_caller]
    pub fn checked(row: usize, col: usize) -> Result<Self, BoardError> {
        Self::new(row, col).ok_or_else(|| {
            BoardError::out_of_bounds(format!("cell ({row}, {col}) is outside the 3x3 board"))
        })
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column, 0 at the left.
    pub fn col(self) -> usize {
        self.col
    }

    /// All nine indices in row-major order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| CellIndex { row, col }))
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 3x3 board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Gets the cell at (row, col), or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Gets the cell at a checked index.
    pub fn cell(&self, index: CellIndex) -> Cell {
        self.cells[index.row][index.col]
    }

    /// Places `player`'s mark at (row, col), returning the next board.
    ///
    /// An occupied cell is overwritten. Coordinates outside `0..3` fail with
    /// `OutOfBounds` and leave `self` untouched.
    #[instrument(skip(self), fields(marked = self.marked_count()))]
    pub fn place(&self, row: usize, col: usize, player: Player) -> Result<Board, BoardError> {
        let index = CellIndex::checked(row, col)?;
        Ok(self.place_at(index, player))
    }

    /// Places a mark at an index that is already known to be on the board.
    #[instrument(skip(self))]
    pub fn place_at(&self, index: CellIndex, player: Player) -> Board {
        let mut next = *self;
        let previous = next.cells[index.row][index.col];
        next.cells[index.row][index.col] = Cell::Marked(player);
        if !previous.is_empty() {
            trace!(?previous, %index, "Overwriting marked cell");
        }

        if cfg!(debug_assertions) {
            if let Err(e) = PlaceContract::post(self, &next, &(index, player)) {
                tracing::error!(error = %e, "Placement postcondition failed");
                debug_assert!(false, "{e}");
            }
        }

        next
    }

    /// Iterates all cells row-major with their index.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, Cell)> + '_ {
        CellIndex::all().map(move |index| (index, self.cell(index)))
    }

    /// Number of marked cells.
    pub fn marked_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    /// Indices whose cells differ between `self` and `other`.
    pub fn diff(&self, other: &Board) -> Vec<CellIndex> {
        CellIndex::all()
            .filter(|&index| self.cell(index) != other.cell(index))
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::Marked(player) => player.label(),
                };
                f.write_str(symbol)?;
                if c < BOARD_SIZE - 1 {
                    f.write_str("|")?;
                }
            }
            if r < BOARD_SIZE - 1 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
