use serde::{Deserialize, Serialize};

use crate::*;

/// Player-facing state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Covered,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Stable identity of a cell, equal to its row-major index on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(CellCount);

impl CellId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<CellId> for usize {
    fn from(id: CellId) -> Self {
        id.index()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    id: CellId,
    row: Coord,
    column: Coord,
    pub(crate) state: CellState,
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mine_count: u8,
}

impl Cell {
    /// A covered, mine-free cell at `coords` of a grid shaped `shape`.
    pub(crate) fn covered(coords: Coord2, shape: GridShape) -> Self {
        let (row, column) = coords;
        Self {
            id: CellId(shape.flat_index(coords) as CellCount),
            row,
            column,
            state: CellState::Covered,
            is_mine: false,
            adjacent_mine_count: 0,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn row(&self) -> Coord {
        self.row
    }

    pub fn column(&self) -> Coord {
        self.column
    }

    pub fn coords(&self) -> Coord2 {
        (self.row, self.column)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Mines among the 8 neighbours. Only meaningful for non-mine cells once mines are placed.
    pub fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    /// A mine that has been uncovered; deciding what that means is up to the caller.
    pub fn is_detonated(&self) -> bool {
        self.is_mine && self.state.is_revealed()
    }
}
