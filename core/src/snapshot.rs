use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Flagged,
    Revealed(u8),
    Mine,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        match cell.state() {
            CellState::Covered => Self::Covered,
            CellState::Flagged => Self::Flagged,
            CellState::Revealed if cell.is_mine() => Self::Mine,
            CellState::Revealed => Self::Revealed(cell.adjacent_mine_count()),
        }
    }
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Covered => '#',
            Self::Flagged => 'F',
            Self::Mine => '*',
            Self::Revealed(0) => '.',
            Self::Revealed(count) => (b'0' + count) as char,
        }
    }
}

/// Player-visible read model of a board, shaped `(height, width)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: Coord,
    pub height: Coord,
    pub mine_count: Option<CellCount>,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        let shape = board.shape();
        let dim = (shape.height as usize, shape.width as usize);
        let cells = Array2::from_shape_fn(dim, |(row, column)| {
            let index = shape.flat_index((row as Coord, column as Coord));
            CellView::from(&board.cells()[index])
        });

        Self {
            width: shape.width,
            height: shape.height,
            mine_count: board.mine_count(),
            cells,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|err| GameError::Config(err.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.height as usize, self.width as usize);
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for view in row {
                write!(f, "{}", view.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
