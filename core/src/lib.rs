//! Board and game-state engine for Minesweeper.
//!
//! A [`Board`] starts fully covered and without mines. The first [`Board::reveal`] generates the
//! layout around the revealed cell so it is never a mine, zero cells open their whole connected
//! region, and [`Board::toggle_flag`] marks covered cells. Deciding when a game is won or lost is
//! left to the caller.

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod event;
mod generator;
mod snapshot;
mod types;

/// Result of [`Board::toggle_flag`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// Out of range or already revealed
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of [`Board::reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Out of range, flagged or already revealed
    NoChange,
    /// Safe cells were opened, more than one when a zero region was flooded
    Opened { cells: CellCount },
    /// The target was a mine
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// How many safe cells this reveal opened.
    pub const fn opened(self) -> CellCount {
        match self {
            Self::Opened { cells } => cells,
            Self::NoChange | Self::HitMine => 0,
        }
    }
}
