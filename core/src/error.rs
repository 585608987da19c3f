use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Board dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: Coord, height: Coord },
    #[error("Mine density must be a finite value within 0..=1, got {0}")]
    InvalidDensity(f64),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid board config: {0}")]
    Config(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
