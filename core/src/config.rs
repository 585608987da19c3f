use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::*;

/// Fraction of eligible cells turned into mines when none is configured.
pub const DEFAULT_DENSITY: f64 = 0.159;

fn default_density() -> f64 {
    DEFAULT_DENSITY
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    #[serde(default = "default_density")]
    pub density: f64,
}

impl BoardConfig {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        let config = Self {
            width,
            height,
            density: DEFAULT_DENSITY,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_density(self, density: f64) -> Result<Self> {
        let config = Self { density, ..self };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| GameError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self =
            serde_json::from_reader(reader).map_err(|err| GameError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        if !self.density.is_finite() || !(0.0..=1.0).contains(&self.density) {
            return Err(GameError::InvalidDensity(self.density));
        }

        Ok(())
    }

    pub const fn shape(&self) -> GridShape {
        GridShape::new(self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        self.shape().total_cells()
    }

    /// Number of mines to draw from a pool of `pool` eligible cells.
    ///
    /// The rounded density is clamped to `1..=pool`, so any non-empty pool gets at least one mine
    /// and an empty pool (a 1x1 board) gets none.
    pub fn mine_count_for(&self, pool: CellCount) -> CellCount {
        if pool == 0 {
            return 0;
        }
        let desired = (f64::from(pool) * self.density).round() as CellCount;
        desired.clamp(1, pool)
    }
}
