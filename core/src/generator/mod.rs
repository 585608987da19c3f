use serde::{Deserialize, Serialize};

use crate::*;
pub use layout::*;
pub use preset::*;
pub use random::*;

mod layout;
mod preset;
mod random;

/// Produces the mine layout for a board once the first cell to reveal is known.
pub trait MineGenerator {
    /// Generates a layout for `config` that never places a mine at `safe`.
    fn generate(self, config: &BoardConfig, safe: Coord2) -> MineLayout;
}

/// Generation strategy held by a board until its first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MinePlan {
    Random(RandomMineGenerator),
    Preset(PresetMineGenerator),
}

impl MinePlan {
    pub fn from_entropy() -> Self {
        Self::Random(RandomMineGenerator::from_entropy())
    }
}

impl MineGenerator for MinePlan {
    fn generate(self, config: &BoardConfig, safe: Coord2) -> MineLayout {
        match self {
            Self::Random(generator) => generator.generate(config, safe),
            Self::Preset(generator) => generator.generate(config, safe),
        }
    }
}

impl From<RandomMineGenerator> for MinePlan {
    fn from(generator: RandomMineGenerator) -> Self {
        Self::Random(generator)
    }
}

impl From<PresetMineGenerator> for MinePlan {
    fn from(generator: PresetMineGenerator) -> Self {
        Self::Preset(generator)
    }
}
