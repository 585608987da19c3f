use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Fixed mine coordinates, used for replays and deterministic boards.
///
/// Coordinates outside the board, and a mine on the first revealed cell, are dropped at generation time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetMineGenerator {
    mines: Vec<Coord2>,
}

impl PresetMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MineGenerator for PresetMineGenerator {
    fn generate(self, config: &BoardConfig, safe: Coord2) -> MineLayout {
        let shape = config.shape();
        let mut mine_mask: Array2<bool> =
            Array2::default((shape.height as usize, shape.width as usize));

        for coords in self.mines {
            if !shape.contains(coords) {
                log::warn!("Preset mine at {:?} is outside the board, dropped", coords);
                continue;
            }
            if coords == safe {
                log::warn!("Preset mine at {:?} is on the safe cell, dropped", coords);
                continue;
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        MineLayout::from_mine_mask(mine_mask)
    }
}
