use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Purely random placement that only guarantees the first revealed cell is safe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: &BoardConfig, safe: Coord2) -> MineLayout {
        use rand::prelude::*;
        use rand::seq::index;

        let shape = config.shape();
        let mut mine_mask: Array2<bool> =
            Array2::default((shape.height as usize, shape.width as usize));

        // every cell except the safe one is eligible
        let pool = config.total_cells().saturating_sub(1);
        let mine_count = config.mine_count_for(pool);
        if mine_count == 0 {
            log::warn!(
                "No cells left to mine on a {}x{} board, generated an empty layout",
                config.width,
                config.height
            );
            return MineLayout::from_mine_mask(mine_mask);
        }

        let safe_index = shape.flat_index(safe);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for pick in index::sample(&mut rng, pool as usize, mine_count as usize).into_iter() {
            // the pool skips the safe index, shift picks at or past it
            let cell_index = if pick >= safe_index { pick + 1 } else { pick };
            mine_mask[shape.coords_of(cell_index).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "Generated {} mines on a {}x{} board, safe cell at {:?}",
            layout.mine_count(),
            config.width,
            config.height,
            safe
        );
        layout
    }
}
