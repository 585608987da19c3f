use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, rows and columns.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Geometry of a row-major grid of `height` rows, each `width` cells long.
///
/// Cell `(row, column)` sits at index `row * width + column` of the flat sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub height: Coord,
    pub width: Coord,
}

impl GridShape {
    pub const fn new(height: Coord, width: Coord) -> Self {
        Self { height, width }
    }

    pub const fn total_cells(self) -> CellCount {
        (self.height as CellCount).saturating_mul(self.width as CellCount)
    }

    pub const fn contains(self, (row, column): Coord2) -> bool {
        row < self.height && column < self.width
    }

    pub const fn index_of(self, coords: Coord2) -> Option<usize> {
        if self.contains(coords) {
            Some(self.flat_index(coords))
        } else {
            None
        }
    }

    /// Inverse of [`GridShape::index_of`] for indices below [`GridShape::total_cells`].
    pub const fn coords_of(self, index: usize) -> Coord2 {
        let width = self.width as usize;
        ((index / width) as Coord, (index % width) as Coord)
    }

    pub const fn neighbors(self, center: Coord2) -> Neighbors {
        Neighbors {
            shape: self,
            center,
            step: 0,
        }
    }

    pub(crate) const fn flat_index(self, (row, column): Coord2) -> usize {
        row as usize * self.width as usize + column as usize
    }
}

/// In-bounds 8-neighbourhood of a cell, row by row from the top-left.
#[derive(Clone, Debug)]
pub struct Neighbors {
    shape: GridShape,
    center: Coord2,
    // walks the 3x3 block around `center`, 4 being the center itself
    step: u8,
}

impl Neighbors {
    /// Same neighbours as flat indices into the row-major sequence.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        let shape = self.shape;
        self.map(move |coords| shape.flat_index(coords))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let step = self.step;
            self.step += 1;
            if step == 4 {
                continue;
            }

            let d_row = i16::from(step / 3) - 1;
            let d_column = i16::from(step % 3) - 1;
            let (Some(row), Some(column)) = (
                self.center.0.checked_add_signed(d_row),
                self.center.1.checked_add_signed(d_column),
            ) else {
                continue;
            };

            if self.shape.contains((row, column)) {
                return Some((row, column));
            }
        }
        None
    }
}
