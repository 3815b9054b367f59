// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Flat storage for the cells of a board.

use std::ops::{Index, IndexMut};

use crate::board::{BoardCell, CellState, Coordinate, Dimensions};

/// Cells of a board stored row-major in a single allocation.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Dimensions of this board.
    pub(super) dim: Dimensions,
    /// Cells that make up this board.
    pub(super) cells: Box<[BoardCell]>,
}

impl Grid {
    /// Build a grid with every cell in the same initial state.
    pub(super) fn new(dim: Dimensions, initial: CellState) -> Self {
        let cells = (0..dim.total_size())
            .map(|_| BoardCell::new(initial))
            .collect();
        Self { dim, cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(super) fn get(&self, coord: Coordinate) -> Option<&BoardCell> {
        self.dim
            .try_linearize(coord)
            .and_then(|i| self.cells.get(i))
    }

    /// Iterate the rows of the grid, top to bottom.
    pub(super) fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.cells.chunks(self.dim.width())
    }
}

impl Index<usize> for Grid {
    type Output = BoardCell;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.cells[idx]
    }
}

impl IndexMut<usize> for Grid {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.cells[idx]
    }
}
