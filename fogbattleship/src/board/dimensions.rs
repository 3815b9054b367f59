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
use crate::board::Coordinate;

/// Extent of a rectangular board. Owns the mapping between [`Coordinate`]s and positions
/// in the flat cell storage, so bounds are checked in exactly one place.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
    /// Width of the board. This cooresponds to the `x` [`Coordinate`].
    width: usize,
    /// Height of the board. This cooresponds to the `y` [`Coordinate`].
    height: usize,
}

impl Dimensions {
    /// Create new [`Dimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `isize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("Dimensions must be nonzero, got {}x{}", width, height);
                } else {
                    panic!(
                        "Dimensions too large: {} * {} > {}",
                        width,
                        height,
                        isize::max_value()
                    );
                }
            }
        }
    }

    /// Create new [`Dimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `isize::max_value()` or if `width` or
    /// `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width
                .checked_mul(height)
                .filter(|&total| total <= isize::max_value() as usize)
                .map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`Dimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`Dimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells covered by these [`Dimensions`].
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if the coordinate lies on the board.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.try_linearize(coord).is_some()
    }

    /// Convert a coordinate to a row-major index. Returns `None` if the coordinate is out
    /// of bounds.
    pub fn try_linearize(&self, coord: Coordinate) -> Option<usize> {
        // Both extents fit in isize, so a non-negative coordinate below them fits in usize.
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Convert a row-major index back into a [`Coordinate`]. Panics if idx is out of
    /// range.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        assert!(idx < self.total_size(), "index {} out of range", idx);
        Coordinate::new((idx % self.width) as isize, (idx / self.width) as isize)
    }

    /// Get an iterator over rows of this grid, top to bottom. Each row is an iterator
    /// over the coordinates of that row, left to right.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width as isize;
        (0..self.height as isize).map(move |y| (0..width).map(move |x| Coordinate { x, y }))
    }
}

impl Default for Dimensions {
    /// Construct the default dimensions, a 10x10 board.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}
