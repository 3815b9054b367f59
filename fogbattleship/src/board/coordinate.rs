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
use std::{convert::TryFrom, fmt};

/// The coordinates of a [`BoardCell`][crate::board::BoardCell] in the board. `x` grows to
/// the right and `y` grows downward. Coordinates are signed so that positions off the top
/// or left edge can be represented and rejected as out of bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coordinate {
    /// Horizontal position of the cell.
    pub x: isize,
    /// Vertical position of the cell.
    pub y: isize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Get the coordinate `distance` cells away in the given [`Direction`]. Returns `None`
    /// if that position is not representable.
    pub fn offset(self, direction: Direction, distance: usize) -> Option<Self> {
        let distance = isize::try_from(distance).ok()?;
        let (dx, dy) = direction.delta();
        Some(Self {
            x: self.x.checked_add(dx.checked_mul(distance)?)?,
            y: self.y.checked_add(dy.checked_mul(distance)?)?,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(isize, isize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (isize, isize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (isize, isize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

/// Direction a ship extends in from its starting cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Toward decreasing `y`.
    Up,
    /// Toward increasing `x`.
    Right,
    /// Toward increasing `y`.
    Down,
    /// Toward decreasing `x`.
    Left,
}

impl Direction {
    /// All four directions, clockwise from [`Up`][Direction::Up].
    pub const ALL: &'static [Direction] = &[
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step `(dx, dy)` for this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

#[cfg(feature = "rng_gen")]
impl rand::distributions::Distribution<Direction> for rand::distributions::Standard {
    /// Pick one of the four directions uniformly.
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0, Direction::ALL.len())]
    }
}
