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
//! Errors used by the `Board` and `BoardCell`.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{
    board::{CellState, Coordinate},
    ships::Ship,
};

/// Broad category of a failed board operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A coordinate was outside the grid.
    OutOfBounds,
    /// The cell's current state forbids the operation.
    InvalidState,
    /// The caller supplied an unusable argument.
    InvalidArgument,
}

/// Reason a single cell refused a state transition.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CellError {
    /// Only empty cells can be occupied.
    #[error("cell is not empty and cannot be occupied")]
    NotEmpty,
    /// The cell was already hit or missed.
    #[error("cell already attacked")]
    AlreadyAttacked,
    /// Fog-of-war cells have no ground truth to attack.
    #[error("cannot attack an unknown cell, it must be revealed instead")]
    Unrevealed,
    /// Only unknown cells can be revealed.
    #[error("cannot reveal a cell whose state is already known")]
    AlreadyKnown,
    /// A reveal must disclose a hit or a miss.
    #[error("cells can only be revealed as hit or miss, not {0:?}")]
    InvalidReveal(CellState),
}

impl CellError {
    /// Category of this error.
    pub fn kind(self) -> ErrorKind {
        match self {
            CellError::InvalidReveal(_) => ErrorKind::InvalidArgument,
            CellError::NotEmpty | CellError::AlreadyAttacked | CellError::Unrevealed
            | CellError::AlreadyKnown => ErrorKind::InvalidState,
        }
    }
}

/// Error returned by operations addressing a cell of the [`Board`][crate::board::Board].
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// The coordinate lies outside the board.
    #[error("invalid cell coordinates: {0}")]
    OutOfBounds(Coordinate),

    /// A ship placement covered a cell that is not empty.
    #[error("cell {0} is not empty")]
    Collision(Coordinate),

    /// The cell at the coordinate refused the operation.
    #[error("cell {coord}: {source}")]
    Cell {
        /// Coordinate of the cell.
        coord: Coordinate,
        /// Why the cell refused.
        #[source]
        source: CellError,
    },
}

impl BoardError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::OutOfBounds(_) => ErrorKind::OutOfBounds,
            BoardError::Collision(_) => ErrorKind::InvalidArgument,
            BoardError::Cell { source, .. } => source.kind(),
        }
    }

    /// Coordinate of the cell that caused the error.
    pub fn coord(&self) -> Coordinate {
        match *self {
            BoardError::OutOfBounds(coord)
            | BoardError::Collision(coord)
            | BoardError::Cell { coord, .. } => coord,
        }
    }
}

/// Error caused when attempting to place a ship in an invalid position. Placement takes
/// ownership of the ship, so the error hands it back untouched.
#[derive(Error)]
#[error("could not place ship: {error}")]
pub struct PlaceError {
    #[source]
    error: BoardError,
    ship: Ship,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    /// Construct a placement error from the failure and the rejected ship.
    pub(super) fn new(error: BoardError, ship: Ship) -> Self {
        Self { error, ship }
    }

    /// Get the reason placement was aborted.
    pub fn error(&self) -> BoardError {
        self.error
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Get a reference to the ship that was not placed.
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Extract the ship from this error.
    pub fn into_ship(self) -> Ship {
        self.ship
    }
}

impl From<PlaceError> for Ship {
    /// Allows retrieving the unplaced ship from the error with into.
    fn from(err: PlaceError) -> Self {
        err.into_ship()
    }
}
