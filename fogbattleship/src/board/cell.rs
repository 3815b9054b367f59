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
//! State machine for a single cell of the board.
use std::fmt;

use enumflags2::BitFlags;
use log::trace;

use crate::{
    board::CellError,
    ships::{Ship, ShipId},
};

/// State of a single cell.
///
/// An owner's cells move `Empty -> Occupied -> Hit` or `Empty -> Miss`. A fog-of-war cell
/// starts `Unknown` and is revealed as exactly `Hit` or `Miss`. No transition ever returns
/// to an earlier state.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// Open water that has not been shot.
    Empty = 0b00001,
    /// Part of a ship that has not been shot.
    Occupied = 0b00010,
    /// Part of a ship that has been shot.
    Hit = 0b00100,
    /// Open water that has been shot.
    Miss = 0b01000,
    /// An opponent's cell whose outcome has not been disclosed.
    Unknown = 0b10000,
}

impl CellState {
    /// States in which a shot has been resolved.
    pub fn resolved() -> BitFlags<CellState> {
        CellState::Hit | CellState::Miss
    }

    /// Single character used when rendering the board as text.
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => ' ',
            CellState::Occupied => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'O',
            CellState::Unknown => '?',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0; 4];
        f.pad(self.glyph().encode_utf8(&mut buf))
    }
}

/// A single cell in the player's grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardCell {
    /// The ship that occupies this cell, if any. Set only together with `Occupied`.
    occupant: Option<ShipId>,

    /// Current state of the cell.
    state: CellState,
}

impl BoardCell {
    /// Construct a cell in the given state with no occupant.
    pub fn new(state: CellState) -> Self {
        Self {
            occupant: None,
            state,
        }
    }

    /// Current state of this cell.
    pub fn state(&self) -> CellState {
        self.state
    }

    /// The ship occupying this cell, if any. Stays set after the cell is hit.
    pub fn occupant(&self) -> Option<ShipId> {
        self.occupant
    }

    /// Mark this cell as occupied by the given ship. Only valid from `Empty`.
    pub fn occupy(&mut self, ship: ShipId) -> Result<(), CellError> {
        if self.state != CellState::Empty {
            trace!("refusing to occupy {:?} cell", self.state);
            return Err(CellError::NotEmpty);
        }
        self.occupant = Some(ship);
        self.state = CellState::Occupied;
        Ok(())
    }

    /// Attack this cell, returning its new state. An occupied cell becomes `Hit` and the
    /// occupying ship, looked up in `fleet`, takes a hit; an empty cell becomes `Miss`.
    /// Fog-of-war cells cannot be attacked and must be revealed instead.
    pub fn attack(&mut self, fleet: &mut [Ship]) -> Result<CellState, CellError> {
        match self.state {
            CellState::Hit | CellState::Miss => return Err(CellError::AlreadyAttacked),
            CellState::Unknown => return Err(CellError::Unrevealed),
            CellState::Occupied => {
                self.state = CellState::Hit;
                if let Some(ship) = self.occupant.and_then(|id| fleet.get_mut(id.index())) {
                    ship.hit();
                }
            }
            CellState::Empty => self.state = CellState::Miss,
        }
        Ok(self.state)
    }

    /// Disclose the outcome of a fog-of-war cell. Only valid from `Unknown`, and only to
    /// `Hit` or `Miss`.
    pub fn reveal(&mut self, new_state: CellState) -> Result<(), CellError> {
        if self.state != CellState::Unknown {
            return Err(CellError::AlreadyKnown);
        }
        if !CellState::resolved().contains(new_state) {
            return Err(CellError::InvalidReveal(new_state));
        }
        self.state = new_state;
        Ok(())
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::new(CellState::Empty)
    }
}
