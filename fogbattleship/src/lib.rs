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
//! Rules engine for a two-player game of Battleship.
//!
//! A [`Board`][board::Board] is either the fully-known board of its owner, constructed
//! with every cell [`Empty`][board::CellState::Empty], or a fog-of-war mirror of an
//! opponent's board, constructed with every cell [`Unknown`][board::CellState::Unknown].
//! Ships are placed on the owner's board and attacked with [`Board::hit`]; the outcome of
//! each attack is then disclosed on the mirror with [`Board::reveal`].
//!
//! [`Board::hit`]: board::Board::hit
//! [`Board::reveal`]: board::Board::reveal
//!
//! The [`transport`] module provides a blocking, newline-delimited text channel that two
//! peers may use to exchange shots and results. The engine itself never depends on it.

pub mod board;
pub mod ships;
pub mod transport;

pub use crate::{
    board::{Board, BoardCell, CellState, Coordinate, Direction},
    ships::{Ship, ShipId, ShipType},
};
