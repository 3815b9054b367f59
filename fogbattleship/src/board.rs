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
//! Types that make up the game board.
use std::fmt;

use enumflags2::BitFlags;
use log::{debug, trace};

use crate::ships::{Ship, ShipId};

use self::grid::Grid;
pub use self::{
    cell::{BoardCell, CellState},
    coordinate::{Coordinate, Direction},
    dimensions::Dimensions,
    errors::{BoardError, CellError, ErrorKind, PlaceError},
};

mod cell;
mod coordinate;
mod dimensions;
mod errors;
mod grid;

/// A rectangular grid of cells and the ships placed on it.
///
/// A board built with every cell [`Empty`][CellState::Empty] is its owner's board: ships
/// are placed on it and it resolves attacks. A board built with every cell
/// [`Unknown`][CellState::Unknown] mirrors an opponent's board under fog of war: it
/// holds no ships and only learns outcomes through [`reveal`][Board::reveal].
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid of cells, possibly occupied by ships.
    grid: Grid,

    /// Ships placed on this board, in placement order. Indexed by [`ShipId`].
    ships: Vec<Ship>,
}

impl Board {
    /// Construct a board with every cell in the given initial state.
    /// Panics if `width` or `height` is 0 or the board would be too large to address.
    pub fn new(width: usize, height: usize, initial: CellState) -> Self {
        Self::with_dimensions(Dimensions::new(width, height), initial)
    }

    /// Construct a board with every cell in the given initial state.
    /// Returns `None` if `width` or `height` is 0 or the board would be too large to
    /// address.
    pub fn try_new(width: usize, height: usize, initial: CellState) -> Option<Self> {
        Dimensions::try_new(width, height).map(|dim| Self::with_dimensions(dim, initial))
    }

    /// Construct a board of the given [`Dimensions`] with every cell in the given initial
    /// state.
    pub fn with_dimensions(dim: Dimensions, initial: CellState) -> Self {
        Self {
            grid: Grid::new(dim, initial),
            ships: Vec::new(),
        }
    }

    /// Get the [`Dimensions`] of this [`Board`].
    pub fn dimensions(&self) -> &Dimensions {
        &self.grid.dim
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.grid.dim.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.dim.height()
    }

    /// Get the cell at the given coordinates.
    pub fn get_cell(&self, x: isize, y: isize) -> Result<&BoardCell, BoardError> {
        let coord = Coordinate::new(x, y);
        self.grid.get(coord).ok_or(BoardError::OutOfBounds(coord))
    }

    /// Get the ship occupying the cell at the given coordinates, if any.
    pub fn occupant(&self, x: isize, y: isize) -> Result<Option<&Ship>, BoardError> {
        Ok(self
            .get_cell(x, y)?
            .occupant()
            .and_then(|id| self.ship(id)))
    }

    /// Get a ship placed on this board.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    /// Iterate the ships placed on this board in placement order.
    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships
            .iter()
            .enumerate()
            .map(|(i, ship)| (ShipId(i), ship))
    }

    /// Place a ship covering `ship.size()` cells, starting at `(x, y)` and extending in
    /// `direction`. Every target cell is checked before any is changed: if one is out of
    /// bounds or not empty, nothing on the board changes and the ship is returned inside
    /// the error.
    pub fn place_ship(
        &mut self,
        x: isize,
        y: isize,
        direction: Direction,
        ship: Ship,
    ) -> Result<ShipId, PlaceError> {
        let start = Coordinate::new(x, y);
        let mut targets = Vec::with_capacity(ship.size().min(self.grid.dim.total_size()));
        let mut last = start;
        for i in 0..ship.size() {
            let step = start.offset(direction, i);
            let dim = &self.grid.dim;
            let (coord, idx) = match step.and_then(|c| dim.try_linearize(c).map(|idx| (c, idx))) {
                Some(found) => found,
                None => {
                    // A step that overflows the coordinate space is reported at the last
                    // representable cell.
                    let coord = step.unwrap_or(last);
                    trace!("{} leaves the board at {} facing {:?}", ship.name(), coord, direction);
                    return Err(PlaceError::new(BoardError::OutOfBounds(coord), ship));
                }
            };
            last = coord;
            if self.grid[idx].state() != CellState::Empty {
                trace!("{} collides at {}", ship.name(), coord);
                return Err(PlaceError::new(BoardError::Collision(coord), ship));
            }
            targets.push(idx);
        }

        let id = ShipId(self.ships.len());
        for idx in targets {
            let occupied = self.grid[idx].occupy(id);
            debug_assert!(occupied.is_ok(), "validated cell refused occupation");
        }
        debug!("placed {} at {} facing {:?}", ship.name(), start, direction);
        self.ships.push(ship);
        Ok(id)
    }

    /// Attack the cell at the given coordinates, returning its new state.
    pub fn hit(&mut self, x: isize, y: isize) -> Result<CellState, BoardError> {
        let coord = Coordinate::new(x, y);
        let idx = self.index(coord)?;
        let state = self.grid[idx]
            .attack(&mut self.ships)
            .map_err(|source| {
                trace!("attack on {} rejected: {}", coord, source);
                BoardError::Cell { coord, source }
            })?;
        debug!("attack on {}: {:?}", coord, state);
        if let Some(ship) = self.grid[idx].occupant().and_then(|id| self.ship(id)) {
            if ship.is_sunk() {
                debug!("{} sunk", ship.name());
            }
        }
        Ok(state)
    }

    /// Disclose the outcome of the fog-of-war cell at the given coordinates. `new_state`
    /// must be [`Hit`][CellState::Hit] or [`Miss`][CellState::Miss].
    pub fn reveal(&mut self, x: isize, y: isize, new_state: CellState) -> Result<(), BoardError> {
        let coord = Coordinate::new(x, y);
        let idx = self.index(coord)?;
        self.grid[idx].reveal(new_state).map_err(|source| {
            trace!("reveal of {} rejected: {}", coord, source);
            BoardError::Cell { coord, source }
        })?;
        debug!("revealed {} as {:?}", coord, new_state);
        Ok(())
    }

    /// Returns true if every ship on this board has been sunk. Vacuously true when no
    /// ship has been placed.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Count the cells whose state is in the given set, e.g.
    /// `board.count(CellState::Hit | CellState::Miss)` for the number of shots taken.
    pub fn count<S: Into<BitFlags<CellState>>>(&self, states: S) -> usize {
        let states = states.into();
        self.grid
            .cells
            .iter()
            .filter(|cell| states.contains(cell.state()))
            .count()
    }

    /// Iterate the rows of the board top to bottom, each row left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.grid.rows()
    }

    /// Place a ship at a random start and direction where it fits. Returns the ship if
    /// it fits nowhere on the board.
    #[cfg(feature = "rng_gen")]
    pub fn place_ship_randomly<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ship: Ship,
    ) -> Result<ShipId, Ship> {
        use rand::seq::SliceRandom;

        let mut candidates: Vec<(Coordinate, Direction)> = self
            .grid
            .dim
            .iter_coordinates()
            .flatten()
            .flat_map(|coord| Direction::ALL.iter().map(move |&dir| (coord, dir)))
            .collect();
        candidates.shuffle(rng);

        let mut ship = ship;
        for (start, dir) in candidates {
            match self.place_ship(start.x, start.y, dir, ship) {
                Ok(id) => return Ok(id),
                Err(err) => ship = err.into_ship(),
            }
        }
        Err(ship)
    }

    /// Map a coordinate to its cell index, or report it out of bounds.
    fn index(&self, coord: Coordinate) -> Result<usize, BoardError> {
        self.grid
            .dim
            .try_linearize(coord)
            .ok_or(BoardError::OutOfBounds(coord))
    }
}

impl fmt::Display for Board {
    /// Render the board one line per row, each cell as its glyph in brackets.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "[{}]", cell.state())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::ShipType;

    fn board() -> Board {
        Board::new(5, 5, CellState::Empty)
    }

    fn cruiser() -> Ship {
        Ship::new(ShipType::Cruiser)
    }

    fn states(board: &Board) -> Vec<CellState> {
        board
            .rows()
            .flat_map(|row| row.iter().map(BoardCell::state))
            .collect()
    }

    #[test]
    fn starts_in_initial_state() {
        let board = board();
        assert_eq!(board.get_cell(0, 0).unwrap().state(), CellState::Empty);
        assert_eq!(board.count(CellState::Empty), 25);

        let fog = Board::new(3, 2, CellState::Unknown);
        assert_eq!(fog.count(CellState::Unknown), 6);
        assert_eq!((fog.width(), fog.height()), (3, 2));
    }

    #[test]
    fn try_new_rejects_empty_board() {
        assert!(Board::try_new(0, 3, CellState::Empty).is_none());
        assert!(Board::try_new(3, 0, CellState::Empty).is_none());
    }

    #[test]
    fn get_cell_bounds() {
        let board = board();
        for &(x, y) in &[(-1, 0), (0, -1), (5, 0), (0, 5), (5, 5)] {
            assert_eq!(
                board.get_cell(x, y).unwrap_err(),
                BoardError::OutOfBounds(Coordinate::new(x, y))
            );
        }
        assert!(board.get_cell(4, 4).is_ok());
    }

    #[test]
    fn place_ship_in_each_direction() {
        let cases = [
            (Direction::Up, [(2, 2), (2, 1), (2, 0)]),
            (Direction::Right, [(2, 2), (3, 2), (4, 2)]),
            (Direction::Down, [(2, 2), (2, 3), (2, 4)]),
            (Direction::Left, [(2, 2), (1, 2), (0, 2)]),
        ];
        for &(dir, expected) in &cases {
            let mut board = board();
            let id = board.place_ship(2, 2, dir, cruiser()).unwrap();
            assert_eq!(board.count(CellState::Occupied), 3);
            for &(x, y) in &expected {
                let cell = board.get_cell(x, y).unwrap();
                assert_eq!(cell.state(), CellState::Occupied);
                assert_eq!(cell.occupant(), Some(id));
            }
        }
    }

    #[test]
    fn place_out_of_bounds_is_atomic() {
        let mut board = board();
        let before = states(&board);
        let err = board.place_ship(4, 4, Direction::Right, cruiser()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.error(), BoardError::OutOfBounds(Coordinate::new(5, 4)));
        assert_eq!(states(&board), before);
        assert_eq!(board.ships().count(), 0);

        let err = board.place_ship(0, 1, Direction::Up, cruiser()).unwrap_err();
        assert_eq!(err.error(), BoardError::OutOfBounds(Coordinate::new(0, -1)));
        assert_eq!(states(&board), before);
    }

    #[test]
    fn place_reports_first_cell_off_the_board() {
        let mut board = board();
        let err = board.place_ship(2, 3, Direction::Down, cruiser()).unwrap_err();
        assert_eq!(err.error(), BoardError::OutOfBounds(Coordinate::new(2, 5)));

        let err = board
            .place_ship(isize::max_value(), 0, Direction::Right, cruiser())
            .unwrap_err();
        assert_eq!(
            err.error(),
            BoardError::OutOfBounds(Coordinate::new(isize::max_value(), 0))
        );
    }

    #[test]
    fn place_oversized_ship_fails_without_allocating() {
        let mut board = board();
        let leviathan = Ship::custom("leviathan", usize::max_value());
        let err = board.place_ship(0, 0, Direction::Right, leviathan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.error(), BoardError::OutOfBounds(Coordinate::new(5, 0)));
        assert_eq!(err.ship().size(), usize::max_value());
        assert_eq!(board.count(CellState::Empty), 25);
    }

    #[test]
    fn place_overlapping_is_atomic() {
        let mut board = board();
        board.place_ship(0, 0, Direction::Right, cruiser()).unwrap();
        let before = states(&board);

        let err = board.place_ship(1, 2, Direction::Up, cruiser()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.error(), BoardError::Collision(Coordinate::new(1, 0)));
        assert_eq!(states(&board), before);
        assert_eq!(board.ships().count(), 1);
        assert_eq!(err.into_ship(), cruiser());
    }

    #[test]
    fn place_fails_on_resolved_cells() {
        let mut board = board();
        board.hit(1, 0).unwrap();
        let err = board.place_ship(0, 0, Direction::Right, cruiser()).unwrap_err();
        assert_eq!(err.error(), BoardError::Collision(Coordinate::new(1, 0)));
        assert_eq!(board.get_cell(0, 0).unwrap().state(), CellState::Empty);
    }

    #[test]
    fn hit_occupied_damages_ship() {
        let mut board = board();
        let id = board.place_ship(0, 0, Direction::Down, cruiser()).unwrap();
        assert_eq!(board.hit(0, 1), Ok(CellState::Hit));
        assert_eq!(board.ship(id).unwrap().hits(), 1);
        assert_eq!(board.occupant(0, 1).unwrap().map(Ship::hits), Some(1));
        assert_eq!(board.hit(1, 1), Ok(CellState::Miss));
        assert_eq!(board.ship(id).unwrap().hits(), 1);
    }

    #[test]
    fn hit_resolved_or_unknown_fails() {
        let mut board = board();
        board.hit(4, 4).unwrap();
        let again = board.hit(4, 4).unwrap_err();
        assert_eq!(again.kind(), ErrorKind::InvalidState);

        let mut fog = Board::new(5, 5, CellState::Unknown);
        let unknown = fog.hit(4, 4).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::InvalidState);
        assert_ne!(again.to_string(), unknown.to_string());
        assert_eq!(board.hit(5, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn reveal_only_changes_target() {
        let mut fog = Board::new(5, 5, CellState::Unknown);
        fog.reveal(1, 1, CellState::Miss).unwrap();
        assert_eq!(fog.get_cell(1, 1).unwrap().state(), CellState::Miss);
        assert_eq!(fog.count(CellState::Unknown), 24);

        let err = fog.reveal(1, 1, CellState::Hit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(fog.get_cell(1, 1).unwrap().state(), CellState::Miss);
    }

    #[test]
    fn reveal_rejects_bad_target_or_source() {
        let mut fog = Board::new(5, 5, CellState::Unknown);
        let err = fog.reveal(0, 0, CellState::Occupied).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut board = board();
        let err = board.reveal(0, 0, CellState::Hit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(
            fog.reveal(0, 9, CellState::Hit).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
    }

    #[test]
    fn all_ships_sunk() {
        let mut board = board();
        assert!(board.all_ships_sunk());
        board.place_ship(0, 0, Direction::Right, cruiser()).unwrap();
        board
            .place_ship(0, 1, Direction::Right, Ship::new(ShipType::Destroyer))
            .unwrap();
        assert!(!board.all_ships_sunk());
        for x in 0..3 {
            board.hit(x, 0).unwrap();
        }
        assert!(!board.all_ships_sunk());
        board.hit(0, 1).unwrap();
        board.hit(1, 1).unwrap();
        assert!(board.all_ships_sunk());
    }

    #[test]
    fn renders_rows_top_to_bottom() {
        let mut board = board();
        board.place_ship(1, 1, Direction::Right, cruiser()).unwrap();
        board.hit(1, 1).unwrap();
        board.hit(2, 0).unwrap();
        assert_eq!(
            board.to_string(),
            "[ ][ ][O][ ][ ]\n\
             [ ][X][S][S][ ]\n\
             [ ][ ][ ][ ][ ]\n\
             [ ][ ][ ][ ][ ]\n\
             [ ][ ][ ][ ][ ]\n"
        );
        assert_eq!(
            Board::new(2, 1, CellState::Unknown).to_string(),
            "[?][?]\n"
        );
    }

    #[cfg(feature = "rng_gen")]
    #[test]
    fn random_placement_fits_whole_fleet() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(10, 10, CellState::Empty);
        for &kind in ShipType::ALL {
            board.place_ship_randomly(&mut rng, Ship::new(kind)).unwrap();
        }
        assert_eq!(board.count(CellState::Occupied), 17);

        let mut tiny = Board::new(2, 2, CellState::Empty);
        let ship = tiny
            .place_ship_randomly(&mut rng, Ship::new(ShipType::Carrier))
            .unwrap_err();
        assert_eq!(ship.name(), "CARRIER");
        assert_eq!(tiny.count(CellState::Empty), 4);
    }
}
