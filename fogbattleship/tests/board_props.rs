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
use fogbattleship::{board::ErrorKind, Board, CellState, Coordinate, Direction, Ship, ShipType};
use proptest::prelude::*;

const ALL_STATES: &[CellState] = &[
    CellState::Empty,
    CellState::Occupied,
    CellState::Hit,
    CellState::Miss,
    CellState::Unknown,
];

fn states(board: &Board) -> Vec<CellState> {
    board
        .rows()
        .flat_map(|row| row.iter().map(|cell| cell.state()))
        .collect()
}

/// Board with a few ships dropped in; placements that do not fit are skipped.
fn fleet_board(
    width: usize,
    height: usize,
    placements: &[(isize, isize, Direction, ShipType)],
) -> Board {
    let mut board = Board::new(width, height, CellState::Empty);
    for &(x, y, dir, kind) in placements {
        let _ = board.place_ship(x, y, dir, Ship::new(kind));
    }
    board
}

fn placement() -> impl Strategy<Value = (isize, isize, Direction, ShipType)> {
    (
        -2isize..10,
        -2isize..10,
        prop::sample::select(Direction::ALL),
        prop::sample::select(ShipType::ALL),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn get_cell_checks_bounds(
        width in 1usize..12,
        height in 1usize..12,
        x in -15isize..15,
        y in -15isize..15,
    ) {
        let board = Board::new(width, height, CellState::Empty);
        let in_bounds = x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height;
        match board.get_cell(x, y) {
            Ok(cell) => {
                prop_assert!(in_bounds);
                prop_assert_eq!(cell.state(), CellState::Empty);
            }
            Err(err) => {
                prop_assert!(!in_bounds);
                prop_assert_eq!(err.kind(), ErrorKind::OutOfBounds);
            }
        }
    }

    #[test]
    fn placement_is_exact_or_untouched(
        existing in prop::collection::vec(placement(), 0..4),
        (x, y, dir, kind) in placement(),
    ) {
        let mut board = fleet_board(8, 8, &existing);
        let before = states(&board);
        let ships_before = board.ships().count();

        match board.place_ship(x, y, dir, Ship::new(kind)) {
            Ok(id) => {
                let covered: Vec<Coordinate> = (0..kind.len())
                    .map(|i| Coordinate::new(x, y).offset(dir, i).unwrap())
                    .collect();
                for (idx, coord) in board.dimensions().iter_coordinates().flatten().enumerate() {
                    let cell = board.get_cell(coord.x, coord.y).unwrap();
                    if covered.contains(&coord) {
                        prop_assert_eq!(before[idx], CellState::Empty);
                        prop_assert_eq!(cell.state(), CellState::Occupied);
                        prop_assert_eq!(cell.occupant(), Some(id));
                    } else {
                        prop_assert_eq!(cell.state(), before[idx]);
                    }
                }
                prop_assert_eq!(board.ships().count(), ships_before + 1);
            }
            Err(err) => {
                prop_assert!(
                    err.kind() == ErrorKind::OutOfBounds
                        || err.kind() == ErrorKind::InvalidArgument
                );
                prop_assert_eq!(states(&board), before);
                prop_assert_eq!(board.ships().count(), ships_before);
                prop_assert_eq!(err.into_ship(), Ship::new(kind));
            }
        }
    }

    #[test]
    fn attacks_follow_cell_state(
        existing in prop::collection::vec(placement(), 1..5),
        shots in prop::collection::vec((0isize..8, 0isize..8), 1..40),
    ) {
        let mut board = fleet_board(8, 8, &existing);
        for (x, y) in shots {
            let before = board.get_cell(x, y).unwrap().state();
            let occupant = board.get_cell(x, y).unwrap().occupant();
            let hits_before = occupant.map(|id| board.ship(id).unwrap().hits());

            match board.hit(x, y) {
                Ok(CellState::Hit) => {
                    prop_assert_eq!(before, CellState::Occupied);
                    let hits_after = occupant.map(|id| board.ship(id).unwrap().hits());
                    prop_assert_eq!(hits_after, hits_before.map(|h| h + 1));
                }
                Ok(CellState::Miss) => {
                    prop_assert_eq!(before, CellState::Empty);
                    prop_assert_eq!(occupant, None);
                }
                Ok(other) => prop_assert!(false, "attack produced {:?}", other),
                Err(err) => {
                    prop_assert!(before == CellState::Hit || before == CellState::Miss);
                    prop_assert_eq!(err.kind(), ErrorKind::InvalidState);
                }
            }

            let total_hits: usize = board.ships().map(|(_, ship)| ship.hits()).sum();
            prop_assert_eq!(total_hits, board.count(CellState::Hit));
            prop_assert_eq!(
                board.all_ships_sunk(),
                board.ships().all(|(_, ship)| ship.is_sunk())
            );
        }
    }

    #[test]
    fn reveal_only_from_unknown_to_outcome(
        source in prop::sample::select(ALL_STATES),
        target in prop::sample::select(ALL_STATES),
    ) {
        let mut board = Board::new(3, 3, source);
        let result = board.reveal(1, 1, target);
        if source != CellState::Unknown {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
            prop_assert_eq!(board.get_cell(1, 1).unwrap().state(), source);
        } else if target != CellState::Hit && target != CellState::Miss {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
            prop_assert_eq!(board.get_cell(1, 1).unwrap().state(), CellState::Unknown);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(board.get_cell(1, 1).unwrap().state(), target);
            prop_assert_eq!(board.count(source), 8);
        }
    }

    #[test]
    fn ship_sinks_after_exactly_size_hits(size in 1usize..8, extra in 0usize..5) {
        let mut ship = Ship::custom("test", size);
        for _ in 0..size {
            prop_assert!(!ship.is_sunk());
            prop_assert!(ship.hit());
        }
        prop_assert!(ship.is_sunk());
        for _ in 0..extra {
            prop_assert!(!ship.hit());
        }
        prop_assert_eq!(ship.hits(), size);
    }
}
