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
use std::io::{self, BufRead, Write};

use clap::{App, Arg, ArgMatches};
use log::{info, warn};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use regex::Regex;

use fogbattleship::{
    board::{BoardError, Dimensions, ErrorKind},
    Board, CellState, Direction, Ship, ShipType,
};

mod logging;

/// The two sides of a local game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Side {
    Human,
    Computer,
}

impl Side {
    fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

/// One side's boards: its own fleet and its fog-of-war view of the opponent.
struct Boards {
    own: Board,
    target: Board,
}

impl Boards {
    fn new(own: Board) -> Self {
        let target = Board::with_dimensions(*own.dimensions(), CellState::Unknown);
        Self { own, target }
    }
}

/// Result of a resolved shot.
struct Shot {
    outcome: CellState,
    sunk: Option<String>,
}

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line battleship against the computer, played under fog of war.")
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first_player")
                .value_name("FIRST_PLAYER")
                .help("pre-specify which player goes first")
                .takes_value(true)
                .possible_values(&["human", "me", "computer", "bot", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("WIDTH")
                .help("number of columns on each board")
                .takes_value(true)
                .default_value("10")
                .validator(validate_extent),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("HEIGHT")
                .help("number of rows on each board")
                .takes_value(true)
                .default_value("10")
                .validator(validate_extent),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed for the computer's choices")
                .takes_value(true)
                .validator(|v| v.parse::<u64>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .get_matches();

    logging::init_logging();

    // Validators already checked these values.
    let width = matches.value_of("width").and_then(|v| v.parse().ok()).unwrap_or(10);
    let height = matches.value_of("height").and_then(|v| v.parse().ok()).unwrap_or(10);
    if Dimensions::try_new(width, height).is_none() {
        println!("A {}x{} board is too large.", width, height);
        return Ok(());
    }
    let mut rng = match matches.value_of("seed").and_then(|v| v.parse().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let first = choose_player(&matches, &mut rng, &mut input)?;

    let human = match choose_placements(&mut rng, width, height, &mut input)? {
        Some(board) => board,
        None => return Ok(()),
    };
    let computer = match random_fleet(&mut rng, width, height) {
        Some(board) => board,
        None => {
            println!("The computer could not fit its fleet on a {}x{} board.", width, height);
            return Ok(());
        }
    };
    info!("boards ready, {:?} fires first", first);

    play(&mut rng, Boards::new(human), Boards::new(computer), first, &mut input)
}

/// clap validator for board extents.
fn validate_extent(v: String) -> Result<(), String> {
    match v.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(_) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Choose which [`Side`] fires first based on either args or cli input.
fn choose_player<B: BufRead>(
    matches: &ArgMatches,
    rng: &mut impl Rng,
    input: &mut InputReader<B>,
) -> io::Result<Side> {
    Ok(if let Some(clichoice) = matches.value_of("first_player") {
        match clichoice.to_ascii_lowercase().as_str() {
            "human" | "me" => Side::Human,
            "computer" | "bot" => Side::Computer,
            _ if rng.gen() => Side::Human,
            _ => Side::Computer,
        }
    } else {
        input.read_input_lower("Do you want to go first? (Y/n)", |input| match input {
            "yes" | "y" | "first" | "1" | "1st" | "" => Some(Side::Human),
            "no" | "n" | "second" | "2" | "2nd" => Some(Side::Computer),
            _ => {
                println!("Invalid selection.");
                None
            }
        })?
    })
}

/// Parse a ship name or abbreviation.
fn parse_ship(name: &str) -> Option<ShipType> {
    match name {
        "cv" | "carrier" => Some(ShipType::Carrier),
        "bb" | "battleship" => Some(ShipType::Battleship),
        "ca" | "cl" | "cruiser" => Some(ShipType::Cruiser),
        "ss" | "sub" | "submarine" => Some(ShipType::Submarine),
        "dd" | "destroyer" => Some(ShipType::Destroyer),
        _ => None,
    }
}

/// Parse a direction name.
fn parse_direction(name: &str) -> Option<Direction> {
    match name {
        "up" | "north" | "u" | "n" => Some(Direction::Up),
        "down" | "south" | "d" | "s" => Some(Direction::Down),
        "left" | "west" | "l" | "w" => Some(Direction::Left),
        "right" | "east" | "r" | "e" => Some(Direction::Right),
        _ => None,
    }
}

/// Choose placements for all ships using input from the player. Returns `None` if the
/// player quits.
fn choose_placements(
    rng: &mut impl Rng,
    width: usize,
    height: usize,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<Option<Board>> {
    enum Command {
        Done,
        Place(ShipType, isize, isize, Direction),
        Clear,
        RandomizeRest,
        Help,
        Quit,
    }
    /// Matcher for the place command.
    static PLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:place|put)\s+
        (?P<ship>\w+)\s+
        (?:(?:at|on|to|->|=>)\s+)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)\s+
        (?P<dir>\w+)$",
        )
        .unwrap()
    });

    let mut board = Board::new(width, height, CellState::Empty);
    let mut pending: Vec<ShipType> = ShipType::ALL.to_vec();

    println!();
    println!("Place ships. Type help or ? for commands.");
    loop {
        println!();
        if pending.is_empty() {
            println!("All ships placed, type done to start the game");
        } else {
            let names: Vec<_> = pending.iter().map(|kind| full_name(*kind)).collect();
            println!("Remaining ships to place: {}", names.join(", "));
        }
        println!("Your current board setup:");
        show_board(&board);
        println!();

        let cmd = input.read_input_lower(">", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" => Some(Command::RandomizeRest),
            "done" | "start" => Some(Command::Done),
            "clear" => Some(Command::Clear),
            "quit" | "exit" => Some(Command::Quit),
            other => {
                let captures = match PLACE.captures(other) {
                    Some(captures) => captures,
                    None => {
                        println!("Invalid ship-placement command \"{}\". Use '?' for help", other);
                        return None;
                    }
                };
                let ship = match parse_ship(&captures["ship"]) {
                    Some(ship) => ship,
                    None => {
                        println!("invalid ship: {}, choose \"carrier\", \"battleship\", \"cruiser\", \"submarine\", or \"destroyer\"", &captures["ship"]);
                        return None;
                    }
                };
                let (x, y) = match (captures["x"].parse::<isize>(), captures["y"].parse::<isize>()) {
                    (Ok(x), Ok(y)) => (x, y),
                    _ => {
                        println!("invalid coordinate: {},{}", &captures["x"], &captures["y"]);
                        return None;
                    }
                };
                let dir = match parse_direction(&captures["dir"]) {
                    Some(dir) => dir,
                    None => {
                        println!("invalid direction {}, choose \"up\", \"down\", \"left\", or \"right\"", &captures["dir"]);
                        return None;
                    }
                };
                Some(Command::Place(ship, x, y, dir))
            }
        })?;

        match cmd {
            Command::Done if pending.is_empty() => return Ok(Some(board)),
            Command::Done => println!("You must place all your ships first!"),
            Command::Quit => return Ok(None),
            Command::Place(kind, x, y, dir) => {
                if !pending.contains(&kind) {
                    println!("Your {} is already placed. Use clear to start over.", full_name(kind));
                    continue;
                }
                match board.place_ship(x, y, dir, Ship::new(kind)) {
                    Ok(_) => pending.retain(|&p| p != kind),
                    Err(err) => match err.kind() {
                        ErrorKind::InvalidArgument => {
                            println!("Invalid placement: overlaps existing ship.")
                        }
                        ErrorKind::OutOfBounds => {
                            println!("Invalid placement: not enough space on the board.")
                        }
                        ErrorKind::InvalidState => println!("Invalid placement: {}", err),
                    },
                }
            }
            Command::Clear => {
                board = Board::new(width, height, CellState::Empty);
                pending = ShipType::ALL.to_vec();
            }
            Command::RandomizeRest => {
                for kind in std::mem::take(&mut pending) {
                    if let Err(ship) = board.place_ship_randomly(rng, Ship::new(kind)) {
                        println!("No room left for your {}.", ship.name().to_ascii_lowercase());
                        pending.push(kind);
                    }
                }
            }
            Command::Help => {
                println!(
                    "Available Commands:
    done                        if all ships are placed, start the game.
    place <ship> <x>,<y> <dir>  place the ship at the given coordinate in the given direction.
        Possible directions are \"up\", \"down\", \"left\", and \"right\". See below for ships.
    clear                       clears all ship placements.
    randomize                   randomize the placements of the remaining ships.
    quit                        leave the game.

Available Ships:
    \"carrier\" (\"cv\")
    \"battleship\" (\"bb\")
    \"cruiser\" (\"cl\")
    \"submarine\" (\"ss\")
    \"destroyer\" (\"dd\")",
                );
            }
        }
    }
}

/// Place the whole catalog at random. Returns `None` if some ship does not fit.
fn random_fleet(rng: &mut impl Rng, width: usize, height: usize) -> Option<Board> {
    let mut board = Board::new(width, height, CellState::Empty);
    for &kind in ShipType::ALL {
        if let Err(ship) = board.place_ship_randomly(rng, Ship::new(kind)) {
            warn!("no room for {} on a {}x{} board", ship.name(), width, height);
            return None;
        }
    }
    Some(board)
}

/// Resolve a shot on the target's own board and disclose the outcome on the shooter's
/// fog-of-war view.
fn fire(target: &mut Board, view: &mut Board, x: isize, y: isize) -> Result<Shot, BoardError> {
    let outcome = target.hit(x, y)?;
    view.reveal(x, y, outcome)?;
    let sunk = target
        .occupant(x, y)?
        .filter(|ship| ship.is_sunk())
        .map(|ship| ship.name().to_ascii_lowercase());
    Ok(Shot { outcome, sunk })
}

/// Alternate shots until one fleet is sunk.
fn play(
    rng: &mut impl Rng,
    mut human: Boards,
    mut computer: Boards,
    first: Side,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    let mut turn = first;
    loop {
        match turn {
            Side::Human => {
                println!();
                println!("Your fleet:");
                show_board(&human.own);
                println!("Enemy waters:");
                show_board(&human.target);
                println!();
                let (x, y) = input.read_input_lower("Fire at <x>,<y>:", |input| {
                    parse_shot(input).map_err(|msg| println!("{}", msg)).ok()
                })?;
                match fire(&mut computer.own, &mut human.target, x, y) {
                    Ok(shot) => report("You fire", x, y, &shot, "their"),
                    Err(err) => {
                        println!("Invalid shot: {}", err);
                        continue;
                    }
                }
                if computer.own.all_ships_sunk() {
                    println!("You sank the whole enemy fleet. You win!");
                    println!("Enemy fleet:");
                    show_board(&computer.own);
                    return Ok(());
                }
            }
            Side::Computer => {
                let (x, y) = match choose_target(rng, &computer.target) {
                    Some(coord) => coord,
                    None => {
                        warn!("computer has no cells left to shoot");
                        return Ok(());
                    }
                };
                match fire(&mut human.own, &mut computer.target, x, y) {
                    Ok(shot) => report("The computer fires", x, y, &shot, "your"),
                    Err(err) => {
                        warn!("computer shot at ({}, {}) rejected: {}", x, y, err);
                        continue;
                    }
                }
                if human.own.all_ships_sunk() {
                    println!("Your fleet has been sunk. The computer wins.");
                    println!("Your fleet:");
                    show_board(&human.own);
                    return Ok(());
                }
            }
        }
        turn = turn.opponent();
    }
}

/// Parse a shot command such as `fire at 3,4` or `3 4`.
fn parse_shot(input: &str) -> Result<(isize, isize), String> {
    /// Matcher for a shot.
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:(?:fire|shoot)\s+)?(?:at\s+)?(?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$")
            .unwrap()
    });

    let captures = FIRE.captures(input).ok_or_else(|| {
        format!("Invalid shot command \"{}\". Enter a target as <x>,<y>", input)
    })?;
    match (captures["x"].parse::<isize>(), captures["y"].parse::<isize>()) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(format!("invalid coordinate: {},{}", &captures["x"], &captures["y"])),
    }
}

/// Print the outcome of a shot.
fn report(shooter: &str, x: isize, y: isize, shot: &Shot, owner: &str) {
    let outcome = match shot.outcome {
        CellState::Hit => "hit",
        _ => "miss",
    };
    println!("{} at {},{}: {}!", shooter, x, y, outcome);
    if let Some(name) = &shot.sunk {
        println!("That sank {} {}.", owner, name);
    }
}

/// Pick a random cell the computer has not shot yet.
fn choose_target(rng: &mut impl Rng, view: &Board) -> Option<(isize, isize)> {
    let unknown: Vec<_> = view
        .dimensions()
        .iter_coordinates()
        .flatten()
        .filter(|coord| {
            view.get_cell(coord.x, coord.y)
                .map(|cell| cell.state() == CellState::Unknown)
                .unwrap_or(false)
        })
        .collect();
    unknown.choose(rng).map(|coord| (coord.x, coord.y))
}

/// Show the board by printing the grid with row and column labels.
fn show_board(board: &Board) {
    print!("   ");
    for i in 0..board.width() {
        print!("{:^3}", i);
    }
    println!();
    for (i, row) in board.rows().enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^3}", cell.state());
        }
        println!();
    }
}

/// The ship's full lowercase name.
fn full_name(kind: ShipType) -> &'static str {
    match kind {
        ShipType::Carrier => "carrier",
        ShipType::Battleship => "battleship",
        ShipType::Cruiser => "cruiser",
        ShipType::Submarine => "submarine",
        ShipType::Destroyer => "destroyer",
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
