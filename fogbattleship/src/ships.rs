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
//! Types used for defining ships and tracking the damage they have taken.
use std::fmt;

/// The standard catalog of ships.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShipType {
    /// Carrier: length 5.
    Carrier,
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Submarine: length 3.
    Submarine,
    /// Destroyer: length 2.
    Destroyer,
}

impl ShipType {
    /// Every ship type in the catalog, largest first.
    pub const ALL: &'static [ShipType] = &[
        ShipType::Carrier,
        ShipType::Battleship,
        ShipType::Cruiser,
        ShipType::Submarine,
        ShipType::Destroyer,
    ];

    /// Get the length of this ship type.
    pub fn len(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    /// Display name given to ships of this type.
    pub fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "CARRIER",
            ShipType::Battleship => "BATTLESHIP",
            ShipType::Cruiser => "CRUISER",
            ShipType::Submarine => "SUBMARINE",
            ShipType::Destroyer => "DESTROYER",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Handle to a ship owned by a [`Board`][crate::board::Board]. Only meaningful for the
/// board that returned it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShipId(pub(crate) usize);

impl ShipId {
    /// Position of the ship in its board's placement order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A ship with a fixed size that counts the hits it has taken.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    name: String,
    size: usize,
    hits: usize,
}

impl Ship {
    /// Construct an undamaged ship of the given catalog type.
    pub fn new(kind: ShipType) -> Self {
        Self::custom(kind.name(), kind.len())
    }

    /// Construct an undamaged ship with an arbitrary name and size. Panics if size is 0.
    pub fn custom<N: Into<String>>(name: N, size: usize) -> Self {
        match Self::try_custom(name, size) {
            Some(ship) => ship,
            None => panic!("ship size must be nonzero"),
        }
    }

    /// Construct an undamaged ship with an arbitrary name and size. Returns `None` if
    /// size is 0.
    pub fn try_custom<N: Into<String>>(name: N, size: usize) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(Self {
                name: name.into(),
                size,
                hits: 0,
            })
        }
    }

    /// The display name of this ship.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells this ship covers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of hits taken so far. Never exceeds [`size`][Ship::size].
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of hits still needed to sink this ship.
    pub fn remaining(&self) -> usize {
        self.size - self.hits
    }

    /// Record a hit. Returns false without changing anything if the ship was already
    /// sunk.
    pub fn hit(&mut self) -> bool {
        if self.is_sunk() {
            false
        } else {
            self.hits += 1;
            true
        }
    }

    /// Returns true once the ship has taken as many hits as its size.
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.size
    }
}

impl From<ShipType> for Ship {
    fn from(kind: ShipType) -> Self {
        Ship::new(kind)
    }
}
