// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::material::{Color, Material, Symbol};

/// Mailbox dimensions: 8x8 playable squares inside a sentinel border wide
/// enough that knight jumps from the rim stay inside the array.
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 12;
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// External 8x8 index (rank-major, a1 = 0, h8 = 63) to mailbox position.
#[rustfmt::skip]
pub const INDEX_TO_MAILBOX: [usize; 64] = [
    21, 22, 23, 24, 25, 26, 27, 28,
    31, 32, 33, 34, 35, 36, 37, 38,
    41, 42, 43, 44, 45, 46, 47, 48,
    51, 52, 53, 54, 55, 56, 57, 58,
    61, 62, 63, 64, 65, 66, 67, 68,
    71, 72, 73, 74, 75, 76, 77, 78,
    81, 82, 83, 84, 85, 86, 87, 88,
    91, 92, 93, 94, 95, 96, 97, 98,
];

#[inline]
pub fn index_to_mailbox(index: usize) -> usize {
    INDEX_TO_MAILBOX[index]
}

static MAILBOX_TO_INDEX: Lazy<[Option<usize>; BOARD_SIZE]> = Lazy::new(|| {
    let mut map = [None; BOARD_SIZE];
    for (index, &pos) in INDEX_TO_MAILBOX.iter().enumerate() {
        map[pos] = Some(index);
    }
    map
});

/// Inverse of [`index_to_mailbox`]; `None` for border positions.
#[inline]
pub fn mailbox_to_index(pos: usize) -> Option<usize> {
    MAILBOX_TO_INDEX.get(pos).copied().flatten()
}

/// One square of the mailbox.
///
/// The border carries `Sentinel` so that walking a signed step offset off
/// the playable area lands on a cell that stops the walk, with no bounds
/// arithmetic on the hot path.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Sentinel,
    Occupied(Material),
}

impl Cell {
    pub const EMPTY_VALUE: i32 = 0;
    pub const SENTINEL_VALUE: i32 = 7;

    /// The raw integer projection: `0` empty, `7` sentinel, signed
    /// `symbol * color` otherwise.
    #[inline]
    pub const fn value(&self) -> i32 {
        match self {
            Cell::Empty => Self::EMPTY_VALUE,
            Cell::Sentinel => Self::SENTINEL_VALUE,
            Cell::Occupied(material) => material.value(),
        }
    }

    #[inline]
    pub const fn occupant(&self) -> Option<Material> {
        match self {
            Cell::Occupied(material) => Some(*material),
            _ => None,
        }
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.occupant().map(|material| material.color())
    }

    #[inline]
    pub fn symbol(&self) -> Option<Symbol> {
        self.occupant().map(|material| material.symbol())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Cell::Sentinel)
    }
}

/// The cell a blank board carries at `pos`: sentinel on the two-row top and
/// bottom borders and the single-column side borders, empty inside.
pub(crate) const fn border_cell(pos: usize) -> Cell {
    if pos < 2 * BOARD_WIDTH
        || pos >= BOARD_SIZE - 2 * BOARD_WIDTH
        || pos % BOARD_WIDTH == 0
        || pos % BOARD_WIDTH == BOARD_WIDTH - 1
    {
        Cell::Sentinel
    } else {
        Cell::Empty
    }
}
