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

use serde::{Deserialize, Serialize};

use super::material::{Color, Material, Symbol};

use Color::*;
use Symbol::*;

// Signed step offsets on the mailbox.
pub(crate) const N: i32 = 10;
pub(crate) const S: i32 = -10;
pub(crate) const E: i32 = 1;
pub(crate) const W: i32 = -1;
pub(crate) const NE: i32 = N + E;
pub(crate) const NW: i32 = N + W;
pub(crate) const SE: i32 = S + E;
pub(crate) const SW: i32 = S + W;

/// The eight compass directions, clockwise from north. Attack scans pair
/// each with [`sliders_along`].
pub(crate) const COMPASS: [i32; 8] = [N, NE, E, SE, S, SW, W, NW];

pub(crate) const KNIGHT_DIRECTIONS: [i32; 8] = [
    N + N + E,
    N + N + W,
    S + S + E,
    S + S + W,
    E + E + N,
    E + E + S,
    W + W + N,
    W + W + S,
];
pub(crate) const KING_DIRECTIONS: [i32; 8] = [N, S, E, W, NE, NW, SE, SW];
const BISHOP_DIRECTIONS: [i32; 4] = [NE, NW, SE, SW];
const ROOK_DIRECTIONS: [i32; 4] = [N, S, E, W];
const QUEEN_DIRECTIONS: [i32; 8] = KING_DIRECTIONS;

/// Promotion expansion order is fixed: queen, rook, bishop, knight.
pub(crate) const PROMOTION_SYMBOLS: [Symbol; 4] = [Queen, Rook, Bishop, Knight];

/// Movement directions per kind. Pawns have specialized handling and get
/// an empty table.
pub(crate) fn directions(symbol: Symbol) -> &'static [i32] {
    match symbol {
        Pawn => &[],
        Knight => &KNIGHT_DIRECTIONS,
        Bishop => &BISHOP_DIRECTIONS,
        Rook => &ROOK_DIRECTIONS,
        Queen => &QUEEN_DIRECTIONS,
        King => &KING_DIRECTIONS,
    }
}

pub(crate) fn is_sliding(symbol: Symbol) -> bool {
    matches!(symbol, Bishop | Rook | Queen)
}

/// The slider kinds that can deliver an attack along `direction`:
/// queen + rook on orthogonals, queen + bishop on diagonals.
pub(crate) fn sliders_along(direction: i32) -> [Symbol; 2] {
    match direction.abs() {
        1 | 10 => [Queen, Rook],
        _ => [Queen, Bishop],
    }
}

/// The forward step for a pawn of `color`.
pub(crate) fn pawn_advance(color: Color) -> i32 {
    match color {
        White => N,
        Black => S,
    }
}

/// The two diagonal capture steps for a pawn of `color`.
pub(crate) fn pawn_capture_directions(color: Color) -> [i32; 2] {
    match color {
        White => [NE, NW],
        Black => [SE, SW],
    }
}

/// Upper bound on pseudo-legal moves a single piece can have; used to size
/// generation buffers.
pub(crate) fn max_moves(symbol: Symbol) -> usize {
    match symbol {
        Queen => 56,
        Rook | Bishop => 28,
        Knight | King => 8,
        Pawn => 12,
    }
}

/// A live piece owned by the board: what it is, where it stands on the
/// mailbox, and how often it has moved.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    symbol: Symbol,
    color: Color,
    position: usize,
    move_count: u32,
}

impl Piece {
    #[inline]
    pub const fn new(symbol: Symbol, color: Color, position: usize) -> Self {
        Self::with_move_count(symbol, color, position, 0)
    }

    #[inline]
    pub(crate) const fn with_move_count(
        symbol: Symbol,
        color: Color,
        position: usize,
        move_count: u32,
    ) -> Self {
        Self {
            symbol,
            color,
            position,
            move_count,
        }
    }

    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.move_count > 0
    }

    #[inline]
    pub fn material(&self) -> Material {
        Material::new(self.color, self.symbol)
    }

    #[inline]
    pub(crate) fn advance_to(&mut self, position: usize) {
        self.position = position;
        self.move_count += 1;
    }

    #[inline]
    pub(crate) fn retreat_to(&mut self, position: usize) {
        self.position = position;
        self.move_count -= 1;
    }
}

/// The 16-piece starting set for one side: a rank of pawns in front of
/// R N B Q K B N R.
pub fn start_pieces(color: Color) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(16);

    let (pawn_base, back_base) = match color {
        White => (30, 20),
        Black => (80, 90),
    };

    for file in 1..=8 {
        pieces.push(Piece::new(Pawn, color, pawn_base + file));
    }

    pieces.push(Piece::new(Rook, color, back_base + 1));
    pieces.push(Piece::new(Rook, color, back_base + 8));
    pieces.push(Piece::new(Knight, color, back_base + 2));
    pieces.push(Piece::new(Knight, color, back_base + 7));
    pieces.push(Piece::new(Bishop, color, back_base + 3));
    pieces.push(Piece::new(Bishop, color, back_base + 6));
    pieces.push(Piece::new(Queen, color, back_base + 4));
    pieces.push(Piece::new(King, color, back_base + 5));

    pieces
}
