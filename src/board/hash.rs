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

use rustc_hash::FxHasher;
use std::hash::Hasher;
use strum::IntoEnumIterator;

use super::cell::{Cell, INDEX_TO_MAILBOX};
use super::material::{Color, Material, Symbol};
use super::moves::Move;
use super::Board;

use Symbol::*;

const NO_EN_PASSANT: u8 = 0xff;

impl Board {
    /// The repetition hash of the current position, computed right after
    /// `last` was applied (so the active color is the side now to move).
    ///
    /// Two positions hash equal iff they agree on piece placement, the
    /// side to move, which castles are currently generable, and which
    /// en-passant captures are currently available.
    pub(crate) fn position_hash(&self, last: &Move) -> u64 {
        let mut bytes = Vec::with_capacity(INDEX_TO_MAILBOX.len() + 4);
        for &pos in INDEX_TO_MAILBOX.iter() {
            bytes.push(self.cells[pos].value() as i8 as u8);
        }
        bytes.push(self.active_color.value() as i8 as u8);
        bytes.push(self.castling_bits());

        let (west, east) = self.en_passant_squares(last);
        bytes.push(west.map_or(NO_EN_PASSANT, |pos| pos as u8));
        bytes.push(east.map_or(NO_EN_PASSANT, |pos| pos as u8));

        let mut hasher = FxHasher::default();
        hasher.write(&bytes);
        hasher.finish()
    }

    /// Castling availability as a 4-bit set, derived from the generator:
    /// bit 0 white kingside, bit 1 white queenside, bit 2 black kingside,
    /// bit 3 black queenside.
    fn castling_bits(&self) -> u8 {
        let mut bits = 0u8;
        for color in Color::iter() {
            let Some(king) = self.pieces[color].iter().find(|p| p.symbol() == King).copied()
            else {
                continue;
            };
            for m in self.castling_moves(&king) {
                bits |= match m.rook_from {
                    28 => 1,
                    21 => 2,
                    98 => 4,
                    91 => 8,
                    _ => 0,
                };
            }
        }
        bits
    }

    /// The squares of pawns that could capture en passant next half-move:
    /// set only when `last` was a pawn double-step with a pawn of the side
    /// to move standing directly west or east of its landing square.
    fn en_passant_squares(&self, last: &Move) -> (Option<usize>, Option<usize>) {
        if last.color == self.active_color {
            return (None, None);
        }
        if last.symbol != Pawn || (last.to as i32 - last.from as i32).abs() != 20 {
            return (None, None);
        }
        let own_pawn = Cell::Occupied(Material::new(self.active_color, Pawn));
        let west = (self.cells[last.to - 1] == own_pawn).then(|| last.to - 1);
        let east = (self.cells[last.to + 1] == own_pawn).then(|| last.to + 1);
        (west, east)
    }
}
