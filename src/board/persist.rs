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

use anyhow::{ensure, Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use super::cell::{Cell, BOARD_SIZE};
use super::material::{Color, Pair};
use super::piece::Piece;
use super::{Board, Round};

/// Flat snapshot of the full board state, the unit the binary codec
/// encodes. Kept separate from `Board` so the wire layout does not leak
/// into the in-memory representation.
#[derive(Serialize, Deserialize)]
struct BoardSnapshot {
    cells: Vec<Cell>,
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white_king_pos: Option<usize>,
    black_king_pos: Option<usize>,
    history: Vec<Round>,
    graveyard: Vec<Piece>,
    draw_counter: u32,
    hash_counts: FxHashMap<u64, u32>,
    active_color: Color,
}

impl Board {
    /// Serialize the complete board state to `writer`.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let snapshot = BoardSnapshot {
            cells: self.cells.to_vec(),
            white_pieces: self.pieces.white().clone(),
            black_pieces: self.pieces.black().clone(),
            white_king_pos: *self.king_pos.white(),
            black_king_pos: *self.king_pos.black(),
            history: self.history.clone(),
            graveyard: self.graveyard.clone(),
            draw_counter: self.draw_counter,
            hash_counts: self.hash_counts.clone(),
            active_color: self.active_color,
        };
        bincode::serialize_into(writer, &snapshot).context("failed to encode board snapshot")
    }

    /// Rebuild a board from a snapshot produced by [`Board::save`].
    pub fn load<R: Read>(reader: R) -> Result<Board> {
        let snapshot: BoardSnapshot =
            bincode::deserialize_from(reader).context("failed to decode board snapshot")?;
        ensure!(
            snapshot.cells.len() == BOARD_SIZE,
            "board snapshot holds {} cells, expected {}",
            snapshot.cells.len(),
            BOARD_SIZE,
        );
        let mut cells = [Cell::Empty; BOARD_SIZE];
        cells.copy_from_slice(&snapshot.cells);
        Ok(Board {
            cells,
            pieces: Pair::new(snapshot.white_pieces, snapshot.black_pieces),
            king_pos: Pair::new(snapshot.white_king_pos, snapshot.black_king_pos),
            history: snapshot.history,
            graveyard: snapshot.graveyard,
            draw_counter: snapshot.draw_counter,
            hash_counts: snapshot.hash_counts,
            active_color: snapshot.active_color,
        })
    }
}
