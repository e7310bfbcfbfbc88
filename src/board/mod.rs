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

//! Chess rules engine over a sentinel-bordered mailbox board.
//!
//! A `Board` owns the complete state of one game of chess and provides
//! the mechanisms to play it:
//!
//! * A 10x12 _mailbox_ cell array in which every playable square has an
//!   in-bounds 8-neighborhood; two border rows and columns of
//!   [`Cell::Sentinel`] stop sliding movement and knight jumps without
//!   bounds checks. External callers address squares with 8x8 indices
//!   (`a1 = 0` .. `h8 = 63`); [`index_to_mailbox`] and
//!   [`mailbox_to_index`] translate.
//! * Per-color piece lists and cached king positions, kept in lock-step
//!   with the cell array by `apply_move` / `undo_last_move`.
//! * Backward attack scans ([`Board::is_attacked`]) radiating from the
//!   target square, and pseudo-legal move generation per piece with
//!   castling, en passant, and four-way promotion expansion.
//! * Legal-move filtering by make / check / undo against the cell array.
//! * Draw bookkeeping: a half-move counter for the fifty-move rule and a
//!   position-hash multiset for threefold repetition.
//! * A history of [`Round`]s and a LIFO graveyard of captured pieces,
//!   together sufficient to reverse any applied move exactly.
//! * A binary snapshot codec (`save` / `load`) that round-trips the full
//!   board state.
//!
//! Rule violations surface as [`BoardError`] values. The only panics are
//! programmer-error signals: a graveyard that disagrees with the move
//! being undone, or a piece list entry pointing at a cell that does not
//! hold that piece.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod cell;
mod hash;
mod material;
mod moves;
mod pawn;
mod persist;
mod piece;

pub use cell::*;
pub use material::*;
pub use moves::*;
pub use piece::*;

use Color::*;
use Symbol::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("position out of board")]
    OutOfBoard,
    #[error("position is occupied")]
    Occupied,
    #[error("piece not found on the board")]
    PieceNotFound,
    #[error("not active color")]
    NotActiveColor,
}

/// One history entry: the applied move, the draw counter the move
/// replaced, and the position hash computed after the move.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub(crate) mv: Move,
    pub(crate) prev_draw_counter: u32,
    pub(crate) state_hash: u64,
}

#[derive(Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
    pieces: Pair<Vec<Piece>>,
    king_pos: Pair<Option<usize>>,
    history: Vec<Round>,
    graveyard: Vec<Piece>,
    draw_counter: u32,
    hash_counts: FxHashMap<u64, u32>,
    active_color: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// The standard starting position, white to move.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board
            .load_pieces(start_pieces(White))
            .expect("standard white pieces load onto a blank board");
        board
            .load_pieces(start_pieces(Black))
            .expect("standard black pieces load onto a blank board");
        board
    }

    /// A blank board, white to move.
    pub fn empty() -> Self {
        Self::empty_with_active(White)
    }

    /// A blank board with the given side to move.
    pub fn empty_with_active(active_color: Color) -> Self {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (pos, cell) in cells.iter_mut().enumerate() {
            *cell = border_cell(pos);
        }
        Self {
            cells,
            pieces: Pair::new(Vec::with_capacity(16), Vec::with_capacity(16)),
            king_pos: Pair::new(None, None),
            history: Vec::with_capacity(256),
            graveyard: Vec::with_capacity(32),
            draw_counter: 0,
            hash_counts: FxHashMap::default(),
            active_color,
        }
    }

    /// Place pieces on the board. Fails with [`BoardError::OutOfBoard`] for
    /// a border or out-of-range position and [`BoardError::Occupied`] for a
    /// non-empty target square.
    pub fn load_pieces<I>(&mut self, pieces: I) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = Piece>,
    {
        for piece in pieces {
            self.load_piece(piece)?;
        }
        Ok(())
    }

    fn load_piece(&mut self, piece: Piece) -> Result<(), BoardError> {
        if piece.position() >= BOARD_SIZE {
            return Err(BoardError::OutOfBoard);
        }
        if self.is_sentinel(piece.position()) {
            return Err(BoardError::OutOfBoard);
        }
        if !self.is_empty(piece.position()) {
            return Err(BoardError::Occupied);
        }
        self.cells[piece.position()] = Cell::Occupied(piece.material());
        if piece.symbol() == King {
            self.king_pos[piece.color()] = Some(piece.position());
        }
        self.pieces[piece.color()].push(piece);
        Ok(())
    }

    #[inline]
    pub fn cell(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    #[inline]
    pub fn value(&self, pos: usize) -> i32 {
        self.cells[pos].value()
    }

    #[inline]
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos].is_empty()
    }

    #[inline]
    pub fn is_sentinel(&self, pos: usize) -> bool {
        self.cells[pos].is_sentinel()
    }

    #[inline]
    pub fn color_at(&self, pos: usize) -> Option<Color> {
        self.cells[pos].color()
    }

    #[inline]
    pub fn symbol_at(&self, pos: usize) -> Option<Symbol> {
        self.cells[pos].symbol()
    }

    #[inline]
    pub fn pieces(&self, color: Color) -> &[Piece] {
        &self.pieces[color]
    }

    /// The piece of `color` and `symbol` standing at mailbox `pos`, if any.
    pub fn piece(&self, color: Color, symbol: Symbol, pos: usize) -> Option<&Piece> {
        self.pieces[color]
            .iter()
            .find(|p| p.symbol() == symbol && p.position() == pos)
    }

    #[inline]
    pub fn king_position(&self, color: Color) -> Option<usize> {
        self.king_pos[color]
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// Number of half-moves applied and not undone.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|round| round.mv)
    }

    /// The position hash recorded by the most recent move.
    #[inline]
    pub fn last_state_hash(&self) -> Option<u64> {
        self.history.last().map(|round| round.state_hash)
    }

    #[inline]
    pub fn graveyard(&self) -> &[Piece] {
        &self.graveyard
    }

    /// The playable squares projected into external layout: rank-major,
    /// `a1` first, raw signed cell values.
    pub fn grid_raw(&self) -> [i32; 64] {
        let mut grid = [0; 64];
        for (index, &pos) in INDEX_TO_MAILBOX.iter().enumerate() {
            grid[index] = self.value(pos);
        }
        grid
    }

    /// Apply a move. The move must be fully described (castling rook
    /// squares, captured symbol, promotion); use the generation API to
    /// obtain one. Validates only ownership and origin, not legality.
    pub fn apply_move(&mut self, m: Move) -> Result<(), BoardError> {
        self.validate_move_to_apply(&m)?;

        let prev_draw_counter = self.draw_counter;

        self.apply_move_cells(&m);
        self.apply_move_pieces(&m);
        self.update_draw_counter(&m);
        self.active_color = !self.active_color;

        let state_hash = self.position_hash(&m);
        *self.hash_counts.entry(state_hash).or_insert(0) += 1;

        self.history.push(Round {
            mv: m,
            prev_draw_counter,
            state_hash,
        });
        Ok(())
    }

    fn validate_move_to_apply(&self, m: &Move) -> Result<(), BoardError> {
        if m.color != self.active_color {
            return Err(BoardError::NotActiveColor);
        }
        if m.from >= BOARD_SIZE || m.to >= BOARD_SIZE {
            return Err(BoardError::OutOfBoard);
        }
        if self.is_sentinel(m.from) || self.is_sentinel(m.to) {
            return Err(BoardError::OutOfBoard);
        }
        match self.cells[m.from].occupant() {
            Some(material) if material == Material::new(m.color, m.symbol) => Ok(()),
            _ => Err(BoardError::PieceNotFound),
        }
    }

    /// Undo the most recent move. Returns `false` on an empty history.
    ///
    /// # Panics
    ///
    /// Panics if the move being undone captured a piece but the graveyard
    /// is empty or its top entry has a different symbol. That means the
    /// board was tampered with and is unrecoverable.
    pub fn undo_last_move(&mut self) -> bool {
        let Some(round) = self.history.pop() else {
            return false;
        };

        self.undo_move_cells(&round.mv);
        self.undo_move_pieces(&round.mv);
        self.draw_counter = round.prev_draw_counter;
        self.active_color = !self.active_color;

        if let Some(count) = self.hash_counts.get_mut(&round.state_hash) {
            *count -= 1;
            if *count == 0 {
                self.hash_counts.remove(&round.state_hash);
            }
        }
        true
    }

    /// Mutate only the cell array (and the cached king position) for `m`.
    /// Shared by `apply_move` and the legality filter.
    pub(crate) fn apply_move_cells(&mut self, m: &Move) {
        if m.is_en_passant {
            self.cells[m.from] = Cell::Empty;
            self.cells[m.to] = Cell::Occupied(Material::new(m.color, m.symbol));
            self.cells[m.en_passant_victim()] = Cell::Empty;
            return;
        }

        self.cells[m.from] = Cell::Empty;
        let placed = m.promotion.unwrap_or(m.symbol);
        self.cells[m.to] = Cell::Occupied(Material::new(m.color, placed));

        if m.is_castling {
            self.cells[m.rook_from] = Cell::Empty;
            self.cells[m.rook_to] = Cell::Occupied(Material::new(m.color, Rook));
        }
        if m.symbol == King {
            self.king_pos[m.color] = Some(m.to);
        }
    }

    /// Exact mirror of [`Board::apply_move_cells`].
    pub(crate) fn undo_move_cells(&mut self, m: &Move) {
        if m.is_en_passant {
            self.cells[m.from] = Cell::Occupied(Material::new(m.color, m.symbol));
            self.cells[m.to] = Cell::Empty;
            self.cells[m.en_passant_victim()] = Cell::Occupied(Material::new(!m.color, Pawn));
            return;
        }

        self.cells[m.from] = Cell::Occupied(Material::new(m.color, m.symbol));
        self.cells[m.to] = match m.captured {
            Some(captured) => Cell::Occupied(Material::new(!m.color, captured)),
            None => Cell::Empty,
        };

        if m.is_castling {
            self.cells[m.rook_from] = Cell::Occupied(Material::new(m.color, Rook));
            self.cells[m.rook_to] = Cell::Empty;
        }
        if m.symbol == King {
            self.king_pos[m.color] = Some(m.from);
        }
    }

    fn apply_move_pieces(&mut self, m: &Move) {
        if let Some(captured) = m.captured {
            let victim_pos = if m.is_en_passant {
                m.en_passant_victim()
            } else {
                m.to
            };
            let opponents = &mut self.pieces[!m.color];
            if let Some(i) = opponents
                .iter()
                .position(|p| p.symbol() == captured && p.position() == victim_pos)
            {
                let victim = opponents.remove(i);
                self.graveyard.push(victim);
            }
        }

        let own = &mut self.pieces[m.color];
        if let Some(promotion) = m.promotion {
            if let Some(pawn) = own
                .iter_mut()
                .find(|p| p.symbol() == m.symbol && p.position() == m.from)
            {
                *pawn =
                    Piece::with_move_count(promotion, m.color, m.to, pawn.move_count() + 1);
            }
            return;
        }

        if let Some(mover) = own
            .iter_mut()
            .find(|p| p.symbol() == m.symbol && p.position() == m.from)
        {
            mover.advance_to(m.to);
        }
        if m.is_castling {
            if let Some(rook) = own
                .iter_mut()
                .find(|p| p.symbol() == Rook && p.position() == m.rook_from)
            {
                rook.advance_to(m.rook_to);
            }
        }
    }

    fn undo_move_pieces(&mut self, m: &Move) {
        if let Some(captured) = m.captured {
            let victim = self
                .graveyard
                .pop()
                .expect("graveyard holds a piece while undoing a capture");
            assert_eq!(
                victim.symbol(),
                captured,
                "graveyard top does not match the captured symbol being undone",
            );
            self.pieces[victim.color()].push(victim);
        }

        let own = &mut self.pieces[m.color];
        if let Some(promotion) = m.promotion {
            if let Some(promoted) = own
                .iter_mut()
                .find(|p| p.symbol() == promotion && p.position() == m.to)
            {
                *promoted =
                    Piece::with_move_count(m.symbol, m.color, m.from, promoted.move_count() - 1);
            }
            return;
        }

        if let Some(mover) = own
            .iter_mut()
            .find(|p| p.symbol() == m.symbol && p.position() == m.to)
        {
            mover.retreat_to(m.from);
        }
        if m.is_castling {
            if let Some(rook) = own
                .iter_mut()
                .find(|p| p.symbol() == Rook && p.position() == m.rook_to)
            {
                rook.retreat_to(m.rook_from);
            }
        }
    }

    /// Reset on a capture or pawn move, count the half-move otherwise.
    fn update_draw_counter(&mut self, m: &Move) {
        if m.captured.is_some() || m.symbol == Pawn {
            self.draw_counter = 0;
        } else {
            self.draw_counter += 1;
        }
    }

    /// Whether the position hashing to `hash` has occurred three times.
    pub fn is_threefold_draw(&self, hash: u64) -> bool {
        self.hash_counts.get(&hash).copied().unwrap_or(0) >= 3
    }

    /// Whether 100 half-moves have passed without a capture or pawn move.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.draw_counter >= 100
    }

    #[cfg(test)]
    pub(crate) fn hash_count(&self, hash: u64) -> u32 {
        self.hash_counts.get(&hash).copied().unwrap_or(0)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..BOARD_HEIGHT).rev() {
            write!(f, "|")?;
            for col in 0..BOARD_WIDTH {
                write!(f, "{:2}|", self.value(row * BOARD_WIDTH + col))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{} to move", self.active_color)
    }
}

#[cfg(test)]
impl Board {
    pub(crate) fn with_piece(mut self, symbol: Symbol, color: Color, pos: usize) -> Self {
        self.load_pieces([Piece::new(symbol, color, pos)])
            .expect("test piece placement");
        self
    }

    pub(crate) fn with_moved_piece(mut self, symbol: Symbol, color: Color, pos: usize) -> Self {
        self.load_pieces([Piece::with_move_count(symbol, color, pos, 1)])
            .expect("test piece placement");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn sorted(pieces: &[Piece]) -> Vec<Piece> {
        let mut pieces = pieces.to_vec();
        pieces.sort_by_key(|p| p.position());
        pieces
    }

    fn assert_boards_match(a: &Board, b: &Board) {
        assert_eq!(a.grid_raw(), b.grid_raw());
        assert_eq!(sorted(a.pieces(White)), sorted(b.pieces(White)));
        assert_eq!(sorted(a.pieces(Black)), sorted(b.pieces(Black)));
        assert_eq!(a.king_position(White), b.king_position(White));
        assert_eq!(a.king_position(Black), b.king_position(Black));
        assert_eq!(a.active_color(), b.active_color());
        assert_eq!(a.draw_counter, b.draw_counter);
        assert_eq!(a.hash_counts, b.hash_counts);
        assert_eq!(a.move_count(), b.move_count());
        assert_eq!(a.graveyard(), b.graveyard());
    }

    #[test]
    fn test_standard_board_layout() {
        let board = Board::standard();
        assert_eq!(board.active_color(), White);
        assert_eq!(board.value(21), 4); // white rook a1
        assert_eq!(board.value(25), 6); // white king e1
        assert_eq!(board.value(34), 1); // white pawn d2
        assert_eq!(board.value(94), -5); // black queen d8
        assert_eq!(board.value(88), -1); // black pawn h7
        assert!(board.is_empty(55));
        assert!(board.is_sentinel(20));
        assert!(board.is_sentinel(119));
        assert_eq!(board.king_position(White), Some(25));
        assert_eq!(board.king_position(Black), Some(95));
    }

    #[test]
    fn test_grid_raw_projection() {
        let grid = Board::standard().grid_raw();
        assert_eq!(grid[0], 4); // a1
        assert_eq!(grid[4], 6); // e1
        assert_eq!(grid[12], 1); // e2
        assert_eq!(grid[35], 0); // d5
        assert_eq!(grid[59], -5); // d8
        assert_eq!(grid[63], -4); // h8
    }

    #[test]
    fn test_load_piece_out_of_board() {
        let mut board = Board::empty();
        let err = board.load_pieces([Piece::new(Rook, White, 200)]);
        assert_eq!(err, Err(BoardError::OutOfBoard));
        let err = board.load_pieces([Piece::new(Rook, White, 19)]);
        assert_eq!(err, Err(BoardError::OutOfBoard));
    }

    #[test]
    fn test_load_piece_occupied() {
        let mut board = Board::empty();
        board.load_pieces([Piece::new(Rook, White, 21)]).unwrap();
        let err = board.load_pieces([Piece::new(Knight, Black, 21)]);
        assert_eq!(err, Err(BoardError::Occupied));
    }

    #[test]
    fn test_apply_move_validation() {
        let mut board = Board::standard();

        let err = board.apply_move(Move::standard(Black, Pawn, 84, 64, None));
        assert_eq!(err, Err(BoardError::NotActiveColor));

        let err = board.apply_move(Move::standard(White, Pawn, 19, 31, None));
        assert_eq!(err, Err(BoardError::OutOfBoard));
        let err = board.apply_move(Move::standard(White, Pawn, 34, 200, None));
        assert_eq!(err, Err(BoardError::OutOfBoard));

        // empty origin
        let err = board.apply_move(Move::standard(White, Pawn, 54, 64, None));
        assert_eq!(err, Err(BoardError::PieceNotFound));
        // wrong symbol at origin
        let err = board.apply_move(Move::standard(White, Knight, 34, 54, None));
        assert_eq!(err, Err(BoardError::PieceNotFound));
        // wrong color at origin
        let err = board.apply_move(Move::standard(White, Pawn, 84, 64, None));
        assert_eq!(err, Err(BoardError::PieceNotFound));
    }

    #[test]
    fn test_apply_move_normal() {
        let mut board = Board::standard();
        board
            .apply_move(Move::standard(White, Pawn, 34, 54, None))
            .unwrap();

        assert!(board.is_empty(34));
        assert_eq!(board.value(54), 1);
        let pawn = board.piece(White, Pawn, 54).unwrap();
        assert_eq!(pawn.move_count(), 1);
        assert_eq!(board.active_color(), Black);
        assert_eq!(board.move_count(), 1);
        assert_eq!(board.draw_counter, 0); // pawn move resets
        assert!(board.graveyard().is_empty());
        let hash = board.last_state_hash().unwrap();
        assert_eq!(board.hash_count(hash), 1);
    }

    #[test]
    fn test_draw_counter_counts_quiet_moves() {
        let mut board = Board::standard();
        board
            .apply_move(Move::standard(White, Knight, 22, 43, None))
            .unwrap();
        assert_eq!(board.draw_counter, 1);
        board
            .apply_move(Move::standard(Black, Knight, 92, 73, None))
            .unwrap();
        assert_eq!(board.draw_counter, 2);
        board
            .apply_move(Move::standard(White, Pawn, 35, 55, None))
            .unwrap();
        assert_eq!(board.draw_counter, 0);
    }

    #[test]
    fn test_apply_move_capture_feeds_graveyard() {
        let mut board = Board::empty()
            .with_piece(Rook, White, 21)
            .with_piece(Pawn, Black, 81);
        board
            .apply_move(Move::standard(White, Rook, 21, 81, Some(Pawn)))
            .unwrap();

        assert_eq!(board.value(81), 4);
        assert!(board.is_empty(21));
        assert!(board.pieces(Black).is_empty());
        assert_eq!(board.graveyard().len(), 1);
        assert_eq!(board.graveyard()[0].symbol(), Pawn);
        assert_eq!(board.graveyard()[0].position(), 81);
        assert_eq!(board.draw_counter, 0);
    }

    #[test]
    fn test_undo_without_history() {
        let mut board = Board::empty();
        assert!(!board.undo_last_move());
    }

    #[test]
    fn test_apply_then_undo_normal_move() {
        let initial = Board::standard();
        let mut board = Board::standard();
        board
            .apply_move(Move::standard(White, Pawn, 34, 54, None))
            .unwrap();
        let hash = board.last_state_hash().unwrap();

        assert!(board.undo_last_move());
        assert_boards_match(&board, &initial);
        assert_eq!(board.hash_count(hash), 0);
        assert_eq!(board.piece(White, Pawn, 34).unwrap().move_count(), 0);
    }

    #[test]
    fn test_apply_then_undo_capture() {
        let initial = Board::empty()
            .with_piece(Rook, White, 21)
            .with_piece(Pawn, Black, 81);
        let mut board = initial.clone();
        board
            .apply_move(Move::standard(White, Rook, 21, 81, Some(Pawn)))
            .unwrap();
        assert!(board.undo_last_move());
        assert_boards_match(&board, &initial);
    }

    #[test]
    fn test_apply_then_undo_promotion_with_capture() {
        // White pawn on a7, black knight on b8.
        let initial = Board::empty()
            .with_piece(Pawn, White, 81)
            .with_piece(Knight, Black, 92);
        let mut board = initial.clone();

        board
            .apply_move(Move::promoting(White, 81, 92, Some(Knight), Queen))
            .unwrap();
        assert_eq!(board.value(92), 5);
        assert!(board.is_empty(81));
        assert!(board.piece(White, Queen, 92).is_some());
        assert!(board.piece(White, Pawn, 81).is_none());
        assert_eq!(board.graveyard().len(), 1);
        assert_eq!(board.graveyard()[0].symbol(), Knight);

        assert!(board.undo_last_move());
        assert_boards_match(&board, &initial);
        assert!(board.piece(White, Pawn, 81).is_some());
        assert!(board.piece(Black, Knight, 92).is_some());
    }

    #[test]
    fn test_apply_then_undo_castling() {
        let initial = Board::empty()
            .with_piece(King, White, 25)
            .with_piece(Rook, White, 28);
        let mut board = initial.clone();

        let m = Move::castling(White, 25, 27, 28, 26);
        board.apply_move(m).unwrap();
        assert_eq!(board.value(27), 6);
        assert_eq!(board.value(26), 4);
        assert!(board.is_empty(25));
        assert!(board.is_empty(28));
        assert_eq!(board.king_position(White), Some(27));
        assert_eq!(board.piece(White, Rook, 26).unwrap().move_count(), 1);

        assert!(board.undo_last_move());
        assert_boards_match(&board, &initial);
        assert_eq!(board.piece(White, King, 25).unwrap().move_count(), 0);
        assert_eq!(board.piece(White, Rook, 28).unwrap().move_count(), 0);
    }

    #[test]
    fn test_apply_then_undo_en_passant() {
        // White pawn on 65, black pawn double-steps 84 -> 64 beside it.
        let initial = Board::empty_with_active(Black)
            .with_piece(Pawn, White, 65)
            .with_piece(Pawn, Black, 84);
        let mut board = initial.clone();

        board
            .apply_move(Move::standard(Black, Pawn, 84, 64, None))
            .unwrap();
        let capture = Move::en_passant(White, 65, 74);
        board.apply_move(capture).unwrap();

        assert_eq!(board.value(74), 1);
        assert!(board.is_empty(64));
        assert!(board.is_empty(65));
        assert!(board.pieces(Black).is_empty());
        assert_eq!(board.graveyard().len(), 1);
        assert_eq!(board.graveyard()[0].symbol(), Pawn);

        assert!(board.undo_last_move());
        assert_eq!(board.value(64), -1); // black pawn back on its landing square
        assert_eq!(board.value(65), 1);
        assert!(board.is_empty(74));
        assert!(board.graveyard().is_empty());

        assert!(board.undo_last_move());
        assert_boards_match(&board, &initial);
    }

    #[test]
    #[should_panic(expected = "graveyard")]
    fn test_undo_capture_with_tampered_graveyard_panics() {
        let mut board = Board::empty()
            .with_piece(Rook, White, 21)
            .with_piece(Pawn, Black, 81);
        board
            .apply_move(Move::standard(White, Rook, 21, 81, Some(Pawn)))
            .unwrap();
        board.graveyard.clear();
        board.undo_last_move();
    }

    #[test]
    fn test_fifty_move_counter_accumulates() {
        let mut board = Board::standard();
        assert!(!board.is_fifty_move_draw());
        let cycle = [
            Move::standard(White, Knight, 22, 43, None),
            Move::standard(Black, Knight, 92, 73, None),
            Move::standard(White, Knight, 43, 22, None),
            Move::standard(Black, Knight, 73, 92, None),
        ];
        for _ in 0..25 {
            for m in cycle {
                board.apply_move(m).unwrap();
            }
        }
        assert_eq!(board.draw_counter, 100);
        assert!(board.is_fifty_move_draw());
        board.undo_last_move();
        assert!(!board.is_fifty_move_draw());
    }

    #[test]
    fn test_random_playout_unwinds_to_initial_state() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let initial = Board::standard();
        let mut board = Board::standard();
        let mut played = 0;

        for _ in 0..60 {
            let color = board.active_color();
            let moves = board.generate_legal_moves(color);
            let Some(&m) = moves.choose(&mut rng) else {
                break;
            };
            board.apply_move(m).unwrap();
            played += 1;
        }
        assert!(played > 0);

        for _ in 0..played {
            assert!(board.undo_last_move());
        }
        assert!(!board.undo_last_move());
        assert_boards_match(&board, &initial);
    }

    #[test]
    fn test_apply_undo_restores_each_position_exactly() {
        // Walk a fixed line touching capture, castling and check, snapshot
        // the grid before every move, and unwind comparing each step.
        let mut board = Board::standard();
        let line = [
            Move::standard(White, Pawn, 35, 55, None),
            Move::standard(Black, Pawn, 84, 64, None),
            Move::standard(White, Pawn, 55, 64, Some(Pawn)),
            Move::standard(Black, Knight, 97, 76, None),
            Move::standard(White, Knight, 27, 46, None),
            Move::standard(Black, Pawn, 83, 73, None),
            Move::standard(White, Bishop, 26, 62, None),
            Move::standard(Black, Pawn, 73, 62, Some(Bishop)),
            Move::castling(White, 25, 27, 28, 26),
        ];

        let mut snapshots = Vec::new();
        for m in line {
            snapshots.push((board.grid_raw(), board.draw_counter, board.active_color()));
            board.apply_move(m).unwrap();
        }
        for (grid, draw_counter, active) in snapshots.into_iter().rev() {
            assert!(board.undo_last_move());
            assert_eq!(board.grid_raw(), grid);
            assert_eq!(board.draw_counter, draw_counter);
            assert_eq!(board.active_color(), active);
        }
    }
}
