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

use super::cell::Cell;
use super::material::{Color, Symbol};
use super::piece::{
    directions, is_sliding, max_moves, pawn_advance, pawn_capture_directions, Piece, COMPASS, E,
    KING_DIRECTIONS, KNIGHT_DIRECTIONS, W,
};
use super::Board;

use Symbol::*;

/// A fully described move: everything needed to apply it to a board and
/// to reverse it again without consulting any other state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub symbol: Symbol,
    pub from: usize,
    pub to: usize,

    pub is_castling: bool,
    pub rook_from: usize,
    pub rook_to: usize,

    pub captured: Option<Symbol>,
    pub promotion: Option<Symbol>,
    pub is_en_passant: bool,
}

impl Move {
    pub fn standard(
        color: Color,
        symbol: Symbol,
        from: usize,
        to: usize,
        captured: Option<Symbol>,
    ) -> Self {
        Self {
            color,
            symbol,
            from,
            to,
            is_castling: false,
            rook_from: 0,
            rook_to: 0,
            captured,
            promotion: None,
            is_en_passant: false,
        }
    }

    pub fn promoting(
        color: Color,
        from: usize,
        to: usize,
        captured: Option<Symbol>,
        promotion: Symbol,
    ) -> Self {
        Self {
            promotion: Some(promotion),
            ..Self::standard(color, Pawn, from, to, captured)
        }
    }

    pub fn castling(color: Color, from: usize, to: usize, rook_from: usize, rook_to: usize) -> Self {
        Self {
            is_castling: true,
            rook_from,
            rook_to,
            ..Self::standard(color, King, from, to, None)
        }
    }

    pub fn en_passant(color: Color, from: usize, to: usize) -> Self {
        Self {
            is_en_passant: true,
            ..Self::standard(color, Pawn, from, to, Some(Pawn))
        }
    }

    #[inline]
    pub fn has_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn has_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// The square of the pawn captured en passant: one row behind the
    /// landing square, relative to the mover's forward direction.
    #[inline]
    pub(crate) fn en_passant_victim(&self) -> usize {
        (self.to as i32 - pawn_advance(self.color)) as usize
    }
}

impl Board {
    /// Whether the side opposing `defender` attacks mailbox `pos`.
    ///
    /// Scans radiate backward from the target: each compass ray is walked
    /// until it hits a sentinel or a piece, and the first piece found
    /// settles the ray; knight, king, and pawn attackers are probed with
    /// single-square lookups.
    pub fn is_attacked(&self, pos: usize, defender: Color) -> bool {
        let attacker = !defender;

        for direction in COMPASS {
            if self.attacked_by_slider(pos, direction, attacker) {
                return true;
            }
        }
        for direction in KNIGHT_DIRECTIONS {
            if self.attacker_at(offset(pos, direction), attacker, Knight) {
                return true;
            }
        }
        for direction in KING_DIRECTIONS {
            if self.attacker_at(offset(pos, direction), attacker, King) {
                return true;
            }
        }
        // A pawn attacks along its own forward diagonals, so an attacking
        // pawn stands on the defender's forward diagonals.
        for direction in pawn_capture_directions(defender) {
            if self.attacker_at(offset(pos, direction), attacker, Pawn) {
                return true;
            }
        }
        false
    }

    fn attacked_by_slider(&self, pos: usize, direction: i32, attacker: Color) -> bool {
        let sliders = super::piece::sliders_along(direction);
        let mut current = pos as i32 + direction;
        loop {
            match self.cells[current as usize] {
                Cell::Sentinel => return false,
                Cell::Occupied(material) => {
                    return material.color() == attacker && sliders.contains(&material.symbol());
                }
                Cell::Empty => current += direction,
            }
        }
    }

    #[inline]
    fn attacker_at(&self, pos: usize, attacker: Color, symbol: Symbol) -> bool {
        matches!(
            self.cells[pos],
            Cell::Occupied(material)
                if material.color() == attacker && material.symbol() == symbol
        )
    }

    /// Whether `color`'s king is attacked. A board without that king (as
    /// in reduced test positions) is never in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        match self.king_pos[color] {
            Some(pos) => self.is_attacked(pos, color),
            None => false,
        }
    }

    /// All legal moves for `color`, concatenated over its piece list.
    pub fn generate_legal_moves(&mut self, color: Color) -> Vec<Move> {
        let pieces = self.pieces[color].clone();
        let mut moves = Vec::with_capacity(128);
        for piece in &pieces {
            moves.extend(self.pseudo_legal_moves(piece));
        }
        self.retain_legal(moves, color)
    }

    /// The legal moves of a single piece.
    pub fn generate_piece_legal_moves(&mut self, piece: &Piece) -> Vec<Move> {
        let moves = self.pseudo_legal_moves(piece);
        self.retain_legal(moves, piece.color())
    }

    /// Early-exit variant of [`Board::generate_legal_moves`]: stops at the
    /// first move that leaves the king safe.
    pub fn has_legal_moves(&mut self, color: Color) -> bool {
        let pieces = self.pieces[color].clone();
        for piece in &pieces {
            for m in self.pseudo_legal_moves(piece) {
                self.apply_move_cells(&m);
                let legal = !self.is_king_in_check(color);
                self.undo_move_cells(&m);
                if legal {
                    return true;
                }
            }
        }
        false
    }

    fn retain_legal(&mut self, moves: Vec<Move>, color: Color) -> Vec<Move> {
        moves
            .into_iter()
            .filter(|m| {
                self.apply_move_cells(m);
                let legal = !self.is_king_in_check(color);
                self.undo_move_cells(m);
                legal
            })
            .collect()
    }

    /// Pseudo-legal moves for `piece`, movement rules only.
    ///
    /// # Panics
    ///
    /// Panics when the cell at the piece's position does not hold that
    /// piece; the piece list and the cell array have diverged, which is a
    /// bug, not a rule violation.
    pub(crate) fn pseudo_legal_moves(&self, piece: &Piece) -> Vec<Move> {
        let occupant = self.cells[piece.position()].occupant().unwrap_or_else(|| {
            panic!(
                "piece list holds a {} {} at {} but the cell is not occupied",
                piece.color(),
                piece.symbol(),
                piece.position(),
            )
        });
        assert_eq!(
            occupant,
            piece.material(),
            "piece list and cell array disagree at {}",
            piece.position(),
        );

        if piece.symbol() == Pawn {
            return self.pawn_moves(piece);
        }
        let mut moves = self.walking_moves(piece);
        moves.extend(self.castling_moves(piece));
        moves
    }

    /// Non-pawn generation: walk each direction in the piece's table,
    /// stopping at sentinels and own pieces; a slider continues through
    /// empty squares, a knight or king takes a single step.
    fn walking_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::with_capacity(max_moves(piece.symbol()));
        for &direction in directions(piece.symbol()) {
            let mut next = piece.position() as i32 + direction;
            loop {
                let cell = self.cells[next as usize];
                match cell {
                    Cell::Sentinel => break,
                    Cell::Occupied(material) if material.color() == piece.color() => break,
                    _ => {
                        moves.push(Move::standard(
                            piece.color(),
                            piece.symbol(),
                            piece.position(),
                            next as usize,
                            cell.symbol(),
                        ));
                        if !cell.is_empty() || !is_sliding(piece.symbol()) {
                            break;
                        }
                        next += direction;
                    }
                }
            }
        }
        moves
    }

    /// Castling candidates for a king, appended to its pseudo-legal moves.
    ///
    /// A move is emitted per unmoved rook when the king is unmoved and not
    /// in check, every square strictly between them is empty, and neither
    /// the square the king crosses nor its destination is attacked.
    pub(crate) fn castling_moves(&self, king: &Piece) -> Vec<Move> {
        if king.symbol() != King || king.has_moved() {
            return Vec::new();
        }
        if self.is_king_in_check(king.color()) {
            return Vec::new();
        }

        let mut moves = Vec::with_capacity(2);
        let rooks: Vec<Piece> = self.pieces[king.color()]
            .iter()
            .filter(|p| p.symbol() == Rook && !p.has_moved())
            .copied()
            .collect();

        for rook in rooks {
            let direction = if king.position() > rook.position() { W } else { E };

            let mut path_clear = true;
            let mut pos = king.position() as i32 + direction;
            while pos as usize != rook.position() {
                if !self.is_empty(pos as usize) {
                    path_clear = false;
                    break;
                }
                pos += direction;
            }
            if !path_clear {
                continue;
            }

            let crossed = (king.position() as i32 + direction) as usize;
            let destination = (king.position() as i32 + direction * 2) as usize;
            if self.is_attacked(crossed, king.color())
                || self.is_attacked(destination, king.color())
            {
                continue;
            }

            moves.push(Move::castling(
                king.color(),
                king.position(),
                destination,
                rook.position(),
                crossed,
            ));
        }
        moves
    }
}

#[inline]
fn offset(pos: usize, direction: i32) -> usize {
    (pos as i32 + direction) as usize
}
