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

use super::cell::Cell;
use super::material::{Color, Symbol};
use super::moves::Move;
use super::piece::{
    max_moves, pawn_advance, pawn_capture_directions, Piece, PROMOTION_SYMBOLS,
};
use super::Board;

use Color::*;
use Symbol::*;

/// Whether `pos` is on the far rank for a pawn of `color`: the single-step
/// target that turns an advance or capture into a promotion.
fn is_promotion_square(color: Color, pos: usize) -> bool {
    match color {
        White => (91..=98).contains(&pos),
        Black => (21..=28).contains(&pos),
    }
}

/// Expand a pawn arrival on the far rank into one move per promotion
/// symbol, in the fixed order queen, rook, bishop, knight.
fn promotion_moves(piece: &Piece, to: usize, captured: Option<Symbol>) -> Vec<Move> {
    PROMOTION_SYMBOLS
        .iter()
        .map(|&promotion| Move::promoting(piece.color(), piece.position(), to, captured, promotion))
        .collect()
}

impl Board {
    /// Pseudo-legal pawn moves: forward advances (two squares while the
    /// pawn has not moved and both squares are open), diagonal captures,
    /// promotion expansion on the far rank, and en passant.
    pub(crate) fn pawn_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::with_capacity(max_moves(Pawn));
        let forward = pawn_advance(piece.color());

        let steps = if piece.has_moved() { 1 } else { 2 };
        let mut next = piece.position() as i32 + forward;
        for _ in 0..steps {
            // a blocked first square also rules out the double advance
            if !self.is_empty(next as usize) {
                break;
            }
            if is_promotion_square(piece.color(), next as usize) {
                moves.extend(promotion_moves(piece, next as usize, None));
            } else {
                moves.push(Move::standard(
                    piece.color(),
                    Pawn,
                    piece.position(),
                    next as usize,
                    None,
                ));
            }
            next += forward;
        }

        for direction in pawn_capture_directions(piece.color()) {
            let target = (piece.position() as i32 + direction) as usize;
            let Cell::Occupied(material) = self.cells[target] else {
                continue;
            };
            if material.color() == piece.color() {
                continue;
            }
            if is_promotion_square(piece.color(), target) {
                moves.extend(promotion_moves(piece, target, Some(material.symbol())));
            } else {
                moves.push(Move::standard(
                    piece.color(),
                    Pawn,
                    piece.position(),
                    target,
                    Some(material.symbol()),
                ));
            }
        }

        if let Some(m) = self.en_passant_move(piece) {
            moves.push(m);
        }
        moves
    }

    /// En passant is available for exactly one half-move: the last move
    /// must have been an enemy pawn double-step landing directly beside
    /// this pawn. The cell is re-checked against the history to guard
    /// against a desynced board.
    fn en_passant_move(&self, piece: &Piece) -> Option<Move> {
        let last = self.last_move()?;
        let is_double_step = (last.to as i32 - last.from as i32).abs() == 20;
        let is_adjacent = (piece.position() as i32 - last.to as i32).abs() == 1;
        let holds_enemy_pawn = matches!(
            self.cells[last.to],
            Cell::Occupied(material)
                if material.symbol() == Pawn && material.color() != piece.color()
        );

        if last.symbol == Pawn
            && last.color != piece.color()
            && is_double_step
            && is_adjacent
            && holds_enemy_pawn
        {
            let to = (last.from + last.to) / 2;
            return Some(Move::en_passant(piece.color(), piece.position(), to));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_moves_at(board: &Board, color: Color, pos: usize) -> Vec<Move> {
        let piece = *board.piece(color, Pawn, pos).unwrap();
        board.pawn_moves(&piece)
    }

    #[test]
    fn test_unmoved_pawn_advances_one_or_two() {
        let board = Board::empty().with_piece(Pawn, White, 35);
        let moves = pawn_moves_at(&board, White, 35);
        let targets: Vec<usize> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![45, 55]);
    }

    #[test]
    fn test_moved_pawn_advances_one() {
        let board = Board::empty().with_moved_piece(Pawn, White, 45);
        let moves = pawn_moves_at(&board, White, 45);
        let targets: Vec<usize> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![55]);
    }

    #[test]
    fn test_black_pawn_advances_south() {
        let board = Board::empty().with_piece(Pawn, Black, 85);
        let moves = pawn_moves_at(&board, Black, 85);
        let targets: Vec<usize> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![75, 65]);
    }

    #[test]
    fn test_blocked_pawn_cannot_advance() {
        let board = Board::empty()
            .with_piece(Pawn, White, 35)
            .with_piece(Knight, Black, 45);
        assert!(pawn_moves_at(&board, White, 35).is_empty());
    }

    #[test]
    fn test_blocked_second_square_rules_out_double_advance() {
        let board = Board::empty()
            .with_piece(Pawn, White, 35)
            .with_piece(Knight, Black, 55);
        let moves = pawn_moves_at(&board, White, 35);
        let targets: Vec<usize> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![45]);
    }

    #[test]
    fn test_pawn_captures_diagonally() {
        let board = Board::empty()
            .with_piece(Pawn, White, 55)
            .with_piece(Knight, Black, 66)
            .with_piece(Bishop, Black, 64)
            .with_piece(Rook, Black, 65); // blocks the advance
        let moves = pawn_moves_at(&board, White, 55);
        let mut targets: Vec<(usize, Option<Symbol>)> =
            moves.iter().map(|m| (m.to, m.captured)).collect();
        targets.sort_by_key(|(to, _)| *to);
        assert_eq!(targets, vec![(64, Some(Bishop)), (66, Some(Knight))]);
    }

    #[test]
    fn test_pawn_does_not_capture_own_color_or_empty() {
        let board = Board::empty()
            .with_piece(Pawn, White, 55)
            .with_piece(Knight, White, 66);
        let moves = pawn_moves_at(&board, White, 55);
        let targets: Vec<usize> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![65]);
    }

    #[test]
    fn test_promotion_expands_in_fixed_order() {
        let board = Board::empty().with_moved_piece(Pawn, White, 85);
        let moves = pawn_moves_at(&board, White, 85);
        assert_eq!(moves.len(), 4);
        let promotions: Vec<Symbol> = moves.iter().map(|m| m.promotion.unwrap()).collect();
        assert_eq!(promotions, vec![Queen, Rook, Bishop, Knight]);
        assert!(moves.iter().all(|m| m.to == 95 && m.captured.is_none()));
    }

    #[test]
    fn test_black_promotion_rank() {
        let board = Board::empty().with_moved_piece(Pawn, Black, 34);
        let moves = pawn_moves_at(&board, Black, 34);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to == 24 && m.promotion.is_some()));
    }

    #[test]
    fn test_promotion_with_capture_expands_both_targets() {
        // Advance square occupied by a friendly piece, both diagonals
        // hold enemy material: eight promoting captures.
        let board = Board::empty()
            .with_moved_piece(Pawn, White, 85)
            .with_piece(Knight, White, 95)
            .with_piece(Rook, Black, 94)
            .with_piece(Rook, Black, 96);
        let moves = pawn_moves_at(&board, White, 85);
        assert_eq!(moves.len(), 8);
        assert!(moves
            .iter()
            .all(|m| m.promotion.is_some() && m.captured == Some(Rook)));
    }

    #[test]
    fn test_en_passant_requires_immediately_preceding_double_step() {
        let mut board = Board::empty_with_active(Black)
            .with_piece(Pawn, White, 65)
            .with_piece(Pawn, Black, 84);
        board
            .apply_move(Move::standard(Black, Pawn, 84, 64, None))
            .unwrap();

        let moves = pawn_moves_at(&board, White, 65);
        let en_passant = moves.iter().find(|m| m.is_en_passant).unwrap();
        assert_eq!(en_passant.to, 74);
        assert_eq!(en_passant.captured, Some(Pawn));
    }

    #[test]
    fn test_en_passant_expires_after_one_ply() {
        let mut board = Board::empty_with_active(Black)
            .with_piece(Pawn, White, 65)
            .with_piece(King, White, 25)
            .with_piece(Pawn, Black, 84)
            .with_piece(King, Black, 95);
        board
            .apply_move(Move::standard(Black, Pawn, 84, 64, None))
            .unwrap();
        // an unrelated pair of king moves consumes the opportunity
        board
            .apply_move(Move::standard(White, King, 25, 26, None))
            .unwrap();
        board
            .apply_move(Move::standard(Black, King, 95, 96, None))
            .unwrap();

        assert!(pawn_moves_at(&board, White, 65)
            .iter()
            .all(|m| !m.is_en_passant));
    }

    #[test]
    fn test_en_passant_requires_double_step() {
        let mut board = Board::empty_with_active(Black)
            .with_piece(Pawn, White, 65)
            .with_moved_piece(Pawn, Black, 74);
        board
            .apply_move(Move::standard(Black, Pawn, 74, 64, None))
            .unwrap();
        assert!(pawn_moves_at(&board, White, 65)
            .iter()
            .all(|m| !m.is_en_passant));
    }

    #[test]
    fn test_en_passant_requires_adjacency() {
        let mut board = Board::empty_with_active(Black)
            .with_piece(Pawn, White, 66)
            .with_piece(Pawn, Black, 84);
        board
            .apply_move(Move::standard(Black, Pawn, 84, 64, None))
            .unwrap();
        assert!(pawn_moves_at(&board, White, 66)
            .iter()
            .all(|m| !m.is_en_passant));
    }
}
