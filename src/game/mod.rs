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

//! Game state machine on top of the board engine.
//!
//! A [`Game`] owns a [`Board`] behind a mutex and layers on what the board
//! does not know: whose request is being served, when the game is over,
//! and how adapters talk about it. Callers address squares with external
//! 8x8 indices (`a1 = 0` .. `h8 = 63`) or coordinate notation (`e2e4`,
//! `a7a8=Q`); the game converts, matches the request against the legal
//! move set, and returns a [`RoundResult`] snapshot that adapters can
//! render or broadcast as-is.
//!
//! Every public method locks, runs to completion, and unlocks before
//! returning, so calls from concurrent connections are linearizable.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{self, index_to_mailbox, mailbox_to_index, Board, BoardError, Color, Symbol};

use Color::*;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("illegal move")]
    IllegalMove,
    #[error("invalid move: {0}")]
    InvalidMove(String),
    #[error("not eligible to force draw")]
    NotEligibleToForceDraw,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Where the game stands. Anything but `InProgress` is terminal.
#[derive(
    Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum State {
    InProgress,
    Checkmate,
    Stalemate,
    Draw,
    WhiteResign,
    BlackResign,
}

impl State {
    pub fn is_game_over(&self) -> bool {
        *self != State::InProgress
    }
}

/// A move request in external coordinates. Castling, en passant, and
/// captures are discovered by the engine; the caller only disambiguates
/// promotions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub color: Color,
    pub symbol: Symbol,
    pub from: usize,
    pub to: usize,
    pub promotion: Option<Symbol>,
}

impl Move {
    fn mb_from(&self) -> usize {
        index_to_mailbox(self.from)
    }
    fn mb_to(&self) -> usize {
        index_to_mailbox(self.to)
    }
}

/// The applied move, projected back into external coordinates.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
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

impl MoveResult {
    fn from_engine(m: &board::Move) -> Self {
        let external =
            |pos: usize| mailbox_to_index(pos).expect("applied moves stay on playable squares");
        Self {
            color: m.color,
            symbol: m.symbol,
            from: external(m.from),
            to: external(m.to),
            is_castling: m.is_castling,
            rook_from: if m.is_castling { external(m.rook_from) } else { 0 },
            rook_to: if m.is_castling { external(m.rook_to) } else { 0 },
            captured: m.captured,
            promotion: m.promotion,
            is_en_passant: m.is_en_passant,
        }
    }
}

/// Snapshot handed to adapters after every accepted action and on
/// connect: the move counter, the applied move (if any), the game state,
/// the raw grid, and the side to move.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_result: Option<MoveResult>,
    pub state: State,
    #[serde(serialize_with = "serialize_grid")]
    pub grid: [i32; 64],
    pub active_color: Color,
}

fn serialize_grid<S>(grid: &[i32; 64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(grid.iter())
}

pub struct Game {
    inner: Mutex<Inner>,
}

struct Inner {
    board: Board,
    state: State,
    winner: Option<Color>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::standard())
    }
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Mutex::new(Inner {
                board,
                state: State::InProgress,
                winner: None,
            }),
        }
    }

    /// Apply a move request for the side to move.
    pub fn apply_move(&self, m: Move) -> Result<RoundResult> {
        Ok(self.lock().apply_move(m)?)
    }

    /// Parse coordinate notation (`e2e4`, `a7a8=Q`) and apply it for the
    /// side to move.
    pub fn apply_move_coord(&self, text: &str) -> Result<RoundResult> {
        Ok(self.lock().apply_move_coord(text)?)
    }

    /// Take back the most recent half-move. Returns `false` when there is
    /// nothing to undo. A terminal `state` is left as-is.
    pub fn undo_last_move(&self) -> bool {
        self.lock().board.undo_last_move()
    }

    /// Claim the draw the position has earned. Succeeds only under the
    /// fifty-move rule or threefold repetition.
    pub fn force_draw(&self) -> Result<()> {
        Ok(self.lock().force_draw()?)
    }

    /// Concede the game for `color`.
    pub fn resign(&self, color: Color) -> Result<()> {
        Ok(self.lock().resign(color)?)
    }

    pub fn active_color(&self) -> Color {
        self.lock().board.active_color()
    }

    pub fn state(&self) -> State {
        self.lock().state
    }

    pub fn winner(&self) -> Option<Color> {
        self.lock().winner
    }

    pub fn grid_raw(&self) -> [i32; 64] {
        self.lock().board.grid_raw()
    }

    /// The piece kind at an external index, `None` for an empty square.
    pub fn symbol_at(&self, index: usize) -> Option<Symbol> {
        self.lock().board.symbol_at(index_to_mailbox(index))
    }

    /// The current position as a [`RoundResult`], for adapters joining
    /// mid-game.
    pub fn round(&self) -> RoundResult {
        let inner = self.lock();
        let last = inner.board.last_move();
        inner.round_result(last.as_ref())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn apply_move(&mut self, m: Move) -> Result<RoundResult, GameError> {
        if m.from >= 64 || m.to >= 64 {
            return Err(BoardError::OutOfBoard.into());
        }
        if m.color != self.board.active_color() {
            return Err(BoardError::NotActiveColor.into());
        }
        let piece = *self
            .board
            .piece(m.color, m.symbol, m.mb_from())
            .ok_or(BoardError::PieceNotFound)?;

        // The request may be partially specified; the matched legal move
        // carries the authoritative castling/capture/en-passant facts. A
        // promoting move only matches when the caller disambiguates it.
        let matched = self
            .board
            .generate_piece_legal_moves(&piece)
            .into_iter()
            .find(|lm| {
                lm.from == m.mb_from()
                    && lm.to == m.mb_to()
                    && (lm.promotion.is_none() || lm.promotion == m.promotion)
            })
            .ok_or(GameError::IllegalMove)?;

        self.board.apply_move(matched)?;
        self.state = self.next_state();
        debug!(count = self.board.move_count(), state = %self.state, "move applied");
        if self.state.is_game_over() {
            info!(state = %self.state, winner = ?self.winner, "game over");
        }
        Ok(self.round_result(Some(&matched)))
    }

    fn apply_move_coord(&mut self, text: &str) -> Result<RoundResult, GameError> {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let (squares, promotion_token) = match cleaned.split_once('=') {
            Some((squares, token)) => (squares, Some(token)),
            None => (cleaned.as_str(), None),
        };
        if squares.len() != 4 {
            return Err(GameError::InvalidMove(
                "input length is not equal 4".into(),
            ));
        }
        let promotion = match promotion_token {
            None => None,
            Some(token) => Some(promotion_symbol(token).ok_or_else(|| {
                GameError::InvalidMove("invalid promotion piece".into())
            })?),
        };

        let squares = squares.as_bytes();
        if !is_file(squares[0])
            || !is_rank(squares[1])
            || !is_file(squares[2])
            || !is_rank(squares[3])
        {
            return Err(GameError::InvalidMove(
                "file or rank is out of range".into(),
            ));
        }
        let from = file_rank_to_index(squares[0], squares[1]);
        let to = file_rank_to_index(squares[2], squares[3]);

        let color = self.board.active_color();
        let symbol = self
            .board
            .symbol_at(index_to_mailbox(from))
            .ok_or(BoardError::PieceNotFound)?;

        self.apply_move(Move {
            color,
            symbol,
            from,
            to,
            promotion,
        })
    }

    fn force_draw(&mut self) -> Result<(), GameError> {
        let threefold = self
            .board
            .last_state_hash()
            .is_some_and(|hash| self.board.is_threefold_draw(hash));
        if !threefold && !self.board.is_fifty_move_draw() {
            return Err(GameError::NotEligibleToForceDraw);
        }
        self.state = State::Draw;
        info!(threefold, "draw forced");
        Ok(())
    }

    fn resign(&mut self, color: Color) -> Result<(), GameError> {
        if self.state.is_game_over() {
            return Err(GameError::InvalidMove("game is already over".into()));
        }
        self.state = match color {
            White => State::WhiteResign,
            Black => State::BlackResign,
        };
        self.winner = Some(!color);
        info!(%color, "resigned");
        Ok(())
    }

    /// The state seen by the side now to move: out of moves and in check
    /// is checkmate, out of moves otherwise is stalemate.
    fn next_state(&mut self) -> State {
        let side = self.board.active_color();
        if self.board.has_legal_moves(side) {
            return State::InProgress;
        }
        if self.board.is_king_in_check(side) {
            self.winner = Some(!side);
            return State::Checkmate;
        }
        State::Stalemate
    }

    fn round_result(&self, m: Option<&board::Move>) -> RoundResult {
        RoundResult {
            count: self.board.move_count(),
            move_result: m.map(MoveResult::from_engine),
            state: self.state,
            grid: self.board.grid_raw(),
            active_color: self.board.active_color(),
        }
    }
}

fn promotion_symbol(token: &str) -> Option<Symbol> {
    match token {
        "Q" => Some(Symbol::Queen),
        "R" => Some(Symbol::Rook),
        "B" => Some(Symbol::Bishop),
        "N" => Some(Symbol::Knight),
        _ => None,
    }
}

fn is_file(byte: u8) -> bool {
    byte.is_ascii_lowercase() && byte <= b'h'
}

fn is_rank(byte: u8) -> bool {
    (b'1'..=b'8').contains(&byte)
}

fn file_rank_to_index(file: u8, rank: u8) -> usize {
    let file_index = (file - b'a') as usize;
    let rank_index = (rank - b'1') as usize;
    rank_index * 8 + file_index
}
