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

//! Rules engine and game state machine for two-player chess.
//!
//! The crate decomposes into two layers:
//!
//! * [`board`] — the rules engine. A sentinel-bordered 10x12 mailbox
//!   board with per-color piece lists, attack queries, pseudo-legal and
//!   legal move generation, move application and undo, repetition and
//!   fifty-move bookkeeping, and a binary snapshot codec.
//! * [`game`] — a synchronized wrapper that enforces turn ownership,
//!   converts external 8x8 coordinates and coordinate notation into
//!   engine moves, detects terminal states (checkmate, stalemate, draw,
//!   resignation), and reports each round back to adapters.
//!
//! Adapters stay decoupled from the engine's internals: they consume the
//! [`game::Game`] API and render positions from the raw `[i32; 64]` grid.
//!
//! ```
//! use tandem_chess::game::{Game, State};
//!
//! let game = Game::default();
//! let round = game.apply_move_coord("e2e4").unwrap();
//! assert_eq!(round.state, State::InProgress);
//! assert_eq!(round.move_result.unwrap().to, 28);
//! ```

pub mod board;
pub mod game;

pub use board::*;
