// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `arbiter` enforces the rules of chess.
//!
//! Given a game, `arbiter` answers which moves are legal, plays moves while keeping turn order, castle rights and
//! the en-passant square up to date, and classifies each position as in progress, check, checkmate or stalemate.
//! It does not play chess itself: there is no search and no evaluation.
//!
//! ```
//! use arbiter::{core::*, Status};
//!
//! let mut game = arbiter::new_game();
//! for mov in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game = arbiter::apply_move(&game, mov.parse().unwrap()).unwrap();
//! }
//!
//! assert_eq!(Status::Checkmate, game.status());
//! assert!(arbiter::legal_moves(&game, E1).is_empty());
//! ```

pub mod board;
pub mod console;
pub mod core;
pub mod fen;
pub mod game;
pub mod legality;
pub mod log;
pub mod movegen;
pub mod perft;
pub mod record;

pub use board::{Board, BoardError};
pub use fen::FenParseError;
pub use game::{GameState, MoveError, SetupError, Status};
pub use record::{GameRecord, RecordError};

use crate::core::{Move, Square};

/// A new game in the standard starting position, White to move.
pub fn new_game() -> GameState {
    GameState::new()
}

/// The legal moves for the piece on `square`. Empty when the square is empty, holds a piece of the side not to
/// move, or the game is over.
pub fn legal_moves(state: &GameState, square: Square) -> Vec<Move> {
    state.legal_moves_from(square)
}

/// Plays `mov` and returns the resulting game state, leaving `state` as it was.
pub fn apply_move(state: &GameState, mov: Move) -> Result<GameState, MoveError> {
    state.after_move(mov)
}
