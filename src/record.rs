// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serializable snapshots of a game, for saving a game and resuming it later.
//!
//! A [`GameRecord`] is a plain description of a game state. Turning a record back into a [`GameState`] runs the
//! same validation as any other setup, and additionally checks that the stored status agrees with the position.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    board::{Board, BoardError},
    core::*,
    game::{GameState, SetupError, Status},
};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid position: {0}")]
    Setup(#[from] SetupError),
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("stored status {stored} does not match position ({actual})")]
    StatusMismatch { stored: Status, actual: Status },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRecord {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl From<CastleStatus> for CastlingRecord {
    fn from(status: CastleStatus) -> Self {
        CastlingRecord {
            white_kingside: status.contains(CastleStatus::WHITE_KINGSIDE),
            white_queenside: status.contains(CastleStatus::WHITE_QUEENSIDE),
            black_kingside: status.contains(CastleStatus::BLACK_KINGSIDE),
            black_queenside: status.contains(CastleStatus::BLACK_QUEENSIDE),
        }
    }
}

impl From<CastlingRecord> for CastleStatus {
    fn from(record: CastlingRecord) -> Self {
        let mut status = CastleStatus::NONE;
        status.set(CastleStatus::WHITE_KINGSIDE, record.white_kingside);
        status.set(CastleStatus::WHITE_QUEENSIDE, record.white_queenside);
        status.set(CastleStatus::BLACK_KINGSIDE, record.black_kingside);
        status.set(CastleStatus::BLACK_QUEENSIDE, record.black_queenside);
        status
    }
}

/// A game state as plain data. Pieces are keyed by square name ("e4"), so a record reads naturally as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub pieces: BTreeMap<Square, Piece>,
    pub side_to_move: Color,
    pub castling: CastlingRecord,
    pub en_passant: Option<Square>,
    pub status: Status,
    #[serde(default)]
    pub halfmove_clock: u16,
    #[serde(default = "first_move")]
    pub fullmove_number: u16,
}

fn first_move() -> u16 {
    1
}

impl From<GameState> for GameRecord {
    fn from(state: GameState) -> Self {
        GameRecord {
            pieces: state.board().iter().collect(),
            side_to_move: state.side_to_move(),
            castling: state.castle_status().into(),
            en_passant: state.en_passant_square(),
            status: state.status(),
            halfmove_clock: state.halfmove_clock(),
            fullmove_number: state.fullmove_number(),
        }
    }
}

impl TryFrom<GameRecord> for GameState {
    type Error = RecordError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        for (square, piece) in record.pieces {
            board.add_piece(square, piece)?;
        }

        let state = GameState::from_parts(
            board,
            record.side_to_move,
            record.castling.into(),
            record.en_passant,
            record.halfmove_clock,
            record.fullmove_number,
        )?;

        if state.status() != record.status {
            return Err(RecordError::StatusMismatch {
                stored: record.status,
                actual: state.status(),
            });
        }

        Ok(state)
    }
}

impl GameState {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("game records always serialize")
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).expect("game records always serialize")
    }

    pub fn from_json(json: &str) -> Result<GameState, RecordError> {
        let record: GameRecord = serde_json::from_str(json)?;
        GameState::try_from(record)
    }
}
