// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The game state machine: turn order, castle rights, the en-passant square and the check/checkmate/stalemate
//! classification, all advanced one move at a time by [`GameState::apply_move`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    board::Board,
    core::*,
    legality,
    record::{GameRecord, RecordError},
};

/// Where a game stands from the point of view of the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The side to move is not in check and has at least one legal move.
    InProgress,
    /// The side to move is in check and has at least one legal move.
    Check,
    /// The side to move is in check and has no legal moves. Terminal.
    Checkmate,
    /// The side to move is not in check and has no legal moves. Terminal.
    Stalemate,
}

impl Status {
    fn classify(in_check: bool, has_legal_move: bool) -> Status {
        match (in_check, has_legal_move) {
            (true, false) => Status::Checkmate,
            (true, true) => Status::Check,
            (false, false) => Status::Stalemate,
            (false, true) => Status::InProgress,
        }
    }

    /// Whether the game has ended; no further moves are accepted from a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::InProgress => "in progress",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        };

        write!(f, "{}", name)
    }
}

/// Reasons a proposed move is refused. None of these change the game state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece belonging to the side to move on {0}")]
    WrongTurn(Square),
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    #[error("game is already over: {0}")]
    GameAlreadyOver(Status),
}

/// Reasons a supplied position cannot start or resume a game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },
    #[error("pawn on {0}, a back rank")]
    PawnOnBackRank(Square),
    #[error("castle right {0:?} without king and rook on their original squares")]
    InvalidCastleRight(CastleStatus),
    #[error("invalid en-passant square {0} for this position")]
    InvalidEnPassant(Square),
}

/// The state of a game of chess: the board, whose turn it is, castle rights, the en-passant target square, and
/// the game's status.
///
/// A GameState changes only through [`GameState::apply_move`], which either updates everything at once or fails
/// and leaves the state untouched. Callers hosting several games give each GameState a single owner; the state
/// does no locking of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameRecord", try_from = "GameRecord")]
pub struct GameState {
    board: Board,
    /// Color whose turn it is to move.
    side_to_move: Color,
    /// Castle rights for both players. Rights are only ever removed.
    castle_status: CastleStatus,
    /// The square passed over by a double pawn push on the previous move, if there was one.
    en_passant_square: Option<Square>,
    /// Status for the side to move, recomputed after every move.
    status: Status,
    /// Halfmoves since the last capture or pawn move.
    halfmove_clock: u16,
    /// Starts at one and increases after each of Black's moves.
    fullmove_number: u16,
}

impl GameState {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn is_check(&self) -> bool {
        matches!(self.status, Status::Check | Status::Checkmate)
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// The square of the given color's king. Every game state holds exactly one king per color.
    pub fn king_square(&self, color: Color) -> Square {
        self.board
            .king(color)
            .unwrap_or_else(|| panic!("game state has no {} king: {}", color, self.as_fen()))
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        legality::legal_moves(self)
    }

    /// Legal moves for the piece on `square`, used to highlight a piece's options. Empty unless the square holds a
    /// piece of the side to move.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        legality::legal_moves_from(self, square)
    }
}

impl GameState {
    /// A new game: the standard starting position, White to move, all castle rights and no en-passant square.
    pub fn new() -> GameState {
        GameState {
            board: Board::starting_position(),
            side_to_move: Color::White,
            castle_status: CastleStatus::WHITE | CastleStatus::BLACK,
            en_passant_square: None,
            status: Status::InProgress,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Resumes a game from a supplied board. Castle rights are granted on each side whose king and rook still stand
    /// on their original squares; there is no en-passant square.
    ///
    /// A board carries no history, so a king or rook that has left its square and come back gets its right
    /// restored here. Games with history are resumed through [`GameState::from_parts`], [`GameState::from_fen`] or
    /// a [`GameRecord`], all of which take the rights explicitly.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<GameState, SetupError> {
        let mut castle_status = CastleStatus::NONE;
        for color in colors() {
            for right in [CastleStatus::kingside(color), CastleStatus::queenside(color)] {
                if castle_pieces_in_place(&board, right) {
                    castle_status |= right;
                }
            }
        }

        GameState::from_parts(board, side_to_move, castle_status, None, 0, 1)
    }

    /// Assembles a game state from each of its parts, validating that they describe a playable position, and
    /// computes its status.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castle_status: CastleStatus,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Result<GameState, SetupError> {
        for color in colors() {
            let count = board.pieces_of_kind(color, PieceKind::King).len() as usize;
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        if let Some((sq, _)) = board
            .iter()
            .find(|(sq, piece)| piece.kind == PieceKind::Pawn && (sq.rank() == RANK_1 || sq.rank() == RANK_8))
        {
            return Err(SetupError::PawnOnBackRank(sq));
        }

        for color in colors() {
            for right in [CastleStatus::kingside(color), CastleStatus::queenside(color)] {
                if castle_status.contains(right) && !castle_pieces_in_place(&board, right) {
                    return Err(SetupError::InvalidCastleRight(right));
                }
            }
        }

        if let Some(ep) = en_passant_square {
            if !is_plausible_en_passant(&board, side_to_move, ep) {
                return Err(SetupError::InvalidEnPassant(ep));
            }
        }

        let mut state = GameState {
            board,
            side_to_move,
            castle_status,
            en_passant_square,
            status: Status::InProgress,
            halfmove_clock,
            fullmove_number,
        };

        state.status = state.compute_status();
        Ok(state)
    }

    fn compute_status(&self) -> Status {
        let us = self.side_to_move;
        let in_check = attacks::is_attacked(&self.board, self.king_square(us), us.toggle());
        Status::classify(in_check, legality::has_legal_move(self))
    }

    pub fn to_record(&self) -> GameRecord {
        GameRecord::from(self.clone())
    }

    pub fn from_record(record: GameRecord) -> Result<GameState, RecordError> {
        GameState::try_from(record)
    }
}

//
// Move application.
//

impl GameState {
    /// Plays a proposed move. The proposal is matched against the legal moves by source, destination and promotion
    /// piece, and the matching legal move (carrying any castle or en-passant flags) is played and returned.
    ///
    /// On error, the state is unchanged.
    pub fn apply_move(&mut self, proposed: Move) -> Result<Move, MoveError> {
        let _span = tracing::debug_span!("apply_move", mov = %proposed).entered();
        match self.resolve(proposed) {
            Ok(mov) => {
                let next = self.successor(mov);
                tracing::debug!(resolved = ?mov.flags(), status = %next.status, "applied move");
                if next.status.is_terminal() {
                    tracing::info!(status = %next.status, winner = ?next.winner(), "game over");
                }

                *self = next;
                Ok(mov)
            }
            Err(err) => {
                tracing::debug!(%err, "rejected move");
                Err(err)
            }
        }
    }

    /// Like [`GameState::apply_move`], but produces the next state as a new value and leaves this one as it is.
    pub fn after_move(&self, proposed: Move) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move(proposed)?;
        Ok(next)
    }

    /// The winning color, if the side to move has been checkmated.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            Status::Checkmate => Some(self.side_to_move.toggle()),
            _ => None,
        }
    }

    /// Finds the legal move a proposal refers to.
    fn resolve(&self, proposed: Move) -> Result<Move, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameAlreadyOver(self.status));
        }

        match self.board.piece_at(proposed.source()) {
            Some(piece) if piece.color == self.side_to_move => {}
            _ => return Err(MoveError::WrongTurn(proposed.source())),
        }

        self.legal_moves_from(proposed.source())
            .into_iter()
            .find(|mov| mov.matches(proposed))
            .ok_or(MoveError::IllegalMove(proposed))
    }

    /// The state after playing `mov`, which must be legal in this state.
    pub(crate) fn successor(&self, mov: Move) -> GameState {
        let us = self.side_to_move;
        let moving_piece = self
            .board
            .piece_at(mov.source())
            .expect("invalid move: no piece at source square");

        let board = self.board.after_move(mov);
        for color in colors() {
            let kings = board.pieces_of_kind(color, PieceKind::King).len();
            assert_eq!(1, kings, "{} has {} kings after {}", color, kings, mov);
        }

        // Only a double pawn push leaves an en-passant square behind: the square it passed over.
        let en_passant_square = if mov.is_double_pawn_push() {
            mov.source().towards(us.pawn_direction())
        } else {
            None
        };

        let halfmove_clock = if mov.is_capture() || moving_piece.kind == PieceKind::Pawn {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        let fullmove_number = match us {
            Color::Black => self.fullmove_number.saturating_add(1),
            Color::White => self.fullmove_number,
        };

        let mut next = GameState {
            board,
            side_to_move: us.toggle(),
            castle_status: self.castle_status_after(mov, moving_piece),
            en_passant_square,
            status: Status::InProgress,
            halfmove_clock,
            fullmove_number,
        };

        next.status = next.compute_status();
        next
    }

    /// Castle rights after `mov`. Moving a king drops both of its rights; moving a rook off its original square, or
    /// capturing onto an enemy rook's original square, drops the right on that side. Rights never come back.
    fn castle_status_after(&self, mov: Move, moving_piece: Piece) -> CastleStatus {
        let us = moving_piece.color;
        let them = us.toggle();
        let mut status = self.castle_status;
        match moving_piece.kind {
            PieceKind::King => status.remove(CastleStatus::both(us)),
            PieceKind::Rook if mov.source() == kingside_rook(us) => {
                status.remove(CastleStatus::kingside(us))
            }
            PieceKind::Rook if mov.source() == queenside_rook(us) => {
                status.remove(CastleStatus::queenside(us))
            }
            _ => {}
        }

        if mov.destination() == kingside_rook(them) {
            status.remove(CastleStatus::kingside(them));
        } else if mov.destination() == queenside_rook(them) {
            status.remove(CastleStatus::queenside(them));
        }

        status
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move, {}", self.side_to_move, self.status)
    }
}

fn back_rank(color: Color) -> Rank {
    match color {
        Color::White => RANK_1,
        Color::Black => RANK_8,
    }
}

fn king_start(color: Color) -> Square {
    Square::of(back_rank(color), FILE_E)
}

fn kingside_rook(color: Color) -> Square {
    Square::of(back_rank(color), FILE_H)
}

fn queenside_rook(color: Color) -> Square {
    Square::of(back_rank(color), FILE_A)
}

/// Whether the king and rook that a single castle right refers to are on their original squares.
fn castle_pieces_in_place(board: &Board, right: CastleStatus) -> bool {
    let (color, rook_square) = if right == CastleStatus::WHITE_KINGSIDE {
        (Color::White, kingside_rook(Color::White))
    } else if right == CastleStatus::WHITE_QUEENSIDE {
        (Color::White, queenside_rook(Color::White))
    } else if right == CastleStatus::BLACK_KINGSIDE {
        (Color::Black, kingside_rook(Color::Black))
    } else {
        (Color::Black, queenside_rook(Color::Black))
    };

    board.piece_at(king_start(color)) == Some(Piece::new(color, PieceKind::King))
        && board.piece_at(rook_square) == Some(Piece::new(color, PieceKind::Rook))
}

/// An en-passant square must sit behind an enemy pawn that could just have advanced two squares, with the
/// square itself and the pawn's starting square empty.
fn is_plausible_en_passant(board: &Board, side_to_move: Color, ep: Square) -> bool {
    let them = side_to_move.toggle();
    let expected_rank = match them {
        Color::White => RANK_3,
        Color::Black => RANK_6,
    };

    if ep.rank() != expected_rank || !board.is_empty(ep) {
        return false;
    }

    let pushed_to = ep.towards(them.pawn_direction());
    let pushed_from = ep.towards(them.pawn_direction().reverse());
    match (pushed_to, pushed_from) {
        (Some(to), Some(from)) => {
            board.piece_at(to) == Some(Piece::new(them, PieceKind::Pawn)) && board.is_empty(from)
        }
        _ => false,
    }
}
