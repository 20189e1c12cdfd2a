// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading and writing game states in Forsyth-Edwards Notation.

use std::fmt::Write;

use thiserror::Error;

use crate::{
    board::Board,
    core::*,
    game::{GameState, SetupError},
};

/// Possible errors that can arise when parsing a FEN string into a `GameState`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FenParseError {
    #[error("unexpected EOF while reading")]
    UnexpectedEnd,
    #[error("unexpected trailing field: {0}")]
    TrailingField(String),
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid digit")]
    InvalidDigit,
    #[error("file does not sum to 8")]
    FileDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castle")]
    InvalidCastle,
    #[error("invalid en-passant")]
    InvalidEnPassant,
    #[error("invalid halfmove")]
    InvalidHalfmove,
    #[error("invalid fullmove")]
    InvalidFullmove,
    #[error("invalid position: {0}")]
    Setup(#[from] SetupError),
}

fn parse_side_to_move(field: &str) -> Result<Color, FenParseError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenParseError::InvalidSideToMove),
    }
}

fn parse_castle_status(field: &str) -> Result<CastleStatus, FenParseError> {
    if field == "-" {
        return Ok(CastleStatus::NONE);
    }

    let mut status = CastleStatus::NONE;
    for c in field.chars() {
        let right = match c {
            'K' => CastleStatus::WHITE_KINGSIDE,
            'Q' => CastleStatus::WHITE_QUEENSIDE,
            'k' => CastleStatus::BLACK_KINGSIDE,
            'q' => CastleStatus::BLACK_QUEENSIDE,
            _ => return Err(FenParseError::InvalidCastle),
        };

        if status.contains(right) {
            return Err(FenParseError::InvalidCastle);
        }

        status |= right;
    }

    Ok(status)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenParseError> {
    if field == "-" {
        return Ok(None);
    }

    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenParseError::InvalidEnPassant)
}

impl GameState {
    /// Parses a FEN string. The halfmove and fullmove fields are optional and default to 0 and 1; the resulting
    /// position is validated the same way as [`GameState::from_parts`].
    pub fn from_fen(fen: impl AsRef<str>) -> Result<GameState, FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let mut next = || fields.next().ok_or(FenParseError::UnexpectedEnd);
        let board = Board::from_placement(next()?)?;
        let side_to_move = parse_side_to_move(next()?)?;
        let castle_status = parse_castle_status(next()?)?;
        let en_passant_square = parse_en_passant(next()?)?;
        let (halfmove_clock, fullmove_number) = match next() {
            Ok(halfmove) => {
                let halfmove = halfmove
                    .parse::<u16>()
                    .map_err(|_| FenParseError::InvalidHalfmove)?;
                let fullmove = next()?
                    .parse::<u16>()
                    .map_err(|_| FenParseError::InvalidFullmove)?;
                (halfmove, fullmove)
            }
            Err(_) => (0, 1),
        };

        if let Ok(extra) = next() {
            return Err(FenParseError::TrailingField(extra.to_owned()));
        }

        let state = GameState::from_parts(
            board,
            side_to_move,
            castle_status,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
        )?;

        Ok(state)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = self.board().as_placement();
        buf.push(' ');
        match self.side_to_move() {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }
        buf.push(' ');
        if self.castle_status() == CastleStatus::NONE {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push(' ');
        if let Some(ep_square) = self.en_passant_square() {
            write!(&mut buf, "{}", ep_square).unwrap();
        } else {
            buf.push('-');
        }
        write!(
            &mut buf,
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        )
        .unwrap();
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Status;

    #[test]
    fn fen_smoke() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(2, state.board().piece_count());
        assert_eq!(Color::White, state.side_to_move());
        assert_eq!(CastleStatus::NONE, state.castle_status());
        assert_eq!(None, state.en_passant_square());
        assert_eq!(0, state.halfmove_clock());
        assert_eq!(1, state.fullmove_number());
    }

    #[test]
    fn starting_position() {
        let state =
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(GameState::new(), state);
    }

    #[test]
    fn black_to_move_with_en_passant() {
        let state =
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(Color::Black, state.side_to_move());
        assert_eq!(Some(E3), state.en_passant_square());
    }

    #[test]
    fn clocks_are_optional() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(0, state.halfmove_clock());
        assert_eq!(1, state.fullmove_number());
    }

    #[test]
    fn clocks_are_read() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 17 42").unwrap();
        assert_eq!(17, state.halfmove_clock());
        assert_eq!(42, state.fullmove_number());
    }

    #[test]
    fn status_is_computed() {
        let state = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        assert_eq!(Status::Checkmate, state.status());
    }

    #[test]
    fn empty_fen() {
        assert_eq!(Err(FenParseError::UnexpectedEnd), GameState::from_fen(""));
    }

    #[test]
    fn unknown_piece() {
        assert_eq!(
            Err(FenParseError::UnknownPiece('z')),
            GameState::from_fen("z7/8/8/8/8/8/8/8 w - - 0 1")
        );
    }

    #[test]
    fn invalid_digit() {
        assert_eq!(
            Err(FenParseError::InvalidDigit),
            GameState::from_fen("9/8/8/8/8/8/8/8 w - - 0 1")
        );
    }

    #[test]
    fn not_sum_to_8() {
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            GameState::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 1")
        );
    }

    #[test]
    fn wrong_rank_count() {
        assert_eq!(
            Err(FenParseError::WrongRankCount(7)),
            GameState::from_fen("8/8/8/8/8/8/8 w - - 0 1")
        );
    }

    #[test]
    fn bad_side_to_move() {
        assert_eq!(
            Err(FenParseError::InvalidSideToMove),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 c - - 0 1")
        );
    }

    #[test]
    fn bad_castle_status() {
        assert_eq!(
            Err(FenParseError::InvalidCastle),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w a - 0 1")
        );
        assert_eq!(
            Err(FenParseError::InvalidCastle),
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KK - 0 1")
        );
    }

    #[test]
    fn bad_en_passant() {
        assert_eq!(
            Err(FenParseError::InvalidEnPassant),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - 88 0 1")
        );
    }

    #[test]
    fn bad_halfmove() {
        assert_eq!(
            Err(FenParseError::InvalidHalfmove),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - q 1")
        );
        assert_eq!(
            Err(FenParseError::InvalidHalfmove),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 4294967296 1")
        );
    }

    #[test]
    fn halfmove_without_fullmove() {
        assert_eq!(
            Err(FenParseError::UnexpectedEnd),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0")
        );
    }

    #[test]
    fn bad_fullmove() {
        assert_eq!(
            Err(FenParseError::InvalidFullmove),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 q")
        );
    }

    #[test]
    fn trailing_field() {
        assert_eq!(
            Err(FenParseError::TrailingField("extra".to_owned())),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra")
        );
    }

    #[test]
    fn invalid_setup() {
        assert_eq!(
            Err(FenParseError::Setup(SetupError::KingCount {
                color: Color::White,
                count: 0
            })),
            GameState::from_fen("8/8/8/8/8/8/8/8 w - - 0 1")
        );
        assert_eq!(
            Err(FenParseError::Setup(SetupError::InvalidCastleRight(
                CastleStatus::WHITE_KINGSIDE
            ))),
            GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1")
        );
    }

    #[test]
    fn fen_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3",
            "4k3/8/8/8/8/8/8/4K3 b - - 12 40",
        ] {
            assert_eq!(fen, GameState::from_fen(fen).unwrap().as_fen());
        }
    }
}
