// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{fmt, str::FromStr};

use bitflags::bitflags;
use thiserror::Error;

use crate::core::{PieceKind, Square};

bitflags! {
    /// Attributes of a generated move that cannot be recovered from its squares alone.
    pub struct MoveFlags: u8 {
        const QUIET = 0;
        const CAPTURE = 0b0000_0001;
        const DOUBLE_PAWN_PUSH = 0b0000_0010;
        const EN_PASSANT = 0b0000_0100;
        const KINGSIDE_CASTLE = 0b0000_1000;
        const QUEENSIDE_CASTLE = 0b0001_0000;
    }
}

/// A move: a proposed transition from one square to another, with an optional promotion and a set of flags
/// describing castles, captures and en-passant.
///
/// Moves come from two places. The move generator produces fully flagged moves for a particular board. Callers
/// outside of the engine usually know only the squares involved (and the promotion piece, if any); such a
/// proposal is built with [`Move::new`] or parsed from coordinate notation, and is resolved against the legal
/// move list with [`Move::matches`], which ignores flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move text too short or too long: {0:?}")]
    InvalidLength(String),
    #[error("invalid square in move: {0:?}")]
    InvalidSquare(String),
    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(char),
}

impl Move {
    /// Constructs an unflagged move proposal. Its meaning is resolved by the game state when it is applied.
    pub fn new(source: Square, dest: Square, promotion: Option<PieceKind>) -> Move {
        Move {
            source,
            destination: dest,
            promotion,
            flags: MoveFlags::QUIET,
        }
    }

    fn with_flags(source: Square, dest: Square, flags: MoveFlags) -> Move {
        Move {
            source,
            destination: dest,
            promotion: None,
            flags,
        }
    }

    /// Constructs a new quiet move from the source square to the destination
    /// square.
    pub fn quiet(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::QUIET)
    }

    /// Constructs a new capture move from the source square to the destination
    /// square.
    pub fn capture(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::CAPTURE)
    }

    /// Constructs a new en passsant move from the source square to the
    /// destination square.
    pub fn en_passant(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::CAPTURE | MoveFlags::EN_PASSANT)
    }

    /// Constructs a new double pawn push move from the source square to
    /// the destination square.
    pub fn double_pawn_push(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Constructs a new move from the source square to the destination
    /// square, promoting the current piece to the given piece kind.
    pub fn promotion(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move {
            source,
            destination: dest,
            promotion: Some(promoted),
            flags: MoveFlags::QUIET,
        }
    }

    /// Constructs a new promotion capture move from the source square to the
    /// destination square, promoting the current piece to the given piece kind.
    pub fn promotion_capture(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move {
            source,
            destination: dest,
            promotion: Some(promoted),
            flags: MoveFlags::CAPTURE,
        }
    }

    /// Constructs a new kingside castle. The squares are the king's source
    /// and destination squares.
    pub fn kingside_castle(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::KINGSIDE_CASTLE)
    }

    /// Constructs a new queenside castle. The squares are the king's source
    /// and destination squares.
    pub fn queenside_castle(source: Square, dest: Square) -> Move {
        Move::with_flags(source, dest, MoveFlags::QUEENSIDE_CASTLE)
    }

    /// Returns the source square of this move.
    pub fn source(self) -> Square {
        self.source
    }

    /// Returns the destination square of this move.
    pub fn destination(self) -> Square {
        self.destination
    }

    /// If this move is a promotion, returns the piece kind that the pawn is being promoted to.
    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn flags(self) -> MoveFlags {
        self.flags
    }

    /// Returns whether or not this move is a quiet move.
    pub fn is_quiet(self) -> bool {
        self.flags.is_empty() && self.promotion.is_none()
    }

    /// Returns whether or not this move is a capture move.
    pub fn is_capture(self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    /// Returns whether or not this move is an en passant move.
    pub fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    /// Returns whether or not this move is a double pawn push.
    pub fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Returns whether or not this move is a kingside castle.
    pub fn is_kingside_castle(self) -> bool {
        self.flags.contains(MoveFlags::KINGSIDE_CASTLE)
    }

    /// Returns whether or not this move is a queenside castle.
    pub fn is_queenside_castle(self) -> bool {
        self.flags.contains(MoveFlags::QUEENSIDE_CASTLE)
    }

    /// Returns whether or not this move is a castle.
    pub fn is_castle(self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    /// Whether `self` and `other` describe the same action: same source, destination and promotion. Flags are
    /// not compared.
    pub fn matches(self, other: Move) -> bool {
        self.source == other.source
            && self.destination == other.destination
            && self.promotion == other.promotion
    }
}

impl fmt::Display for Move {
    /// Coordinate notation: source, destination and (for promotions) the lowercase piece letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses coordinate notation ("e2e4", "a7a8q") into an unflagged move proposal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(MoveParseError::InvalidLength(s.to_owned()));
        }

        let source: Square = s[0..2]
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare(s.to_owned()))?;
        let dest: Square = s[2..4]
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare(s.to_owned()))?;
        let promotion = match s[4..].chars().next() {
            Some(c) => {
                let kind =
                    PieceKind::try_from(c).map_err(|_| MoveParseError::InvalidPromotion(c))?;
                Some(kind)
            }
            None => None,
        };

        Ok(Move::new(source, dest, promotion))
    }
}
