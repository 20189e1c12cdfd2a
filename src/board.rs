// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use thiserror::Error;

use crate::{
    core::{self, *},
    fen::FenParseError,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("square {0} is empty")]
    Empty(Square),
}

/// The contents of the chessboard: a mapping from each square to the piece standing on it, if any. A board knows
/// nothing about the rules of chess.
///
/// Every square holds at most one piece by construction. Counts of pieces are always derived from the mapping
/// itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates a board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates a board with all 32 pieces in the standard starting arrangement.
    pub fn starting_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, kind) in core::files().zip(BACK_RANK) {
            board.squares[Square::of(RANK_1, file).index()] = Some(Piece::new(Color::White, kind));
            board.squares[Square::of(RANK_2, file).index()] =
                Some(Piece::new(Color::White, PieceKind::Pawn));
            board.squares[Square::of(RANK_7, file).index()] =
                Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.squares[Square::of(RANK_8, file).index()] = Some(Piece::new(Color::Black, kind));
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        let slot = &mut self.squares[square.index()];
        if slot.is_some() {
            return Err(BoardError::Occupied(square));
        }

        *slot = Some(piece);
        Ok(())
    }

    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        self.squares[square.index()]
            .take()
            .ok_or(BoardError::Empty(square))
    }

    /// Iterates over every occupied square and its piece, in ascending square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        core::squares().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of_color(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color == color)
    }

    /// The set of squares occupied by pieces of the given color.
    pub fn pieces(&self, color: Color) -> SquareSet {
        self.pieces_of_color(color).map(|(sq, _)| sq).collect()
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> SquareSet {
        self.pieces_of_color(color)
            .filter(|(_, piece)| piece.kind == kind)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// The set of all occupied squares.
    pub fn occupancy(&self) -> SquareSet {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    pub fn piece_count(&self) -> usize {
        self.iter().count()
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of_color(color).count()
    }

    /// The square of the given color's king, if it has one. If the board holds more than one king of that color,
    /// the lowest square is returned.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces_of_kind(color, PieceKind::King)
            .into_iter()
            .next()
    }

    /// Produces the board that results from playing `mov`, leaving this one untouched. The move is trusted to have
    /// come from the move generator for this board; a move that doesn't fit the board is an engine bug and panics.
    pub fn after_move(&self, mov: Move) -> Board {
        let mut next = self.clone();
        let moving_piece = next
            .remove_piece(mov.source())
            .expect("invalid move: no piece at source square");

        if mov.is_en_passant() {
            // The captured pawn sits beside the mover, on the destination file.
            let captured = Square::of(mov.source().rank(), mov.destination().file());
            next.remove_piece(captured)
                .expect("invalid move: en-passant without a pawn to capture");
        } else if mov.is_capture() {
            next.remove_piece(mov.destination())
                .expect("invalid move: no piece at capture target");
        }

        if mov.is_castle() {
            let rank = mov.source().rank();
            let (rook_from, rook_to) = if mov.is_kingside_castle() {
                (Square::of(rank, FILE_H), Square::of(rank, FILE_F))
            } else {
                (Square::of(rank, FILE_A), Square::of(rank, FILE_D))
            };

            let rook = next
                .remove_piece(rook_from)
                .expect("invalid move: castle without rook");
            next.add_piece(rook_to, rook)
                .expect("invalid move: piece at rook target square");
        }

        let placed = match mov.promotion_piece() {
            Some(kind) => Piece::new(moving_piece.color, kind),
            None => moving_piece,
        };

        next.add_piece(mov.destination(), placed)
            .expect("invalid move: piece at destination square");
        next
    }

    /// Parses the piece-placement field of a FEN string.
    pub fn from_placement(placement: &str) -> Result<Board, FenParseError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenParseError::WrongRankCount(rows.len()));
        }

        for (rank, row) in core::ranks().rev().zip(rows) {
            let mut file = 0u8;
            for c in row.chars() {
                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if !(1..=8).contains(&value) {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += value as u8;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    continue;
                }

                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                let file_index =
                    File::try_from(file).map_err(|_| FenParseError::FileDoesNotSumToEight)?;
                board.squares[Square::of(rank, file_index).index()] = Some(piece);
                file += 1;
            }

            if file != 8 {
                return Err(FenParseError::FileDoesNotSumToEight);
            }
        }

        Ok(board)
    }

    /// Produces the piece-placement field of a FEN string for this board.
    pub fn as_placement(&self) -> String {
        let mut buf = String::new();
        for rank in core::ranks().rev() {
            let mut empty_squares = 0;
            for file in core::files() {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != RANK_1 {
                buf.push('/');
            }
        }

        buf
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.as_placement()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in core::files() {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in core::files() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_counts() {
        let board = Board::starting_position();
        assert_eq!(32, board.piece_count());
        assert_eq!(16, board.count(Color::White));
        assert_eq!(16, board.count(Color::Black));
        assert_eq!(Some(E1), board.king(Color::White));
        assert_eq!(Some(E8), board.king(Color::Black));
        assert_eq!(
            Some(Piece::new(Color::Black, PieceKind::Queen)),
            board.piece_at(D8)
        );
        assert_eq!(8, board.pieces_of_kind(Color::White, PieceKind::Pawn).len());
    }

    #[test]
    fn occupancy_joins_both_colors() {
        let board = Board::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let white: Vec<_> = board.pieces(Color::White).into_iter().collect();
        assert_eq!(vec![E1, E4], white);
        let occupied: Vec<_> = board.occupancy().into_iter().collect();
        assert_eq!(vec![E1, E4, D5, E8], occupied);
    }

    #[test]
    fn placement_roundtrip() {
        let placement = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
        let board = Board::from_placement(placement).unwrap();
        assert_eq!(placement, board.as_placement());
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            Board::starting_position().as_placement()
        );
    }

    #[test]
    fn placement_errors() {
        assert_eq!(
            Err(FenParseError::WrongRankCount(7)),
            Board::from_placement("8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::UnknownPiece('z')),
            Board::from_placement("z7/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::InvalidDigit),
            Board::from_placement("9/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            Board::from_placement("pppp5/8/8/8/8/8/8/8")
        );
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            Board::from_placement("ppp/8/8/8/8/8/8/8")
        );
    }

    #[test]
    fn add_and_remove() {
        let mut board = Board::empty();
        let rook = Piece::new(Color::White, PieceKind::Rook);
        board.add_piece(A1, rook).unwrap();
        assert_eq!(Err(BoardError::Occupied(A1)), board.add_piece(A1, rook));
        assert_eq!(Ok(rook), board.remove_piece(A1));
        assert_eq!(Err(BoardError::Empty(A1)), board.remove_piece(A1));
        assert_eq!(0, board.piece_count());
    }

    #[test]
    fn after_move_leaves_original_untouched() {
        let board = Board::starting_position();
        let next = board.after_move(Move::double_pawn_push(E2, E4));
        assert!(board.piece_at(E4).is_none());
        assert!(next.piece_at(E2).is_none());
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::Pawn)),
            next.piece_at(E4)
        );
    }

    #[test]
    fn after_move_en_passant_removes_passed_pawn() {
        let board = Board::from_placement("8/8/8/3pP3/8/8/8/8").unwrap();
        let next = board.after_move(Move::en_passant(E5, D6));
        assert!(next.piece_at(D5).is_none());
        assert!(next.piece_at(E5).is_none());
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::Pawn)),
            next.piece_at(D6)
        );
    }

    #[test]
    fn after_move_castles_move_the_rook() {
        let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let kingside = board.after_move(Move::kingside_castle(E1, G1));
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::Rook)),
            kingside.piece_at(F1)
        );
        assert!(kingside.piece_at(H1).is_none());

        let queenside = board.after_move(Move::queenside_castle(E8, C8));
        assert_eq!(
            Some(Piece::new(Color::Black, PieceKind::King)),
            queenside.piece_at(C8)
        );
        assert_eq!(
            Some(Piece::new(Color::Black, PieceKind::Rook)),
            queenside.piece_at(D8)
        );
        assert!(queenside.piece_at(A8).is_none());
    }

    #[test]
    fn after_move_promotion_keeps_color() {
        let board = Board::from_placement("5b2/4P3/8/8/8/8/8/8").unwrap();
        let next = board.after_move(Move::promotion_capture(E7, F8, PieceKind::Knight));
        assert_eq!(
            Some(Piece::new(Color::White, PieceKind::Knight)),
            next.piece_at(F8)
        );
        assert_eq!(1, next.piece_count());
    }
}
