// Copyright 2021-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. Moves produced here obey each piece's movement pattern and are blocked by other
//! pieces, but may leave the mover's own king attacked; see [`crate::legality`] for the filter that removes those.
//!
//! Within a call, moves are produced in a fixed order for a given board (pieces by ascending square, then each
//! piece's directions in a fixed order), but callers should treat the result as a set.

use crate::board::Board;
use crate::core::attacks::pawn_attacks;
use crate::core::*;

/// Pushes a move from `source` to `dest`, or all four promotions if `dest` lies on the mover's far rank.
fn push_pawn_move(us: Color, source: Square, dest: Square, capture: bool, moves: &mut Vec<Move>) {
    if dest.rank() == us.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            if capture {
                moves.push(Move::promotion_capture(source, dest, kind));
            } else {
                moves.push(Move::promotion(source, dest, kind));
            }
        }
    } else if capture {
        moves.push(Move::capture(source, dest));
    } else {
        moves.push(Move::quiet(source, dest));
    }
}

pub fn generate_pawn_moves(
    us: Color,
    source: Square,
    board: &Board,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let up = us.pawn_direction();

    // Single and double pushes; both need every square they cross to be empty.
    if let Some(single) = source.towards(up).filter(|&sq| board.is_empty(sq)) {
        push_pawn_move(us, source, single, false, moves);
        if source.rank() == us.pawn_start_rank() {
            if let Some(double) = single.towards(up).filter(|&sq| board.is_empty(sq)) {
                moves.push(Move::double_pawn_push(source, double));
            }
        }
    }

    // Diagonal captures, only onto an enemy piece or onto the en-passant square.
    for target in pawn_attacks(source, us) {
        match board.piece_at(target) {
            Some(piece) if piece.color != us => push_pawn_move(us, source, target, true, moves),
            Some(_) => {}
            None if Some(target) == en_passant => {
                // The pawn being captured stands beside us, on the target's file.
                let passed = Square::of(source.rank(), target.file());
                if board.piece_at(passed) == Some(Piece::new(us.toggle(), PieceKind::Pawn)) {
                    moves.push(Move::en_passant(source, target));
                }
            }
            None => {}
        }
    }
}

/// Walks each direction until blocked. A blocking enemy piece may be captured; a blocking friendly piece may not.
fn generate_sliding_moves(
    us: Color,
    source: Square,
    board: &Board,
    directions: &[Direction],
    moves: &mut Vec<Move>,
) {
    for &dir in directions {
        let mut cursor = source;
        while let Some(target) = cursor.towards(dir) {
            match board.piece_at(target) {
                None => moves.push(Move::quiet(source, target)),
                Some(piece) => {
                    if piece.color != us {
                        moves.push(Move::capture(source, target));
                    }
                    break;
                }
            }

            cursor = target;
        }
    }
}

/// Single steps by fixed offsets, as knights and kings move.
fn generate_step_moves(
    us: Color,
    source: Square,
    board: &Board,
    offsets: impl IntoIterator<Item = (i8, i8)>,
    moves: &mut Vec<Move>,
) {
    for (rank_delta, file_delta) in offsets {
        let target = match source.offset(rank_delta, file_delta) {
            Some(target) => target,
            None => continue,
        };

        match board.piece_at(target) {
            None => moves.push(Move::quiet(source, target)),
            Some(piece) if piece.color != us => moves.push(Move::capture(source, target)),
            Some(_) => {}
        }
    }
}

/// Castling candidates: the king and the relevant rook stand on their original squares and every square between
/// them is empty. Castle rights and attacked squares are checked by the legality filter.
fn generate_castles(us: Color, source: Square, board: &Board, moves: &mut Vec<Move>) {
    let home = match us {
        Color::White => RANK_1,
        Color::Black => RANK_8,
    };

    if source != Square::of(home, FILE_E) {
        return;
    }

    let rook = Some(Piece::new(us, PieceKind::Rook));
    let all_empty = |files: &[File]| files.iter().all(|&f| board.is_empty(Square::of(home, f)));
    if board.piece_at(Square::of(home, FILE_H)) == rook && all_empty(&[FILE_F, FILE_G]) {
        moves.push(Move::kingside_castle(source, Square::of(home, FILE_G)));
    }

    if board.piece_at(Square::of(home, FILE_A)) == rook && all_empty(&[FILE_B, FILE_C, FILE_D]) {
        moves.push(Move::queenside_castle(source, Square::of(home, FILE_C)));
    }
}

/// Pseudo-legal moves for the piece standing on `square`, or nothing if the square is empty.
pub fn pseudo_legal_moves(board: &Board, square: Square, en_passant: Option<Square>) -> Vec<Move> {
    let mut moves = Vec::new();
    if let Some(piece) = board.piece_at(square) {
        generate_moves_for_piece(piece, square, board, en_passant, &mut moves);
    }

    moves
}

pub fn generate_moves_for_piece(
    piece: Piece,
    source: Square,
    board: &Board,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let us = piece.color;
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(us, source, board, en_passant, moves),
        PieceKind::Knight => generate_step_moves(us, source, board, KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => generate_sliding_moves(us, source, board, &Direction::DIAGONAL, moves),
        PieceKind::Rook => generate_sliding_moves(us, source, board, &Direction::ORTHOGONAL, moves),
        PieceKind::Queen => generate_sliding_moves(us, source, board, &Direction::ALL, moves),
        PieceKind::King => {
            let steps = Direction::ALL.iter().map(|dir| dir.as_vector());
            generate_step_moves(us, source, board, steps, moves);
            generate_castles(us, source, board, moves);
        }
    }
}

/// Pseudo-legal moves for every piece of color `us`.
pub fn generate_moves(us: Color, board: &Board, en_passant: Option<Square>, moves: &mut Vec<Move>) {
    for (source, piece) in board.pieces_of_color(us) {
        generate_moves_for_piece(piece, source, board, en_passant, moves);
    }
}
