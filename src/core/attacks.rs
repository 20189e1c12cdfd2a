// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack patterns for each kind of piece, and the attack calculator used for king safety.
//!
//! An attack is a square that a piece could capture onto if a capture were its only goal. Attacks ignore whose
//! turn it is and whether or not the attacking piece is pinned. The square a piece stands on is never one of its
//! own attacks, so a king can never be attacked by its own side.

use crate::board::Board;
use crate::core::{Color, Direction, PieceKind, Square, SquareSet, KNIGHT_OFFSETS};

/// Casts a ray from `sq` in each of `directions`, one square at a time. Each ray stops at the board edge or at the
/// first occupied square, which is included: it is attacked even though the piece cannot move past it.
fn sliding_attacks(sq: Square, occupancy: SquareSet, directions: &[Direction]) -> SquareSet {
    let mut attacks = SquareSet::empty();
    for &dir in directions {
        let mut cursor = sq;
        while let Some(next) = cursor.towards(dir) {
            attacks.insert(next);
            if occupancy.contains(next) {
                break;
            }

            cursor = next;
        }
    }

    attacks
}

fn offset_attacks(sq: Square, offsets: impl IntoIterator<Item = (i8, i8)>) -> SquareSet {
    offsets
        .into_iter()
        .filter_map(|(rank_delta, file_delta)| sq.offset(rank_delta, file_delta))
        .collect()
}

/// The two diagonal-forward squares of a pawn of the given color. The square straight ahead is never attacked.
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    let (forward, _) = color.pawn_direction().as_vector();
    offset_attacks(sq, [(forward, -1), (forward, 1)])
}

pub fn knight_attacks(sq: Square) -> SquareSet {
    offset_attacks(sq, KNIGHT_OFFSETS)
}

pub fn king_attacks(sq: Square) -> SquareSet {
    offset_attacks(sq, Direction::ALL.iter().map(|dir| dir.as_vector()))
}

pub fn bishop_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    sliding_attacks(sq, occupancy, &Direction::DIAGONAL)
}

pub fn rook_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    sliding_attacks(sq, occupancy, &Direction::ORTHOGONAL)
}

pub fn queen_attacks(sq: Square, occupancy: SquareSet) -> SquareSet {
    sliding_attacks(sq, occupancy, &Direction::ALL)
}

/// Squares attacked by a piece of the given kind and color standing on `sq`, given the occupied squares of the
/// board.
pub fn attacks(kind: PieceKind, color: Color, sq: Square, occupancy: SquareSet) -> SquareSet {
    match kind {
        PieceKind::Pawn => pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupancy),
        PieceKind::Rook => rook_attacks(sq, occupancy),
        PieceKind::Queen => queen_attacks(sq, occupancy),
        PieceKind::King => king_attacks(sq),
    }
}

/// Every square that some piece of `color` attacks on this board.
pub fn squares_attacked_by(board: &Board, color: Color) -> SquareSet {
    let occupancy = board.occupancy();
    let mut attacked = SquareSet::empty();
    for (sq, piece) in board.pieces_of_color(color) {
        attacked |= attacks(piece.kind, piece.color, sq, occupancy);
    }

    attacked
}

/// Whether any piece of color `by` attacks `target`.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    squares_attacked_by(board, by).contains(target)
}
