// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The legality filter, which narrows pseudo-legal moves down to the moves that do not leave the mover's king
//! attacked.
//!
//! Every probe plays the move onto its own throwaway copy of the board and asks the attack calculator whether the
//! mover's king is now attacked. The real game state is never touched.

use crate::{
    board::Board,
    core::{attacks, CastleStatus, Color, Move, PieceKind, Square, FILE_C, FILE_D, FILE_F, FILE_G},
    game::GameState,
    movegen,
};

fn king_square(board: &Board, color: Color) -> Square {
    board
        .king(color)
        .unwrap_or_else(|| panic!("board has no {} king: {:?}", color, board))
}

/// Castles additionally require the castle right, and that the king is not attacked on its starting square or on
/// any square it crosses, including its destination.
fn is_castle_permitted(state: &GameState, mov: Move) -> bool {
    let us = state.side_to_move();
    let board = state.board();
    let (right, transit_files) = if mov.is_kingside_castle() {
        (CastleStatus::kingside(us), [FILE_F, FILE_G])
    } else {
        (CastleStatus::queenside(us), [FILE_D, FILE_C])
    };

    if !state.castle_status().contains(right) {
        return false;
    }

    let them = us.toggle();
    if attacks::is_attacked(board, mov.source(), them) {
        return false;
    }

    let rank = mov.source().rank();
    transit_files.iter().all(|&file| {
        let waypoint = board.after_move(Move::quiet(mov.source(), Square::of(rank, file)));
        !attacks::is_attacked(&waypoint, king_square(&waypoint, us), them)
    })
}

/// Legality test for moves that are already known to be pseudo-legal for the side to move of `state`.
pub fn is_legal_given_pseudolegal(state: &GameState, mov: Move) -> bool {
    let board = state.board();
    let us = state.side_to_move();

    // Kings are never captured. In any position reached through play this can't come up, since the side that
    // just moved can't have left its own king attacked.
    if let Some(target) = board.piece_at(mov.destination()) {
        if target.kind == PieceKind::King {
            return false;
        }
    }

    if mov.is_castle() && !is_castle_permitted(state, mov) {
        return false;
    }

    let next = board.after_move(mov);
    !attacks::is_attacked(&next, king_square(&next, us), us.toggle())
}

/// All legal moves for the side to move.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();
    movegen::generate_moves(
        state.side_to_move(),
        state.board(),
        state.en_passant_square(),
        &mut moves,
    );
    moves.retain(|&mov| is_legal_given_pseudolegal(state, mov));
    moves
}

/// Legal moves for the piece on `square`. Empty if the square is empty or holds a piece of the side not to move.
pub fn legal_moves_from(state: &GameState, square: Square) -> Vec<Move> {
    match state.board().piece_at(square) {
        Some(piece) if piece.color == state.side_to_move() => {
            let mut moves =
                movegen::pseudo_legal_moves(state.board(), square, state.en_passant_square());
            moves.retain(|&mov| is_legal_given_pseudolegal(state, mov));
            moves
        }
        _ => Vec::new(),
    }
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(state: &GameState) -> bool {
    let mut moves = Vec::new();
    movegen::generate_moves(
        state.side_to_move(),
        state.board(),
        state.en_passant_square(),
        &mut moves,
    );
    moves
        .into_iter()
        .any(|mov| is_legal_given_pseudolegal(state, mov))
}
