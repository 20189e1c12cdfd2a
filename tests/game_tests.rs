// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use arbiter::core::*;
use arbiter::{Board, GameState, MoveError, Status};

fn play(state: &mut GameState, moves: &[&str]) {
    for text in moves {
        let mov: Move = text.parse().unwrap();
        if let Err(err) = state.apply_move(mov) {
            panic!("{} rejected: {}\n{}", text, err, state);
        }
    }
}

#[test]
fn fools_mate() {
    let mut state = arbiter::new_game();
    play(&mut state, &["f2f3", "e7e5", "g2g4"]);
    assert_eq!(Status::InProgress, state.status());
    play(&mut state, &["d8h4"]);
    assert_eq!(Status::Checkmate, state.status());
    assert_eq!(Color::White, state.side_to_move());
    assert!(state.is_game_over());
    for sq in squares() {
        assert!(arbiter::legal_moves(&state, sq).is_empty());
    }
}

#[test]
fn scholars_mate() {
    let mut state = GameState::new();
    play(
        &mut state,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(Status::Checkmate, state.status());
    assert_eq!(Some(Color::White), state.winner());
}

#[test]
fn check_must_be_answered() {
    let mut state = GameState::new();
    play(&mut state, &["e2e4", "f7f6", "d2d4", "g7g5", "d1h5"]);
    assert_eq!(Status::Checkmate, state.status());

    let mut state = GameState::new();
    play(&mut state, &["e2e4", "d7d5", "f1b5"]);
    assert_eq!(Status::Check, state.status());
    assert!(state.is_check());
    let unrelated = Move::new(A7, A6, None);
    assert_eq!(Err(MoveError::IllegalMove(unrelated)), state.apply_move(unrelated));
    play(&mut state, &["c7c6"]);
    assert_eq!(Status::InProgress, state.status());
}

#[test]
fn king_out_and_back_loses_castling() {
    let mut state = GameState::new();
    play(
        &mut state,
        &["e2e4", "e7e5", "g1f3", "g8f6", "f1e2", "f8e7", "e1f1", "e8f8", "f1e1", "f8e8"],
    );
    assert!(!state.can_castle_kingside(Color::White));
    assert!(!state.can_castle_queenside(Color::White));
    assert!(!state.can_castle_kingside(Color::Black));
    let castle = Move::new(E1, G1, None);
    assert_eq!(Err(MoveError::IllegalMove(castle)), state.apply_move(castle));
    assert!(state
        .legal_moves()
        .iter()
        .all(|mov| !mov.is_castle()));
}

#[test]
fn castling_blocked_by_attack_on_transit_square() {
    // black bishop on a6 covers f1.
    let mut state = GameState::from_fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castle = Move::new(E1, G1, None);
    assert_eq!(Err(MoveError::IllegalMove(castle)), state.apply_move(castle));
    assert!(state.can_castle_kingside(Color::White));
}

#[test]
fn stalemate() {
    let state = GameState::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(Status::Stalemate, state.status());
    assert!(state.legal_moves().is_empty());
}

#[test]
fn reaching_stalemate_by_play() {
    let mut state = GameState::from_fen("7k/5K2/8/6Q1/8/8/8/8 w - - 0 1").unwrap();
    play(&mut state, &["g5g6"]);
    assert_eq!(Status::Stalemate, state.status());
    assert_eq!(None, state.winner());
}

#[test]
fn finished_game_rejects_everything() {
    let mut state = GameState::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
    let before = state.clone();
    for sq in squares() {
        for dest in squares() {
            let mov = Move::new(sq, dest, None);
            assert_eq!(
                Err(MoveError::GameAlreadyOver(Status::Stalemate)),
                state.apply_move(mov)
            );
        }
    }
    assert_eq!(before, state);
}

#[test]
fn wrong_turn() {
    let mut state = GameState::new();
    play(&mut state, &["e2e4"]);
    let mov = Move::new(D2, D4, None);
    assert_eq!(Err(MoveError::WrongTurn(D2)), state.apply_move(mov));
}

#[test]
fn apply_move_is_pure() {
    let state = GameState::new();
    let next = arbiter::apply_move(&state, Move::new(E2, E4, None)).unwrap();
    assert_eq!(GameState::new(), state);
    assert_eq!(Color::Black, next.side_to_move());
    assert!(arbiter::apply_move(&state, Move::new(E2, E5, None)).is_err());
}

#[test]
fn underpromotion_with_capture() {
    let mut state = GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let played = state.apply_move(Move::new(A7, B8, Some(PieceKind::Rook))).unwrap();
    assert!(played.is_capture());
    assert_eq!(
        Some(Piece::new(Color::White, PieceKind::Rook)),
        state.board().piece_at(B8)
    );
    assert_eq!(Status::Check, state.status());
    assert_eq!(2, state.board().count(Color::White));
    assert_eq!(1, state.board().count(Color::Black));
}

#[test]
fn resumed_game_from_board() {
    let mut board = Board::empty();
    board
        .add_piece(E1, Piece::new(Color::White, PieceKind::King))
        .unwrap();
    board
        .add_piece(H1, Piece::new(Color::White, PieceKind::Rook))
        .unwrap();
    board
        .add_piece(E8, Piece::new(Color::Black, PieceKind::King))
        .unwrap();
    let mut state = GameState::from_board(board, Color::White).unwrap();
    let played = state.apply_move(Move::new(E1, G1, None)).unwrap();
    assert!(played.is_kingside_castle());
    assert_eq!(
        Some(Piece::new(Color::White, PieceKind::Rook)),
        state.board().piece_at(F1)
    );
}

#[test]
fn clocks_advance() {
    let mut state = GameState::new();
    play(&mut state, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(4, state.halfmove_clock());
    assert_eq!(3, state.fullmove_number());
    play(&mut state, &["e2e4"]);
    assert_eq!(0, state.halfmove_clock());
}
