// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random games, checking that the game state stays consistent along every step.

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use arbiter::core::*;
use arbiter::{GameState, Status};

fn check_invariants(state: &GameState) {
    for color in colors() {
        assert_eq!(
            1,
            state.board().pieces_of_kind(color, PieceKind::King).len(),
            "{}",
            state.as_fen()
        );
    }

    let them = state.side_to_move().toggle();
    let their_king = state.king_square(them);
    assert!(
        !is_attacked(state.board(), their_king, state.side_to_move()),
        "side not to move is in check: {}",
        state.as_fen()
    );

    let has_moves = !state.legal_moves().is_empty();
    let in_check = is_attacked(
        state.board(),
        state.king_square(state.side_to_move()),
        them,
    );
    let expected = match (in_check, has_moves) {
        (true, true) => Status::Check,
        (true, false) => Status::Checkmate,
        (false, true) => Status::InProgress,
        (false, false) => Status::Stalemate,
    };
    assert_eq!(expected, state.status(), "{}", state.as_fen());

    assert_eq!(*state, GameState::from_fen(state.as_fen()).unwrap());
    assert_eq!(*state, GameState::from_json(&state.to_json()).unwrap());
}

#[test]
fn random_games_stay_consistent() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let mut state = GameState::new();
        check_invariants(&state);
        for _ in 0..200 {
            if state.is_game_over() {
                break;
            }

            let moves = state.legal_moves();
            let mov = *moves.choose(&mut rng).unwrap();
            let before = state.clone();
            let played = state.apply_move(mov).unwrap();
            assert_eq!(mov, played);
            assert_ne!(before.side_to_move(), state.side_to_move());
            check_invariants(&state);
        }
    }
}

#[test]
fn legal_moves_from_partitions_legal_moves() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut state = GameState::new();
    for _ in 0..60 {
        if state.is_game_over() {
            break;
        }

        let all = state.legal_moves();
        let total: usize = squares().map(|sq| state.legal_moves_from(sq).len()).sum();
        assert_eq!(all.len(), total);

        let mov = *all.choose(&mut rng).unwrap();
        state.apply_move(mov).unwrap();
    }
}
