// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move path enumeration ("perft"), the standard way of checking a move generator against known node counts.

use crate::{core::Move, game::GameState};

/// Counts the leaf nodes of the legal move tree rooted at `state`, `depth` plies deep. Terminal positions
/// contribute no children.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    let _span = tracing::info_span!("perft", depth).entered();
    perft_inner(state, depth)
}

fn perft_inner(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mov| perft_inner(&state.successor(mov), depth - 1))
        .sum()
}

/// Per-move breakdown of [`perft`]: each legal move at the root and the node count beneath it, in generation order.
pub fn divide(state: &GameState, depth: u32) -> Vec<(Move, u64)> {
    let _span = tracing::info_span!("divide", depth).entered();
    if depth == 0 {
        return Vec::new();
    }

    state
        .legal_moves()
        .into_iter()
        .map(|mov| (mov, perft_inner(&state.successor(mov), depth - 1)))
        .collect()
}
