// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use structopt::StructOpt;
use tracing::Level;

use arbiter::{core::Square, log, GameState};

/// Lists the legal moves in a position, one per line.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position to analyze.
    #[structopt(name = "FEN")]
    fen: String,

    /// Only list moves of the piece on this square.
    #[structopt(short, long)]
    square: Option<Square>,
}

fn main() -> anyhow::Result<()> {
    log::init(Level::WARN)?;
    let ops = Options::from_args();
    let state = GameState::from_fen(&ops.fen)?;
    let moves = match ops.square {
        Some(square) => state.legal_moves_from(square),
        None => state.legal_moves(),
    };

    for mov in moves {
        println!("{}", mov);
    }

    Ok(())
}
