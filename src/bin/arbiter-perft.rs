// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::time::Instant;

use structopt::StructOpt;
use tracing::Level;

use arbiter::{log, perft, GameState};

/// Counts the leaf nodes of the legal move tree of a position.
#[derive(Debug, StructOpt)]
struct Options {
    /// The depth to enumerate to.
    #[structopt(short, long)]
    depth: u32,

    /// FEN representation of the position to analyze. Defaults to the starting position.
    #[structopt(name = "FEN")]
    fen: Option<String>,

    /// If set, print the node count beneath each legal move at the root.
    #[structopt(long)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    log::init(Level::INFO)?;
    let ops = Options::from_args();
    let state = match ops.fen {
        Some(ref fen) => GameState::from_fen(fen)?,
        None => GameState::new(),
    };

    let start = Instant::now();
    let count = if ops.divide {
        let split = perft::divide(&state, ops.depth);
        for (mov, count) in &split {
            println!("{}: {}", mov, count);
        }
        split.iter().map(|&(_, count)| count).sum()
    } else {
        perft::perft(&state, ops.depth)
    };

    tracing::info!(elapsed = ?start.elapsed(), "perft complete");
    println!("{}", count);
    Ok(())
}
