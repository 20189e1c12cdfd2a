// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use structopt::StructOpt;
use tracing::Level;

use arbiter::{core::Color, log, GameState, Status};

/// Plays games of uniformly random legal moves and reports how they end.
#[derive(Debug, StructOpt)]
struct Options {
    /// Number of games to play.
    #[structopt(short, long, default_value = "1")]
    games: u32,

    /// Seed for the move chooser.
    #[structopt(short, long, default_value = "0")]
    seed: u64,

    /// Maximum number of plies per game.
    #[structopt(long, default_value = "400")]
    max_plies: u32,

    /// If set, print the final position of each game as a JSON record.
    #[structopt(long)]
    json: bool,
}

#[derive(Default)]
struct Tally {
    white_wins: u32,
    black_wins: u32,
    stalemates: u32,
    unfinished: u32,
}

fn main() -> anyhow::Result<()> {
    log::init(Level::INFO)?;
    let ops = Options::from_args();
    let mut rng = SmallRng::seed_from_u64(ops.seed);
    let mut tally = Tally::default();
    for game in 0..ops.games {
        let mut state = GameState::new();
        let mut plies = 0;
        while plies < ops.max_plies && !state.is_game_over() {
            let moves = state.legal_moves();
            let mov = *moves
                .choose(&mut rng)
                .expect("a game in progress always has a legal move");
            state.apply_move(mov)?;
            plies += 1;
        }

        let result = match state.winner() {
            Some(Color::White) => {
                tally.white_wins += 1;
                "white wins by checkmate"
            }
            Some(Color::Black) => {
                tally.black_wins += 1;
                "black wins by checkmate"
            }
            None if state.status() == Status::Stalemate => {
                tally.stalemates += 1;
                "draw by stalemate"
            }
            None => {
                tally.unfinished += 1;
                "unfinished"
            }
        };

        println!("game {}: {} after {} plies", game + 1, result, plies);
        if ops.json {
            println!("{}", state.to_json());
        } else {
            println!("{}", state.as_fen());
        }
    }

    println!(
        "white {} / black {} / stalemate {} / unfinished {}",
        tally.white_wins, tally.black_wins, tally.stalemates, tally.unfinished
    );
    Ok(())
}
