// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text console for playing a game through `arbiter`, one command per line.
//!
//! | command         | effect                                                  |
//! |-----------------|---------------------------------------------------------|
//! | `new`           | start a new game                                        |
//! | `fen [FEN]`     | print the current position as FEN, or load one          |
//! | `move MOVE`     | play a move in coordinate notation (`e2e4`, `e7e8q`)    |
//! | `moves [SQ]`    | list legal moves, optionally only those from one square |
//! | `show`          | print the board                                         |
//! | `status`        | print the side to move and the game status              |
//! | `json`          | print the game as a JSON record                         |
//! | `load JSON`     | resume a game from a JSON record                        |

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail};

use crate::{
    core::{Move, Square},
    game::GameState,
};

/// One console session, owning the game being played.
#[derive(Default)]
pub struct Session {
    state: GameState,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Executes one command line and returns the text to print. A failed command leaves the game untouched.
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<String> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match (command, rest) {
            ("", _) => Ok(String::new()),
            ("new", "") => {
                self.state = GameState::new();
                Ok(self.state.to_string())
            }
            ("fen", "") => Ok(self.state.as_fen()),
            ("fen", fen) => {
                self.state = GameState::from_fen(fen)?;
                Ok(self.state.to_string())
            }
            ("move", text) => self.handle_move(text),
            ("moves", "") => Ok(format_moves(&self.state.legal_moves())),
            ("moves", square) => {
                let square: Square = square.parse()?;
                Ok(format_moves(&self.state.legal_moves_from(square)))
            }
            ("show", "") => Ok(self.state.board().to_string()),
            ("status", "") => Ok(format!(
                "{} to move: {}",
                self.state.side_to_move(),
                self.state.status()
            )),
            ("json", "") => Ok(self.state.to_json_pretty()),
            ("load", json) if !json.is_empty() => {
                self.state = GameState::from_json(json)?;
                Ok(self.state.to_string())
            }
            _ => Err(anyhow!("unrecognized command: {}", line)),
        }
    }

    fn handle_move(&mut self, text: &str) -> anyhow::Result<String> {
        if text.is_empty() {
            bail!("move expected");
        }

        let proposed: Move = text.parse()?;
        let played = self.state.apply_move(proposed)?;
        Ok(format!("{} {}", played, self.state.status()))
    }
}

fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mov| mov.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a session over stdin and stdout until stdin closes.
pub fn run() -> io::Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for maybe_line in stdin.lock().lines() {
        let line = maybe_line?;
        match session.handle_line(&line) {
            Ok(output) if output.is_empty() => {}
            Ok(output) => writeln!(out, "{}", output.trim_end())?,
            Err(err) => writeln!(out, "error: {}", err)?,
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MoveError, Status};

    #[test]
    fn plays_moves() {
        let mut session = Session::new();
        assert_eq!("e2e4 in progress", session.handle_line("move e2e4").unwrap());
        assert_eq!("e7e5 in progress", session.handle_line("move e7e5").unwrap());
        assert_eq!(
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            session.handle_line("fen").unwrap()
        );
    }

    #[test]
    fn rejected_move_reports_reason() {
        let mut session = Session::new();
        let err = session.handle_line("move e7e5").unwrap_err();
        assert_eq!(
            Some(&MoveError::WrongTurn(crate::core::E7)),
            err.downcast_ref::<MoveError>()
        );
        assert_eq!(GameState::new(), *session.state());
    }

    #[test]
    fn moves_from_square() {
        let mut session = Session::new();
        let output = session.handle_line("moves b1").unwrap();
        let mut moves: Vec<_> = output.split(' ').collect();
        moves.sort_unstable();
        assert_eq!(vec!["b1a3", "b1c3"], moves);
        assert_eq!("", session.handle_line("moves e4").unwrap());
        assert!(session.handle_line("moves z9").is_err());
    }

    #[test]
    fn load_fen_and_status() {
        let mut session = Session::new();
        session.handle_line("fen 7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(Status::Stalemate, session.state().status());
        assert_eq!("black to move: stalemate", session.handle_line("status").unwrap());
    }

    #[test]
    fn json_roundtrip() {
        let mut session = Session::new();
        session.handle_line("move d2d4").unwrap();
        let json = session.handle_line("json").unwrap().replace('\n', " ");
        let saved = session.state().clone();
        session.handle_line("new").unwrap();
        session.handle_line(&format!("load {}", json)).unwrap();
        assert_eq!(saved, *session.state());
    }

    #[test]
    fn unknown_command() {
        let mut session = Session::new();
        assert!(session.handle_line("castle").is_err());
        assert!(session.handle_line("move").is_err());
        assert_eq!("", session.handle_line("   ").unwrap());
    }
}
