//! Pursuit -- an adversarial pursuit-game engine implementing the PUI
//! protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the PUI (Pursuit Universal Interface) convention.

use std::io::{self, BufRead};

use pursuit::engine::Engine;
use pursuit::protocol::parser::{parse_command, Command};

/// Runs the main PUI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Pui => {
                engine.handle_pui(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Position { pfen } => {
                if let Err(e) = engine.set_position(&pfen) {
                    eprintln!("{}", e);
                }
            }
            Command::Go(params) => {
                engine.handle_go(params.depth, &mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
