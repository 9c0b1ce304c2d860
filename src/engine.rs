//! Engine state management.
//!
//! Holds the current position and engine options, and runs the decision
//! search for the `go` command. Search depth, traversal mode, evaluation
//! function, and tie-break policy are all selected through options; the
//! search itself is configured per `go` and shares nothing between calls.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::GameState;
use crate::eval::{Evaluator, ProximityEvaluator, ScoreEvaluator};
use crate::protocol::pfen::parse_pfen;
use crate::search::{decide, decide_uniform, Decision, Position, SearchMode};

/// Default search depth in rounds.
const DEFAULT_DEPTH: u32 = 2;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<GameState>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Engine {
    /// Creates a new engine with no position set.
    pub fn new() -> Self {
        Engine {
            position: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Resets all engine state for a new game.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets the current position from a PFEN string.
    /// Returns an error message on failure.
    pub fn set_position(&mut self, pfen: &str) -> Result<(), String> {
        match parse_pfen(pfen) {
            Ok(state) => {
                self.position = Some(state);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse PFEN: {}", e)),
        }
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the configured search depth from options, or the default.
    fn depth(&self) -> u32 {
        self.options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DEPTH)
    }

    /// Returns the configured search mode (default: pruned).
    fn mode(&self) -> SearchMode {
        self.options
            .get("Mode")
            .and_then(|v| SearchMode::from_name(v))
            .unwrap_or(SearchMode::Pruned)
    }

    /// Returns true if ties should be broken uniformly at random rather
    /// than by enumeration order.
    fn uniform_ties(&self) -> bool {
        self.options.get("TieBreak").map(String::as_str) == Some("uniform")
    }

    /// Handles the PUI handshake: writes id, options, protocol_version,
    /// and puiok.
    pub fn handle_pui<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name pursuit").unwrap();
        writeln!(out, "id author pursuit").unwrap();
        writeln!(out, "option name Depth type spin default 2 min 0 max 10").unwrap();
        writeln!(
            out,
            "option name Mode type combo default pruned var exact var pruned var expected"
        )
        .unwrap();
        writeln!(
            out,
            "option name Eval type combo default proximity var score var proximity"
        )
        .unwrap();
        writeln!(
            out,
            "option name TieBreak type combo default first var first var uniform"
        )
        .unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "puiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `go` command: runs the decision search on the current
    /// position and writes an `info` line followed by `bestmove`.
    pub fn handle_go<W: Write>(&mut self, depth_override: Option<u32>, out: &mut W) {
        let state = match &self.position {
            Some(s) => s.clone(),
            None => {
                eprintln!("go: no position set");
                return;
            }
        };

        let depth = depth_override.unwrap_or_else(|| self.depth());
        let mode = self.mode();
        let start = Instant::now();

        let result = match self.options.get("Eval").map(String::as_str) {
            Some("score") => self.run_search(&state, &ScoreEvaluator, depth, mode),
            _ => self.run_search(&state, &ProximityEvaluator::default(), depth, mode),
        };

        match result {
            Ok(d) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                writeln!(
                    out,
                    "info depth {} nodes {} evals {} score {} time {}",
                    depth, d.stats.nodes, d.stats.leaf_evals, d.value, elapsed_ms
                )
                .unwrap();
                writeln!(out, "bestmove {}", d.action.name()).unwrap();
                out.flush().unwrap();
            }
            Err(e) => {
                eprintln!("go: {}", e);
            }
        }
    }

    fn run_search<E>(
        &mut self,
        state: &GameState,
        eval: &E,
        depth: u32,
        mode: SearchMode,
    ) -> Result<Decision<<GameState as Position>::Move>, crate::search::SearchError>
    where
        E: Evaluator<GameState>,
    {
        if self.uniform_ties() {
            decide_uniform(state, eval, depth, mode, &mut self.rng)
        } else {
            decide(state, eval, depth, mode)
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
