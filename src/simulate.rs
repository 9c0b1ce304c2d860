//! Full-game simulation for engine evaluation.
//!
//! Plays complete pursuit games on a layout: the runner is steered by the
//! decision search every turn, the chasers by a configured policy.
//! Records PFEN states, chosen actions, root values, and node counts per
//! turn. Games are independent, so multiple games run concurrently on a
//! rayon pool; a single game's search stays single-threaded.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Action, GameState, Status, RUNNER};
use crate::eval::ProximityEvaluator;
use crate::movegen::{legal_actions, random_action, successor};
use crate::protocol::pfen::{encode_pfen, parse_pfen};
use crate::search::{decide, SearchMode};

/// Standard layout for simulation runs: a 9x7 maze, two chasers.
pub const DEFAULT_LAYOUT: &str =
    "#########|#R..#...#|#.#.#.#.#|#.#...#.#|#.#.#.#C#|#...#..C#|#########/0";

/// How the chasers pick their moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaserPolicy {
    /// Uniformly random among legal moves.
    Uniform,
    /// Minimize straight-line distance to the runner, first tie wins.
    Greedy,
}

impl ChaserPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            ChaserPolicy::Uniform => "uniform",
            ChaserPolicy::Greedy => "greedy",
        }
    }

    pub fn from_name(s: &str) -> Option<ChaserPolicy> {
        match s {
            "uniform" => Some(ChaserPolicy::Uniform),
            "greedy" => Some(ChaserPolicy::Greedy),
            _ => None,
        }
    }
}

/// Configuration for a simulation run.
#[derive(Clone)]
pub struct SimulateConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Layout to play on, as PFEN.
    pub layout: String,
    /// Search depth in rounds for the runner.
    pub depth: u32,
    /// Search mode for the runner.
    pub mode: SearchMode,
    /// Chaser move policy.
    pub chasers: ChaserPolicy,
    /// Maximum full turns before a game is cut off.
    pub max_turns: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        SimulateConfig {
            num_games: 10,
            layout: DEFAULT_LAYOUT.to_string(),
            depth: 2,
            mode: SearchMode::Pruned,
            chasers: ChaserPolicy::Greedy,
            max_turns: 200,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// One recorded runner turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// PFEN of the state the runner decided in.
    pub pfen: String,
    /// The action the runner took.
    pub action: String,
    /// Root value reported by the search.
    pub value: f64,
    /// Positions visited by the search.
    pub nodes: u64,
}

/// How a simulated game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
    Cutoff,
}

/// A complete simulated game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// All runner turns in order.
    pub turns: Vec<TurnRecord>,
    /// How the game ended.
    pub outcome: Outcome,
    /// Final game score.
    pub final_score: i32,
    /// Number of full turns played.
    pub turns_played: usize,
}

/// Picks a chaser's action under the configured policy.
///
/// Greedy chasers head for the runner by straight-line distance, matching
/// how the original opponents chased; ties go to the first legal action.
fn chaser_action(
    state: &GameState,
    chaser: usize,
    policy: ChaserPolicy,
    rng: &mut SmallRng,
) -> Option<Action> {
    match policy {
        ChaserPolicy::Uniform => random_action(state, chaser, rng),
        ChaserPolicy::Greedy => {
            let runner = state.runner_pos();
            let from = state.agent(chaser).pos;
            legal_actions(state, chaser)
                .into_iter()
                .min_by_key(|&a| from.step(a).manhattan(runner))
        }
    }
}

/// Plays a single game and returns its record.
pub fn play_game(
    config: &SimulateConfig,
    layout: &GameState,
    game_id: usize,
    rng: &mut SmallRng,
) -> GameRecord {
    let eval = ProximityEvaluator::default();
    let mut state = layout.clone();
    let mut turns: Vec<TurnRecord> = Vec::new();
    let mut turns_played = 0;

    while turns_played < config.max_turns && !state.is_over() {
        let decision = match decide(&state, &eval, config.depth, config.mode) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("game {}: search failed: {}", game_id, e);
                break;
            }
        };

        turns.push(TurnRecord {
            pfen: encode_pfen(&state),
            action: decision.action.name().to_string(),
            value: decision.value,
            nodes: decision.stats.nodes,
        });

        state = match successor(&state, RUNNER, decision.action) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("game {}: illegal runner move: {}", game_id, e);
                break;
            }
        };

        for chaser in 1..state.num_agents() {
            if state.is_over() {
                break;
            }
            let Some(action) = chaser_action(&state, chaser, config.chasers, rng) else {
                continue;
            };
            state = match successor(&state, chaser, action) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("game {}: illegal chaser move: {}", game_id, e);
                    break;
                }
            };
        }

        turns_played += 1;
    }

    let outcome = match state.status() {
        Status::Won => Outcome::Won,
        Status::Lost => Outcome::Lost,
        Status::Ongoing => Outcome::Cutoff,
    };

    GameRecord {
        game_id,
        turns,
        outcome,
        final_score: state.score(),
        turns_played,
    }
}

/// Runs a simulation batch, producing one record per game.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_simulations(config: &SimulateConfig) -> Result<Vec<GameRecord>, String> {
    let mut games = Vec::with_capacity(config.num_games);
    run_simulations_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs a simulation batch, calling `on_game` with each completed record.
///
/// This allows the caller to process games incrementally (e.g. write to
/// disk) rather than waiting for the whole batch.
pub fn run_simulations_with_callback<F>(config: &SimulateConfig, on_game: F) -> Result<(), String>
where
    F: FnMut(GameRecord) + Send,
{
    let layout =
        parse_pfen(&config.layout).map_err(|e| format!("failed to parse layout: {}", e))?;

    if config.threads > 1 {
        run_simulations_parallel(config, &layout, on_game);
    } else {
        run_simulations_sequential(config, &layout, on_game);
    }
    Ok(())
}

/// Sequential simulation: plays games one at a time.
fn run_simulations_sequential<F>(config: &SimulateConfig, layout: &GameState, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config.seed, i);
        let game_start = Instant::now();
        let game = play_game(config, layout, i, &mut rng);
        if !config.quiet {
            report_game(config, &game, i + 1, game_start.elapsed().as_secs_f64());
        }
        on_game(game);
    }
}

/// Parallel simulation: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker
/// threads.
fn run_simulations_parallel<F>(config: &SimulateConfig, layout: &GameState, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let layout_clone = layout.clone();
    std::thread::scope(|scope| {
        let completed = &completed;
        scope.spawn(move || {
            pool.install(|| {
                (0..config_clone.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = game_rng(config_clone.seed, i);
                        let game_start = Instant::now();
                        let game = play_game(&config_clone, &layout_clone, i, &mut rng);
                        if !config_clone.quiet {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            report_game(
                                &config_clone,
                                &game,
                                n,
                                game_start.elapsed().as_secs_f64(),
                            );
                        }
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// RNG for one game: derived from the seed, or from entropy when seed 0.
fn game_rng(seed: u64, game: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn report_game(config: &SimulateConfig, game: &GameRecord, n: usize, secs: f64) {
    let outcome = match game.outcome {
        Outcome::Won => "won",
        Outcome::Lost => "lost",
        Outcome::Cutoff => "cut off",
    };
    eprintln!(
        "Game {}/{}: {} after {} turns, score {} ({:.1}s)",
        n, config.num_games, outcome, game.turns_played, game.final_score, secs,
    );
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}
