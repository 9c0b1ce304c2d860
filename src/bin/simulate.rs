//! Simulation CLI.
//!
//! Plays pursuit games with the search-driven runner against configured
//! chasers and outputs per-game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --depth N       Search depth in rounds (default: 2)
//!   --mode M        Search mode: exact, pruned, expected (default: pruned)
//!   --chasers P     Chaser policy: uniform, greedy (default: greedy)
//!   --layout PFEN   Layout to play on (default: built-in maze)
//!   --max-turns N   Turn cap per game (default: 200)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use pursuit::simulate::{self, ChaserPolicy, Outcome, SimulateConfig};
use pursuit::search::SearchMode;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SimulateConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = args[i].parse().expect("invalid --games value");
            }
            "--depth" => {
                i += 1;
                config.depth = args[i].parse().expect("invalid --depth value");
            }
            "--mode" => {
                i += 1;
                config.mode =
                    SearchMode::from_name(&args[i]).expect("invalid --mode value");
            }
            "--chasers" => {
                i += 1;
                config.chasers =
                    ChaserPolicy::from_name(&args[i]).expect("invalid --chasers value");
            }
            "--layout" => {
                i += 1;
                config.layout = args[i].clone();
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = args[i].parse().expect("invalid --max-turns value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;

    if !quiet {
        eprintln!(
            "Simulation: {} games, depth {}, mode {}, {} chasers, {} threads",
            config.num_games,
            config.depth,
            config.mode.name(),
            config.chasers.name(),
            config.threads
        );
    }

    let start = Instant::now();
    let games = match simulate::run_simulations(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        let won = games.iter().filter(|g| g.outcome == Outcome::Won).count();
        let lost = games.iter().filter(|g| g.outcome == Outcome::Lost).count();
        let cutoff = games.len() - won - lost;
        eprintln!(
            "Completed {} games in {:.1}s: {} won, {} lost, {} cut off",
            games.len(),
            elapsed.as_secs_f64(),
            won,
            lost,
            cutoff
        );
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            simulate::write_jsonl(&games, &mut writer).expect("failed to write output");
            if !quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&games, &mut writer).expect("failed to write output");
        }
    }
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N       Number of games to play (default: 10)");
    eprintln!("  --depth N       Search depth in rounds (default: 2)");
    eprintln!("  --mode M        Search mode: exact, pruned, expected (default: pruned)");
    eprintln!("  --chasers P     Chaser policy: uniform, greedy (default: greedy)");
    eprintln!("  --layout PFEN   Layout to play on (default: built-in maze)");
    eprintln!("  --max-turns N   Turn cap per game (default: 200)");
    eprintln!("  --threads N     Number of parallel threads (default: 4)");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE   Output file path (default: stdout)");
    eprintln!("  --quiet         Suppress summary output");
}
