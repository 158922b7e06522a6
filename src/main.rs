//! ascifight -- plays capture-the-flag games between random agents.
//!
//! Writes one JSON summary per finished game to stdout, appends the final
//! standings to the score log, and prints a summary to stderr.
//!
//! Usage:
//!   ascifight [OPTIONS]
//!
//! Options:
//!   --config FILE   TOML game configuration (default: built-in)
//!   --games N       Number of games to play (default: 1)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --threads N     Number of parallel threads (default: 1)
//!   --scores FILE   Score log path (overrides the configuration)
//!   --quiet         Suppress logging and summary output

use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use ascifight::config::GameConfig;
use ascifight::score_log::{ScoreLog, ScoreLogError};
use ascifight::simulate::{self, GameSummary, SimulationConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut sim = SimulationConfig::default();
    let mut config_path: Option<PathBuf> = None;
    let mut scores_path: Option<PathBuf> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(value(&args, i, "--config"));
            }
            "--games" => {
                i += 1;
                sim.games = value(&args, i, "--games");
            }
            "--seed" => {
                i += 1;
                sim.seed = value(&args, i, "--seed");
            }
            "--threads" => {
                i += 1;
                sim.threads = value(&args, i, "--threads");
            }
            "--scores" => {
                i += 1;
                scores_path = Some(value(&args, i, "--scores"));
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
                process::exit(1);
            }
        }
        i += 1;
    }

    let default_filter = if quiet { "error" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(path) = config_path {
        sim.game = match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };
    }
    if let Some(path) = scores_path {
        sim.game.scores_file = path;
    }

    if !quiet {
        eprintln!(
            "Simulation: {} games, {} teams, map {}, max {} ticks, {} threads",
            sim.games,
            sim.game.teams.len(),
            sim.game.rules.map_size,
            sim.game.rules.max_ticks,
            sim.threads
        );
    }

    let log = ScoreLog::new(&sim.game.scores_file);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut summaries = Vec::with_capacity(sim.games);
    let mut log_failure: Option<ScoreLogError> = None;

    let start = Instant::now();
    let result = simulate::run_games(&sim, |summary| {
        if let Err(e) = summary.record(&log) {
            log_failure.get_or_insert(e);
        }
        let written = serde_json::to_writer(&mut out, &summary)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(out));
        if let Err(e) = written {
            eprintln!("failed to write game summary: {}", e);
        }
        if !quiet {
            eprintln!(
                "Game {}/{}: {} after {} ticks",
                summaries.len() + 1,
                sim.games,
                summary.winner().map_or_else(|| "draw".to_string(), |w| format!("{} wins", w)),
                summary.ticks
            );
        }
        summaries.push(summary);
    });
    let elapsed = start.elapsed();
    let _ = out.flush();

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
    if let Some(e) = log_failure {
        eprintln!("{}", e);
        process::exit(1);
    }

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s, scores appended to {}",
            summaries.len(),
            elapsed.as_secs_f64(),
            log.path().display()
        );
        print_summary(&summaries);
    }
}

/// Parses the value following a flag, or exits with the usage text.
fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|raw| raw.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_summary(summaries: &[GameSummary]) {
    let mut totals: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
    for summary in summaries {
        for s in &summary.standings {
            totals.entry(s.team.as_str()).or_default().0 += s.score;
        }
        if let Some(winner) = summary.winner() {
            totals.entry(winner).or_default().1 += 1;
        }
    }
    eprintln!("{:<12} {:>8} {:>6}", "team", "score", "wins");
    for (team, (score, wins)) in totals {
        eprintln!("{:<12} {:>8} {:>6}", team, score, wins);
    }
}

fn print_usage() {
    eprintln!("Usage: ascifight [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    TOML game configuration (default: built-in)");
    eprintln!("  --games N        Number of games to play (default: 1)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --threads N      Number of parallel threads (default: 1)");
    eprintln!("  --scores FILE    Score log path (overrides the configuration)");
    eprintln!("  --quiet          Suppress logging and summary output");
    eprintln!("  --help           Show this help");
}
