//! Integration tests for the ascifight simulation binary.
//!
//! Spawns the binary with a small configuration and checks the JSON
//! summaries on stdout and the lines appended to the score log.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_sim(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_ascifight");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to start ascifight")
}

fn write_config(dir: &Path, max_ticks: u32) -> String {
    let path = dir.join("game.toml");
    let raw = format!(
        r#"
actors = ["Generalist", "Runner", "Attacker", "Builder", "Destroyer"]

[[teams]]
name = "red"

[[teams]]
name = "blue"

[rules]
map_size = 12
max_ticks = {max_ticks}
"#
    );
    fs::write(&path, raw).unwrap();
    path.to_string_lossy().into_owned()
}

fn summaries(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).expect("stdout line is not JSON"))
        .collect()
}

#[test]
fn plays_games_and_appends_scores() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), 30);
    let scores = dir.path().join("scores.txt");
    let scores_arg = scores.to_string_lossy().into_owned();

    let output = run_sim(&[
        "--config", &config, "--scores", &scores_arg, "--games", "3", "--seed", "7", "--quiet",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let games = summaries(&output);
    assert_eq!(games.len(), 3);
    for game in &games {
        assert_eq!(game["ticks"], 30);
        assert_eq!(game["standings"].as_array().unwrap().len(), 2);
    }

    let log = fs::read_to_string(&scores).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 6);
    for line in lines {
        let (team, score) = line.split_once(": ").unwrap();
        assert!(team == "red" || team == "blue");
        assert!(score.parse::<i64>().is_ok());
    }
}

#[test]
fn score_log_is_appended_not_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), 5);
    let scores = dir.path().join("scores.txt");
    fs::write(&scores, "red: 100\ngreen: 4\n").unwrap();
    let scores_arg = scores.to_string_lossy().into_owned();

    let output = run_sim(&["--config", &config, "--scores", &scores_arg, "--seed", "1", "--quiet"]);
    assert!(output.status.success());

    let log = fs::read_to_string(&scores).unwrap();
    assert!(log.starts_with("red: 100\ngreen: 4\n"));
    assert_eq!(log.lines().count(), 4);
}

#[test]
fn seeded_runs_are_reproducible_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), 25);
    let scores = dir.path().join("scores.txt");
    let scores_arg = scores.to_string_lossy().into_owned();

    let base: [&str; 9] = [
        "--config", &config, "--scores", &scores_arg, "--games", "4", "--seed", "99", "--quiet",
    ];
    let single = run_sim(&base);
    let mut threaded_args = base.to_vec();
    threaded_args.extend(["--threads", "2"]);
    let threaded = run_sim(&threaded_args);
    assert!(single.status.success() && threaded.status.success());

    let by_id = |mut games: Vec<serde_json::Value>| {
        games.sort_by_key(|g| g["game_id"].as_u64().unwrap());
        games
    };
    assert_eq!(by_id(summaries(&single)), by_id(summaries(&threaded)));
}

#[test]
fn summary_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), 3);
    let scores = dir.path().join("scores.txt");
    let scores_arg = scores.to_string_lossy().into_owned();

    let output = run_sim(&["--config", &config, "--scores", &scores_arg, "--seed", "3"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Simulation: 1 games, 2 teams, map 12"));
    assert!(stderr.contains("Game 1/1"));
    assert_eq!(summaries(&output).len(), 1);
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[[teams]]\nname = \"solo\"\n").unwrap();

    let output = run_sim(&["--config", &path.to_string_lossy(), "--quiet"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least two teams"));
}

#[test]
fn unknown_argument_fails() {
    let output = run_sim(&["--frobnicate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: ascifight"));
}
