//! Append-only plain-text score log.
//!
//! One line per team per finished game, `"<team-name>: <score>"`. Reading
//! sums all lines per team name; a missing file is an empty history.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Errors that can occur while reading or appending the score log.
#[derive(Debug, thiserror::Error)]
pub enum ScoreLogError {
    #[error("failed to access score log '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed score log line {line}: '{content}'")]
    Malformed { line: usize, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    /// A log at `path`. Nothing is touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total score per team name over every logged game.
    pub fn load(&self) -> Result<HashMap<String, i64>, ScoreLogError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut totals = HashMap::new();
        for (i, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (name, score) = parse_line(line).ok_or_else(|| ScoreLogError::Malformed {
                line: i + 1,
                content: line.to_string(),
            })?;
            *totals.entry(name.to_string()).or_insert(0) += score;
        }
        Ok(totals)
    }

    /// Appends one line per entry, creating the file if needed.
    pub fn append<'a, I>(&self, entries: I) -> Result<(), ScoreLogError>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut buf = String::new();
        for (name, score) in entries {
            buf.push_str(&format_line(name, score));
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(buf.as_bytes()).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> ScoreLogError {
        ScoreLogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// One log line, newline included.
pub fn format_line(name: &str, score: i64) -> String {
    format!("{name}: {score}\n")
}

/// Splits `"name: score"`. Team names may not contain a colon.
pub fn parse_line(line: &str) -> Option<(&str, i64)> {
    let (name, score) = line.split_once(':')?;
    let score = score.trim().parse().ok()?;
    Some((name.trim(), score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_accepts_padding_and_negatives() {
        assert_eq!(parse_line("red: 15"), Some(("red", 15)));
        assert_eq!(parse_line("  blue :-3 "), Some(("blue", -3)));
        assert_eq!(parse_line("red 15"), None);
        assert_eq!(parse_line("red: lots"), None);
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScoreLog::new(dir.path().join("scores.txt"));
        assert!(log.load().unwrap().is_empty());
    }

    #[test]
    fn append_then_load_sums_per_team() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScoreLog::new(dir.path().join("scores.txt"));
        log.append([("red", 15), ("blue", 3)]).unwrap();
        log.append([("blue", 20), ("red", 0)]).unwrap();

        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw, "red: 15\nblue: 3\nblue: 20\nred: 0\n");

        let totals = log.load().unwrap();
        assert_eq!(totals["red"], 15);
        assert_eq!(totals["blue"], 23);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        fs::write(&path, "red: 1\n\ngarbage\n").unwrap();
        let err = ScoreLog::new(&path).load().unwrap_err();
        assert!(matches!(err, ScoreLogError::Malformed { line: 3, .. }));
    }
}
