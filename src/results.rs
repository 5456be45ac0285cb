//! Finished-game records and the sinks that store them
//!
//! The engine emits one [`GameResult`] per game over. Storage is up to the
//! sink; the file sink appends one pipe-delimited UTF-8 line per game.

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Summary of one finished game
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub player: String,
    pub score: u32,
    pub length: usize,
    pub timestamp: DateTime<Local>,
    pub speed: u32,
    pub field_width: i32,
    pub field_height: i32,
    pub grid_size: i32,
}

impl GameResult {
    /// One log line, without the trailing newline
    ///
    /// Separators and line breaks in the player name are replaced so the
    /// line always has the same fields.
    pub fn to_line(&self) -> String {
        format!(
            "{} | {} | score: {} | length: {} | speed: {} | field: {}x{} | grid: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            sanitize_field(&self.player),
            self.score,
            self.length,
            self.speed,
            self.field_width,
            self.field_height,
            self.grid_size
        )
    }
}

fn sanitize_field(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '|' => '/',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

/// Destination for finished games
pub trait ResultsSink {
    fn record(&mut self, result: &GameResult) -> io::Result<()>;
}

/// Appends results to a text file, creating it on first write
#[derive(Debug, Clone)]
pub struct FileResultsSink {
    path: PathBuf,
}

impl FileResultsSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultsSink for FileResultsSink {
    fn record(&mut self, result: &GameResult) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", result.to_line())
    }
}

/// Keeps results in memory; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemoryResultsSink {
    results: Arc<Mutex<Vec<GameResult>>>,
}

impl MemoryResultsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<GameResult> {
        match self.results.lock() {
            Ok(results) => results.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ResultsSink for MemoryResultsSink {
    fn record(&mut self, result: &GameResult) -> io::Result<()> {
        self.results
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "results list poisoned"))?
            .push(result.clone());
        Ok(())
    }
}

/// Discards every result
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResultsSink;

impl ResultsSink for NoopResultsSink {
    fn record(&mut self, _result: &GameResult) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample(score: u32) -> GameResult {
        GameResult {
            player: "Ann".to_string(),
            score,
            length: 3 + score as usize,
            timestamp: Local.with_ymd_and_hms(2024, 5, 17, 9, 3, 41).unwrap(),
            speed: 10,
            field_width: 800,
            field_height: 600,
            grid_size: 40,
        }
    }

    #[test]
    fn test_line_format() {
        assert_eq!(
            sample(4).to_line(),
            "2024-05-17 09:03:41 | Ann | score: 4 | length: 7 | speed: 10 | field: 800x600 | grid: 40"
        );
    }

    #[test]
    fn test_player_name_cannot_break_the_line() {
        let result = GameResult {
            player: "Ann | score: 999\nBob\r".to_string(),
            ..sample(4)
        };
        let line = result.to_line();

        assert_eq!(line.lines().count(), 1);
        assert_eq!(line.matches(" | ").count(), 6);
        assert!(line.starts_with("2024-05-17 09:03:41 | Ann / score: 999 Bob  | score: 4 |"));
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.txt");
        let mut sink = FileResultsSink::new(&path);

        sink.record(&sample(1)).unwrap();
        sink.record(&sample(2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("score: 1"));
        assert!(lines[1].contains("score: 2"));
    }

    #[test]
    fn test_file_sink_keeps_existing_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.txt");
        std::fs::write(&path, "earlier game\n").unwrap();

        FileResultsSink::new(&path).record(&sample(5)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier game\n"));
        assert!(contents.ends_with("grid: 40\n"));
    }

    #[test]
    fn test_file_sink_reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("results.txt");
        assert!(FileResultsSink::new(path).record(&sample(0)).is_err());
    }

    #[test]
    fn test_memory_sink_shares_results() {
        let sink = MemoryResultsSink::new();
        let mut writer = sink.clone();
        writer.record(&sample(3)).unwrap();
        assert_eq!(sink.results(), vec![sample(3)]);
    }
}
