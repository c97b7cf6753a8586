//! Plain-text activity history.
//!
//! Every mutating operation appends one timestamped line. The log is a
//! convenience, not a ledger: append failures degrade to a logged warning
//! so a broken history file never blocks a save.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
};

use chrono::Local;
use tracing::warn;

/// Append-only activity log for one board.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    /// Creates a handle for the log file at `path`. The file is created
    /// lazily on first append.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Appends one timestamped message. Best-effort: failures are logged
    /// and swallowed.
    pub fn append(&self, message: &str) {
        let stamp = Local::now().format("%d/%m/%Y %H:%M:%S");
        let line = format!("[{stamp}] {message}\n");
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(error) = result {
            warn!(%error, path = %self.path.display(), "could not append to the history log");
        }
    }

    /// Returns the last `limit` lines, oldest first. A missing file reads
    /// as an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn tail(&self, limit: usize) -> io::Result<Vec<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        let lines: Vec<&str> = content.lines().collect();
        let skip = lines.len().saturating_sub(limit);
        Ok(lines[skip..].iter().map(|line| (*line).to_owned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityLog;

    #[test]
    fn appends_are_timestamped_and_ordered() {
        let tmp = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(tmp.path().join("history.log"));

        log.append("first");
        log.append("second");

        let lines = log.tail(10).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
    }

    #[test]
    fn tail_returns_only_the_newest_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(tmp.path().join("history.log"));

        for n in 0..5 {
            log.append(&format!("entry {n}"));
        }

        let lines = log.tail(2).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("entry 3"));
        assert!(lines[1].ends_with("entry 4"));
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(tmp.path().join("never-written.log"));
        assert!(log.tail(10).unwrap().is_empty());
    }
}
