use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::SessionError;
use crate::trial::Trial;

pub const HEADER: [&str; 5] = ["Frame", "Side", "Red Dot", "Icon Coords", "Response"];

/// `<timestamp>_<suffix>`, the stem of a session's result file.
pub fn session_id(started: DateTime<Local>, suffix: &str) -> String {
    format!("{}_{}", started.format("%Y-%m-%d_%H-%M-%S"), suffix)
}

/// Append-only csv record of the answered trials of one session.
///
/// Every append opens the file, writes a single row, flushes and closes it
/// again, so an abort loses at most the trial still on screen.
#[derive(Debug)]
pub struct TrialLogger {
    path: PathBuf,
    rows: usize,
}

impl TrialLogger {
    /// Creates `dir` if needed and starts `<dir>/<session_id>.csv` with the header row.
    pub fn open<P: AsRef<Path>>(dir: P, session_id: &str) -> Result<Self, SessionError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{session_id}.csv"));

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(HEADER)?;
        writer.flush()?;

        log::info!("recording trials to {}", path.display());
        Ok(Self { path, rows: 0 })
    }

    pub fn append(&mut self, trial: &Trial) -> Result<(), SessionError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let response = trial.response.map(|r| r.label()).unwrap_or_default();
        writer.write_record([
            trial.frame.to_string(),
            trial.side.to_string(),
            trial.red_dot.to_string(),
            trial.icon.center().to_string(),
            response.to_string(),
        ])?;
        writer.flush()?;

        self.rows += 1;
        log::debug!("appended frame {} to {}", trial.frame, self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }
}
