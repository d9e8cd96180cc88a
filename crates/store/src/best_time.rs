//! Best-time record: a single float, seconds
//!
//! A zero (or missing) record means "no best time yet".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name used when no path is configured
pub const DEFAULT_BEST_TIME_FILE: &str = "best_time.txt";

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("best-time file I/O error: {0}")]
    Io(#[from] io::Error),

    /// Content is not a finite, non-negative number of seconds
    #[error("corrupt best-time record {0:?}")]
    Parse(String),
}

/// Best-time file at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestTimeRecord {
    path: PathBuf,
}

impl BestTimeRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. A missing file or a zero value is `Ok(None)`.
    pub fn load(&self) -> Result<Option<Duration>, RecordError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let trimmed = text.trim();
        let secs: f64 = trimmed
            .parse()
            .map_err(|_| RecordError::Parse(trimmed.to_string()))?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(RecordError::Parse(trimmed.to_string()));
        }

        let best = Duration::try_from_secs_f64(secs)
            .map_err(|_| RecordError::Parse(trimmed.to_string()))?;
        Ok((!best.is_zero()).then_some(best))
    }

    /// Read the record, treating every failure as "no record" (zero)
    pub fn load_or_default(&self) -> Duration {
        match self.load() {
            Ok(best) => best.unwrap_or_default(),
            Err(e) => {
                log::warn!("ignoring best time in {}: {}", self.path.display(), e);
                Duration::ZERO
            }
        }
    }

    /// Overwrite the record with `best`
    pub fn save(&self, best: Duration) -> Result<(), RecordError> {
        fs::write(&self.path, best.as_secs_f64().to_string())?;
        Ok(())
    }
}

impl Default for BestTimeRecord {
    fn default() -> Self {
        Self::new(DEFAULT_BEST_TIME_FILE)
    }
}
