//! Persisted "last successful check" timestamp.
//!
//! The checkpoint is a single RFC 3339 timestamp stored in
//! `<config dir>/.lastUpdate`. It records that a check happened, not that a
//! match was found, so it is rewritten at the end of every cycle.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Months, SecondsFormat, TimeDelta, Utc};
use thiserror::Error;

use crate::error::ParseError;

/// File name of the checkpoint inside the config directory.
pub const CHECKPOINT_FILE: &str = ".lastUpdate";

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("failed to read checkpoint {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write checkpoint {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt checkpoint {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located at `<dir>/.lastUpdate`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CHECKPOINT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last check time.
    ///
    /// A missing file means this is the first run ever and yields a time one
    /// year in the past, so every recent release counts as new. A file that
    /// exists but cannot be parsed is an error: treating corrupt state as
    /// "nothing new" would silently drop releases.
    pub fn load(&self) -> Result<DateTime<Utc>, CheckpointError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("First time running the script!");
                return Ok(first_run_threshold(Utc::now()));
            }
            Err(source) => {
                return Err(CheckpointError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = raw.trim();
        let last = DateTime::parse_from_rfc3339(value)
            .map_err(|e| CheckpointError::Parse {
                path: self.path.clone(),
                source: ParseError::new(value, e),
            })?
            .with_timezone(&Utc);

        tracing::info!("Last time script was ran: {}", value);
        Ok(last)
    }

    /// Overwrite the checkpoint with `at`. Last writer wins.
    pub fn store(&self, at: DateTime<Utc>) -> Result<(), CheckpointError> {
        std::fs::write(&self.path, format_checkpoint(at)).map_err(|source| {
            CheckpointError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    pub fn store_now(&self) -> Result<DateTime<Utc>, CheckpointError> {
        let now = Utc::now();
        self.store(now)?;
        Ok(now)
    }
}

/// Wire format of the checkpoint file, e.g. `2018-08-07T19:09:46Z`.
pub fn format_checkpoint(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Threshold used when no checkpoint exists yet: one calendar year before `now`.
pub fn first_run_threshold(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(12))
        .unwrap_or_else(|| now - TimeDelta::days(365))
}
