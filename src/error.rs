//! Crate-level error kinds.
//!
//! Every collaborator reports its own error type; the runner folds them into
//! [`Error`] so callers only have to decide what a kind means for them.

use thiserror::Error;

use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::notify::NotifyError;
use crate::store::CheckpointError;

pub type Result<T> = std::result::Result<T, Error>;

/// A timestamp that did not match its expected wire format.
#[derive(Debug, Error)]
#[error("parsing time {value:?}: {source}")]
pub struct ParseError {
    /// The text that was being parsed.
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

impl ParseError {
    pub fn new(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to fetch feed: {0}")]
    Fetch(FeedError),

    #[error(transparent)]
    Parse(ParseError),

    #[error("failed to send notification: {0}")]
    Notify(#[from] NotifyError),

    #[error("checkpoint error: {0}")]
    Checkpoint(CheckpointError),
}

impl From<FeedError> for Error {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Date(parse) => Error::Parse(parse),
            other => Error::Fetch(other),
        }
    }
}

impl From<CheckpointError> for Error {
    fn from(err: CheckpointError) -> Self {
        match err {
            CheckpointError::Parse { source, .. } => Error::Parse(source),
            other => Error::Checkpoint(other),
        }
    }
}
