//! Polls the MangaStream release feed and pushes a Pushbullet note when a
//! watched manga gets a new chapter.
//!
//! One cycle loads the [`store::CheckpointStore`], asks the
//! [`feed::FeedClient`] for releases newer than it, hands any matches to the
//! [`notify::PushbulletClient`] and advances the checkpoint. The
//! [`runner::Runner`] drives cycles either once or on a fixed interval.

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod notify;
pub mod runner;
pub mod shutdown;
pub mod store;

pub use error::{Error, ParseError, Result};
