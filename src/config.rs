//! Startup configuration.
//!
//! Built once from the command line and the environment, then handed by
//! reference to every component. Nothing reads flags or env vars after this.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::cli::Cli;
use crate::models::WatchList;
use crate::store::CHECKPOINT_FILE;

/// Name of the per-user state directory under `$HOME`.
pub const CONFIG_DIR_NAME: &str = ".mstreamb0t";

/// Environment variable holding the Pushbullet access token.
pub const TOKEN_ENV: &str = "PUSHBULLET_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("manga name cannot be empty")]
    EmptyWatchList,

    #[error("PUSHBULLET_TOKEN not found")]
    MissingToken,

    #[error("could not determine home directory")]
    HomeDir,

    #[error("failed to create config directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub watch_list: WatchList,
    pub interval: Duration,
    pub once: bool,
    pub token: String,
    pub config_dir: PathBuf,
    pub feed_url: String,
    pub pushbullet_url: String,
}

impl Config {
    /// Resolve configuration from parsed flags plus the process environment.
    pub fn from_env(cli: Cli) -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_ENV).ok();
        Self::resolve(cli, token, dirs::home_dir())
    }

    /// Validate and assemble configuration from explicit inputs.
    pub fn resolve(
        cli: Cli,
        token: Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let watch_list = WatchList::parse(&cli.manga_names);
        if watch_list.is_empty() {
            return Err(ConfigError::EmptyWatchList);
        }

        let config_dir = home.ok_or(ConfigError::HomeDir)?.join(CONFIG_DIR_NAME);

        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            watch_list,
            interval: cli.interval,
            once: cli.once,
            token,
            config_dir,
            feed_url: cli.feed_url,
            pushbullet_url: cli.pushbullet_url,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.config_dir.join(CHECKPOINT_FILE)
    }

    /// Create the config directory if it does not exist yet.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if self.config_dir.is_dir() {
            return Ok(());
        }
        tracing::debug!("Creating config directory {}", self.config_dir.display());
        std::fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::CreateDir {
            path: self.config_dir.clone(),
            source,
        })
    }
}
