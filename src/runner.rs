//! Poll cycle orchestration.
//!
//! A cycle is: load checkpoint, ask the feed for matching releases, notify if
//! there are any, store the current time as the new checkpoint. The checkpoint
//! advances even when nothing matched, because it records that a check
//! happened.
//!
//! Errors are not absorbed here. A failing cycle stops [`Runner::run_daemon`]
//! and is returned to the caller, and the checkpoint is left untouched so the
//! same releases are considered again on the next start.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::cli::format_interval;
use crate::config::Config;
use crate::error::Result;
use crate::feed::FeedClient;
use crate::models::WatchList;
use crate::notify::PushbulletClient;
use crate::store::CheckpointStore;

/// Title of every release notification.
pub const NOTIFICATION_TITLE: &str = "New manga(s) released!";

pub struct Runner {
    watch_list: WatchList,
    interval: Duration,
    once: bool,
    feed: FeedClient,
    notifier: PushbulletClient,
    store: CheckpointStore,
}

impl Runner {
    pub fn new(config: &Config) -> Self {
        Self {
            watch_list: config.watch_list.clone(),
            interval: config.interval,
            once: config.once,
            feed: FeedClient::new(&config.feed_url),
            notifier: PushbulletClient::new(&config.token, &config.pushbullet_url),
            store: CheckpointStore::new(config.checkpoint_path()),
        }
    }

    /// Run a single cycle and return the titles that were notified.
    pub async fn run_cycle(&self) -> Result<Vec<String>> {
        let updates = self.check_and_notify().await?;
        self.store.store_now()?;
        Ok(updates)
    }

    async fn check_and_notify(&self) -> Result<Vec<String>> {
        let since = self.store.load()?;

        let updates = self
            .feed
            .find_new_releases_since(&self.watch_list, since)
            .await?;

        if !updates.is_empty() {
            for title in &updates {
                tracing::info!("New release: {}", title);
            }
            self.notifier
                .notify(NOTIFICATION_TITLE, &updates.join("\n"))
                .await?;
        }

        Ok(updates)
    }

    pub async fn run_once(&self) -> Result<()> {
        self.check_and_notify().await?;
        tracing::info!("Finished checking mangastream updates");
        self.store.store_now()?;
        Ok(())
    }

    /// Run a cycle every interval until `shutdown` resolves.
    ///
    /// The first cycle starts one interval after the call. `shutdown` is
    /// watched during cycles as well. A cycle still in flight when it resolves
    /// is dropped before the checkpoint is written, so the next start looks at
    /// the same releases again.
    pub async fn run_daemon<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            "Starting bot to notify on mangastream updates every {}",
            format_interval(self.interval)
        );

        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Skip first tick (immediate)
        timer.tick().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = timer.tick() => {}
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::warn!("Shutdown requested during a check, abandoning it");
                    break;
                }
                result = self.run_cycle() => {
                    result?;
                }
            }
        }

        tracing::info!("Shutting down, no further checks will run");
        Ok(())
    }

    /// Run once or as a daemon, depending on configuration.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if self.once {
            self.run_once().await
        } else {
            self.run_daemon(shutdown).await
        }
    }
}
