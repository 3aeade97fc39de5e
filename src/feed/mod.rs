//! MangaStream release feed client.
//!
//! Fetches the RSS feed, turns each `<item>` into a [`FeedEntry`] and keeps the
//! titles of releases that match the watch list and were published after the
//! last check.

mod parser;

pub use parser::{parse_pub_date, parse_rss, RawItem, PUB_DATE_FORMAT};

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::error::ParseError;
use crate::models::{FeedEntry, WatchList};

/// Default feed location.
pub const DEFAULT_FEED_URL: &str = "https://readms.net/rss";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} when fetching {url}")]
    Status { status: StatusCode, url: String },

    #[error("malformed feed: {0}")]
    Malformed(String),

    #[error(transparent)]
    Date(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct FeedClient {
    feed_url: String,
    client: Client,
}

impl FeedClient {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), feed_url)
    }

    pub fn with_client(client: Client, feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            client,
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch the feed and parse every entry.
    ///
    /// All or nothing: if any entry carries a date that does not parse, the
    /// whole fetch fails and no entries are returned.
    pub async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, FeedError> {
        tracing::debug!("Fetching feed from {}", self.feed_url);

        let bytes = self.fetch_document().await.inspect_err(|e| {
            tracing::error!("Error fetching data from {} : {}", self.feed_url, e);
        })?;

        let entries = parse_rss(&bytes)
            .inspect_err(|e| {
                tracing::error!("Error fetching data from {} : {}", self.feed_url, e);
            })?
            .into_iter()
            .map(|item| {
                item.into_entry().inspect_err(|e| {
                    tracing::error!("Error parsing publication date {:?} : {}", e.value, e.source);
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Parsed {} entries from feed", entries.len());
        Ok(entries)
    }

    async fn fetch_document(&self) -> Result<Vec<u8>, FeedError> {
        let response = self.client.get(&self.feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status,
                url: self.feed_url.clone(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Titles of releases matching `watch_list` published strictly after `since`.
    pub async fn find_new_releases_since(
        &self,
        watch_list: &WatchList,
        since: DateTime<Utc>,
    ) -> Result<Vec<String>, FeedError> {
        let entries = self.fetch_entries().await?;
        Ok(match_releases(&entries, watch_list, since))
    }
}

/// Select the titles of `entries` that contain a watch term and are newer than `since`.
///
/// Results follow feed order. An entry matching several terms is reported once
/// per matching term; callers that want unique titles must dedupe themselves.
pub fn match_releases(
    entries: &[FeedEntry],
    watch_list: &WatchList,
    since: DateTime<Utc>,
) -> Vec<String> {
    let mut updates = Vec::new();
    for entry in entries {
        if entry.published <= since {
            continue;
        }
        for term in watch_list.iter() {
            if entry.title_contains(term.trim()) {
                updates.push(entry.title.clone());
            }
        }
    }
    updates
}
