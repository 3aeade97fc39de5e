use chrono::{DateTime, Utc};

/// A single release announced by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Release title as published, e.g. `Dragon Ball Super 038`. Not trimmed.
    pub title: String,
    /// Publication time, normalised to UTC.
    pub published: DateTime<Utc>,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, published: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            published,
        }
    }

    /// Whether `term` occurs anywhere in the title, ignoring case.
    pub fn title_contains(&self, term: &str) -> bool {
        self.title.to_uppercase().contains(&term.to_uppercase())
    }
}
