//! Domain models for mstreamb0t.
//!
//! - [`WatchList`]: the manga names the user cares about, matched
//!   case-insensitively as substrings of release titles.
//! - [`FeedEntry`]: one release parsed out of the feed. Only lives for the
//!   duration of a fetch.

mod entry;
mod watch_list;

pub use entry::*;
pub use watch_list::*;
