//! Push notifications through Pushbullet.

mod client;
mod types;

pub use client::*;
pub use types::*;
