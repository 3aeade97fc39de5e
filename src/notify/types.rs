//! Pushbullet wire types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A device registered on the Pushbullet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub iden: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Body of `POST /pushes` for a plain-text note.
#[derive(Debug, Clone, Serialize)]
pub struct PushNote<'a> {
    pub device_iden: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'a str,
    pub body: &'a str,
}

impl<'a> PushNote<'a> {
    pub fn new(device_iden: &'a str, title: &'a str, body: &'a str) -> Self {
        Self {
            device_iden,
            kind: "note",
            title,
            body,
        }
    }
}

/// Structured error returned by the Pushbullet API.
///
/// Displays as the upstream `message`, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub cat: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiError,
}
