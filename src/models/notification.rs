use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FETCH_FAILED_MESSAGE;

/// Category of a user-facing notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Empty or whitespace-only query submitted
    Validation,
    /// Search succeeded with zero matches
    NoResults,
    /// Catalog fetch failed
    FetchFailed,
}

impl NotificationKind {
    pub fn message(&self) -> &'static str {
        match self {
            NotificationKind::Validation => "Please enter your search query.",
            NotificationKind::NoResults => "No movies found for your request.",
            NotificationKind::FetchFailed => FETCH_FAILED_MESSAGE,
        }
    }
}

/// A message for the notification surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: kind.message().to_string(),
            issued_at: Utc::now(),
        }
    }
}
