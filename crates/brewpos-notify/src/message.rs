//! Notification message and envelope types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized alert, as held by the store
///
/// `message_id` is the deduplication key: the same logical alert may reach an
/// open page twice (direct delivery plus the relay echo of the background
/// delivery) and must collapse to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Unique identifier; server-issued, or synthesized on receipt
    pub message_id: String,
    /// Display title
    pub title: String,
    /// Display body
    pub body: String,
    /// Deep-link target for click navigation, when the alert carries one
    pub url: Option<String>,
    /// Arrival timestamp in the receiving context
    pub received_at: DateTime<Utc>,
}

impl NotificationMessage {
    /// Create a message with the given id, title, and body, received now
    pub fn new(
        message_id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            title: title.into(),
            body: body.into(),
            url: None,
            received_at: Utc::now(),
        }
    }

    /// Attach a deep-link target
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Event published on the broadcast relay, background to foreground
///
/// Serializes as `{"type": "NEW_NOTIFICATION", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum RelayEvent {
    /// A push was received and displayed by the background context
    #[serde(rename = "NEW_NOTIFICATION")]
    NewNotification {
        /// Deduplication key of the alert
        #[serde(rename = "messageId")]
        message_id: String,
        /// Normalized title
        title: String,
        /// Normalized body
        body: String,
    },
}

impl RelayEvent {
    /// The deduplication key carried by this event
    pub fn message_id(&self) -> &str {
        match self {
            Self::NewNotification { message_id, .. } => message_id,
        }
    }
}

/// Message posted to a focused foreground window after a notification click
///
/// Serializes as `{"type": "NOTIFICATION_CLICKED", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WindowMessage {
    /// The user clicked the system notification for `message_id`
    #[serde(rename = "NOTIFICATION_CLICKED")]
    NotificationClicked {
        /// Deduplication key of the clicked alert
        #[serde(rename = "messageId")]
        message_id: String,
        /// Resolved navigation target
        url: String,
    },
}

/// A system-level notification display request
///
/// The shape handed to the platform notifier: title plus options, with the
/// click routing data (`url`, `message_id`) embedded so the click handler can
/// recover them without any shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemNote {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Icon image reference
    pub icon: String,
    /// Deep-link target, if the alert carried one
    pub url: Option<String>,
    /// Deduplication key, echoed back on click
    pub message_id: String,
}

/// A click on a displayed system notification, as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationClick {
    /// Deduplication key recovered from the displayed note
    pub message_id: String,
    /// Deep-link target recovered from the displayed note
    pub url: Option<String>,
}
