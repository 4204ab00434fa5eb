//! Inbound push payload decoding and normalization
//!
//! The push service delivers loosely-shaped JSON: every field is optional and
//! the deep link may arrive under either `data.link` or `fcmOptions.link`.
//! Decoding is total - missing fields are substituted at this boundary, never
//! rejected, so a partially-filled payload still produces a displayable alert.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::NotifyConfig;
use crate::message::NotificationMessage;

/// Raw push payload as delivered by the push service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushPayload {
    /// Display fields, all optional
    pub notification: Option<PushNotification>,
    /// Free-form data block; `link` is the only field consumed here
    pub data: Option<PushLink>,
    /// Alternate location for the deep link on some delivery paths
    pub fcm_options: Option<PushLink>,
    /// Server-issued message id, when the origin supplies one
    pub message_id: Option<String>,
}

/// Display portion of a push payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushNotification {
    /// Alert title
    pub title: Option<String>,
    /// Alert body
    pub body: Option<String>,
    /// Alert image, used as the system notification icon when present
    pub image: Option<String>,
}

/// Deep-link portion of a push payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushLink {
    /// Navigation target
    pub link: Option<String>,
}

impl PushPayload {
    /// Decode a payload from raw JSON text
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The deep link, from `data.link` or `fcmOptions.link`
    pub fn link(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.link.as_deref())
            .or_else(|| self.fcm_options.as_ref().and_then(|f| f.link.as_deref()))
    }
}

/// Normalize a raw payload into a [`NotificationMessage`]
///
/// Applies the default-substitution policy: placeholder title/body from the
/// configuration, deep link from whichever block carries it, and a generated
/// message id when the origin omitted one. Both delivery paths run through
/// this same function so duplicates normalize identically.
pub fn normalize(payload: &PushPayload, config: &NotifyConfig) -> NotificationMessage {
    let notification = payload.notification.clone().unwrap_or_default();
    NotificationMessage {
        message_id: payload
            .message_id
            .clone()
            .unwrap_or_else(generate_message_id),
        title: notification
            .title
            .unwrap_or_else(|| config.default_title.clone()),
        body: notification
            .body
            .unwrap_or_else(|| config.default_body.clone()),
        url: payload.link().map(str::to_string),
        received_at: Utc::now(),
    }
}

/// Synthesize a message id for a payload that arrived without one
///
/// Millisecond timestamp prefix keeps generated ids roughly ordered; the
/// UUID suffix keeps two ids generated within the same millisecond distinct.
pub fn generate_message_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple())
}
