//! Background push receiver
//!
//! Runs in the context that outlives any open page. On every server push it
//! surfaces a system notification and echoes the alert onto the relay; on a
//! notification click it routes the user to an application window, reusing an
//! open one when possible.

use std::sync::Arc;

use crate::config::NotifyConfig;
use crate::error::Result;
use crate::message::{NotificationClick, NotificationMessage, RelayEvent, SystemNote, WindowMessage};
use crate::notifier::SystemNotifier;
use crate::payload::{normalize, PushPayload};
use crate::relay::Relay;
use crate::windows::{ClickOutcome, WindowManager};

/// Handles server pushes and notification clicks in the background context
pub struct PushReceiver {
    config: NotifyConfig,
    relay: Relay,
    notifier: Arc<dyn SystemNotifier>,
    windows: Arc<dyn WindowManager>,
}

impl PushReceiver {
    /// Create a receiver over the given platform surfaces
    pub fn new(
        config: NotifyConfig,
        relay: Relay,
        notifier: Arc<dyn SystemNotifier>,
        windows: Arc<dyn WindowManager>,
    ) -> Self {
        Self {
            config,
            relay,
            notifier,
            windows,
        }
    }

    /// React to a pushed payload
    ///
    /// Normalizes the payload, displays a system notification, and publishes
    /// the relay echo. The publish happens even when no page is subscribed,
    /// and even when the display call fails - the relay echo is the only way
    /// an open page learns about the alert, so a display failure must not
    /// starve it. Returns the normalized message.
    pub async fn handle_push(&self, payload: &PushPayload) -> Result<NotificationMessage> {
        let message = normalize(payload, &self.config);

        let icon = payload
            .notification
            .as_ref()
            .and_then(|n| n.image.clone())
            .unwrap_or_else(|| self.config.default_icon.clone());

        let note = SystemNote {
            title: message.title.clone(),
            body: message.body.clone(),
            icon,
            url: message.url.clone(),
            message_id: message.message_id.clone(),
        };

        let display_result = self.notifier.display(&note).await;
        if let Err(err) = &display_result {
            tracing::error!(message_id = %message.message_id, %err, "system notification display failed");
        }

        let reached = self.relay.publish(RelayEvent::NewNotification {
            message_id: message.message_id.clone(),
            title: message.title.clone(),
            body: message.body.clone(),
        });
        tracing::debug!(message_id = %message.message_id, reached, "push handled in background context");

        display_result?;
        Ok(message)
    }

    /// React to a click on a displayed system notification
    ///
    /// Focuses the first open application window and posts it the click
    /// message; with no window open, opens a new one at the resolved url.
    /// Exactly one of the two happens per click.
    pub async fn handle_click(&self, click: &NotificationClick) -> Result<ClickOutcome> {
        let url = click
            .url
            .clone()
            .unwrap_or_else(|| self.config.app_root_url.clone());

        match self.windows.open_windows().await.first().copied() {
            Some(window) => {
                self.windows.focus(window).await?;
                self.windows
                    .post(
                        window,
                        &WindowMessage::NotificationClicked {
                            message_id: click.message_id.clone(),
                            url,
                        },
                    )
                    .await?;
                Ok(ClickOutcome::FocusedExisting(window))
            }
            None => {
                tracing::debug!(message_id = %click.message_id, %url, "no open window, opening one");
                let window = self.windows.open(&url).await?;
                Ok(ClickOutcome::OpenedNew(window))
            }
        }
    }
}
