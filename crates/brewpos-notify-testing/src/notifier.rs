//! Recording fake for the system notifier

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brewpos_notify::{NotifyError, Result, SystemNote, SystemNotifier};

/// A [`SystemNotifier`] that records every displayed note
///
/// Optionally fails every display call, for exercising the
/// display-failure-does-not-suppress-relay path.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    displayed: Arc<Mutex<Vec<SystemNote>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl RecordingNotifier {
    /// Create a notifier that accepts every display call
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent display call fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }

    /// Notes displayed so far, in display order
    pub fn displayed(&self) -> Vec<SystemNote> {
        self.displayed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemNotifier for RecordingNotifier {
    async fn display(&self, note: &SystemNote) -> Result<()> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(NotifyError::display_failed(message));
        }
        self.displayed.lock().unwrap().push(note.clone());
        Ok(())
    }
}
