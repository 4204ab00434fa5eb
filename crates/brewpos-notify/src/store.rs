//! Session-local notification store
//!
//! Single source of truth for the alerts a page session has seen. The same
//! logical alert can reach the store through two independent paths (direct
//! foreground delivery and the relay echo of the background delivery), in
//! either order or twice; dedup by `message_id` is the only correctness
//! mechanism, so [`NotificationStore::add`] must be idempotent under
//! arbitrary interleaving. Nothing here persists - a reload starts empty.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::message::NotificationMessage;

/// Cloneable handle to the shared notification list and unread state
#[derive(Clone, Default)]
pub struct NotificationStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    entries: Vec<Entry>,
    seen: HashSet<String>,
}

struct Entry {
    message: NotificationMessage,
    read: bool,
}

impl NotificationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notification unless its `message_id` was already seen
    ///
    /// Returns `true` if the entry was added, `false` if it was dropped as a
    /// duplicate. New entries start unread.
    pub fn add(&self, message: NotificationMessage) -> bool {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        if !inner.seen.insert(message.message_id.clone()) {
            tracing::debug!(message_id = %message.message_id, "dropping duplicate notification");
            return false;
        }
        tracing::debug!(message_id = %message.message_id, title = %message.title, "notification stored");
        inner.entries.push(Entry {
            message,
            read: false,
        });
        true
    }

    /// All notifications in arrival order
    pub fn notifications(&self) -> Vec<NotificationMessage> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.entries.iter().map(|e| e.message.clone()).collect()
    }

    /// Number of stored notifications
    pub fn len(&self) -> usize {
        self.inner.lock().expect("store lock poisoned").entries.len()
    }

    /// Whether the store holds no notifications
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of notifications not yet marked read
    pub fn unread_count(&self) -> usize {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.entries.iter().filter(|e| !e.read).count()
    }

    /// Mark a single notification read; returns `false` for an unknown id
    pub fn mark_read(&self, message_id: &str) -> bool {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        match inner
            .entries
            .iter_mut()
            .find(|e| e.message.message_id == message_id)
        {
            Some(entry) => {
                entry.read = true;
                true
            }
            None => false,
        }
    }

    /// Clear the unread indicator without removing entries
    pub fn mark_all_read(&self) {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        for entry in &mut inner.entries {
            entry.read = true;
        }
    }
}
