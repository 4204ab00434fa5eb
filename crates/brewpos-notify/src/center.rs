//! Notification center - the state-owning boundary handed to the application

use std::sync::Arc;

use crate::config::NotifyConfig;
use crate::listener::{ListenerHandle, PushListener, PushTransport};
use crate::message::NotificationMessage;
use crate::relay::RelayRegistry;
use crate::store::NotificationStore;

/// Owns the notification store and the foreground listener for one page session
///
/// Mounting resolves the relay channel from the registry and attaches the
/// listener; dropping the center detaches the listener but leaves the relay
/// channel alive for other contexts and future mounts. The store is session
/// scoped: a new mount starts empty.
pub struct NotificationCenter {
    store: NotificationStore,
    listener: ListenerHandle,
}

impl NotificationCenter {
    /// Mount the notification subsystem for the current page session
    pub fn mount(
        config: NotifyConfig,
        registry: &RelayRegistry,
        transport: Arc<dyn PushTransport>,
    ) -> Self {
        let store = NotificationStore::new();
        let relay = registry.get_or_create(&config.channel_name);
        let listener = PushListener::spawn(store.clone(), relay, transport, config);
        Self { store, listener }
    }

    /// Handle to the underlying store
    pub fn store(&self) -> NotificationStore {
        self.store.clone()
    }

    /// All notifications seen this session, in arrival order
    pub fn notifications(&self) -> Vec<NotificationMessage> {
        self.store.notifications()
    }

    /// Number of unread notifications
    pub fn unread_count(&self) -> usize {
        self.store.unread_count()
    }

    /// Append a notification directly, subject to the store's dedup
    pub fn add_notification(&self, message: NotificationMessage) -> bool {
        self.store.add(message)
    }

    /// Mark a single notification read
    pub fn mark_read(&self, message_id: &str) -> bool {
        self.store.mark_read(message_id)
    }

    /// Clear the unread indicator without removing entries
    pub fn mark_all_read(&self) {
        self.store.mark_all_read()
    }

    /// Detach the listener ahead of drop; further deliveries are ignored
    pub fn unmount(&mut self) {
        self.listener.detach();
    }
}
