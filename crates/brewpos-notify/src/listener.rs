//! Foreground push listener
//!
//! Keeps the store current while a page is open. The same alert can arrive
//! directly from the push transport, as a relay echo from the background
//! context, or both in either order; a single owning task consumes both
//! sources and applies every mutation through the live store handle, with the
//! store's dedup absorbing whatever duplication the platform produces.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::NotifyConfig;
use crate::message::{NotificationMessage, RelayEvent};
use crate::payload::{normalize, PushPayload};
use crate::relay::Relay;
use crate::store::NotificationStore;

/// Direct foreground push delivery seam
///
/// `subscribe` resolves to `None` when the platform does not support push in
/// the current context; the listener then runs on the relay alone.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Subscribe to pushes delivered directly to the live page
    async fn subscribe(&self) -> Option<mpsc::Receiver<PushPayload>>;
}

/// Spawns the foreground listener task
pub struct PushListener;

impl PushListener {
    /// Attach a listener feeding `store` from the relay and the transport
    ///
    /// Subscribes to the relay immediately, then resolves the transport
    /// subscription. Detaching while that initialization is still in flight
    /// is detected and the task exits without ever mutating the store.
    pub fn spawn(
        store: NotificationStore,
        relay: Relay,
        transport: Arc<dyn PushTransport>,
        config: NotifyConfig,
    ) -> ListenerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(store, relay, transport, config, shutdown_rx));
        ListenerHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle controlling a spawned listener
///
/// Detaching (or dropping the handle) deterministically stops further store
/// mutations from this listener. The relay channel itself is left intact for
/// other contexts and future mounts.
pub struct ListenerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Stop the listener; safe to call more than once
    pub fn detach(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }

    /// Whether `detach` has been called
    pub fn is_detached(&self) -> bool {
        self.shutdown.is_none()
    }

    /// Detach and wait for the listener task to finish
    pub async fn join(mut self) {
        self.detach();
        let _ = (&mut self.task).await;
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

async fn run(
    store: NotificationStore,
    relay: Relay,
    transport: Arc<dyn PushTransport>,
    config: NotifyConfig,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut relay_sub = relay.subscribe();
    if !relay_sub.is_active() {
        tracing::warn!(channel = %relay.name(), "relay unavailable, cross-context delivery disabled");
    }

    // Transport initialization races against teardown: a handle detached
    // before this resolves must leave the store untouched.
    let mut direct: Option<mpsc::Receiver<PushPayload>> = tokio::select! {
        biased;
        _ = &mut shutdown => return,
        subscription = transport.subscribe() => subscription,
    };
    if direct.is_none() {
        tracing::warn!("push transport unsupported in this context, direct delivery disabled");
    }

    let mut relay_open = relay_sub.is_active();
    loop {
        tokio::select! {
            // Shutdown first: a detach requested before an already-delivered
            // event is polled must win, or teardown would not be deterministic
            biased;
            _ = &mut shutdown => break,

            payload = recv_direct(&mut direct) => match payload {
                Some(payload) => {
                    store.add(normalize(&payload, &config));
                }
                None => {
                    tracing::debug!("push transport closed");
                    direct = None;
                }
            },

            event = relay_sub.recv(), if relay_open => match event {
                Some(Ok(event)) => {
                    store.add(message_from_relay(event));
                }
                Some(Err(lag)) => {
                    tracing::warn!(%lag, "relay subscription lagged, events were missed");
                }
                None => {
                    tracing::debug!(channel = %relay.name(), "relay channel closed");
                    relay_open = false;
                }
            },
        }
    }
}

async fn recv_direct(rx: &mut Option<mpsc::Receiver<PushPayload>>) -> Option<PushPayload> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn message_from_relay(event: RelayEvent) -> NotificationMessage {
    match event {
        RelayEvent::NewNotification {
            message_id,
            title,
            body,
        } => NotificationMessage {
            message_id,
            title,
            body,
            url: None,
            received_at: Utc::now(),
        },
    }
}
