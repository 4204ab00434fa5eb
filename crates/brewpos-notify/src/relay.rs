//! Cross-context broadcast relay
//!
//! Carries [`RelayEvent`]s from the background push-receiving context to any
//! foreground contexts that are currently subscribed, without the publisher
//! knowing which contexts exist. Delivery is fire-and-forget: no ordering
//! guarantee across subscribers, no replay for late joiners.
//!
//! Channels are owned by a [`RelayRegistry`] and looked up by a well-known
//! name shared by both contexts. The registry is constructed explicitly and
//! injected where needed; on platforms without a broadcast primitive a
//! disabled registry hands out no-op relays instead of failing the pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use brewpos_notify::{RelayRegistry, RelayEvent};
//!
//! let registry = RelayRegistry::new();
//! let relay = registry.get_or_create("brewpos.notifications");
//!
//! let mut sub = relay.subscribe();
//! relay.publish(RelayEvent::NewNotification {
//!     message_id: "m1".into(),
//!     title: "Order #5".into(),
//!     body: "Ready".into(),
//! });
//! let event = sub.recv().await.unwrap().unwrap();
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::message::RelayEvent;

const RELAY_CAPACITY: usize = 64;

/// Registry of named relay channels
///
/// `get_or_create` is idempotent: requesting an existing name attaches to the
/// same logical channel and never errors. One registry per process; both the
/// background receiver and foreground listener resolve their relay through it.
#[derive(Clone)]
pub struct RelayRegistry {
    channels: Arc<DashMap<String, Relay>>,
    enabled: bool,
}

impl RelayRegistry {
    /// Create a registry backed by a live broadcast transport
    pub fn new() -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            enabled: true,
        }
    }

    /// Create a registry for environments without a broadcast primitive
    ///
    /// Relays handed out by a disabled registry accept publishes (returning
    /// zero receivers) and produce subscriptions that never yield, degrading
    /// to "no cross-context delivery" without errors.
    pub fn disabled() -> Self {
        Self {
            channels: Arc::new(DashMap::new()),
            enabled: false,
        }
    }

    /// Get the channel registered under `name`, creating it on first use
    pub fn get_or_create(&self, name: &str) -> Relay {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| {
                if self.enabled {
                    Relay::new(name)
                } else {
                    tracing::warn!(channel = name, "broadcast transport unavailable, relay is a no-op");
                    Relay::noop(name)
                }
            })
            .value()
            .clone()
    }

    /// Whether relays from this registry actually deliver
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for RelayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A named fan-out channel for relay events
///
/// Clones attach to the same logical channel. The channel lives as long as
/// any handle to it does; dropping subscriptions never tears it down.
#[derive(Clone)]
pub struct Relay {
    name: Arc<str>,
    sender: Option<broadcast::Sender<RelayEvent>>,
    subscriber_count: Arc<AtomicUsize>,
}

impl Relay {
    fn new(name: &str) -> Self {
        let (sender, _) = broadcast::channel(RELAY_CAPACITY);
        Self {
            name: name.into(),
            sender: Some(sender),
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn noop(name: &str) -> Self {
        Self {
            name: name.into(),
            sender: None,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Channel name this relay was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish an event to all current subscribers
    ///
    /// Fire-and-forget: returns the number of subscribers the event reached,
    /// 0 when nobody is listening or the transport is unavailable. Never an
    /// error in either case.
    pub fn publish(&self, event: RelayEvent) -> usize {
        match &self.sender {
            Some(sender) => {
                let reached = sender.send(event).unwrap_or(0);
                tracing::debug!(channel = %self.name, reached, "relay event published");
                reached
            }
            None => {
                tracing::debug!(channel = %self.name, "relay disabled, publish dropped");
                0
            }
        }
    }

    /// Subscribe to events published after this call
    pub fn subscribe(&self) -> RelaySubscription {
        let inner = self.sender.as_ref().map(|s| s.subscribe());
        if inner.is_some() {
            self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        }
        RelaySubscription {
            inner,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    /// Current number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

/// A live subscription to a relay channel
///
/// Dropping the subscription unsubscribes; the channel itself survives.
pub struct RelaySubscription {
    inner: Option<broadcast::Receiver<RelayEvent>>,
    subscriber_count: Arc<AtomicUsize>,
}

impl RelaySubscription {
    /// Receive the next relay event
    ///
    /// Returns `None` when the channel is closed, and `Err(Lagged(n))` when
    /// `n` events were missed due to slow consumption. A subscription from a
    /// disabled relay pends forever, which lets callers keep it in a select
    /// loop without special-casing.
    pub async fn recv(&mut self) -> Option<Result<RelayEvent, RelayLagged>> {
        match &mut self.inner {
            Some(rx) => match rx.recv().await {
                Ok(event) => Some(Ok(event)),
                Err(broadcast::error::RecvError::Closed) => None,
                Err(broadcast::error::RecvError::Lagged(count)) => Some(Err(RelayLagged(count))),
            },
            None => std::future::pending().await,
        }
    }

    /// Whether this subscription is attached to a live transport
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}

impl Drop for RelaySubscription {
    fn drop(&mut self) {
        if self.inner.is_some() {
            self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Events were missed because the subscriber consumed too slowly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayLagged(pub u64);

impl std::fmt::Display for RelayLagged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lagged behind by {} relay events", self.0)
    }
}

impl std::error::Error for RelayLagged {}
