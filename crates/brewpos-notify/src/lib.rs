//! # brewpos-notify
//!
//! Push-notification delivery and dedup for the BrewPOS café point-of-sale
//! client.
//!
//! Server pushes can land in two independent execution contexts: a background
//! context that outlives any open page, and the live foreground page itself.
//! This crate coordinates the two so that every alert is surfaced exactly
//! once: the background [`PushReceiver`] displays a system notification and
//! echoes the alert over a named broadcast [`Relay`]; the foreground
//! [`PushListener`] merges the relay echo with direct push delivery into a
//! session-local [`NotificationStore`] that deduplicates by message id.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brewpos_notify::prelude::*;
//!
//! # async fn wire(notifier: Arc<dyn SystemNotifier>, windows: Arc<dyn WindowManager>,
//! #               transport: Arc<dyn PushTransport>) {
//! let config = NotifyConfig::new();
//! let registry = RelayRegistry::new();
//!
//! // Background context
//! let relay = registry.get_or_create(&config.channel_name);
//! let receiver = PushReceiver::new(config.clone(), relay, notifier, windows);
//!
//! // Foreground context
//! let center = NotificationCenter::mount(config, &registry, transport);
//! # }
//! ```
//!
//! ## Delivery guarantees
//!
//! - The same logical alert may arrive via direct delivery, via the relay,
//!   via both, or in either order; the store collapses duplicates by
//!   `message_id`.
//! - Relay delivery reaches currently-subscribed contexts only; there is no
//!   replay for late joiners.
//! - An unavailable push transport or broadcast primitive degrades that
//!   context to log-only silence; it never fails the pipeline.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod center;
mod config;
mod error;
mod listener;
mod message;
mod notifier;
mod payload;
mod receiver;
mod relay;
mod store;
mod windows;

// Public API
pub use center::NotificationCenter;
pub use config::NotifyConfig;
pub use error::{NotifyError, Result};
pub use listener::{ListenerHandle, PushListener, PushTransport};
pub use message::{
    NotificationClick, NotificationMessage, RelayEvent, SystemNote, WindowMessage,
};
pub use notifier::SystemNotifier;
pub use payload::{generate_message_id, normalize, PushLink, PushNotification, PushPayload};
pub use receiver::PushReceiver;
pub use relay::{Relay, RelayLagged, RelayRegistry, RelaySubscription};
pub use store::NotificationStore;
pub use windows::{ClickOutcome, WindowId, WindowManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClickOutcome, NotificationCenter, NotificationClick, NotificationMessage,
        NotificationStore, NotifyConfig, NotifyError, PushListener, PushPayload, PushReceiver,
        PushTransport, Relay, RelayEvent, RelayRegistry, SystemNote, SystemNotifier, WindowId,
        WindowManager, WindowMessage,
    };
}
