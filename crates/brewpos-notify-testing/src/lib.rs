//! # brewpos-notify-testing
//!
//! Testing utilities for `brewpos-notify`. Provides in-memory fakes for the
//! three platform surfaces the subsystem drives - system-notification
//! display, window management, and the push transport - so delivery flows can
//! be exercised hermetically.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brewpos_notify::prelude::*;
//! use brewpos_notify_testing::{FakeWindowManager, RecordingNotifier};
//!
//! let notifier = Arc::new(RecordingNotifier::new());
//! let windows = Arc::new(FakeWindowManager::new());
//! let receiver = PushReceiver::new(
//!     NotifyConfig::new(),
//!     RelayRegistry::new().get_or_create("test"),
//!     notifier.clone(),
//!     windows.clone(),
//! );
//! ```

#![warn(missing_docs)]

mod notifier;
mod transport;
mod windows;

pub use notifier::RecordingNotifier;
pub use transport::{ChannelTransport, UnsupportedTransport};
pub use windows::FakeWindowManager;
