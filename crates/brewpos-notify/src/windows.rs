//! Window management seam for click navigation

use async_trait::async_trait;

use crate::error::Result;
use crate::message::WindowMessage;

/// Opaque identifier of an open application window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Platform surface for locating, focusing, and opening application windows
#[async_trait]
pub trait WindowManager: Send + Sync {
    /// Ids of currently open application windows, in platform order
    async fn open_windows(&self) -> Vec<WindowId>;

    /// Bring a window to the foreground
    async fn focus(&self, window: WindowId) -> Result<()>;

    /// Post a message to a window's foreground context
    async fn post(&self, window: WindowId, message: &WindowMessage) -> Result<()>;

    /// Open a new window navigated to `url`
    async fn open(&self, url: &str) -> Result<WindowId>;
}

/// What a notification click resolved to - exactly one per click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An open window was focused and sent the click message
    FocusedExisting(WindowId),
    /// No window was open; a new one was opened at the target url
    OpenedNew(WindowId),
}
