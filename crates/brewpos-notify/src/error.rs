//! Notification subsystem error types

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Error type for notification delivery operations
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The platform refused or failed to display a system notification
    #[error("Failed to display system notification: {0}")]
    DisplayFailed(String),

    /// A window could not be focused, messaged, or opened
    #[error("Window operation failed: {0}")]
    WindowFailed(String),

    /// The push transport failed while delivering a payload
    #[error("Push transport error: {0}")]
    TransportFailed(String),

    /// Envelope serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NotifyError {
    /// Create a display failed error
    pub fn display_failed(msg: impl Into<String>) -> Self {
        Self::DisplayFailed(msg.into())
    }

    /// Create a window failed error
    pub fn window_failed(msg: impl Into<String>) -> Self {
        Self::WindowFailed(msg.into())
    }

    /// Create a transport failed error
    pub fn transport_failed(msg: impl Into<String>) -> Self {
        Self::TransportFailed(msg.into())
    }
}
