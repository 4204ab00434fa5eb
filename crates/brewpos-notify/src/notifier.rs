//! System notification display seam

use async_trait::async_trait;

use crate::error::Result;
use crate::message::SystemNote;

/// Platform surface that displays system-level notifications
///
/// The background receiver drives this to surface alerts while no page is
/// focused. Implementations wrap whatever the host platform offers; tests use
/// the recording fake from `brewpos-notify-testing`.
#[async_trait]
pub trait SystemNotifier: Send + Sync {
    /// Display a system notification
    async fn display(&self, note: &SystemNote) -> Result<()>;
}
