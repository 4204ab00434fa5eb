//! Push transport fakes

use std::sync::Mutex;

use async_trait::async_trait;
use brewpos_notify::{PushPayload, PushTransport};
use tokio::sync::mpsc;

const TRANSPORT_CAPACITY: usize = 16;

/// A [`PushTransport`] fed from a channel the test holds
///
/// Single-subscriber: the first `subscribe` call takes the receiving end,
/// later calls resolve to `None` as an unsupported transport would.
pub struct ChannelTransport {
    sender: mpsc::Sender<PushPayload>,
    receiver: Mutex<Option<mpsc::Receiver<PushPayload>>>,
}

impl ChannelTransport {
    /// Create a transport with an open delivery channel
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(TRANSPORT_CAPACITY);
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    /// Sender used to push payloads into the subscribed listener
    pub fn sender(&self) -> mpsc::Sender<PushPayload> {
        self.sender.clone()
    }
}

impl Default for ChannelTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushTransport for ChannelTransport {
    async fn subscribe(&self) -> Option<mpsc::Receiver<PushPayload>> {
        self.receiver.lock().unwrap().take()
    }
}

/// A [`PushTransport`] for contexts where push is unsupported
///
/// `subscribe` always resolves to `None`; the listener degrades to the relay
/// alone.
#[derive(Clone, Copy, Default)]
pub struct UnsupportedTransport;

#[async_trait]
impl PushTransport for UnsupportedTransport {
    async fn subscribe(&self) -> Option<mpsc::Receiver<PushPayload>> {
        None
    }
}
