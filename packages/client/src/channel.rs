//! Client side of the Sync Channel.

use thiserror::Error;
use tokio::sync::mpsc;

use rakugaki_shared::protocol::ClientEvent;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("sync channel is closed")]
    Closed,

    #[error("failed to encode event: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    Closed,
}

/// Outbound half of one connection to the relay.
///
/// Events are queued for the socket writer task; `send` never waits on the
/// network. A channel is only ever opened by a fresh connection, so the
/// replay marker resets with it.
#[derive(Debug)]
pub struct SyncChannel {
    sender: Option<mpsc::UnboundedSender<String>>,
    replayed: bool,
}

impl SyncChannel {
    pub fn open(sender: mpsc::UnboundedSender<String>) -> Self {
        Self {
            sender: Some(sender),
            replayed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            sender: None,
            replayed: false,
        }
    }

    pub fn state(&self) -> ChannelState {
        match &self.sender {
            Some(sender) if !sender.is_closed() => ChannelState::Open,
            _ => ChannelState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    /// Queue one event for the relay.
    pub fn send(&self, event: &ClientEvent) -> Result<(), ChannelError> {
        let sender = self.sender.as_ref().ok_or(ChannelError::Closed)?;
        let json = event
            .encode()
            .map_err(|e| ChannelError::Encode(e.to_string()))?;
        sender.send(json).map_err(|_| ChannelError::Closed)
    }

    pub fn close(&mut self) {
        self.sender = None;
        self.replayed = false;
    }

    /// Whether `load-drawings` has been applied on this connection.
    pub fn is_replayed(&self) -> bool {
        self.replayed
    }

    pub(crate) fn mark_replayed(&mut self) {
        self.replayed = true;
    }
}

impl Default for SyncChannel {
    fn default() -> Self {
        Self::closed()
    }
}
