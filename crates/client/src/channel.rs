//! Client end of the command channel.
//!
//! The channel is an explicit object handed to the session. [`MemoryChannel`]
//! connects to an in-process server over unbounded tokio channels.

use shared::{ClientEvent, ServerEvent};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("command channel closed")]
    Closed,
}

/// Bidirectional event transport seen from the client
pub trait CommandChannel {
    /// Send an event to the server
    fn send(&self, event: ClientEvent) -> Result<(), ChannelError>;

    /// Next pending server event, without blocking
    fn try_recv(&mut self) -> Option<ServerEvent>;
}

/// In-process channel to a server task
pub struct MemoryChannel {
    outgoing: mpsc::UnboundedSender<ClientEvent>,
    incoming: mpsc::UnboundedReceiver<ServerEvent>,
}

/// Server end of a [`MemoryChannel`]
pub struct ServerEnd {
    pub inbox: mpsc::UnboundedReceiver<ClientEvent>,
    pub outbox: mpsc::UnboundedSender<ServerEvent>,
}

/// Connected client and server ends
pub fn memory_pair() -> (MemoryChannel, ServerEnd) {
    let (client_tx, server_rx) = mpsc::unbounded_channel();
    let (server_tx, client_rx) = mpsc::unbounded_channel();
    (
        MemoryChannel {
            outgoing: client_tx,
            incoming: client_rx,
        },
        ServerEnd {
            inbox: server_rx,
            outbox: server_tx,
        },
    )
}

impl MemoryChannel {
    /// Wait for the next server event; `None` once the server end is gone
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        self.incoming.recv().await
    }
}

impl CommandChannel for MemoryChannel {
    fn send(&self, event: ClientEvent) -> Result<(), ChannelError> {
        self.outgoing.send(event).map_err(|_| ChannelError::Closed)
    }

    fn try_recv(&mut self) -> Option<ServerEvent> {
        self.incoming.try_recv().ok()
    }
}
