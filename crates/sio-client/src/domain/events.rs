//! Owned form of the handler callbacks.
//!
//! [`sio_core::PacketHandler`] is called synchronously from the decoding
//! context.  The client turns each call into a [`ClientEvent`] so it can be
//! sent across a channel and consumed elsewhere (logged by the binary,
//! collected by tests, answered by the session loop).

use sio_core::PayloadValue;

/// One dispatched callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The client's namespace is connected.
    Connected,

    /// The server disconnected the namespace.
    Disconnected { reason: String },

    /// An event from the server, or a synthesised internal one.
    Event {
        name: String,
        args: Vec<PayloadValue>,
        ack_id: Option<u64>,
        internal: bool,
    },

    /// The server acknowledged an event this client emitted.
    Ack { ack_id: u64, payload: Vec<PayloadValue> },

    /// The session must send a connect packet for `namespace`.
    JoinNamespaceRequested { namespace: String },
}

impl ClientEvent {
    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            ClientEvent::Connected => "connected",
            ClientEvent::Disconnected { .. } => "disconnected",
            ClientEvent::Event { internal: true, .. } => "internal-event",
            ClientEvent::Event { .. } => "event",
            ClientEvent::Ack { .. } => "ack",
            ClientEvent::JoinNamespaceRequested { .. } => "join-namespace",
        }
    }
}
