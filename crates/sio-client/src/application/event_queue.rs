//! [`EventQueue`]: a [`PacketHandler`] that records callbacks as
//! [`ClientEvent`]s.
//!
//! Handler callbacks run synchronously inside the pipeline and must not
//! block, so this handler only appends to a queue.  The transport drains the
//! queue after every frame, answers join requests itself and forwards the
//! rest to the consumer.

use std::collections::VecDeque;

use sio_core::{PacketHandler, PayloadValue};

use crate::domain::ClientEvent;

/// Queue of dispatched events, oldest first.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ClientEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued event in dispatch order.
    pub fn drain(&mut self) -> Vec<ClientEvent> {
        self.events.drain(..).collect()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl PacketHandler for EventQueue {
    fn on_connected(&mut self) {
        self.events.push_back(ClientEvent::Connected);
    }

    fn on_disconnected(&mut self, reason: &str) {
        self.events.push_back(ClientEvent::Disconnected {
            reason: reason.to_string(),
        });
    }

    fn on_event(
        &mut self,
        name: &str,
        args: Vec<PayloadValue>,
        ack_id: Option<u64>,
        is_internal: bool,
    ) {
        self.events.push_back(ClientEvent::Event {
            name: name.to_string(),
            args,
            ack_id,
            internal: is_internal,
        });
    }

    fn on_ack(&mut self, ack_id: u64, payload: Vec<PayloadValue>) {
        self.events.push_back(ClientEvent::Ack { ack_id, payload });
    }

    fn on_join_namespace_requested(&mut self, namespace: &str) {
        self.events.push_back(ClientEvent::JoinNamespaceRequested {
            namespace: namespace.to_string(),
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
