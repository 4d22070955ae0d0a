//! Holding area for binary packets that are still waiting on attachments.
//!
//! # How binary packets arrive (for beginners)
//!
//! A packet that carries binary data is split on the wire: first a text frame
//! with the JSON payload, where every blob is replaced by a placeholder object
//! `{"_placeholder":true,"num":k}`, then one binary frame per blob.  The
//! header declares how many binary frames follow (`51-[...]` = one).
//!
//! ```text
//! text   51-["upload",{"_placeholder":true,"num":0}]   -> enqueue
//! binary <bytes>                                       -> complete, dispatch
//! ```
//!
//! # Matching order
//!
//! The next binary frame always goes to the most recently enqueued packet
//! that is still incomplete (last in, first out).  The sender transmits a
//! packet's attachments contiguously right after its header, so with one
//! packet outstanding the order is unambiguous.  With several outstanding,
//! attachments must arrive newest-packet-first.  That ordering is owned by
//! the transport and is relied on here, not re-derived.

use thiserror::Error;
use tracing::debug;

use crate::protocol::packet::Packet;
use crate::LOG_COMPONENT;

/// Errors from feeding attachments into the buffer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// A binary frame arrived while no packet was waiting for one.
    #[error("received binary frame with no packet awaiting attachments")]
    NoPendingPacket,
}

/// Incomplete binary packets, oldest first.
#[derive(Debug, Default)]
pub struct ReassemblyBuffer {
    waiting: Vec<Packet>,
}

impl ReassemblyBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an incomplete binary packet until its attachments arrive.
    pub fn enqueue(&mut self, packet: Packet) {
        debug!(
            component = LOG_COMPONENT,
            pending = ?packet.pending_attachments(),
            outstanding = self.waiting.len() + 1,
            "waiting for binary attachments"
        );
        self.waiting.push(packet);
    }

    /// Appends `blob` to the newest outstanding packet.
    ///
    /// Returns the packet, removed from the buffer and with its placeholders
    /// resolved, if this attachment completed it; `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::NoPendingPacket`] if the buffer is empty.
    /// The blob is dropped and the buffer is unchanged.
    pub fn supply_attachment(&mut self, blob: Vec<u8>) -> Result<Option<Packet>, ReassemblyError> {
        let newest = self
            .waiting
            .last_mut()
            .ok_or(ReassemblyError::NoPendingPacket)?;
        newest.add_attachment(blob);
        if newest.is_complete() {
            Ok(self.waiting.pop())
        } else {
            Ok(None)
        }
    }

    /// Number of packets still waiting.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// `true` when no packet is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Drops every waiting packet.  Used when the transport goes away,
    /// since attachments never survive a reconnect.
    pub fn clear(&mut self) {
        self.waiting.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::{PacketKind, PayloadValue};
    use serde_json::json;

    fn binary_event(name: &str, attachments: usize) -> Packet {
        let mut payload = vec![PayloadValue::from(name)];
        for num in 0..attachments {
            payload.push(PayloadValue::from(json!({ "_placeholder": true, "num": num })));
        }
        Packet::new(PacketKind::BinaryEvent, "/")
            .with_payload(payload)
            .with_pending_attachments(attachments)
    }

    #[test]
    fn test_supply_on_empty_buffer_fails() {
        // Arrange
        let mut buffer = ReassemblyBuffer::new();

        // Act
        let result = buffer.supply_attachment(vec![1, 2, 3]);

        // Assert
        assert_eq!(result, Err(ReassemblyError::NoPendingPacket));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_single_attachment_completes_packet() {
        // Arrange
        let mut buffer = ReassemblyBuffer::new();
        buffer.enqueue(binary_event("evt", 1));

        // Act
        let completed = buffer.supply_attachment(vec![0xDE, 0xAD]).unwrap();

        // Assert
        let packet = completed.expect("packet must complete");
        assert_eq!(packet.payload()[1], PayloadValue::Bytes(vec![0xDE, 0xAD]));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_packet_stays_until_last_attachment() {
        // Arrange
        let mut buffer = ReassemblyBuffer::new();
        buffer.enqueue(binary_event("evt", 3));

        // Act
        let first = buffer.supply_attachment(vec![1]).unwrap();
        let second = buffer.supply_attachment(vec![2]).unwrap();
        let third = buffer.supply_attachment(vec![3]).unwrap();

        // Assert
        assert!(first.is_none());
        assert!(second.is_none());
        let packet = third.expect("third attachment completes the packet");
        assert_eq!(packet.attachments(), &[vec![1], vec![2], vec![3]]);
        assert_eq!(packet.payload()[3], PayloadValue::Bytes(vec![3]));
    }

    #[test]
    fn test_attachments_match_newest_packet_first() {
        // Arrange – A enqueued before B
        let mut buffer = ReassemblyBuffer::new();
        buffer.enqueue(binary_event("a", 1));
        buffer.enqueue(binary_event("b", 1));

        // Act
        let first = buffer.supply_attachment(vec![0xB]).unwrap().unwrap();
        let second = buffer.supply_attachment(vec![0xA]).unwrap().unwrap();

        // Assert
        assert_eq!(first.payload()[0].as_str(), Some("b"));
        assert_eq!(second.payload()[0].as_str(), Some("a"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clear_drops_waiting_packets() {
        let mut buffer = ReassemblyBuffer::new();
        buffer.enqueue(binary_event("evt", 2));
        assert_eq!(buffer.len(), 1);

        buffer.clear();

        assert!(buffer.is_empty());
        assert!(buffer.supply_attachment(vec![1]).is_err());
    }
}
