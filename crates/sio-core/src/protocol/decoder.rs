//! Text-frame decoder.
//!
//! Wire format (all fields positional, no tags):
//! ```text
//! <kind:1 digit> [<attachmentCount>-] [/<namespace>,] [<ackId digits>] [<jsonArrayPayload>]
//! ```
//!
//! The decoder is a single left-to-right pass over a [`FrameCursor`].  It is
//! stateless: each call decodes one frame independently, so a malformed frame
//! can never affect the next one.

use thiserror::Error;
use tracing::debug;

use crate::protocol::packet::{Packet, PacketKind, PayloadValue, ROOT_NAMESPACE};
use crate::protocol::tokenizer::{FrameCursor, UnderrunError};
use crate::LOG_COMPONENT;

/// Errors produced while decoding one text frame.
///
/// All of these are local to the frame that produced them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    /// The first character is not one of the digits `0`–`6`.
    #[error("invalid packet type: {0:?}")]
    InvalidPacketType(String),

    /// The attachment-count field of a binary packet is malformed.
    #[error("invalid packet: {0}")]
    InvalidPacket(String),

    /// The ack id digit run does not fit in a `u64`.
    #[error("invalid ack id: {0}")]
    InvalidAckId(String),

    /// The payload is not a JSON array, nor a single JSON value.
    #[error("error parsing data for packet: {0}")]
    InvalidData(String),

    /// The frame ended before a required field.
    #[error(transparent)]
    Underrun(#[from] UnderrunError),
}

/// Decodes one Socket.IO text frame into a [`Packet`].
///
/// # Errors
///
/// Returns [`DecodeError`] if the frame is malformed.  No partial packet is
/// ever returned.
///
/// # Examples
///
/// ```rust
/// use sio_core::protocol::{decode_packet, PacketKind, PayloadValue};
///
/// let packet = decode_packet(r#"3/chat,3["ok"]"#).unwrap();
/// assert_eq!(packet.kind(), PacketKind::Ack);
/// assert_eq!(packet.namespace(), "/chat");
/// assert_eq!(packet.id(), Some(3));
/// assert_eq!(packet.payload(), &[PayloadValue::from("ok")]);
/// ```
pub fn decode_packet(frame: &str) -> Result<Packet, DecodeError> {
    let mut cursor = FrameCursor::new(frame);

    // 1. Packet kind
    let digit = cursor.read_fixed(1)?;
    let kind = digit
        .chars()
        .next()
        .and_then(|c| PacketKind::try_from(c).ok())
        .ok_or_else(|| DecodeError::InvalidPacketType(digit.to_string()))?;

    // 2. Kind-only frame, e.g. a bare disconnect
    if cursor.at_end() {
        return Ok(Packet::new(kind, ROOT_NAMESPACE));
    }

    // 3. Attachment count
    let pending_attachments = if kind.is_binary() {
        Some(read_attachment_count(&mut cursor)?)
    } else {
        None
    };

    // 4. Namespace
    let mut namespace = ROOT_NAMESPACE;
    if cursor.peek() == Some('/') {
        let field = cursor.read_until(',');
        namespace = field.span;
        if field.terminated {
            cursor.advance(1);
        }
    }

    let mut packet = Packet::new(kind, namespace);
    if let Some(count) = pending_attachments {
        packet = packet.with_pending_attachments(count);
    }

    // 5. Namespace-only frame, e.g. a namespace join acknowledgement
    if cursor.at_end() {
        return Ok(packet);
    }

    // 6. Ack id.  Error packets never carry one, so no digits are scanned
    //    and any leading digits belong to the payload.
    if kind != PacketKind::Error {
        if let Some(id) = read_ack_id(&mut cursor)? {
            packet = packet.with_id(id);
        }
    }

    // 7. Payload
    let rest = cursor.remainder();
    if !rest.is_empty() {
        packet = packet.with_payload(parse_payload(rest)?);
    }

    debug!(
        component = LOG_COMPONENT,
        kind = ?packet.kind(),
        namespace = packet.namespace(),
        id = ?packet.id(),
        "decoded packet"
    );
    Ok(packet)
}

/// Reads `<digits>-` and returns the digits as a count.
fn read_attachment_count(cursor: &mut FrameCursor<'_>) -> Result<usize, DecodeError> {
    let field = cursor.read_until('-');
    if !field.terminated {
        return Err(DecodeError::InvalidPacket(
            "missing attachment count delimiter".to_string(),
        ));
    }
    if field.span.is_empty() || !field.span.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidPacket(format!(
            "attachment count {:?} is not a number",
            field.span
        )));
    }
    let count = field.span.parse::<usize>().map_err(|e| {
        DecodeError::InvalidPacket(format!("attachment count {:?}: {e}", field.span))
    })?;
    cursor.advance(1);
    Ok(count)
}

/// Scans a run of decimal digits.  Nothing terminates the id field, so the
/// first non-digit is read as lookahead and then given back to the payload.
fn read_ack_id(cursor: &mut FrameCursor<'_>) -> Result<Option<u64>, DecodeError> {
    let start = cursor.remainder();
    let mut len = 0;
    while let Ok(c) = cursor.read_fixed(1) {
        if c.bytes().all(|b| b.is_ascii_digit()) {
            len += 1;
        } else {
            cursor.rewind(1);
            break;
        }
    }
    if len == 0 {
        return Ok(None);
    }
    // Digits are ASCII, so `len` characters are `len` bytes.
    let digits = &start[..len];
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|e| DecodeError::InvalidAckId(format!("{digits:?}: {e}")))
}

/// Parses the payload as a JSON array.  A bare value that is not wrapped in
/// an array (servers send error payloads this way) is retried as a
/// one-element array.
fn parse_payload(text: &str) -> Result<Vec<PayloadValue>, DecodeError> {
    let values = match serde_json::from_str::<Vec<serde_json::Value>>(text) {
        Ok(values) => values,
        Err(_) => serde_json::from_str::<Vec<serde_json::Value>>(&format!("[{text}]"))
            .map_err(|e| DecodeError::InvalidData(e.to_string()))?,
    };
    Ok(values.into_iter().map(PayloadValue::from).collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
