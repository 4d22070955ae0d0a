//! Packet-kind routing.
//!
//! | kind                  | filtered by namespace | handler call                                   |
//! |-----------------------|-----------------------|------------------------------------------------|
//! | Connect               | no                    | `on_join_namespace_requested` or `on_connected`|
//! | Disconnect            | no                    | `on_disconnected`                              |
//! | Event / BinaryEvent   | yes                   | `on_event`                                     |
//! | Ack / BinaryAck       | yes                   | `on_ack`                                       |
//! | Error                 | no                    | `on_event("error", ..., internal = true)`      |
//!
//! Binary kinds only reach the dispatcher once their attachments have been
//! substituted, so from here on they are routed exactly like their text
//! counterparts.

use thiserror::Error;

use crate::dispatch::handler::PacketHandler;
use crate::protocol::packet::{Packet, PacketKind, PayloadValue, ROOT_NAMESPACE};

/// Reason passed to [`PacketHandler::on_disconnected`] for a server disconnect.
pub const DISCONNECT_REASON: &str = "Got Disconnect";

/// Name of the internal event raised for error packets.
pub const ERROR_EVENT: &str = "error";

/// Why a complete packet produced no handler call.
///
/// Neither case is fatal.  Namespace mismatches are expected on a shared
/// transport; invalid packets are logged and dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchWarning {
    /// The packet belongs to a namespace other than the client's.
    #[error("packet for namespace {packet} ignored by client in {client}")]
    NamespaceMismatch { packet: String, client: String },

    /// The packet kind is known but its contents cannot be routed.
    #[error("got invalid packet: {0}")]
    InvalidPacket(String),
}

/// Routes complete packets for one client namespace.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    namespace: String,
}

impl Dispatcher {
    /// Creates a dispatcher for a client living in `namespace`.
    /// An empty namespace means the root namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        let mut namespace = namespace.into();
        if namespace.is_empty() {
            namespace = ROOT_NAMESPACE.to_string();
        }
        Self { namespace }
    }

    /// The client's own namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Delivers one complete packet to `handler`.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchWarning`] when the packet was dropped instead of
    /// delivered.  The handler has not been called in that case.
    pub fn dispatch<H>(&self, packet: Packet, handler: &mut H) -> Result<(), DispatchWarning>
    where
        H: PacketHandler + ?Sized,
    {
        match packet.kind() {
            PacketKind::Connect => {
                if packet.namespace() == ROOT_NAMESPACE && self.namespace != ROOT_NAMESPACE {
                    handler.on_join_namespace_requested(&self.namespace);
                } else {
                    handler.on_connected();
                }
                Ok(())
            }
            PacketKind::Disconnect => {
                handler.on_disconnected(DISCONNECT_REASON);
                Ok(())
            }
            PacketKind::Event | PacketKind::BinaryEvent => {
                self.check_namespace(&packet)?;
                let ack_id = packet.id();
                let (name, args) = split_event(packet.into_payload())?;
                handler.on_event(&name, args, ack_id, false);
                Ok(())
            }
            PacketKind::Ack | PacketKind::BinaryAck => {
                self.check_namespace(&packet)?;
                let ack_id = packet.id().ok_or_else(|| {
                    DispatchWarning::InvalidPacket("ack packet without an ack id".to_string())
                })?;
                handler.on_ack(ack_id, packet.into_payload());
                Ok(())
            }
            PacketKind::Error => {
                let ack_id = packet.id();
                handler.on_event(ERROR_EVENT, packet.into_payload(), ack_id, true);
                Ok(())
            }
        }
    }

    fn check_namespace(&self, packet: &Packet) -> Result<(), DispatchWarning> {
        if packet.namespace() == self.namespace {
            Ok(())
        } else {
            Err(DispatchWarning::NamespaceMismatch {
                packet: packet.namespace().to_string(),
                client: self.namespace.clone(),
            })
        }
    }
}

/// Splits an event payload into its name (first element) and arguments.
fn split_event(payload: Vec<PayloadValue>) -> Result<(String, Vec<PayloadValue>), DispatchWarning> {
    let mut items = payload.into_iter();
    match items.next() {
        Some(PayloadValue::Str(name)) => Ok((name, items.collect())),
        Some(other) => Err(DispatchWarning::InvalidPacket(format!(
            "event name must be a string, got {other:?}"
        ))),
        None => Err(DispatchWarning::InvalidPacket(
            "event packet without a name".to_string(),
        )),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
