//! Callbacks invoked by the [`Dispatcher`](crate::dispatch::Dispatcher).
//!
//! The client that owns the pipeline implements [`PacketHandler`] to receive
//! the protocol meaning of each frame.  Implementations in the infrastructure
//! layer typically forward the calls onto a channel; tests record them.

use crate::protocol::packet::PayloadValue;

/// Receiver of dispatched packets.
///
/// All methods are called synchronously from the decoding context, in frame
/// arrival order.  They must not block.
#[cfg_attr(test, mockall::automock)]
pub trait PacketHandler {
    /// The client's namespace is connected.
    fn on_connected(&mut self);

    /// The server closed the namespace.
    fn on_disconnected(&mut self, reason: &str);

    /// An event arrived.
    ///
    /// `ack_id` is set when the server expects an acknowledgement.
    /// `is_internal` marks events synthesised by the client itself, such as
    /// `"error"` for error packets.
    fn on_event(
        &mut self,
        name: &str,
        args: Vec<PayloadValue>,
        ack_id: Option<u64>,
        is_internal: bool,
    );

    /// The server acknowledged an event this client emitted with `ack_id`.
    fn on_ack(&mut self, ack_id: u64, payload: Vec<PayloadValue>);

    /// The root namespace connected but the client lives in `namespace`;
    /// the client must now ask to join it.
    fn on_join_namespace_requested(&mut self, namespace: &str);
}
