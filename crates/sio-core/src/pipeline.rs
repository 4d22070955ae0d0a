//! The inbound pipeline: raw frames in, handler callbacks out.
//!
//! ```text
//! on_text_frame ─► decode_packet ─┬─► (complete)   ─────────────┬─► Dispatcher ─► PacketHandler
//!                                 └─► (incomplete) ReassemblyBuffer
//! on_binary_frame ──────────────────► ReassemblyBuffer ─(done)──┘
//! ```
//!
//! # Concurrency
//!
//! The pipeline is plain single-threaded state with `&mut self` entry points.
//! Frame order and the newest-first attachment matching both depend on calls
//! arriving one at a time, in transport order.  A caller that receives frames
//! on several threads must serialise them (e.g. by wrapping the pipeline in a
//! `Mutex` and holding the lock across each call).
//!
//! Every failure here is local to one frame.  It is logged and returned to
//! the caller for bookkeeping; the next frame is processed normally.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dispatch::{DispatchWarning, Dispatcher, PacketHandler};
use crate::protocol::{decode_packet, DecodeError, Packet, ReassemblyBuffer, ReassemblyError};
use crate::LOG_COMPONENT;

/// A frame that was consumed without reaching a handler.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InboundError {
    /// The text frame could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A binary frame arrived with nothing waiting for it.
    #[error(transparent)]
    Reassembly(#[from] ReassemblyError),

    /// The packet was decoded but dropped by the dispatcher.
    #[error(transparent)]
    Dispatch(#[from] DispatchWarning),
}

/// Decoder, reassembly buffer and dispatcher for one client.
pub struct InboundPipeline<H> {
    dispatcher: Dispatcher,
    reassembly: ReassemblyBuffer,
    handler: H,
}

impl<H: PacketHandler> InboundPipeline<H> {
    /// Creates a pipeline for a client in `namespace`, delivering to `handler`.
    pub fn new(namespace: impl Into<String>, handler: H) -> Self {
        Self {
            dispatcher: Dispatcher::new(namespace),
            reassembly: ReassemblyBuffer::new(),
            handler,
        }
    }

    /// Processes one complete text frame.
    ///
    /// An empty frame is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`InboundError`] if the frame was discarded.  It has already
    /// been logged; callers may ignore it.
    pub fn on_text_frame(&mut self, frame: &str) -> Result<(), InboundError> {
        if frame.is_empty() {
            debug!(component = LOG_COMPONENT, "ignoring empty text frame");
            return Ok(());
        }

        let packet = match decode_packet(frame) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(component = LOG_COMPONENT, frame, error = %e, "discarding text frame");
                return Err(e.into());
            }
        };

        if packet.is_complete() {
            self.deliver(packet)
        } else {
            self.reassembly.enqueue(packet);
            Ok(())
        }
    }

    /// Processes one binary attachment frame.
    ///
    /// # Errors
    ///
    /// Returns [`InboundError::Reassembly`] if no packet was waiting; the
    /// blob is discarded.
    pub fn on_binary_frame(&mut self, blob: Vec<u8>) -> Result<(), InboundError> {
        let len = blob.len();
        match self.reassembly.supply_attachment(blob) {
            Ok(Some(packet)) => self.deliver(packet),
            Ok(None) => Ok(()),
            Err(e) => {
                warn!(component = LOG_COMPONENT, bytes = len, error = %e, "discarding binary frame");
                Err(e.into())
            }
        }
    }

    /// Drops any partially reassembled packets, e.g. after the transport
    /// has closed.
    pub fn reset(&mut self) {
        if !self.reassembly.is_empty() {
            debug!(
                component = LOG_COMPONENT,
                dropped = self.reassembly.len(),
                "dropping incomplete binary packets"
            );
        }
        self.reassembly.clear();
    }

    /// Number of binary packets still waiting for attachments.
    pub fn pending_packets(&self) -> usize {
        self.reassembly.len()
    }

    /// The client's namespace.
    pub fn namespace(&self) -> &str {
        self.dispatcher.namespace()
    }

    /// Shared access to the handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Exclusive access to the handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the pipeline, returning the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn deliver(&mut self, packet: Packet) -> Result<(), InboundError> {
        match self.dispatcher.dispatch(packet, &mut self.handler) {
            Ok(()) => Ok(()),
            Err(w @ DispatchWarning::NamespaceMismatch { .. }) => {
                info!(component = LOG_COMPONENT, "{w}");
                Err(w.into())
            }
            Err(w) => {
                warn!(component = LOG_COMPONENT, "{w}");
                Err(w.into())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
