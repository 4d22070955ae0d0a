//! # sio-core
//!
//! Receive path of a Socket.IO client: turns raw transport frames into typed
//! packets and routes them to per-namespace handler callbacks.
//!
//! It has no dependencies on sockets, async runtimes or timers.  Opening the
//! transport, reconnecting and encoding outbound packets are the concern of
//! the surrounding client.
//!
//! # Architecture overview (for beginners)
//!
//! Data flows one way:
//!
//! ```text
//! raw frame ─► FrameCursor ─► decode_packet ─► [ReassemblyBuffer] ─► Dispatcher ─► PacketHandler
//! ```
//!
//! - **`protocol`** – The wire format.  [`protocol::FrameCursor`] walks a
//!   text frame field by field, [`protocol::decode_packet`] builds a
//!   [`protocol::Packet`] from it, and [`protocol::ReassemblyBuffer`] parks
//!   binary packets until their attachments have arrived in separate binary
//!   frames.
//!
//! - **`dispatch`** – [`dispatch::Dispatcher`] looks at a complete packet's
//!   kind and namespace and calls the matching [`dispatch::PacketHandler`]
//!   method.
//!
//! - **`pipeline`** – [`pipeline::InboundPipeline`] ties the above together
//!   behind the two entry points a transport calls: `on_text_frame` and
//!   `on_binary_frame`.
//!
//! # Logging
//!
//! Diagnostics are emitted through `tracing` with a
//! `component = "protocol-parser"` field.  They never influence control flow.

pub mod dispatch;
pub mod pipeline;
pub mod protocol;

/// Value of the `component` field on every log event emitted by this crate.
pub const LOG_COMPONENT: &str = "protocol-parser";

pub use dispatch::{DispatchWarning, Dispatcher, PacketHandler};
pub use pipeline::{InboundError, InboundPipeline};
pub use protocol::{decode_packet, DecodeError, Packet, PacketKind, PayloadValue};
