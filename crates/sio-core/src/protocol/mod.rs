//! Receive-path protocol: tokenizer, packet model, decoder and reassembly.

pub mod decoder;
pub mod packet;
pub mod reassembly;
pub mod tokenizer;

pub use decoder::{decode_packet, DecodeError};
pub use packet::{Packet, PacketKind, PayloadValue, ROOT_NAMESPACE};
pub use reassembly::{ReassemblyBuffer, ReassemblyError};
pub use tokenizer::{Delimited, FrameCursor, UnderrunError};
