//! Routing of complete packets to handler callbacks.

pub mod dispatcher;
pub mod handler;

pub use dispatcher::{DispatchWarning, Dispatcher, DISCONNECT_REASON, ERROR_EVENT};
pub use handler::PacketHandler;
