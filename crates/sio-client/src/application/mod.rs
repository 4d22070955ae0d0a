//! Application layer for sio-client.
//!
//! Adapts the sio-core handler callbacks into [`ClientEvent`](crate::domain::ClientEvent)s.
//! No sockets or async code live here.

pub mod event_queue;

pub use event_queue::EventQueue;
