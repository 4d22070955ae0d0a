//! Domain layer for sio-client.
//!
//! Plain data types with no I/O: the runtime configuration and the owned
//! events produced by the packet dispatcher.

pub mod config;
pub mod events;

pub use config::ClientConfig;
pub use events::ClientEvent;
