//! sio-client library crate.
//!
//! Wraps the `sio-core` receive path in everything needed to run it against
//! a real server or a recorded capture.
//!
//! ```text
//! Socket.IO server (Engine.IO over WebSocket)
//!         ↓
//! [sio-client]
//!   ├── domain/           ClientConfig, ClientEvent
//!   ├── application/      EventQueue (PacketHandler → ClientEvent)
//!   └── infrastructure/
//!         ├── config_file  TOML loading
//!         ├── engine_io    Engine.IO outer framing
//!         ├── ws_transport WebSocket session (tokio-tungstenite)
//!         └── replay       JSON-lines capture replay
//! ```
//!
//! `domain` and `application` do no I/O; only `infrastructure` touches the
//! network, the file system and `tokio`.

/// Domain layer: configuration and event types.
pub mod domain;

/// Application layer: the queueing packet handler.
pub mod application;

/// Infrastructure layer: config file, transports and replay.
pub mod infrastructure;
