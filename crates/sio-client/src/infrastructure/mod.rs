//! Infrastructure layer: configuration file, Engine.IO framing, WebSocket
//! session and capture replay.

pub mod config_file;
pub mod engine_io;
pub mod replay;
pub mod ws_transport;

pub use config_file::{load_config, ConfigError};
pub use replay::{replay, replay_file, CapturedFrame, ReplayError, ReplayReport};
pub use ws_transport::{run_session, SessionSummary, TransportError};
