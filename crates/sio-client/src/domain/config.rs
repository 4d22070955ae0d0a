//! Client configuration types.
//!
//! [`ClientConfig`] is the single source of truth for runtime settings.  It is
//! read from an optional TOML file (see
//! [`crate::infrastructure::config_file`]) and then overridden field by field
//! from the command line.
//!
//! ```toml
//! url = "ws://chat.example.com/socket.io/?EIO=4&transport=websocket"
//! namespace = "/chat"
//! log_level = "debug"
//! event_buffer = 512
//! ```
//!
//! Every field has a serde default, so a partial file (or none at all) works.

use serde::{Deserialize, Serialize};

use sio_core::protocol::ROOT_NAMESPACE;

/// All runtime configuration for the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket URL of the Engine.IO endpoint, including the query string.
    #[serde(default = "default_url")]
    pub url: String,

    /// Namespace this client lives in.  Packets for any other namespace
    /// sharing the connection are ignored.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// `tracing` filter used when `RUST_LOG` is unset:
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Capacity of the channel carrying [`ClientEvent`](crate::domain::ClientEvent)s
    /// out of the session.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_url() -> String {
    "ws://127.0.0.1:3000/socket.io/?EIO=4&transport=websocket".to_string()
}
fn default_namespace() -> String {
    ROOT_NAMESPACE.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_event_buffer() -> usize {
    256
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            namespace: default_namespace(),
            log_level: default_log_level(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// Normalises a user-supplied namespace: empty means `/`, and a missing
/// leading slash is added.
///
/// ```rust
/// use sio_client::domain::config::normalize_namespace;
///
/// assert_eq!(normalize_namespace(""), "/");
/// assert_eq!(normalize_namespace("chat"), "/chat");
/// assert_eq!(normalize_namespace("/chat"), "/chat");
/// ```
pub fn normalize_namespace(namespace: &str) -> String {
    let trimmed = namespace.trim();
    if trimmed.is_empty() {
        ROOT_NAMESPACE.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
