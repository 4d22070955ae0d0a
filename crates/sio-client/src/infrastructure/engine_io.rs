//! Engine.IO outer framing over WebSocket.
//!
//! Socket.IO packets do not travel bare: each WebSocket text message starts
//! with one Engine.IO packet-type digit, and only type `4` ("message")
//! carries a Socket.IO frame.
//!
//! ```text
//! 0{"sid":"..."}      open      (handshake data)
//! 1                   close
//! 2 / 3               ping / pong (server pings, client answers)
//! 4<socket.io frame>  message   e.g. 42["chat","hi"]
//! 5 / 6               upgrade / noop
//! ```
//!
//! Binary WebSocket messages are passed through untouched as attachments.

use sio_core::protocol::ROOT_NAMESPACE;

/// One classified Engine.IO text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFrame<'a> {
    /// Handshake; carries the JSON handshake data.
    Open(&'a str),
    Close,
    /// Heartbeat from the server; the data must be echoed in the pong.
    Ping(&'a str),
    Pong(&'a str),
    /// A Socket.IO text frame.
    Message(&'a str),
    Upgrade,
    Noop,
    /// Empty text, or a type digit outside `0`–`6`.
    Unknown,
}

/// Classifies a WebSocket text message by its leading Engine.IO type digit.
pub fn classify(text: &str) -> EngineFrame<'_> {
    let Some(kind) = text.chars().next() else {
        return EngineFrame::Unknown;
    };
    let data = &text[kind.len_utf8()..];
    match kind {
        '0' => EngineFrame::Open(data),
        '1' => EngineFrame::Close,
        '2' => EngineFrame::Ping(data),
        '3' => EngineFrame::Pong(data),
        '4' => EngineFrame::Message(data),
        '5' => EngineFrame::Upgrade,
        '6' => EngineFrame::Noop,
        _ => EngineFrame::Unknown,
    }
}

/// The pong answering a ping that carried `data`.
pub fn pong(data: &str) -> String {
    format!("3{data}")
}

/// The Engine.IO message asking the server to connect `namespace`.
pub fn connect_request(namespace: &str) -> String {
    if namespace == ROOT_NAMESPACE {
        "40".to_string()
    } else {
        format!("40{namespace},")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_message_strips_engine_prefix() {
        assert_eq!(
            classify(r#"42/chat,["hi"]"#),
            EngineFrame::Message(r#"2/chat,["hi"]"#)
        );
    }

    #[test]
    fn test_classify_open_keeps_handshake_data() {
        assert_eq!(classify(r#"0{"sid":"abc"}"#), EngineFrame::Open(r#"{"sid":"abc"}"#));
    }

    #[test]
    fn test_classify_heartbeats_and_control() {
        assert_eq!(classify("2"), EngineFrame::Ping(""));
        assert_eq!(classify("2probe"), EngineFrame::Ping("probe"));
        assert_eq!(classify("3"), EngineFrame::Pong(""));
        assert_eq!(classify("1"), EngineFrame::Close);
        assert_eq!(classify("5"), EngineFrame::Upgrade);
        assert_eq!(classify("6"), EngineFrame::Noop);
    }

    #[test]
    fn test_classify_unknown_and_empty() {
        assert_eq!(classify(""), EngineFrame::Unknown);
        assert_eq!(classify("9x"), EngineFrame::Unknown);
        assert_eq!(classify("é"), EngineFrame::Unknown);
    }

    #[test]
    fn test_pong_echoes_ping_data() {
        assert_eq!(pong(""), "3");
        assert_eq!(pong("probe"), "3probe");
    }

    #[test]
    fn test_connect_request_for_root_and_namespace() {
        assert_eq!(connect_request("/"), "40");
        assert_eq!(connect_request("/chat"), "40/chat,");
    }
}
