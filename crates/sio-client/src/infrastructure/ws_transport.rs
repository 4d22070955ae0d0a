//! WebSocket session driving the inbound pipeline.
//!
//! One session is one WebSocket connection to an Engine.IO endpoint:
//!
//! 1. Connect to [`ClientConfig::url`].
//! 2. On the Engine.IO `open` packet, request the configured namespace.
//! 3. Answer every Engine.IO `ping` with a `pong` carrying the same data.
//! 4. Feed Socket.IO text frames and binary attachments to an
//!    [`InboundPipeline`], then forward the dispatched events on `events`.
//!
//! Join requests produced by the dispatcher are answered here with another
//! namespace connect packet and are also forwarded, so consumers can log them.
//!
//! The session ends when the server closes the socket, sends an Engine.IO
//! `close`, or the event receiver is dropped.

use futures_util::{Sink, SinkExt, StreamExt};
use sio_core::InboundPipeline;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, info, warn};

use crate::application::EventQueue;
use crate::domain::{ClientConfig, ClientEvent};
use crate::infrastructure::engine_io::{self, EngineFrame};

/// Errors that end a session abnormally.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The WebSocket handshake with the server failed.
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: WsError,
    },

    /// Reading from or writing to the open socket failed.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

/// Frame counts for a finished session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Socket.IO frames and attachments fed to the pipeline.
    pub frames: usize,
    /// Frames the pipeline discarded (decode errors, stray attachments,
    /// other namespaces).
    pub discarded: usize,
    /// Binary packets still waiting for attachments when the session ended.
    pub incomplete: usize,
}

/// Runs one session against `config.url` until it closes.
///
/// # Errors
///
/// Returns [`TransportError::Connect`] if the handshake fails and
/// [`TransportError::WebSocket`] if the socket fails mid-session.  A normal
/// close, or a dropped event receiver, returns the [`SessionSummary`].
pub async fn run_session(
    config: &ClientConfig,
    events: mpsc::Sender<ClientEvent>,
) -> Result<SessionSummary, TransportError> {
    let (ws, _response) =
        connect_async(config.url.as_str())
            .await
            .map_err(|source| TransportError::Connect {
                url: config.url.clone(),
                source,
            })?;
    info!(url = %config.url, namespace = %config.namespace, "WebSocket connected");

    let (mut sink, mut stream) = ws.split();
    let mut pipeline = InboundPipeline::new(config.namespace.as_str(), EventQueue::new());
    let mut summary = SessionSummary::default();

    let outcome = loop {
        let msg = match stream.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed)) | None => {
                debug!("WebSocket stream ended");
                break Ok(());
            }
            Some(Err(e)) => break Err(TransportError::from(e)),
        };

        match msg {
            WsMessage::Text(text) => match engine_io::classify(&text) {
                EngineFrame::Open(handshake) => {
                    debug!(handshake, "Engine.IO open");
                    let request = engine_io::connect_request(pipeline.namespace());
                    if let Err(e) = sink.send(WsMessage::Text(request)).await {
                        break Err(e.into());
                    }
                }
                EngineFrame::Ping(data) => {
                    if let Err(e) = sink.send(WsMessage::Text(engine_io::pong(data))).await {
                        break Err(e.into());
                    }
                }
                EngineFrame::Message(frame) => {
                    summary.frames += 1;
                    // Failures are already logged by the pipeline.
                    if pipeline.on_text_frame(frame).is_err() {
                        summary.discarded += 1;
                    }
                }
                EngineFrame::Close => {
                    info!("Engine.IO close received");
                    break Ok(());
                }
                EngineFrame::Pong(_) | EngineFrame::Upgrade | EngineFrame::Noop => {}
                EngineFrame::Unknown => {
                    debug!(len = text.len(), "unrecognised Engine.IO message (ignored)");
                }
            },
            WsMessage::Binary(blob) => {
                summary.frames += 1;
                if pipeline.on_binary_frame(blob).is_err() {
                    summary.discarded += 1;
                }
            }
            WsMessage::Close(_) => {
                debug!("WebSocket Close frame received");
                break Ok(());
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {}
        }

        match forward_events(pipeline.handler_mut(), &mut sink, &events).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("event receiver dropped; ending session");
                break Ok(());
            }
            Err(e) => break Err(e),
        }
    };

    summary.incomplete = pipeline.pending_packets();
    if summary.incomplete > 0 {
        warn!(
            pending = summary.incomplete,
            "session ended with binary packets still waiting for attachments"
        );
    }
    pipeline.reset();
    outcome?;
    info!(
        frames = summary.frames,
        discarded = summary.discarded,
        "session finished"
    );
    Ok(summary)
}

/// Drains `queue`, answering join requests on `sink` and sending every event
/// to `events`.  Returns `Ok(false)` once the receiver is gone.
async fn forward_events<S>(
    queue: &mut EventQueue,
    sink: &mut S,
    events: &mpsc::Sender<ClientEvent>,
) -> Result<bool, TransportError>
where
    S: Sink<WsMessage, Error = WsError> + Unpin,
{
    for event in queue.drain() {
        if let ClientEvent::JoinNamespaceRequested { namespace } = &event {
            debug!(namespace = %namespace, "answering join request");
            sink.send(WsMessage::Text(engine_io::connect_request(namespace)))
                .await?;
        }
        if events.send(event).await.is_err() {
            return Ok(false);
        }
    }
    Ok(true)
}
