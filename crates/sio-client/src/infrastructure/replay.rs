//! Capture-file replay transport.
//!
//! Feeds a recorded frame sequence through the same pipeline a live session
//! uses.  Useful for reproducing a server's behaviour offline.
//!
//! # File format
//!
//! JSON lines, one frame per line, Socket.IO frames without the Engine.IO
//! prefix:
//!
//! ```text
//! {"type":"Text","data":"51-[\"upload\",{\"_placeholder\":true,\"num\":0}]"}
//! {"type":"Binary","data":[137,80,78,71]}
//! ```
//!
//! Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sio_core::InboundPipeline;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::EventQueue;
use crate::domain::ClientEvent;

/// Errors that abort a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The capture file could not be read.
    #[error("I/O error reading capture: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid captured frame.
    #[error("capture line {line} is malformed: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded transport frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CapturedFrame {
    Text(String),
    Binary(Vec<u8>),
}

/// Outcome of a replay.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Events dispatched, in order.
    pub events: Vec<ClientEvent>,
    /// Frames fed to the pipeline.
    pub frames: usize,
    /// Frames the pipeline discarded (decode errors, stray attachments,
    /// other namespaces).
    pub discarded: usize,
    /// Binary packets still waiting for attachments when the capture ended.
    pub incomplete: usize,
}

/// Replays every frame from `reader` for a client in `namespace`.
///
/// # Errors
///
/// Returns [`ReplayError`] on I/O failure or the first malformed line.
/// Frames the pipeline rejects are counted in
/// [`ReplayReport::discarded`], not returned as errors.
pub fn replay<R: BufRead>(reader: R, namespace: &str) -> Result<ReplayReport, ReplayError> {
    let mut pipeline = InboundPipeline::new(namespace, EventQueue::new());
    let mut report = ReplayReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: CapturedFrame = serde_json::from_str(&line).map_err(|source| ReplayError::Line {
            line: idx + 1,
            source,
        })?;

        let result = match frame {
            CapturedFrame::Text(text) => pipeline.on_text_frame(&text),
            CapturedFrame::Binary(blob) => pipeline.on_binary_frame(blob),
        };
        report.frames += 1;
        if result.is_err() {
            report.discarded += 1;
        }
        report.events.extend(pipeline.handler_mut().drain());
    }

    report.incomplete = pipeline.pending_packets();
    if report.incomplete > 0 {
        debug!(incomplete = report.incomplete, "capture ended with binary packets pending");
    }
    info!(
        frames = report.frames,
        events = report.events.len(),
        discarded = report.discarded,
        "replay finished"
    );
    Ok(report)
}

/// Replays the capture file at `path`.
///
/// # Errors
///
/// See [`replay`].
pub fn replay_file(path: &Path, namespace: &str) -> Result<ReplayReport, ReplayError> {
    let file = File::open(path)?;
    replay(BufReader::new(file), namespace)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sio_core::PayloadValue;
    use std::io::Cursor;

    #[test]
    fn test_captured_frame_json_shape() {
        let text: CapturedFrame = serde_json::from_str(r#"{"type":"Text","data":"0"}"#).unwrap();
        let binary: CapturedFrame = serde_json::from_str(r#"{"type":"Binary","data":[1,2]}"#).unwrap();
        assert_eq!(text, CapturedFrame::Text("0".to_string()));
        assert_eq!(binary, CapturedFrame::Binary(vec![1, 2]));
    }

    #[test]
    fn test_replay_binary_event() {
        // Arrange
        let capture = concat!(
            r#"{"type":"Text","data":"0"}"#,
            "\n\n",
            r#"{"type":"Text","data":"51-[\"upload\",{\"_placeholder\":true,\"num\":0}]"}"#,
            "\n",
            r#"{"type":"Binary","data":[9,8,7]}"#,
            "\n",
        );

        // Act
        let report = replay(Cursor::new(capture), "/").unwrap();

        // Assert
        assert_eq!(report.frames, 3);
        assert_eq!(report.discarded, 0);
        assert_eq!(report.incomplete, 0);
        assert_eq!(
            report.events,
            vec![
                ClientEvent::Connected,
                ClientEvent::Event {
                    name: "upload".to_string(),
                    args: vec![PayloadValue::Bytes(vec![9, 8, 7])],
                    ack_id: None,
                    internal: false,
                },
            ]
        );
    }

    #[test]
    fn test_replay_counts_discarded_frames() {
        let capture = concat!(
            r#"{"type":"Text","data":"9bad"}"#,
            "\n",
            r#"{"type":"Binary","data":[1]}"#,
            "\n",
            r#"{"type":"Text","data":"2/other,[\"x\"]"}"#,
            "\n",
        );

        let report = replay(Cursor::new(capture), "/").unwrap();

        assert_eq!(report.frames, 3);
        assert_eq!(report.discarded, 3);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_replay_reports_malformed_line_number() {
        let capture = "{\"type\":\"Text\",\"data\":\"0\"}\nnot json\n";

        let result = replay(Cursor::new(capture), "/");

        assert!(matches!(result, Err(ReplayError::Line { line: 2, .. })));
    }

    #[test]
    fn test_replay_reports_incomplete_packets() {
        let capture = r#"{"type":"Text","data":"52-[\"a\",{\"_placeholder\":true,\"num\":0},{\"_placeholder\":true,\"num\":1}]"}"#;

        let report = replay(Cursor::new(capture), "/").unwrap();

        assert_eq!(report.incomplete, 1);
        assert!(report.events.is_empty());
    }
}
