//! Background task that decodes inbound frames for the session lifetime.
//!
//! The listener owns the read half of the socket outright. Each iteration
//! decodes exactly one frame (a `result` frame's whole matrix included,
//! whether or not it will be displayed) and forwards it to the coordinator
//! over an `mpsc` channel. A read error or orderly close is terminal: the
//! listener reports it as a final [`SessionEvent::ConnectionLost`] and ends,
//! leaving shutdown to the coordinator instead of exiting the process from
//! inside a task.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use matsum_core::{CodecError, Response};

use crate::connection::FrameReader;

/// Events delivered from the listener to the session coordinator.
#[derive(Debug)]
pub enum SessionEvent {
    /// One decoded server frame.
    Response(Response),
    /// The read side failed or the server closed the connection. Terminal;
    /// no further events follow.
    ConnectionLost(CodecError),
}

/// Spawns the listener task over the read half of the connection.
///
/// Returns the event receiver and the task handle. The task ends when the
/// connection dies or the receiver is dropped.
pub fn spawn(mut reader: FrameReader) -> (mpsc::Receiver<SessionEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(128);

    let handle = tokio::spawn(async move {
        loop {
            match reader.recv().await {
                Ok(response) => {
                    debug!(opcode = response.opcode_word(), "response received");
                    if tx.send(SessionEvent::Response(response)).await.is_err() {
                        // Coordinator is gone; nothing left to deliver to.
                        break;
                    }
                }
                Err(err) => {
                    warn!("read side of the connection ended: {err}");
                    let _ = tx.send(SessionEvent::ConnectionLost(err)).await;
                    break;
                }
            }
        }
    });

    (rx, handle)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
