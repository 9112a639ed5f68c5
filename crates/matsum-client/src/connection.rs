//! Ownership of the single TCP connection for the session.
//!
//! The process dials exactly once; a failed dial is fatal before any command
//! can be issued. The stream is split into two exclusively-owned halves:
//! [`FrameWriter`] belongs to the command dispatcher and [`FrameReader`] to
//! the response listener. Neither half touches the other's buffer state, so
//! no lock sits between them. There is no reconnect path: once either half
//! fails, the session is over.

use thiserror::Error;
use tokio::io::{BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::info;

use matsum_core::{read_response, write_request, CodecError, Request, Response};

/// Errors establishing the connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// TCP dial to the summation service failed.
    #[error("failed to connect to summation service at {addr}: {source}")]
    Dial {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write side of the connection, owned by the command dispatcher.
pub struct FrameWriter {
    writer: BufWriter<OwnedWriteHalf>,
}

impl FrameWriter {
    /// Encodes and flushes one request frame.
    ///
    /// Blocks until every byte is flushed; a frame is never left half
    /// written on success.
    ///
    /// # Errors
    ///
    /// Propagates [`CodecError`]; any I/O failure here is connection-fatal
    /// for the session.
    pub async fn send(&mut self, request: &Request) -> Result<(), CodecError> {
        write_request(&mut self.writer, request).await
    }
}

/// Read side of the connection, owned by the response listener.
pub struct FrameReader {
    reader: BufReader<OwnedReadHalf>,
}

impl FrameReader {
    /// Decodes exactly one response frame, suspending until it arrives.
    ///
    /// # Errors
    ///
    /// [`CodecError::Io`] on transport failure or orderly close.
    pub async fn recv(&mut self) -> Result<Response, CodecError> {
        read_response(&mut self.reader).await
    }
}

/// Dials the service and hands out the two halves of the stream.
///
/// # Errors
///
/// [`ConnectionError::Dial`] when the TCP connection cannot be established.
pub async fn dial(addr: &str) -> Result<(FrameReader, FrameWriter), ConnectionError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| ConnectionError::Dial {
            addr: addr.to_string(),
            source,
        })?;
    info!("connected to summation service at {addr}");

    let (read_half, write_half) = stream.into_split();
    Ok((
        FrameReader {
            reader: BufReader::new(read_half),
        },
        FrameWriter {
            writer: BufWriter::new(write_half),
        },
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
