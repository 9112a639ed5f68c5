//! Word-level codec for protocol frames.
//!
//! All I/O goes through tokio's big-endian helpers (`read_u32`/`write_u32`),
//! four bytes at a time. Encoding writes every word of a frame and flushes
//! before returning, so a partially written frame is never observable to the
//! caller. Decoding reads the opcode word, then exactly the payload words
//! that opcode's schema dictates; the reader must not be touched by anyone
//! else while a decode is in flight.
//!
//! Both directions are implemented even though the client only sends
//! requests and receives responses: the opposite pair lets tests stand up an
//! in-process peer speaking the same wire format.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::domain::{Matrix, MatrixError};
use crate::protocol::frames::{Opcode, Request, Response};

/// Errors from encoding or decoding frames.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Transport failure or close while reading or writing words.
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An inbound client→server frame carried an opcode outside the table.
    #[error("unknown request opcode: {0}")]
    UnknownRequestOpcode(u32),

    /// The two matrices of a submission differ in size.
    #[error("matrix pair sizes differ: {a} vs {b}")]
    PairSizeMismatch { a: u32, b: u32 },

    /// A decoded payload failed matrix dimension checks.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

// ── Client→server direction ───────────────────────────────────────────────────

/// Encodes one [`Request`] onto `writer` and flushes it.
///
/// # Errors
///
/// [`CodecError::PairSizeMismatch`] if a submission's matrices disagree on
/// size (nothing is written), or [`CodecError::Io`] on transport failure.
pub async fn write_request<W>(writer: &mut W, request: &Request) -> Result<(), CodecError>
where
    W: AsyncWrite + Unpin,
{
    match request {
        Request::Ping => {
            writer.write_u32(Opcode::Ping as u32).await?;
        }
        Request::SubmitPair { a, b } => {
            if a.size() != b.size() {
                return Err(CodecError::PairSizeMismatch {
                    a: a.size(),
                    b: b.size(),
                });
            }
            writer.write_u32(Opcode::SubmitPair as u32).await?;
            writer.write_u32(a.size()).await?;
            for &word in a.words() {
                writer.write_u32(word).await?;
            }
            for &word in b.words() {
                writer.write_u32(word).await?;
            }
        }
        Request::Sum { id } => {
            writer.write_u32(Opcode::RequestSum as u32).await?;
            writer.write_u32(*id).await?;
        }
        Request::Status { id } => {
            writer.write_u32(Opcode::RequestStatus as u32).await?;
            writer.write_u32(*id).await?;
        }
    }
    writer.flush().await?;
    trace!(opcode = request.opcode() as u32, "request frame written");
    Ok(())
}

/// Decodes one [`Request`] from `reader`.
///
/// Suspends until each word arrives. Used by in-process test peers; a real
/// client never decodes this direction.
///
/// # Errors
///
/// [`CodecError::UnknownRequestOpcode`] for an opcode outside the
/// client→server table, or [`CodecError::Io`] on transport failure or close.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, CodecError>
where
    R: AsyncRead + Unpin,
{
    let opcode = reader.read_u32().await?;
    match Opcode::try_from(opcode) {
        Ok(Opcode::Ping) => Ok(Request::Ping),
        Ok(Opcode::SubmitPair) => {
            let size = reader.read_u32().await?;
            let a = read_matrix_body(reader, size).await?;
            let b = read_matrix_body(reader, size).await?;
            Ok(Request::SubmitPair { a, b })
        }
        Ok(Opcode::RequestSum) => Ok(Request::Sum {
            id: reader.read_u32().await?,
        }),
        Ok(Opcode::RequestStatus) => Ok(Request::Status {
            id: reader.read_u32().await?,
        }),
        _ => Err(CodecError::UnknownRequestOpcode(opcode)),
    }
}

// ── Server→client direction ───────────────────────────────────────────────────

/// Encodes one [`Response`] onto `writer` and flushes it.
///
/// [`Response::Unknown`] encodes as its bare opcode word, the zero-payload
/// rendition a client can still stay aligned after.
///
/// # Errors
///
/// [`CodecError::Io`] on transport failure.
pub async fn write_response<W>(writer: &mut W, response: &Response) -> Result<(), CodecError>
where
    W: AsyncWrite + Unpin,
{
    match response {
        Response::Pong => {
            writer.write_u32(Opcode::Pong as u32).await?;
        }
        Response::Stored { id } => {
            writer.write_u32(Opcode::Stored as u32).await?;
            writer.write_u32(*id).await?;
        }
        Response::Pending { id } => {
            writer.write_u32(Opcode::Pending as u32).await?;
            writer.write_u32(*id).await?;
        }
        Response::Result { id, matrix } => {
            writer.write_u32(Opcode::Result as u32).await?;
            writer.write_u32(*id).await?;
            writer.write_u32(matrix.size()).await?;
            for &word in matrix.words() {
                writer.write_u32(word).await?;
            }
        }
        Response::Unknown(op) => {
            writer.write_u32(*op).await?;
        }
    }
    writer.flush().await?;
    Ok(())
}

/// Decodes one [`Response`] from `reader`.
///
/// Suspends until each word arrives; a connection error or orderly close
/// surfaces as [`CodecError::Io`]. A `result` frame's matrix is read in full
/// here regardless of whether the caller will display it; consuming the
/// payload is what keeps the stream aligned for the next frame.
///
/// An opcode outside the server→client table (including the client→server
/// opcodes 5, 7, 9, 10) yields [`Response::Unknown`] with no payload words
/// consumed; see that variant for the desynchronization caveat.
pub async fn read_response<R>(reader: &mut R) -> Result<Response, CodecError>
where
    R: AsyncRead + Unpin,
{
    let opcode = reader.read_u32().await?;
    let response = match Opcode::try_from(opcode) {
        Ok(Opcode::Pong) => Response::Pong,
        Ok(Opcode::Stored) => Response::Stored {
            id: reader.read_u32().await?,
        },
        Ok(Opcode::Pending) => Response::Pending {
            id: reader.read_u32().await?,
        },
        Ok(Opcode::Result) => {
            let id = reader.read_u32().await?;
            let size = reader.read_u32().await?;
            let matrix = read_matrix_body(reader, size).await?;
            Response::Result { id, matrix }
        }
        _ => Response::Unknown(opcode),
    };
    trace!(opcode = response.opcode_word(), "response frame decoded");
    Ok(response)
}

/// Reads the N² value words of a matrix whose size word was already consumed.
async fn read_matrix_body<R>(reader: &mut R, size: u32) -> Result<Matrix, CodecError>
where
    R: AsyncRead + Unpin,
{
    let count = (size as usize) * (size as usize);
    let mut words = Vec::with_capacity(count);
    for _ in 0..count {
        words.push(reader.read_u32().await?);
    }
    Ok(Matrix::from_words(size, words)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
