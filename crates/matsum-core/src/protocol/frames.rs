//! Typed frames for the matrix-summation wire protocol.
//!
//! Every field on the wire is one 4-byte big-endian word. A frame is an
//! opcode word followed by the payload words that opcode's schema dictates.
//! There is no length prefix, no checksum, and no version negotiation: the
//! schema table below is the only framing knowledge shared by both ends, so
//! reading one word too few or too many corrupts every later frame on the
//! connection.

use crate::domain::Matrix;

/// Number of bytes in one protocol word.
pub const WORD_SIZE: usize = 4;

/// Opcode word values for every frame the summation service defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Opcode {
    /// Client→server health check, no payload.
    Ping = 5,
    /// Server→client reply to [`Opcode::Ping`], no payload.
    Pong = 6,
    /// Client→server submission: size word, then two N×N matrices.
    SubmitPair = 7,
    /// Server→client acknowledgement carrying the assigned pair id.
    Stored = 8,
    /// Client→server request to start summing the pair with the given id.
    RequestSum = 9,
    /// Client→server poll for the sum of the pair with the given id.
    RequestStatus = 10,
    /// Server→client: no result exists yet for the polled id.
    Pending = 11,
    /// Server→client: id, size, then the N×N result matrix.
    Result = 12,
}

impl TryFrom<u32> for Opcode {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Opcode::Ping),
            6 => Ok(Opcode::Pong),
            7 => Ok(Opcode::SubmitPair),
            8 => Ok(Opcode::Stored),
            9 => Ok(Opcode::RequestSum),
            10 => Ok(Opcode::RequestStatus),
            11 => Ok(Opcode::Pending),
            12 => Ok(Opcode::Result),
            _ => Err(()),
        }
    }
}

/// One client→server frame.
///
/// The `SubmitPair` variant carries both matrices of one submission; the
/// shared size word is taken from matrix `a` at encode time, and the codec
/// refuses to encode a pair whose sizes differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Health check; the server answers asynchronously with a pong.
    Ping,
    /// Submit two equally-sized matrices for later summation.
    SubmitPair { a: Matrix, b: Matrix },
    /// Ask the server to start summing the stored pair `id`.
    Sum { id: u32 },
    /// Poll the calculation status of the stored pair `id`.
    Status { id: u32 },
}

impl Request {
    /// The opcode word this frame starts with.
    pub fn opcode(&self) -> Opcode {
        match self {
            Request::Ping => Opcode::Ping,
            Request::SubmitPair { .. } => Opcode::SubmitPair,
            Request::Sum { .. } => Opcode::RequestSum,
            Request::Status { .. } => Opcode::RequestStatus,
        }
    }

    /// Total words this frame occupies on the wire, opcode included.
    pub fn word_count(&self) -> usize {
        match self {
            Request::Ping => 1,
            Request::SubmitPair { a, b } => 2 + a.word_count() + b.word_count(),
            Request::Sum { .. } | Request::Status { .. } => 2,
        }
    }
}

/// One server→client frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Health-check reply.
    Pong,
    /// A submitted pair was stored under `id`.
    Stored { id: u32 },
    /// No calculation exists yet for `id`.
    Pending { id: u32 },
    /// The finished sum for `id`.
    Result { id: u32, matrix: Matrix },
    /// A frame whose opcode is not in the server→client schema table.
    ///
    /// No payload words were consumed: without a length field there is
    /// nothing to skip by, so if the sender actually transmitted a payload
    /// the stream is desynchronized from here on. Alignment is only
    /// preserved for genuinely zero-payload senders.
    Unknown(u32),
}

impl Response {
    /// The raw opcode word this frame started with.
    pub fn opcode_word(&self) -> u32 {
        match self {
            Response::Pong => Opcode::Pong as u32,
            Response::Stored { .. } => Opcode::Stored as u32,
            Response::Pending { .. } => Opcode::Pending as u32,
            Response::Result { .. } => Opcode::Result as u32,
            Response::Unknown(op) => *op,
        }
    }
}
