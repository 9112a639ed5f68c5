//! # matsum-core
//!
//! Shared library for the matsum client containing the wire protocol codec
//! and the matrix domain type.
//!
//! The protocol is a stream of 4-byte big-endian words over one TCP
//! connection. Each frame starts with an opcode word that fixes the shape of
//! the payload that follows. There is no length prefix, so the codec is the
//! single place that knows how many words each frame occupies. Keeping those
//! counts exact is the crate's whole job: one miscounted word desynchronizes
//! the connection permanently.
//!
//! - **`protocol`** – the opcode table, typed `Request`/`Response` frames,
//!   and the codec that moves them across any tokio byte stream.
//! - **`domain`** – the row-major `Matrix` value type, stored exactly as
//!   transmitted.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `matsum_core::Request` instead of `matsum_core::protocol::frames::Request`.
pub use domain::matrix::{Matrix, MatrixError};
pub use protocol::codec::{
    read_request, read_response, write_request, write_response, CodecError,
};
pub use protocol::frames::{Opcode, Request, Response, WORD_SIZE};
