//! Protocol module containing frame types and the word-level codec.

pub mod codec;
pub mod frames;

pub use codec::{read_request, read_response, write_request, write_response, CodecError};
pub use frames::{Opcode, Request, Response, WORD_SIZE};
