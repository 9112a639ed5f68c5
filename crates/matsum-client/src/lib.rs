//! matsum-client library entry point.
//!
//! Re-exports the client's modules so that integration tests in `tests/`
//! and the binary in `main.rs` share the same module tree.
//!
//! The client is the interactive half of a request/response exchange with a
//! remote matrix-summation service over one long-lived TCP connection:
//!
//! 1. `connection` dials once and splits the stream into an exclusively
//!    owned write half (commands) and read half (replies).
//! 2. `listener` runs for the connection's lifetime, decoding one inbound
//!    frame per iteration and forwarding it to the coordinator.
//! 3. `commands` turns operator lines into frames and writes them
//!    synchronously, never waiting for the reply.
//! 4. `render` turns decoded replies into console lines, including the
//!    size cutoff for result matrices.

pub mod commands;
pub mod config;
pub mod connection;
pub mod generate;
pub mod listener;
pub mod render;
