//! Parsing and dispatch of operator commands.
//!
//! A command line either parses into a [`Command`] or fails locally with a
//! diagnostic; a line that fails to parse never reaches the socket. Each
//! dispatched command is written and flushed in full before the next one is
//! accepted, but no command ever waits for the server's reply: replies
//! arrive asynchronously through the response listener, correlated only by
//! the pair id the server announced.

use thiserror::Error;
use tracing::debug;

use matsum_core::{CodecError, Request};

use crate::config::Config;
use crate::connection::FrameWriter;
use crate::generate;

/// A parsed operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `ping`: health check.
    Ping,
    /// `send_<N>`: generate and submit a random N×N matrix pair.
    Send { size: u32 },
    /// `sum <id>`: trigger summation of a stored pair.
    Sum { id: u32 },
    /// `status <id>`: poll for the sum of a stored pair.
    Status { id: u32 },
}

/// Local command errors; their `Display` text is the operator diagnostic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command.")]
    Unknown,
    #[error("Invalid id.")]
    InvalidId,
    #[error("Invalid size.")]
    InvalidSize,
}

impl Command {
    /// Parses one line of operator input.
    ///
    /// # Errors
    ///
    /// [`CommandError`] describing the local diagnostic to print; nothing is
    /// written to the socket for a line that fails to parse.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut parts = line.split_whitespace();
        let head = parts.next().unwrap_or("");

        match head {
            "ping" => Ok(Command::Ping),
            "sum" => parse_id(parts.next()).map(|id| Command::Sum { id }),
            "status" => parse_id(parts.next()).map(|id| Command::Status { id }),
            _ => {
                if let Some(size_text) = head.strip_prefix("send_") {
                    return parse_size(size_text).map(|size| Command::Send { size });
                }
                Err(CommandError::Unknown)
            }
        }
    }
}

fn parse_id(token: Option<&str>) -> Result<u32, CommandError> {
    token
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or(CommandError::InvalidId)
}

/// Parses the `<N>` of `send_<N>`. A trailing `k` multiplies by 1000, so
/// `send_10k` submits a 10000×10000 pair.
fn parse_size(token: &str) -> Result<u32, CommandError> {
    let (digits, multiplier) = match token.strip_suffix(['k', 'K']) {
        Some(d) => (d, 1000u32),
        None => (token, 1u32),
    };
    digits
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or(CommandError::InvalidSize)
}

/// Encodes `command` as a frame and writes it through the dispatcher's half
/// of the connection, printing the operator feedback lines.
///
/// # Errors
///
/// Propagates [`CodecError`]; a write or flush failure here is
/// connection-fatal for the session.
pub async fn dispatch(
    command: Command,
    writer: &mut FrameWriter,
    config: &Config,
) -> Result<(), CodecError> {
    debug!(?command, "dispatching command");
    match command {
        Command::Ping => {
            writer.send(&Request::Ping).await?;
            println!("> ping sent");
        }
        Command::Send { size } => {
            let (a, b) = generate::random_pair(size, config.generator.range());
            println!("> matrices generated");
            writer.send(&Request::SubmitPair { a, b }).await?;
            println!("> matrices sent");
        }
        Command::Sum { id } => {
            println!("> summing matrices with id: {id}");
            writer.send(&Request::Sum { id }).await?;
        }
        Command::Status { id } => {
            println!("> getting matrix status for id: {id}");
            writer.send(&Request::Status { id }).await?;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
