//! Matrix-summation client entry point.
//!
//! Wires together the configuration, the single TCP connection, the
//! background response listener, and the operator command loop, then runs
//! the Tokio event loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ config::load_config()   -- TOML with per-field defaults
//!  └─ connection::dial()      -- one TCP connection, split into halves
//!  └─ listener::spawn()       -- decodes inbound frames, emits SessionEvents
//!  └─ command loop (select!)
//!       ├─ stdin line   -> Command::parse -> commands::dispatch (write half)
//!       ├─ SessionEvent -> render::print  (decoded by the listener)
//!       └─ Ctrl-C       -> orderly shutdown
//! ```
//!
//! Failure policy is fail-fast: a dial, write, flush, or read failure ends
//! the session with a printed diagnostic and a nonzero exit. The listener
//! never exits the process itself; it reports a terminal event and the
//! coordinator here tears both halves down.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use matsum_client::commands::{self, Command};
use matsum_client::listener::{self, SessionEvent};
use matsum_client::{config, connection, render};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging; level overridden by RUST_LOG. Protocol events go
    // to stdout as plain lines, diagnostics go through tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::load_config().context("loading configuration")?;
    let addr = config.network.addr();

    // Dial failure is fatal before any command can be issued.
    let (reader, mut writer) = connection::dial(&addr).await?;

    println!("{}", render::banner());

    let (mut events, listener_handle) = listener::spawn(reader);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut session_error: Option<anyhow::Error> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match Command::parse(&line) {
                    Ok(command) => {
                        if let Err(err) = commands::dispatch(command, &mut writer, &config).await {
                            session_error =
                                Some(anyhow::Error::new(err).context("writing command frame"));
                            break;
                        }
                    }
                    // Local input errors: report and keep the loop alive.
                    Err(err) => println!("{err}"),
                },
                Ok(None) => {
                    info!("operator input closed; ending session");
                    break;
                }
                Err(err) => {
                    session_error =
                        Some(anyhow::Error::new(err).context("reading operator input"));
                    break;
                }
            },
            event = events.recv() => match event {
                Some(SessionEvent::Response(response)) => {
                    render::print(&response, config.display.max_printed_size);
                }
                Some(SessionEvent::ConnectionLost(err)) => {
                    session_error = Some(
                        anyhow::Error::new(err)
                            .context("connection to the summation service lost"),
                    );
                    break;
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    // Orderly teardown: close the write half first, then stop the listener.
    drop(writer);
    listener_handle.abort();

    match session_error {
        Some(err) => Err(err),
        None => {
            info!("session ended");
            Ok(())
        }
    }
}
