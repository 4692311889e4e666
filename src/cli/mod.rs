//! CLI module for dockwire.
//!
//! This module provides the command-line front end:
//! - Argument parsing
//! - Following the event feed
//! - Printing daemon version and system information
//!
//! # Usage
//!
//! ```ignore
//! use dockwire::cli::{parse_args, run_cli_command, run_local_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_local_command(&command, &mut std::io::stdout()) {
//!     return result;
//! }
//! let client = DockerClient::from_env()?;
//! run_cli_command(&command, &client, &mut std::io::stdout(), shutdown).await
//! ```

pub mod args;
pub mod output;

pub use args::{parse_args, CliCommand, USAGE};
pub use output::{format_event, print_event};

use std::future::Future;
use std::io::Write;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::client::DockerClient;

/// The current version of dockwire, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a command that needs no daemon.
///
/// # Returns
///
/// * `None` - If the command talks to the daemon
/// * `Some(Ok(()))` - If the command ran
/// * `Some(Err(e))` - If the arguments were not understood
pub fn run_local_command<W: Write>(command: &CliCommand, out: &mut W) -> Option<Result<()>> {
    match command {
        CliCommand::Version => Some(writeln!(out, "dockwire {}", VERSION).map_err(Into::into)),
        CliCommand::Help => Some(writeln!(out, "{}", USAGE).map_err(Into::into)),
        CliCommand::Unknown(arg) => Some(Err(eyre!("unknown argument '{}'\n\n{}", arg, USAGE))),
        CliCommand::Events | CliCommand::DaemonVersion | CliCommand::Info | CliCommand::Ping => {
            None
        }
    }
}

/// Run a command against the daemon.
///
/// `shutdown` only matters for [`CliCommand::Events`]: when it completes the
/// event stream is closed.
pub async fn run_cli_command<W, F>(
    command: &CliCommand,
    client: &DockerClient,
    out: &mut W,
    shutdown: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    match command {
        CliCommand::Events => follow_events(client, out, shutdown).await,
        CliCommand::DaemonVersion => print_json(out, &client.version().await?),
        CliCommand::Info => print_json(out, &client.info().await?),
        CliCommand::Ping => {
            client.ping().await?;
            writeln!(out, "OK")?;
            Ok(())
        }
        other => Err(eyre!("'{:?}' does not talk to the daemon", other)),
    }
}

/// Print events until the daemon ends the feed or `shutdown` completes.
///
/// A feed ended by `shutdown` or cleanly by the daemon is a success; any
/// other ending is returned as an error.
pub async fn follow_events<W, F>(client: &DockerClient, out: &mut W, shutdown: F) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    let mut stream = client.events().await?;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = stream.recv() => match event {
                Some(event) => print_event(out, &event)?,
                None => break,
            },
            _ = &mut shutdown => {
                stream.close();
                break;
            }
        }
    }

    match stream.closed().await {
        None => {
            info!("Daemon ended the event stream");
            Ok(())
        }
        Some(err) if err.is_closed_by_consumer() => Ok(()),
        Some(err) => {
            warn!(code = err.error_code(), "Event stream failed: {}", err);
            Err(err.into())
        }
    }
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
