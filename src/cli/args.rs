//! Command-line argument parsing for the dockwire binary.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Follow the daemon's event feed (default)
    Events,
    /// Print the daemon's version information
    DaemonVersion,
    /// Print system-wide daemon information
    Info,
    /// Check that the daemon answers
    Ping,
    /// Print this tool's own version
    Version,
    /// Print usage
    Help,
    /// Unrecognized argument
    Unknown(String),
}

/// Usage text printed by `--help` and on unknown arguments.
pub const USAGE: &str = "\
Usage: dockwire [COMMAND]

Commands:
  events    Follow the daemon's event feed (default)
  version   Show the daemon's version
  info      Show daemon-wide information
  ping      Check that the daemon is reachable

Options:
  -h, --help     Print help
  -V, --version  Print dockwire's version

The daemon address is read from DOCKER_HOST (default http://127.0.0.1:4243).";

/// Parse command-line arguments and return the command to execute.
///
/// The first argument is the program name and is skipped. Only the first
/// remaining argument is considered.
///
/// # Examples
///
/// ```
/// use dockwire::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["dockwire".to_string(), "info".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Info);
/// ```
pub fn parse_args<I>(mut args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    match args.nth(1) {
        None => CliCommand::Events,
        Some(arg) => match arg.as_str() {
            "events" => CliCommand::Events,
            "version" => CliCommand::DaemonVersion,
            "info" => CliCommand::Info,
            "ping" => CliCommand::Ping,
            "--version" | "-V" => CliCommand::Version,
            "--help" | "-h" | "help" => CliCommand::Help,
            _ => CliCommand::Unknown(arg),
        },
    }
}
