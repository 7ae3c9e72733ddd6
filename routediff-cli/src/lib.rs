//! Command-line interface for comparing the OVBA and OBAB route orderings.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod compare;
mod error;
mod logging;
mod render;
mod replay;
mod settings;

pub use error::CliError;
pub use logging::init_logging;

use compare::{CompareArgs, run_compare};
use replay::{ReplayArgs, run_replay};

pub(crate) const ARG_POINT_O: &str = "o";
pub(crate) const ARG_POINT_V: &str = "v";
pub(crate) const ARG_POINT_B: &str = "b";
pub(crate) const ARG_POINT_A: &str = "a";
pub(crate) const ARG_MULTIPLIER: &str = "multiplier";
pub(crate) const ARG_GRAPHHOPPER_URL: &str = "graphhopper-url";
pub(crate) const ARG_TRAVEL_MODE: &str = "travel-mode";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_REPLAY_EVENTS: &str = "events";
pub(crate) const ENV_REPLAY_EVENTS: &str = "ROUTEDIFF_CMDS_REPLAY_EVENTS_PATH";

/// Run the routediff CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, routing or
/// output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Replay(args) => run_replay(args),
    }
}

/// Build the multi-threaded runtime the routing passes run on.
pub(crate) fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

#[derive(Debug, Parser)]
#[command(
    name = "routediff",
    about = "Compare the OVBA and OBAB road routes between four points",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Route both orderings once and print the comparison.
    Compare(CompareArgs),
    /// Replay a file of point moves and multiplier changes.
    Replay(ReplayArgs),
}

#[cfg(test)]
mod tests;
