//! Error types emitted by the routediff CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use routediff_core::{ComputationAborted, MultiplierError, ParseTravelModeError, PointStoreError};
use routediff_data::RouterBuildError;
use thiserror::Error;

/// Errors emitted by the routediff CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can provide it.
        env: &'static str,
    },
    /// A point option is not a `lon,lat` pair of finite numbers.
    #[error("--{field} expects \"lon,lat\", got {value:?}")]
    InvalidPoint {
        /// Flag name of the point.
        field: &'static str,
        /// The rejected text.
        value: String,
    },
    /// The multiplier is negative or not finite.
    #[error(transparent)]
    InvalidMultiplier(#[from] MultiplierError),
    /// The travel mode is not one the router understands.
    #[error(transparent)]
    InvalidTravelMode(#[from] ParseTravelModeError),
    /// Constructing the `GraphHopper` router failed.
    #[error("failed to build router for {base_url:?}: {source}")]
    BuildRouter {
        /// Base URL the router was configured with.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: RouterBuildError,
    },
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A leg failed, so no comparison was produced.
    #[error("route comparison failed: {0}")]
    Routing(#[from] ComputationAborted),
    /// Opening the replay file failed.
    #[error("failed to open replay events at {path:?}: {source}")]
    OpenReplayEvents {
        /// Path to the replay file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Reading the replay file failed part-way.
    #[error("failed to read replay events at {path:?}: {source}")]
    ReadReplayEvents {
        /// Path to the replay file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// A replay line is not a valid event.
    #[error("invalid replay event at {path:?} line {line}: {source}")]
    ParseReplayEvent {
        /// Path to the replay file.
        path: Utf8PathBuf,
        /// One-based line number.
        line: usize,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A replayed move addressed a point that does not exist.
    #[error("replay line {line}: {source}")]
    ReplayMove {
        /// One-based line number.
        line: usize,
        /// Store rejection.
        #[source]
        source: PointStoreError,
    },
    /// A pass task panicked or was cancelled.
    #[error("routing pass did not complete: {0}")]
    PassTask(#[source] tokio::task::JoinError),
    /// Every pass aborted, so there is nothing to render.
    #[error("no pass produced a comparison")]
    NothingDisplayed,
    /// Serialising the comparison failed.
    #[error("failed to serialise comparison: {0}")]
    SerialiseComparison(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
