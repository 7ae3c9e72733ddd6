//! Replay command: drive a live comparison from a file of triggers.
//!
//! Each line of the events file is one JSON trigger, either a point move
//! `{"move": {"index": 1, "lon": 4.93, "lat": 45.72}}` or a multiplier change
//! `{"multiplier": 1.5}`. Triggers are applied in file order and each starts
//! its own pass, so passes overlap exactly as they would under a user
//! dragging markers. Only the newest pass may end up displayed.

use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routediff_core::{
    ComparisonSession, ComputationAborted, DisplayedComparison, LegRouter, Multiplier,
    PassOutcome, PointStore, RouteAggregator,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::render::write_comparison;
use crate::settings::{
    ComparisonConfig, ComparisonOptions, GraphHopperRouterFactory, OutputFormat, RouterFactory,
};
use crate::{
    ARG_FORMAT, ARG_GRAPHHOPPER_URL, ARG_MULTIPLIER, ARG_POINT_A, ARG_POINT_B, ARG_POINT_O,
    ARG_POINT_V, ARG_REPLAY_EVENTS, ARG_TRAVEL_MODE, CliError, ENV_REPLAY_EVENTS, build_runtime,
};

/// Line number reported for the pass over the starting points.
pub(crate) const INITIAL_PASS_LINE: usize = 0;

/// CLI arguments for the `replay` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Start from the configured points, then apply each trigger \
                 of a JSON-lines file (point moves and multiplier changes), \
                 running one concurrent pass per trigger. Once every pass \
                 has settled the displayed comparison is printed.",
    about = "Replay point moves and multiplier changes"
)]
#[ortho_config(prefix = "ROUTEDIFF")]
pub(crate) struct ReplayArgs {
    /// Path to a JSON-lines file of triggers.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) events_path: Option<Utf8PathBuf>,
    /// Origin O as lon,lat.
    #[arg(long = ARG_POINT_O, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) o: Option<String>,
    /// Waypoint V as lon,lat.
    #[arg(long = ARG_POINT_V, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) v: Option<String>,
    /// Destination B as lon,lat.
    #[arg(long = ARG_POINT_B, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) b: Option<String>,
    /// Waypoint A as lon,lat.
    #[arg(long = ARG_POINT_A, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) a: Option<String>,
    /// Starting weight applied to the OVBA distance (default 1.0).
    #[arg(long = ARG_MULTIPLIER, value_name = "factor")]
    #[serde(default)]
    pub(crate) multiplier: Option<f64>,
    /// Base URL for the `GraphHopper` server (e.g. `http://localhost:8989`).
    #[arg(long = ARG_GRAPHHOPPER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) graphhopper_url: Option<String>,
    /// Travel mode: car, bike or foot.
    #[arg(long = ARG_TRAVEL_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) travel_mode: Option<String>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl ReplayArgs {
    pub(crate) fn into_config(self) -> Result<ReplayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReplayConfig::try_from(merged)
    }
}

/// Resolved `replay` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReplayConfig {
    /// Path to the JSON-lines trigger file.
    pub(crate) events_path: Utf8PathBuf,
    /// Starting points, multiplier and routing settings.
    pub(crate) comparison: ComparisonConfig,
}

impl TryFrom<ReplayArgs> for ReplayConfig {
    type Error = CliError;

    fn try_from(args: ReplayArgs) -> Result<Self, Self::Error> {
        let events_path = args.events_path.ok_or(CliError::MissingArgument {
            field: ARG_REPLAY_EVENTS,
            env: ENV_REPLAY_EVENTS,
        })?;
        let comparison = ComparisonConfig::try_from(ComparisonOptions {
            o: args.o,
            v: args.v,
            b: args.b,
            a: args.a,
            multiplier: args.multiplier,
            graphhopper_url: args.graphhopper_url,
            travel_mode: args.travel_mode,
            format: args.format,
        })?;
        Ok(Self {
            events_path,
            comparison,
        })
    }
}

/// One trigger from the events file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReplayEvent {
    /// Drag the point at `index` to a new position.
    Move(MoveEvent),
    /// Change the OVBA weight.
    Multiplier(Multiplier),
}

/// Payload of a point move.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MoveEvent {
    pub(crate) index: usize,
    pub(crate) lon: f64,
    pub(crate) lat: f64,
}

/// A trigger with its one-based line number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ReplayTrigger {
    pub(crate) line: usize,
    pub(crate) event: ReplayEvent,
}

/// Outcome of the pass a trigger started.
#[derive(Debug)]
pub(crate) struct ReplayStep {
    /// Line of the trigger, or [`INITIAL_PASS_LINE`] for the starting pass.
    pub(crate) line: usize,
    pub(crate) outcome: Result<PassOutcome, ComputationAborted>,
}

/// Every pass outcome plus the comparison left on display.
#[derive(Debug)]
pub(crate) struct ReplayReport {
    pub(crate) steps: Vec<ReplayStep>,
    pub(crate) displayed: DisplayedComparison,
}

/// How the passes of a replay ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReplayTally {
    pub(crate) applied: usize,
    pub(crate) superseded: usize,
    /// Trigger lines whose pass aborted.
    pub(crate) aborted_lines: Vec<usize>,
}

impl ReplayReport {
    pub(crate) fn tally(&self) -> ReplayTally {
        self.steps
            .iter()
            .fold(ReplayTally::default(), |mut tally, step| {
                match step.outcome {
                    Ok(PassOutcome::Applied { .. }) => {
                        tally.applied = tally.applied.saturating_add(1);
                    }
                    Ok(PassOutcome::Superseded { .. }) => {
                        tally.superseded = tally.superseded.saturating_add(1);
                    }
                    Err(_) => tally.aborted_lines.push(step.line),
                }
                tally
            })
    }
}

pub(crate) fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_replay_with(args, &GraphHopperRouterFactory, &mut stdout)
}

pub(crate) fn run_replay_with(
    args: ReplayArgs,
    factory: &dyn RouterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_replay(&config, factory)?;
    let tally = report.tally();
    log::info!(
        "{} passes displayed, {} superseded, {} aborted",
        tally.applied,
        tally.superseded,
        tally.aborted_lines.len()
    );
    if !tally.aborted_lines.is_empty() {
        log::warn!("passes aborted for lines {:?}", tally.aborted_lines);
    }
    write_comparison(writer, &report.displayed.comparison, config.comparison.format)
}

/// Load the triggers and replay them against a fresh session.
pub(crate) fn execute_replay(
    config: &ReplayConfig,
    factory: &dyn RouterFactory,
) -> Result<ReplayReport, CliError> {
    let triggers = load_events(&config.events_path)?;
    let router = factory.build(&config.comparison)?;
    let session = ComparisonSession::with_store(
        PointStore::new(config.comparison.snapshot.points()),
        RouteAggregator::with_mode(router, config.comparison.travel_mode),
    );
    session.store_multiplier(config.comparison.multiplier);
    log::info!(
        "replaying {} triggers from {}",
        triggers.len(),
        config.events_path
    );
    let runtime = build_runtime()?;
    runtime.block_on(replay_triggers(Arc::new(session), triggers))
}

/// Read a JSON-lines trigger file, skipping blank lines.
pub(crate) fn load_events(path: &Utf8Path) -> Result<Vec<ReplayTrigger>, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenReplayEvents {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut triggers = Vec::new();
    for (offset, line) in BufReader::new(file).lines().enumerate() {
        let text = line.map_err(|source| CliError::ReadReplayEvents {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            continue;
        }
        let number = offset.saturating_add(1);
        let event = serde_json::from_str(&text).map_err(|source| CliError::ParseReplayEvent {
            path: path.to_path_buf(),
            line: number,
            source,
        })?;
        triggers.push(ReplayTrigger {
            line: number,
            event,
        });
    }
    Ok(triggers)
}

/// Apply every trigger in order, each followed by a concurrent pass.
///
/// A pass over the starting points runs first. Writes happen on the calling
/// task before the pass is spawned, so every pass sees all earlier triggers.
pub(crate) async fn replay_triggers<R>(
    session: Arc<ComparisonSession<R>>,
    triggers: Vec<ReplayTrigger>,
) -> Result<ReplayReport, CliError>
where
    R: LegRouter + 'static,
{
    let mut pending = Vec::with_capacity(triggers.len().saturating_add(1));
    pending.push((INITIAL_PASS_LINE, spawn_pass(&session)));
    for ReplayTrigger { line, event } in triggers {
        match event {
            ReplayEvent::Move(MoveEvent { index, lon, lat }) => session
                .store()
                .set(index, Coord { x: lon, y: lat })
                .map_err(|source| CliError::ReplayMove { line, source })?,
            ReplayEvent::Multiplier(multiplier) => session.store_multiplier(multiplier),
        }
        pending.push((line, spawn_pass(&session)));
    }

    let mut steps = Vec::with_capacity(pending.len());
    for (line, handle) in pending {
        let outcome = handle.await.map_err(CliError::PassTask)?;
        log_step(line, &outcome);
        steps.push(ReplayStep { line, outcome });
    }
    let displayed = session.board().current().ok_or(CliError::NothingDisplayed)?;
    Ok(ReplayReport { steps, displayed })
}

fn spawn_pass<R>(
    session: &Arc<ComparisonSession<R>>,
) -> JoinHandle<Result<PassOutcome, ComputationAborted>>
where
    R: LegRouter + 'static,
{
    let ticket = session.begin_pass();
    let pass_session = Arc::clone(session);
    tokio::spawn(async move { pass_session.run_pass(ticket).await })
}

fn log_step(line: usize, outcome: &Result<PassOutcome, ComputationAborted>) {
    match outcome {
        Ok(PassOutcome::Applied { token }) => {
            log::info!("line {line}: pass {} displayed", token.sequence());
        }
        Ok(PassOutcome::Superseded { token, latest }) => log::info!(
            "line {line}: pass {} dropped, pass {} is newer",
            token.sequence(),
            latest.sequence()
        ),
        Err(err) => log::warn!("line {line}: {err}"),
    }
}
