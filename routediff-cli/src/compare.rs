//! Compare command implementation for the routediff CLI.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routediff_core::{Comparison, RouteAggregator};
use serde::{Deserialize, Serialize};

use crate::render::write_comparison;
use crate::settings::{
    ComparisonConfig, ComparisonOptions, GraphHopperRouterFactory, OutputFormat, RouterFactory,
};
use crate::{
    ARG_FORMAT, ARG_GRAPHHOPPER_URL, ARG_MULTIPLIER, ARG_POINT_A, ARG_POINT_B, ARG_POINT_O,
    ARG_POINT_V, ARG_TRAVEL_MODE, CliError, build_runtime,
};

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Route the OVBA (O, A, V, B) and OBAB (O, V, A, B) orderings \
                 through GraphHopper and print both distances together with \
                 OBAB - multiplier × OVBA. Points default to the Lyon \
                 sample and are given as lon,lat.",
    about = "Compare the two orderings once"
)]
#[ortho_config(prefix = "ROUTEDIFF")]
pub(crate) struct CompareArgs {
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
    /// Weight applied to the OVBA distance (default 1.0).
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

impl CompareArgs {
    pub(crate) fn into_config(self) -> Result<ComparisonConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ComparisonConfig::try_from(ComparisonOptions::from(merged))
    }
}

impl From<CompareArgs> for ComparisonOptions {
    fn from(args: CompareArgs) -> Self {
        Self {
            o: args.o,
            v: args.v,
            b: args.b,
            a: args.a,
            multiplier: args.multiplier,
            graphhopper_url: args.graphhopper_url,
            travel_mode: args.travel_mode,
            format: args.format,
        }
    }
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_compare_with(args, &GraphHopperRouterFactory, &mut stdout)
}

pub(crate) fn run_compare_with(
    args: CompareArgs,
    factory: &dyn RouterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let comparison = execute_compare(&config, factory)?;
    write_comparison(writer, &comparison, config.format)
}

/// Route both orderings once for `config`.
pub(crate) fn execute_compare(
    config: &ComparisonConfig,
    factory: &dyn RouterFactory,
) -> Result<Comparison, CliError> {
    let router = factory.build(config)?;
    let aggregator = RouteAggregator::with_mode(router, config.travel_mode);
    let runtime = build_runtime()?;
    log::info!(
        "routing both orderings via {} ({})",
        config.graphhopper_url,
        config.travel_mode
    );
    let comparison =
        runtime.block_on(aggregator.compute_routes(&config.snapshot, config.multiplier))?;
    Ok(comparison)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ComparisonConfig, CliError> {
    let merged = CompareArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ComparisonConfig::try_from(ComparisonOptions::from(merged))
}
