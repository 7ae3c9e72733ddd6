//! Comparison settings shared by the `compare` and `replay` subcommands.

use std::sync::Arc;

use clap::ValueEnum;
use geo::Coord;
use routediff_core::{LegRouter, Multiplier, Point, PointRole, Snapshot, TravelMode};
use routediff_data::{HttpLegRouter, HttpLegRouterConfig};
use serde::{Deserialize, Serialize};

use crate::{ARG_POINT_A, ARG_POINT_B, ARG_POINT_O, ARG_POINT_V, CliError};

/// How the comparison is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// The three distance lines.
    #[default]
    Text,
    /// The whole comparison as pretty-printed JSON.
    Json,
}

/// Layered option values before validation.
#[derive(Debug, Clone, Default)]
pub(crate) struct ComparisonOptions {
    pub(crate) o: Option<String>,
    pub(crate) v: Option<String>,
    pub(crate) b: Option<String>,
    pub(crate) a: Option<String>,
    pub(crate) multiplier: Option<f64>,
    pub(crate) graphhopper_url: Option<String>,
    pub(crate) travel_mode: Option<String>,
    pub(crate) format: Option<OutputFormat>,
}

/// Validated settings for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComparisonConfig {
    /// Starting positions of O, V, B and A.
    pub(crate) snapshot: Snapshot,
    /// Weight applied to the OVBA distance.
    pub(crate) multiplier: Multiplier,
    /// Base URL of the `GraphHopper` service.
    pub(crate) graphhopper_url: String,
    /// Travel mode sent with every leg request.
    pub(crate) travel_mode: TravelMode,
    /// Output rendering.
    pub(crate) format: OutputFormat,
}

impl TryFrom<ComparisonOptions> for ComparisonConfig {
    type Error = CliError;

    fn try_from(options: ComparisonOptions) -> Result<Self, Self::Error> {
        let defaults = Snapshot::default();
        let resolve = |value: Option<String>, field: &'static str, role: PointRole| {
            value
                .map(|text| parse_point(field, &text))
                .transpose()
                .map(|point| point.unwrap_or_else(|| defaults.point(role)))
        };
        let snapshot = Snapshot::new([
            resolve(options.o, ARG_POINT_O, PointRole::O)?,
            resolve(options.v, ARG_POINT_V, PointRole::V)?,
            resolve(options.b, ARG_POINT_B, PointRole::B)?,
            resolve(options.a, ARG_POINT_A, PointRole::A)?,
        ]);
        let multiplier = options
            .multiplier
            .map(Multiplier::new)
            .transpose()?
            .unwrap_or_default();
        let travel_mode = options
            .travel_mode
            .as_deref()
            .map(str::parse::<TravelMode>)
            .transpose()?
            .unwrap_or_default();
        let graphhopper_url = options
            .graphhopper_url
            .unwrap_or_else(|| HttpLegRouterConfig::default().base_url);
        Ok(Self {
            snapshot,
            multiplier,
            graphhopper_url,
            travel_mode,
            format: options.format.unwrap_or_default(),
        })
    }
}

/// Parse a `lon,lat` pair.
pub(crate) fn parse_point(field: &'static str, text: &str) -> Result<Point, CliError> {
    let invalid = || CliError::InvalidPoint {
        field,
        value: text.to_owned(),
    };
    let (lon, lat) = text.split_once(',').ok_or_else(invalid)?;
    let x: f64 = lon.trim().parse().map_err(|_| invalid())?;
    let y: f64 = lat.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Coord { x, y })
}

/// Builds the leg router for a run.
pub(crate) trait RouterFactory {
    fn build(&self, config: &ComparisonConfig) -> Result<Arc<dyn LegRouter>, CliError>;
}

/// Routes every leg through `GraphHopper`.
pub(crate) struct GraphHopperRouterFactory;

impl RouterFactory for GraphHopperRouterFactory {
    fn build(&self, config: &ComparisonConfig) -> Result<Arc<dyn LegRouter>, CliError> {
        let router = HttpLegRouter::with_config(HttpLegRouterConfig::new(
            config.graphhopper_url.clone(),
        ))
        .map_err(|source| CliError::BuildRouter {
            base_url: config.graphhopper_url.clone(),
            source,
        })?;
        Ok(Arc::new(router))
    }
}
