//! Unit tests for the `compare` subcommand.

use super::helpers::{StubRouterFactory, default_config};
use super::*;
use crate::compare::{CompareArgs, config_from_layers_for_test, execute_compare, run_compare_with};
use crate::settings::{ComparisonConfig, OutputFormat};
use geo::Coord;
use ortho_config::MergeComposer;
use rstest::rstest;
use routediff_core::test_support::StubLegRouter;
use routediff_core::{LegRouteError, Ordering, PointRole, Snapshot, TravelMode};
use serde_json::json;

#[rstest]
fn compare_routes_six_legs_with_the_configured_mode() {
    let factory = StubRouterFactory::new(StubLegRouter::straight_lines(250.0));
    let config = ComparisonConfig {
        travel_mode: TravelMode::Bike,
        ..default_config()
    };

    let comparison = execute_compare(&config, &factory).expect("comparison should succeed");

    let requests = factory.router().requests();
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().all(|(_, mode)| *mode == TravelMode::Bike));
    assert_eq!(comparison.ovba().distance_m(), 750.0);
    assert_eq!(comparison.obab().distance_m(), 750.0);
    assert_eq!(comparison.differential_m(), 0.0);
}

#[rstest]
fn compare_reports_a_failed_leg() {
    let [first, _, _] = Ordering::Ovba.legs(&Snapshot::default());
    let factory = StubRouterFactory::new(
        StubLegRouter::straight_lines(250.0).with_failure(first, LegRouteError::NoRoute),
    );

    let err = execute_compare(&default_config(), &factory).expect_err("leg failure should abort");
    match err {
        CliError::Routing(aborted) => {
            assert_eq!(aborted.ordering, Ordering::Ovba);
            assert_eq!(aborted.source, LegRouteError::NoRoute);
        }
        other => panic!("expected Routing, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "multiplier": "lots" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "graphhopper_url": "http://from-file:8989",
            "multiplier": 2.0,
            "travel_mode": "foot",
        }),
        None,
    );
    composer.push_environment(json!({
        "multiplier": 3.0,
        "travel_mode": "bike",
    }));
    composer.push_cli(json!({
        "o": "4.90,45.70",
        "format": "json",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.graphhopper_url, "http://from-file:8989");
    assert_eq!(config.multiplier.get(), 3.0);
    assert_eq!(config.travel_mode, TravelMode::Bike);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(
        config.snapshot.point(PointRole::O),
        Coord { x: 4.90, y: 45.70 }
    );
    assert_eq!(
        config.snapshot.point(PointRole::V),
        Snapshot::default().point(PointRole::V)
    );
}

#[rstest]
fn merge_layers_validates_points() {
    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "a": "not-a-point" }));

    let err = config_from_layers_for_test(composer.layers()).expect_err("bad point");
    match err {
        CliError::InvalidPoint { field, .. } => assert_eq!(field, ARG_POINT_A),
        other => panic!("expected InvalidPoint, found {other:?}"),
    }
}

#[rstest]
fn compare_flags_parse_from_the_command_line() {
    let cli = Cli::try_parse_from([
        "routediff",
        "compare",
        "--o",
        "-0.12,51.5",
        "--multiplier",
        "1.5",
        "--travel-mode",
        "foot",
        "--format",
        "json",
    ])
    .expect("flags should parse");

    match cli.command {
        Command::Compare(args) => {
            assert_eq!(args.o.as_deref(), Some("-0.12,51.5"));
            assert_eq!(args.multiplier, Some(1.5));
            assert_eq!(args.travel_mode.as_deref(), Some("foot"));
            assert_eq!(args.format, Some(OutputFormat::Json));
        }
        Command::Replay(_) => panic!("expected the compare subcommand"),
    }
}

#[rstest]
fn run_compare_prints_the_text_rendering() {
    let factory = StubRouterFactory::new(StubLegRouter::straight_lines(1000.0));
    let args = CompareArgs {
        multiplier: Some(2.0),
        ..CompareArgs::default()
    };
    let mut output = Vec::new();

    run_compare_with(args, &factory, &mut output).expect("compare should succeed");

    assert_eq!(
        String::from_utf8(output).expect("utf-8"),
        "OVBA Distance: 3.00 km\nOBAB Distance: 3.00 km\nOBAB - 2.0 × OVBA = -3.00 km\n"
    );
}
