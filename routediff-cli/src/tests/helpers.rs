//! Test helpers: a stub router factory and trigger files on disk.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use routediff_core::test_support::StubLegRouter;
use routediff_core::{LegRouter, Multiplier, Snapshot, TravelMode};
use tempfile::TempDir;

use crate::CliError;
use crate::settings::{ComparisonConfig, OutputFormat, RouterFactory};

/// Hands the same stub router to every run so tests can inspect requests.
pub(super) struct StubRouterFactory {
    router: Arc<StubLegRouter>,
}

impl StubRouterFactory {
    pub(super) fn new(router: StubLegRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub(super) fn router(&self) -> &StubLegRouter {
        &self.router
    }
}

impl RouterFactory for StubRouterFactory {
    fn build(&self, _config: &ComparisonConfig) -> Result<Arc<dyn LegRouter>, CliError> {
        let router: Arc<StubLegRouter> = Arc::clone(&self.router);
        Ok(router)
    }
}

/// Comparison settings at the default points.
pub(super) fn default_config() -> ComparisonConfig {
    ComparisonConfig {
        snapshot: Snapshot::default(),
        multiplier: Multiplier::ONE,
        graphhopper_url: "http://graphhopper.test".to_owned(),
        travel_mode: TravelMode::Car,
        format: OutputFormat::Text,
    }
}

/// A temporary directory holding one trigger file.
pub(super) struct EventsFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl EventsFile {
    pub(super) fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("events.jsonl");
        std::fs::write(&path, contents).expect("write events file");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}
