//! Process-wide logger set-up for the binary.

use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "info";

/// Initialise `env_logger` from `RUST_LOG`, falling back to `info`.
///
/// Call once, before [`crate::run`]. Library crates log through the `log`
/// facade and stay silent until this runs.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
