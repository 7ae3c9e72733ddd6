//! Network adapters for the routediff engine.
//!
//! Responsibilities:
//! - Implement [`routediff_core::LegRouter`] against real routing services.
//! - Encapsulate the services' wire formats.
//!
//! Boundaries:
//! - Do not encode comparison rules (those live in `routediff-core`).
//! - Stay runtime-agnostic at the API; requests are plain async calls.
//!
//! Invariants:
//! - Routers are `Send + Sync` and safe to call concurrently.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;

pub use routing::{DEFAULT_BASE_URL, HttpLegRouter, HttpLegRouterConfig, RouterBuildError};
