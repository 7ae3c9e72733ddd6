//! HTTP-based leg routing.
//!
//! This module provides [`HttpLegRouter`], an implementation of
//! [`routediff_core::LegRouter`] that fetches one road route per leg from a
//! `GraphHopper` routing service.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use routediff_core::{Leg, LegRouter, TravelMode};
//! use routediff_data::routing::{HttpLegRouter, HttpLegRouterConfig};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpLegRouterConfig::new("http://localhost:8989")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let router = HttpLegRouter::with_config(config)?;
//!
//! let leg = Leg::new(Coord { x: 4.92, y: 45.72 }, Coord { x: 4.95, y: 45.71 });
//! let route = router.route_leg(&leg, TravelMode::Car).await?;
//! assert!(route.distance_m >= 0.0);
//! # Ok(())
//! # }
//! ```

mod graphhopper;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpLegRouter, HttpLegRouterConfig, RouterBuildError,
};
