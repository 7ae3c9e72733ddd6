//! Deterministic [`LegRouter`] used by unit and behaviour tests.
//!
//! [`StubLegRouter`] answers without touching the network and records every
//! request it receives.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::leg::{Leg, TravelMode};
use crate::route::LegRoute;
use crate::router::{LegRouteError, LegRouter};

/// Stub `LegRouter` for testing.
///
/// Legs without a scripted answer get a two-vertex straight line from start
/// to end with the configured default distance.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use routediff_core::test_support::StubLegRouter;
/// use routediff_core::{Leg, LegRouteError};
///
/// let blocked = Leg::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// let router = StubLegRouter::straight_lines(250.0).with_failure(blocked, LegRouteError::NoRoute);
/// assert!(router.requests().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct StubLegRouter {
    default_distance_m: f64,
    scripted: Vec<(Leg, Result<LegRoute, LegRouteError>)>,
    requests: Mutex<Vec<(Leg, TravelMode)>>,
}

impl StubLegRouter {
    /// Answer every leg with a straight line of `distance_m` metres.
    #[must_use]
    pub fn straight_lines(distance_m: f64) -> Self {
        Self {
            default_distance_m: distance_m,
            ..Self::default()
        }
    }

    /// Answer `leg` with `route`.
    #[must_use]
    pub fn with_route(mut self, leg: Leg, route: LegRoute) -> Self {
        self.scripted.push((leg, Ok(route)));
        self
    }

    /// Fail `leg` with `error`.
    #[must_use]
    pub fn with_failure(mut self, leg: Leg, error: LegRouteError) -> Self {
        self.scripted.push((leg, Err(error)));
        self
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<(Leg, TravelMode)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer(&self, leg: &Leg) -> Result<LegRoute, LegRouteError> {
        self.scripted
            .iter()
            .rev()
            .find(|(scripted, _)| scripted == leg)
            .map_or_else(
                || Ok(LegRoute::new(vec![leg.start, leg.end], self.default_distance_m)),
                |(_, answer)| answer.clone(),
            )
    }
}

#[async_trait]
impl LegRouter for StubLegRouter {
    async fn route_leg(&self, leg: &Leg, mode: TravelMode) -> Result<LegRoute, LegRouteError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((*leg, mode));
        self.answer(leg)
    }
}
