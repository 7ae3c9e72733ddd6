//! Route both orderings and compare them.
//!
//! [`RouteAggregator::compute_routes`] is a pure function of its snapshot,
//! multiplier and the router's answers. It keeps no state between calls;
//! ordering passes against each other is the caller's job (see
//! [`ComparisonBoard`](crate::ComparisonBoard)).

use futures_util::future::try_join_all;
use thiserror::Error;

use crate::leg::{Ordering, PlannedLeg, TravelMode, plan_legs};
use crate::point::{PointRole, Snapshot};
use crate::route::{Comparison, LegRoute, Multiplier, PathResult};
use crate::router::{LegRouteError, LegRouter};

/// A pass was abandoned because one of its legs failed.
///
/// No path is produced for either ordering when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{ordering} leg {position} ({from} -> {to}) failed: {source}")]
pub struct ComputationAborted {
    /// Ordering of the failed leg.
    pub ordering: Ordering,
    /// Zero-based position of the failed leg within its ordering.
    pub position: usize,
    /// Role of the failed leg's start point.
    pub from: PointRole,
    /// Role of the failed leg's end point.
    pub to: PointRole,
    /// Why the leg failed.
    #[source]
    pub source: LegRouteError,
}

/// Issues the six leg requests of a pass and folds them into a [`Comparison`].
#[derive(Debug, Clone)]
pub struct RouteAggregator<R> {
    router: R,
    mode: TravelMode,
}

impl<R> RouteAggregator<R>
where
    R: LegRouter,
{
    /// Create an aggregator routing every leg by car.
    pub fn new(router: R) -> Self {
        Self::with_mode(router, TravelMode::default())
    }

    /// Create an aggregator routing every leg with `mode`.
    pub const fn with_mode(router: R, mode: TravelMode) -> Self {
        Self { router, mode }
    }

    /// Travel mode sent with each leg.
    pub const fn mode(&self) -> TravelMode {
        self.mode
    }

    /// The underlying router.
    pub const fn router(&self) -> &R {
        &self.router
    }

    /// Route both orderings for `snapshot` and compare their distances.
    ///
    /// All six legs are requested concurrently. The first failure aborts the
    /// pass and drops the requests still in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationAborted`] if any leg request fails.
    pub async fn compute_routes(
        &self,
        snapshot: &Snapshot,
        multiplier: Multiplier,
    ) -> Result<Comparison, ComputationAborted> {
        let plan = plan_legs(snapshot);
        log::debug!("requesting {} legs by {}", plan.len(), self.mode);

        let routes = try_join_all(plan.iter().map(|planned| self.route_planned(planned))).await?;

        let (ovba_legs, obab_legs): (Vec<_>, Vec<_>) = plan
            .iter()
            .zip(routes)
            .partition(|(planned, _)| planned.ordering == Ordering::Ovba);
        let ovba = PathResult::from_legs(
            Ordering::Ovba,
            ovba_legs.into_iter().map(|(_, route)| route),
        );
        let obab = PathResult::from_legs(
            Ordering::Obab,
            obab_legs.into_iter().map(|(_, route)| route),
        );
        Ok(Comparison::new(ovba, obab, multiplier))
    }

    async fn route_planned(&self, planned: &PlannedLeg) -> Result<LegRoute, ComputationAborted> {
        self.router
            .route_leg(&planned.leg, self.mode)
            .await
            .map_err(|source| ComputationAborted {
                ordering: planned.ordering,
                position: planned.position,
                from: planned.from,
                to: planned.to,
                source,
            })
    }
}
