//! Core engine for comparing the OVBA and OBAB orderings of four map points.
//!
//! A [`PointStore`] holds the four points. Each recomputation takes a
//! [`Snapshot`], and [`RouteAggregator::compute_routes`] routes the six legs
//! of both orderings concurrently through a [`LegRouter`], concatenates each
//! ordering's geometry, sums its distance and computes the weighted
//! differential `obab - multiplier × ovba`.
//!
//! A single failed leg aborts the whole pass with [`ComputationAborted`].
//! [`ComparisonSession`] and [`ComparisonBoard`] sequence passes so that a
//! slow, older pass never overwrites the result of a newer one.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aggregator;
pub mod board;
pub mod leg;
pub mod point;
pub mod route;
pub mod router;
pub mod session;
pub mod store;

#[doc(hidden)]
pub mod test_support;

pub use aggregator::{ComputationAborted, RouteAggregator};
pub use board::{ComparisonBoard, DisplayedComparison, PassToken, Publication};
pub use leg::{
    LEGS_PER_ORDERING, Leg, Ordering, ParseTravelModeError, PlannedLeg, TravelMode, plan_legs,
};
pub use point::{DEFAULT_POINTS, POINT_COUNT, Point, PointRole, Snapshot};
pub use route::{Comparison, LegRoute, Multiplier, MultiplierError, PathResult, differential};
pub use router::{LegRouteError, LegRouter};
pub use session::{ComparisonSession, PassError, PassOutcome, PassTicket};
pub use store::{PointStore, PointStoreError};
