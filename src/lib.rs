//! Facade crate for the routediff route comparison engine.
//!
//! This crate re-exports the core comparison types and, behind the `http`
//! feature, the `GraphHopper`-backed leg router.
//!
//! ```
//! use routediff::{
//!     ComparisonSession, DisplayedComparison, LegRouter, PassError, PassTicket, PassToken,
//! };
//!
//! fn displayed<R: LegRouter>(session: &ComparisonSession<R>) -> Option<DisplayedComparison> {
//!     session.board().current()
//! }
//!
//! fn ticket_token(ticket: &PassTicket) -> PassToken {
//!     ticket.token
//! }
//!
//! fn rejected_by_store(err: &PassError) -> bool {
//!     matches!(err, PassError::Store(_))
//! }
//! ```

#![forbid(unsafe_code)]

pub use routediff_core::{
    Comparison, ComparisonBoard, ComparisonSession, ComputationAborted, DEFAULT_POINTS,
    DisplayedComparison, Leg, LegRoute, LegRouteError, LegRouter, Multiplier, MultiplierError,
    Ordering, PassError, PassOutcome, PassTicket, PassToken, PathResult, Point, PointRole,
    PointStore, PointStoreError, Publication, RouteAggregator, Snapshot, TravelMode,
    differential,
};

#[cfg(feature = "http")]
pub use routediff_data::{HttpLegRouter, HttpLegRouterConfig, RouterBuildError};
