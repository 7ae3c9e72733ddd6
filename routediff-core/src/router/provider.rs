//! Leg router trait and its blanket implementations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::leg::{Leg, TravelMode};
use crate::route::LegRoute;

use super::error::LegRouteError;

/// Fetch the road route for a single leg.
///
/// Requests for different legs are independent, so implementations must be
/// safe to call concurrently from one shared reference.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use routediff_core::{Leg, LegRoute, LegRouteError, LegRouter, TravelMode};
///
/// struct Crow;
///
/// #[async_trait]
/// impl LegRouter for Crow {
///     async fn route_leg(
///         &self,
///         leg: &Leg,
///         _mode: TravelMode,
///     ) -> Result<LegRoute, LegRouteError> {
///         Ok(LegRoute::new(vec![leg.start, leg.end], 0.0))
///     }
/// }
/// ```
#[async_trait]
pub trait LegRouter: Send + Sync {
    /// Return the route for `leg` travelled with `mode`.
    async fn route_leg(&self, leg: &Leg, mode: TravelMode) -> Result<LegRoute, LegRouteError>;
}

#[async_trait]
impl<R> LegRouter for Arc<R>
where
    R: LegRouter + ?Sized,
{
    async fn route_leg(&self, leg: &Leg, mode: TravelMode) -> Result<LegRoute, LegRouteError> {
        (**self).route_leg(leg, mode).await
    }
}

#[async_trait]
impl<R> LegRouter for &R
where
    R: LegRouter + ?Sized,
{
    async fn route_leg(&self, leg: &Leg, mode: TravelMode) -> Result<LegRoute, LegRouteError> {
        (**self).route_leg(leg, mode).await
    }
}
