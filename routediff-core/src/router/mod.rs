//! Route individual legs through an external routing service.
//!
//! The [`LegRouter`] trait is the boundary between the aggregator and the
//! network. Implementations turn one [`Leg`](crate::Leg) into a
//! [`LegRoute`](crate::LegRoute) or a [`LegRouteError`].

mod error;
mod provider;

pub use error::LegRouteError;
pub use provider::LegRouter;
