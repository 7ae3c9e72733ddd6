use thiserror::Error;

/// Errors from [`crate::router::LegRouter::route_leg`].
///
/// Any of these fails the leg, and a failed leg aborts the whole pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegRouteError {
    /// The request could not be sent or the connection dropped.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("routing service at {url} returned HTTP {status}: {message}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Service-provided message, if any.
        message: String,
    },
    /// The response body was not a usable route.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service answered but found no route between the two points.
    #[error("routing service found no route for the leg")]
    NoRoute,
}
