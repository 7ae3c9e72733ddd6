//! `GraphHopper` Routing API response types.
//!
//! Only the fields the comparison needs are decoded. Requests are sent with
//! `points_encoded=false`, so path geometry arrives as plain GeoJSON-style
//! `[lon, lat]` (or `[lon, lat, elevation]`) arrays.
//!
//! See: <https://docs.graphhopper.com/#operation/getRoute>

use serde::Deserialize;

/// Successful `/route` response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Alternative paths; the first one is the best route.
    #[serde(default)]
    pub paths: Vec<ResponsePath>,
}

/// One routed path.
#[derive(Debug, Deserialize)]
pub struct ResponsePath {
    /// Total distance in metres.
    pub distance: f64,
    /// Path geometry.
    pub points: PathPoints,
}

/// Unencoded path geometry.
#[derive(Debug, Deserialize)]
pub struct PathPoints {
    /// Vertices as `[lon, lat]` or `[lon, lat, elevation]`.
    pub coordinates: Vec<Vec<f64>>,
}

/// Body returned alongside a non-success status.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub message: Option<String>,
}
