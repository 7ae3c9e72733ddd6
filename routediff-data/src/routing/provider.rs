//! HTTP-based `LegRouter` using `GraphHopper`'s Routing API.
//!
//! This module provides [`HttpLegRouter`], an implementation of the
//! [`LegRouter`] trait that requests one route per leg from the `/route`
//! endpoint of a `GraphHopper` service.
//!
//! # Request format
//!
//! `GET {base_url}/route?points_encoded=false&point={lat},{lon}&point={lat},{lon}&vehicle={mode}`
//!
//! `GraphHopper` expects `lat,lon` order in the `point` parameters while the
//! response geometry is `[lon, lat]`.

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use reqwest::{Client, StatusCode};
use routediff_core::{Leg, LegRoute, LegRouteError, LegRouter, Point, TravelMode};
use thiserror::Error;
use url::Url;

use super::graphhopper::{ErrorResponse, RouteResponse};

/// Error type for [`HttpLegRouter`] construction failures.
#[derive(Debug, Error)]
pub enum RouterBuildError {
    /// The base URL could not be parsed.
    #[error("invalid routing base URL {base_url:?}: {source}")]
    BaseUrl {
        /// The rejected URL.
        base_url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default `GraphHopper` service.
pub const DEFAULT_BASE_URL: &str = "http://graphhopper.ecov.io";

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "routediff/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpLegRouter`].
#[derive(Debug, Clone)]
pub struct HttpLegRouterConfig {
    /// Base URL for the `GraphHopper` service (e.g., `"http://localhost:8989"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpLegRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpLegRouterConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based leg router backed by `GraphHopper`.
///
/// The underlying [`Client`] pools connections, so one router should be
/// shared by all passes. Concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct HttpLegRouter {
    client: Client,
    config: HttpLegRouterConfig,
    route_url: Url,
}

impl HttpLegRouter {
    /// Create a new router with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the `GraphHopper` service (e.g., `"http://localhost:8989"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RouterBuildError> {
        Self::with_config(HttpLegRouterConfig::new(base_url))
    }

    /// Create a new router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpLegRouterConfig) -> Result<Self, RouterBuildError> {
        let route_url = Url::parse(&format!(
            "{}/route",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|source| RouterBuildError::BaseUrl {
            base_url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(RouterBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            route_url,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpLegRouterConfig {
        &self.config
    }

    /// Build the `/route` URL for `leg`.
    fn build_route_url(&self, leg: &Leg, mode: TravelMode) -> Url {
        let mut url = self.route_url.clone();
        url.query_pairs_mut()
            .append_pair("points_encoded", "false")
            .append_pair("point", &lat_lon(leg.start))
            .append_pair("point", &lat_lon(leg.end))
            .append_pair("vehicle", mode.as_str());
        url
    }

    /// Send the request and decode the body.
    async fn fetch_route(&self, url: Url) -> Result<LegRoute, LegRouteError> {
        let url_text = url.to_string();
        log::debug!("requesting leg route from {url_text}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url_text))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url_text))?;

        if !status.is_success() {
            return Err(LegRouteError::HttpStatus {
                url: url_text,
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let route_response: RouteResponse =
            serde_json::from_str(&body).map_err(|err| LegRouteError::Parse {
                message: err.to_string(),
            })?;
        convert_response(route_response)
    }

    /// Convert a reqwest error to a `LegRouteError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> LegRouteError {
        if error.is_timeout() {
            return LegRouteError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return LegRouteError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        LegRouteError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl LegRouter for HttpLegRouter {
    async fn route_leg(&self, leg: &Leg, mode: TravelMode) -> Result<LegRoute, LegRouteError> {
        let url = self.build_route_url(leg, mode);
        self.fetch_route(url).await
    }
}

fn lat_lon(point: Point) -> String {
    format!("{},{}", point.y, point.x)
}

/// Pick the service's own message, falling back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|payload| payload.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_owned())
}

/// Convert a `GraphHopper` response to a `LegRoute` using its first path.
fn convert_response(response: RouteResponse) -> Result<LegRoute, LegRouteError> {
    let path = response
        .paths
        .into_iter()
        .next()
        .ok_or(LegRouteError::NoRoute)?;

    if !path.distance.is_finite() || path.distance < 0.0 {
        return Err(LegRouteError::Parse {
            message: format!("invalid path distance {}", path.distance),
        });
    }

    let vertices = path
        .points
        .coordinates
        .into_iter()
        .map(|ordinates| match ordinates.as_slice() {
            [lon, lat, ..] => Ok(Coord { x: *lon, y: *lat }),
            _ => Err(LegRouteError::Parse {
                message: format!("vertex has {} ordinates, expected 2 or 3", ordinates.len()),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LegRoute::new(vertices, path.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::graphhopper::{PathPoints, ResponsePath};
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample_leg() -> Leg {
        Leg::new(Coord { x: 4.92, y: 45.72 }, Coord { x: 4.95, y: 45.71 })
    }

    fn path(distance: f64, coordinates: Vec<Vec<f64>>) -> RouteResponse {
        RouteResponse {
            paths: vec![ResponsePath {
                distance,
                points: PathPoints { coordinates },
            }],
        }
    }

    #[rstest]
    fn build_route_url_sends_lat_lon_pairs(sample_leg: Leg) {
        let router =
            HttpLegRouter::new("http://graphhopper.example.com").expect("router should build");

        let url = router.build_route_url(&sample_leg, TravelMode::Car);

        assert_eq!(url.path(), "/route");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("points_encoded".to_owned(), "false".to_owned()),
                ("point".to_owned(), "45.72,4.92".to_owned()),
                ("point".to_owned(), "45.71,4.95".to_owned()),
                ("vehicle".to_owned(), "car".to_owned()),
            ]
        );
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash(sample_leg: Leg) {
        let router =
            HttpLegRouter::new("http://graphhopper.example.com/").expect("router should build");

        let url = router.build_route_url(&sample_leg, TravelMode::Foot);

        assert!(url.as_str().starts_with("http://graphhopper.example.com/route?"));
        assert!(url.as_str().ends_with("vehicle=foot"));
    }

    #[rstest]
    fn build_route_url_keeps_base_path(sample_leg: Leg) {
        let router =
            HttpLegRouter::new("http://example.com/graphhopper").expect("router should build");

        let url = router.build_route_url(&sample_leg, TravelMode::Bike);

        assert_eq!(url.path(), "/graphhopper/route");
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let err = HttpLegRouter::new("not a url").expect_err("should fail");

        assert!(matches!(err, RouterBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn convert_response_uses_first_path() {
        let mut response = path(1200.5, vec![vec![4.92, 45.72], vec![4.93, 45.71]]);
        response.paths.push(ResponsePath {
            distance: 1.0,
            points: PathPoints {
                coordinates: Vec::new(),
            },
        });

        let route = convert_response(response).expect("should convert");

        assert_eq!(route.distance_m, 1200.5);
        assert_eq!(
            route.geometry.0,
            vec![Coord { x: 4.92, y: 45.72 }, Coord { x: 4.93, y: 45.71 }]
        );
    }

    #[rstest]
    fn convert_response_drops_elevation() {
        let response = path(10.0, vec![vec![4.92, 45.72, 170.0]]);

        let route = convert_response(response).expect("should convert");

        assert_eq!(route.geometry.0, vec![Coord { x: 4.92, y: 45.72 }]);
    }

    #[rstest]
    fn convert_response_without_paths_is_no_route() {
        let err = convert_response(RouteResponse { paths: Vec::new() }).expect_err("should fail");

        assert_eq!(err, LegRouteError::NoRoute);
    }

    #[rstest]
    fn convert_response_rejects_short_vertex() {
        let err = convert_response(path(10.0, vec![vec![4.92]])).expect_err("should fail");

        assert!(matches!(err, LegRouteError::Parse { .. }));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn convert_response_rejects_invalid_distance(#[case] distance: f64) {
        let err = convert_response(path(distance, Vec::new())).expect_err("should fail");

        assert!(matches!(err, LegRouteError::Parse { .. }));
    }

    #[rstest]
    fn error_message_prefers_service_message() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Cannot find point 0"}"#,
        );

        assert_eq!(message, "Cannot find point 0");
    }

    #[rstest]
    fn error_message_falls_back_to_reason() {
        let message = error_message(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");

        assert_eq!(message, "Bad Gateway");
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpLegRouterConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn default_config_targets_public_service() {
        let config = HttpLegRouterConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
