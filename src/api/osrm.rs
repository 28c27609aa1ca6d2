use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{Route, TravelMode};
use crate::error::RoutingError;

pub const OSRM_URL: &str = "http://router.project-osrm.org";

/// Raw OSRM `route` service response
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct RouteCandidate {
    /// meters
    pub distance: f64,
    /// seconds
    pub duration: f64,
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub maneuver: Maneuver,
}

#[derive(Debug, Deserialize)]
pub struct Maneuver {
    /// [lon, lat]
    pub location: [f64; 2],
}

/// Build the route request URL for two (lon, lat) points
pub fn route_url(base: &str, mode: TravelMode, from: (f64, f64), to: (f64, f64)) -> String {
    format!(
        "{}/route/v1/{}/{},{};{},{}",
        base.trim_end_matches('/'),
        mode.profile(),
        from.0,
        from.1,
        to.0,
        to.1
    )
}

pub fn parse_response(body: &str) -> Result<RouteResponse, RoutingError> {
    serde_json::from_str(body).map_err(|e| RoutingError::Malformed(e.to_string()))
}

/// False for NaN as well as for negative values
fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Turn an OSRM response into a [`Route`].
///
/// Uses the first route and its first leg. Maneuver locations come back as
/// (lon, lat) and are flipped to (lat, lon) for map widgets.
pub fn extract_route(
    response: RouteResponse,
    from: (f64, f64),
    to: (f64, f64),
) -> Result<Route, RoutingError> {
    if response.code != "Ok" {
        return Err(RoutingError::Status {
            code: response.code,
            message: response.message,
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute { from, to })?;

    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute { from, to })?;

    let path: Vec<(f64, f64)> = leg
        .steps
        .iter()
        .map(|step| {
            let [lon, lat] = step.maneuver.location;
            (lat, lon)
        })
        .collect();

    if path.is_empty() {
        return Err(RoutingError::NoRoute { from, to });
    }

    if !is_non_negative(route.distance) || !is_non_negative(route.duration) {
        return Err(RoutingError::Malformed(format!(
            "route distance {} and duration {} must be non-negative",
            route.distance, route.duration
        )));
    }

    Ok(Route::new(path, route.distance, route.duration))
}

/// Request a route between two (lon, lat) points.
///
/// OSRM reports failures such as `NoRoute` in the body with a 4xx status, so
/// the HTTP status is not checked; the embedded `code` decides.
pub fn fetch_route(
    client: &Client,
    base: &str,
    mode: TravelMode,
    from: (f64, f64),
    to: (f64, f64),
) -> Result<Route, RoutingError> {
    let url = route_url(base, mode, from, to);

    let response = client
        .get(&url)
        .query(&[("steps", "true")])
        .send()
        .map_err(RoutingError::Request)?;

    let status = response.status();
    let body = response.text().map_err(RoutingError::Request)?;
    let parsed = parse_response(&body).map_err(|e| match e {
        RoutingError::Malformed(msg) => {
            RoutingError::Malformed(format!("{} (HTTP {})", msg, status))
        }
        other => other,
    })?;

    extract_route(parsed, from, to)
}
