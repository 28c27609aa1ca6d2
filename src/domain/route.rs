use geo::{BoundingRect, LineString, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OSRM routing profile
///
/// The public OSRM server may fall back to driving when a profile is not
/// available for the requested area; that substitution happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    #[serde(alias = "car")]
    Driving,
    Bike,
    Foot,
}

impl TravelMode {
    /// Profile segment used in the OSRM URL
    pub fn profile(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Bike => "bike",
            TravelMode::Foot => "foot",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" | "car" => Ok(TravelMode::Driving),
            "bike" => Ok(TravelMode::Bike),
            "foot" => Ok(TravelMode::Foot),
            _ => Err(format!(
                "Invalid travel mode: '{}'. Valid options: driving (car), bike, foot",
                s
            )),
        }
    }
}

/// A computed route between two places
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Maneuver waypoints as (lat, lon) pairs, in travel order
    path: Vec<(f64, f64)>,
    /// Total length in meters
    length_m: f64,
    /// Estimated travel time in seconds
    duration_s: f64,
}

impl Route {
    pub fn new(path: Vec<(f64, f64)>, length_m: f64, duration_s: f64) -> Self {
        Self {
            path,
            length_m,
            duration_s,
        }
    }

    /// Maneuver waypoints as (lat, lon), in travel order
    pub fn path(&self) -> &[(f64, f64)] {
        &self.path
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn start(&self) -> Option<(f64, f64)> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<(f64, f64)> {
        self.path.last().copied()
    }

    /// Path as a geo `LineString` with x = lon, y = lat
    pub fn line_string(&self) -> LineString<f64> {
        self.path
            .iter()
            .map(|&(lat, lon)| (lon, lat))
            .collect::<Vec<_>>()
            .into()
    }

    /// Bounding rectangle of the path (x = lon, y = lat)
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.line_string().bounding_rect()
    }

    /// Center of the path's bounding box as (lat, lon), for centering a map
    pub fn center(&self) -> Option<(f64, f64)> {
        self.bounds().map(|rect| {
            let c = rect.center();
            (c.y, c.x)
        })
    }
}
