//! poiroute - Resolve points of interest with Nominatim and route between them with OSRM

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod resolver;

pub use domain::{OsmKind, Place, Route, TravelMode};
pub use error::{ResolutionError, RoutingError};
pub use resolver::PlaceResolver;
