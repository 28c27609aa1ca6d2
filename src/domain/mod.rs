pub mod place;
pub mod route;

pub use place::{OsmKind, Place};
pub use route::{Route, TravelMode};
