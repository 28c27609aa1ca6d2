pub mod nominatim;
pub mod osrm;

pub use nominatim::{GeocodeResponse, NOMINATIM_URL};
pub use osrm::{OSRM_URL, RouteResponse};
