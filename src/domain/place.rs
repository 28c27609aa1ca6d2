use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// OpenStreetMap primitive type a geocoding match must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmKind {
    /// A single point (shop, hospital, ...)
    #[default]
    Node,
    /// A line or closed polygon made of nodes
    Way,
    /// A group of other entities
    Relation,
}

impl OsmKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsmKind::Node => "node",
            OsmKind::Way => "way",
            OsmKind::Relation => "relation",
        }
    }

    /// Parse the `osm_type` value Nominatim reports.
    ///
    /// Accepts both the long names and the single-letter form (`N`, `W`, `R`)
    /// used by some Nominatim output formats.
    pub fn from_osm_type(value: &str) -> Option<OsmKind> {
        match value.to_ascii_lowercase().as_str() {
            "node" | "n" => Some(OsmKind::Node),
            "way" | "w" => Some(OsmKind::Way),
            "relation" | "r" => Some(OsmKind::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for OsmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OsmKind::from_osm_type(s).ok_or_else(|| {
            format!(
                "Invalid OSM kind: '{}'. Valid options: node, way, relation",
                s
            )
        })
    }
}

/// A resolved point of interest.
///
/// Identity is the OSM id alone: two resolutions of the same entity are the
/// same place even when Nominatim returned a different label for each. `Eq`
/// and `Hash` only look at `osm_id`, and the id goes through the standard
/// `u64` hasher.
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    address: String,
    osm_id: u64,
    /// (lon, lat) in WGS84
    coordinates: (f64, f64),
    kind: OsmKind,
}

impl Place {
    pub fn new(address: String, osm_id: u64, coordinates: (f64, f64), kind: OsmKind) -> Self {
        Self {
            address,
            osm_id,
            coordinates,
            kind,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn osm_id(&self) -> u64 {
        self.osm_id
    }

    /// (lon, lat), GeoJSON axis order
    pub fn coordinates(&self) -> (f64, f64) {
        self.coordinates
    }

    pub fn kind(&self) -> OsmKind {
        self.kind
    }

    /// (lat, lon), the order map widgets expect
    pub fn lat_lon(&self) -> (f64, f64) {
        let (lon, lat) = self.coordinates;
        (lat, lon)
    }

    pub fn point(&self) -> Point<f64> {
        let (lon, lat) = self.coordinates;
        Point::new(lon, lat)
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.osm_id == other.osm_id
    }
}

impl Eq for Place {}

impl Hash for Place {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.osm_id.hash(state);
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.address, self.kind, self.osm_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_osm_kind_parsing() {
        assert_eq!(OsmKind::from_osm_type("node"), Some(OsmKind::Node));
        assert_eq!(OsmKind::from_osm_type("W"), Some(OsmKind::Way));
        assert_eq!(OsmKind::from_osm_type("relation"), Some(OsmKind::Relation));
        assert_eq!(OsmKind::from_osm_type("area"), None);
        assert!("Relation".parse::<OsmKind>().is_ok());
        assert!("polygon".parse::<OsmKind>().is_err());
    }

    #[test]
    fn test_places_with_same_id_are_equal() {
        let a = Place::new(
            "University of Toronto, St George Street".to_string(),
            12345,
            (-79.3973638, 43.6620257),
            OsmKind::Node,
        );
        // Stale label, same entity
        let b = Place::new(
            "University of Toronto".to_string(),
            12345,
            (-79.3973, 43.6620),
            OsmKind::Node,
        );
        let c = Place::new(
            "University of Toronto".to_string(),
            54321,
            (-79.3973638, 43.6620257),
            OsmKind::Node,
        );

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Place> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_large_ids_hash() {
        let a = Place::new(String::new(), u64::MAX, (0.0, 0.0), OsmKind::Way);
        let b = Place::new(String::new(), u64::MAX, (1.0, 1.0), OsmKind::Way);
        let set: HashSet<Place> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_axis_accessors() {
        let place = Place::new(
            "x".to_string(),
            1,
            (-79.3973638, 43.6620257),
            OsmKind::Node,
        );
        assert_eq!(place.lat_lon(), (43.6620257, -79.3973638));
        assert_eq!(place.point().x(), -79.3973638);
        assert_eq!(place.point().y(), 43.6620257);
    }
}
