use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{OsmKind, Place};
use crate::error::ResolutionError;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// `format=geocodejson` search response
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub features: Vec<Feature>,
}

/// A single candidate, ordered by relevance within the response
#[derive(Debug, Deserialize)]
pub struct Feature {
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Properties {
    pub geocoding: Geocoding,
}

#[derive(Debug, Deserialize)]
pub struct Geocoding {
    pub osm_type: String,
    pub osm_id: u64,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// [lon, lat]
    pub coordinates: [f64; 2],
}

/// Free-text search string for a place within a country
pub fn build_query(name: &str, country: &str) -> String {
    format!("{} - {}", name, country)
}

/// Reject non-success HTTP statuses before the body is looked at
pub fn check_status(status: StatusCode) -> Result<(), ResolutionError> {
    if !status.is_success() {
        return Err(ResolutionError::Status(status));
    }
    Ok(())
}

pub fn parse_response(body: &str) -> Result<GeocodeResponse, ResolutionError> {
    serde_json::from_str(body).map_err(|e| ResolutionError::Malformed(e.to_string()))
}

/// Pick the first candidate of the requested kind.
///
/// Candidates of other kinds are skipped even when they rank higher. An
/// empty candidate list is reported the same way as a list with no match.
pub fn select_place(
    response: GeocodeResponse,
    kind: OsmKind,
    query: &str,
) -> Result<Place, ResolutionError> {
    let feature = response
        .features
        .into_iter()
        .find(|f| OsmKind::from_osm_type(&f.properties.geocoding.osm_type) == Some(kind))
        .ok_or_else(|| ResolutionError::NoMatch {
            query: query.to_string(),
            kind,
        })?;

    let [lon, lat] = feature.geometry.coordinates;
    let geocoding = feature.properties.geocoding;

    Ok(Place::new(geocoding.label, geocoding.osm_id, (lon, lat), kind))
}

/// Run a single Nominatim search and return the parsed candidates
pub fn search(client: &Client, url: &str, query: &str) -> Result<GeocodeResponse, ResolutionError> {
    let response = client
        .get(url)
        .query(&[("q", query), ("format", "geocodejson")])
        .send()
        .map_err(ResolutionError::Request)?;

    check_status(response.status())?;

    let body = response.text().map_err(ResolutionError::Request)?;
    parse_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_json(osm_type: &str, osm_id: u64, label: &str, lon: f64, lat: f64) -> String {
        format!(
            r#"{{
                "type": "Feature",
                "properties": {{
                    "geocoding": {{
                        "place_id": 1,
                        "osm_type": "{osm_type}",
                        "osm_id": {osm_id},
                        "type": "university",
                        "label": "{label}"
                    }}
                }},
                "geometry": {{"type": "Point", "coordinates": [{lon}, {lat}]}}
            }}"#
        )
    }

    fn response_json(features: &[String]) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "geocoding": {{"version": "0.1.0"}}, "features": [{}]}}"#,
            features.join(",")
        )
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query("university of toronto", "canada"),
            "university of toronto - canada"
        );
    }

    #[test]
    fn test_resolve_university_of_toronto() {
        let json = response_json(&[feature_json(
            "node",
            12345,
            "University of Toronto, St George Street, Toronto, Canada",
            -79.3973638,
            43.6620257,
        )]);
        let response = parse_response(&json).unwrap();
        let place =
            select_place(response, OsmKind::Node, "university of toronto - canada").unwrap();

        assert_eq!(place.osm_id(), 12345);
        assert_eq!(place.coordinates(), (-79.3973638, 43.6620257));
        assert_eq!(place.kind(), OsmKind::Node);
        assert!(place.address().starts_with("University of Toronto"));
    }

    #[test]
    fn test_skips_higher_ranked_candidates_of_other_kind() {
        let json = response_json(&[
            feature_json("relation", 1, "First", 1.0, 2.0),
            feature_json("way", 2, "Second", 3.0, 4.0),
            feature_json("node", 3, "Third", 5.0, 6.0),
            feature_json("way", 4, "Fourth", 7.0, 8.0),
        ]);

        let place = select_place(parse_response(&json).unwrap(), OsmKind::Way, "q").unwrap();
        assert_eq!(place.osm_id(), 2);
        assert_eq!(place.kind(), OsmKind::Way);
        assert_eq!(place.coordinates(), (3.0, 4.0));

        let place = select_place(parse_response(&json).unwrap(), OsmKind::Node, "q").unwrap();
        assert_eq!(place.osm_id(), 3);
    }

    #[test]
    fn test_no_candidate_of_requested_kind() {
        let json = response_json(&[
            feature_json("way", 1, "A", 1.0, 2.0),
            feature_json("way", 2, "B", 3.0, 4.0),
        ]);
        let err = select_place(parse_response(&json).unwrap(), OsmKind::Node, "q").unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::NoMatch {
                kind: OsmKind::Node,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_candidate_list_is_no_match() {
        let json = response_json(&[]);
        let err = select_place(
            parse_response(&json).unwrap(),
            OsmKind::Node,
            "nowhere - atlantis",
        )
        .unwrap_err();
        match err {
            ResolutionError::NoMatch { query, kind } => {
                assert_eq!(query, "nowhere - atlantis");
                assert_eq!(kind, OsmKind::Node);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_found_status_is_rejected() {
        let err = check_status(StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, ResolutionError::Status(s) if s == StatusCode::NOT_FOUND));
        assert!(check_status(StatusCode::OK).is_ok());
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        // No features array
        let err = parse_response(r#"{"type": "FeatureCollection"}"#).unwrap_err();
        assert!(matches!(err, ResolutionError::Malformed(_)));

        // Missing osm_id
        let json = r#"{"features": [{
            "properties": {"geocoding": {"osm_type": "node", "label": "X"}},
            "geometry": {"coordinates": [1.0, 2.0]}
        }]}"#;
        assert!(matches!(
            parse_response(json).unwrap_err(),
            ResolutionError::Malformed(_)
        ));

        // Coordinates must be exactly [lon, lat]
        let json = r#"{"features": [{
            "properties": {"geocoding": {"osm_type": "node", "osm_id": 1, "label": "X"}},
            "geometry": {"coordinates": [1.0]}
        }]}"#;
        assert!(matches!(
            parse_response(json).unwrap_err(),
            ResolutionError::Malformed(_)
        ));
    }
}
