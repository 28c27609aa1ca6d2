//! GeoJSON output for map widgets.
//!
//! GeoJSON stores positions as [lon, lat], so route paths are flipped back
//! from the (lat, lon) order `Route` keeps them in.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{Place, Route, TravelMode};

fn place_feature(place: &Place, role: &str) -> Value {
    let point = place.point();
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [point.x(), point.y()],
        },
        "properties": {
            "role": role,
            "address": place.address(),
            "osm_id": place.osm_id(),
            "osm_type": place.kind().as_str(),
        },
    })
}

fn route_feature(route: &Route, mode: TravelMode) -> Value {
    let coordinates: Vec<[f64; 2]> = route
        .line_string()
        .coords()
        .map(|c| [c.x, c.y])
        .collect();

    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
        "properties": {
            "role": "route",
            "mode": mode.profile(),
            "length_m": route.length_m(),
            "duration_s": route.duration_s(),
        },
    })
}

/// Origin, destination and route as a single FeatureCollection
pub fn route_collection(
    origin: &Place,
    destination: &Place,
    route: &Route,
    mode: TravelMode,
) -> Value {
    let mut collection = json!({
        "type": "FeatureCollection",
        "features": [
            place_feature(origin, "origin"),
            place_feature(destination, "destination"),
            route_feature(route, mode),
        ],
    });

    if let Some(rect) = route.bounds() {
        let (min, max) = (rect.min(), rect.max());
        collection["bbox"] = json!([min.x, min.y, max.x, max.y]);
    }

    collection
}

pub fn write_geojson(path: &Path, collection: &Value) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, collection).context("Failed to write GeoJSON")?;
    writer.flush().context("Failed to flush GeoJSON output")?;
    Ok(())
}
