use anyhow::{bail, Context, Result};
use bus_watch_proximity::{BusStop, GeoPoint, StopIdentifier};
use geojson::{feature::Id, Feature, GeoJson};
use std::path::Path;

/// Read bus stops from a GeoJSON file of Point features
///
/// Each feature's `id` (or an `id` property) names the stop; `name` and
/// `area` properties are optional.
pub fn read_stops(path: &Path) -> Result<Vec<BusStop>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stops file: {}", path.display()))?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON from: {}", path.display()))?;

    let stops = extract_stops(geojson)
        .with_context(|| format!("No valid stops found in: {}", path.display()))?;

    log::debug!("Loaded {} stops from {}", stops.len(), path.display());
    Ok(stops)
}

fn extract_stops(geojson: GeoJson) -> Result<Vec<BusStop>> {
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => bail!("Expected Point features, found a bare geometry"),
    };

    let mut stops = Vec::with_capacity(features.len());
    for (index, feature) in features.into_iter().enumerate() {
        match feature_to_stop(feature, index) {
            Ok(stop) => stops.push(stop),
            Err(e) => log::warn!("  Skipping feature {}: {:#}", index, e),
        }
    }

    if stops.is_empty() {
        bail!("No Point features could be read as stops");
    }
    Ok(stops)
}

fn feature_to_stop(feature: Feature, index: usize) -> Result<BusStop> {
    let location = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(geojson::Value::Point(coords)) if coords.len() >= 2 => {
            GeoPoint::new(coords[1], coords[0])?
        }
        Some(_) => bail!("Geometry is not a Point"),
        None => bail!("Feature has no geometry"),
    };

    let id = match &feature.id {
        Some(Id::String(s)) => s.clone(),
        Some(Id::Number(n)) => n.to_string(),
        None => string_property(&feature, "id").unwrap_or_else(|| format!("stop_{index}")),
    };
    let name = string_property(&feature, "name").unwrap_or_else(|| id.clone());

    let mut stop = BusStop::new(StopIdentifier::new(&id), name, location);
    stop.area = string_property(&feature, "area");
    Ok(stop)
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<BusStop>> {
        extract_stops(json.parse::<GeoJson>().unwrap())
    }

    #[test]
    fn test_feature_collection_of_points() {
        let stops = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "id": "simmakkal",
                        "geometry": { "type": "Point", "coordinates": [78.1198, 9.9252] },
                        "properties": { "name": "Simmakkal", "area": "Madurai" }
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [78.1250, 9.9318] },
                        "properties": { "id": "goripalayam" }
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [78.1116, 9.9177] },
                        "properties": {}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].id.as_str(), "simmakkal");
        assert_eq!(stops[0].name, "Simmakkal");
        assert_eq!(stops[0].area.as_deref(), Some("Madurai"));
        assert_eq!(stops[0].location.latitude(), 9.9252);
        assert_eq!(stops[1].id.as_str(), "goripalayam");
        assert_eq!(stops[1].name, "goripalayam");
        assert_eq!(stops[2].id.as_str(), "stop_2");
    }

    #[test]
    fn test_skips_non_points_and_bad_coordinates() {
        let stops = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                        "properties": {}
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [200.0, 95.0] },
                        "properties": {}
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [77.1025, 28.7041] },
                        "properties": { "name": "Delhi" }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name, "Delhi");
    }

    #[test]
    fn test_rejects_file_without_stops() {
        assert!(parse(r#"{ "type": "Point", "coordinates": [0.0, 0.0] }"#).is_err());
        assert!(parse(r#"{ "type": "FeatureCollection", "features": [] }"#).is_err());
    }
}
