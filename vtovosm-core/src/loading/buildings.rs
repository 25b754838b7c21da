//! Building footprints from GeoJSON or WKT

use std::path::Path;

use geo::{Geometry, Polygon};
use geojson::GeoJson;
use log::{debug, info};
use wkt::TryFromWkt;

use crate::Error;
use crate::model::BuildingSet;

/// Reads footprints from `path`, as WKT if the extension is `.wkt` and as
/// GeoJSON otherwise
pub fn read_buildings(path: &Path) -> Result<BuildingSet, Error> {
    let text = std::fs::read_to_string(path)?;
    let is_wkt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wkt"));
    let footprints = if is_wkt {
        buildings_from_wkt(&text)?
    } else {
        buildings_from_geojson(&text)?
    };
    info!("Loaded {} building footprints from {}", footprints.len(), path.display());
    Ok(BuildingSet::new(footprints))
}

/// Polygons and multipolygons of any GeoJSON object; other geometries are
/// skipped
pub fn buildings_from_geojson(text: &str) -> Result<Vec<Polygon<f64>>, Error> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJsonError(e.to_string()))?;
    let collection = geo::GeometryCollection::<f64>::try_from(&geojson)
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let mut footprints = Vec::new();
    for geometry in collection {
        collect_polygons(geometry, &mut footprints);
    }
    Ok(footprints)
}

/// One geometry per line; blank lines and lines starting with `#` are
/// ignored
pub fn buildings_from_wkt(text: &str) -> Result<Vec<Polygon<f64>>, Error> {
    let mut footprints = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let geometry = Geometry::<f64>::try_from_wkt_str(line)
            .map_err(|e| Error::WktError(format!("line {}: {e}", line_no + 1)))?;
        collect_polygons(geometry, &mut footprints);
    }
    Ok(footprints)
}

fn collect_polygons(geometry: Geometry<f64>, footprints: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => footprints.push(polygon),
        Geometry::MultiPolygon(multi) => footprints.extend(multi.0),
        Geometry::GeometryCollection(collection) => {
            for inner in collection {
                collect_polygons(inner, footprints);
            }
        }
        other => debug!("Skipping non-areal building geometry {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wkt_lines_are_parsed() {
        let text = "\
# blocks
POLYGON((10 10, 90 10, 90 90, 10 90, 10 10))

MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)))
POINT(3 3)
";
        let footprints = buildings_from_wkt(text).unwrap();
        assert_eq!(footprints.len(), 3);
    }

    #[test]
    fn broken_wkt_names_the_line() {
        let err = buildings_from_wkt("POLYGON((0 0, 1 0, 1 1, 0 0))\nPOLYGON((oops").unwrap_err();
        match err {
            Error::WktError(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn geojson_features_are_parsed() {
        let text = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Polygon",
                            "coordinates": [[[10, 10], [90, 10], [90, 90], [10, 90], [10, 10]]] } },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] } }
        ] }"#;
        let footprints = buildings_from_geojson(text).unwrap();
        assert_eq!(footprints.len(), 1);
        assert_eq!(footprints[0].exterior().0.len(), 5);
    }
}
