//! Street network from a GeoJSON feature collection.
//!
//! Point features carrying an `id` (or `osmid`) property are intersections.
//! Line features, or features without geometry, carrying `u` and `v`
//! properties are streets between those intersections, with an optional
//! `length` property.

use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, warn};
use serde_json::Value as JsonValue;

use crate::model::{RawStreetEdge, StreetGraph, StreetNode};
use crate::{Error, StreetNodeId};

pub fn read_streets(path: &Path) -> Result<StreetGraph, Error> {
    let text = std::fs::read_to_string(path)?;
    streets_from_geojson(&text)
}

pub fn streets_from_geojson(text: &str) -> Result<StreetGraph, Error> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJsonError(e.to_string()))?;
    let collection =
        FeatureCollection::try_from(geojson).map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for (idx, feature) in collection.features.into_iter().enumerate() {
        let id = id_property(&feature, "id").or_else(|| id_property(&feature, "osmid"));
        let endpoints = (id_property(&feature, "u"), id_property(&feature, "v"));
        let length = feature.property("length").and_then(JsonValue::as_f64);

        let geometry = feature
            .geometry
            .map(geo::Geometry::<f64>::try_from)
            .transpose()
            .map_err(|e| Error::GeoJsonError(format!("feature {idx}: {e}")))?;

        let line = match geometry {
            Some(geo::Geometry::Point(point)) => {
                match id {
                    Some(id) => nodes.push(StreetNode {
                        id,
                        geometry: point,
                    }),
                    None => warn!("Skipping point feature {idx} without an id"),
                }
                continue;
            }
            Some(geo::Geometry::LineString(line)) => Some(line),
            None => None,
            Some(other) => {
                debug!("Skipping feature {idx} with unsupported geometry {other:?}");
                continue;
            }
        };

        let (Some(u), Some(v)) = endpoints else {
            return Err(Error::InvalidData(format!(
                "Street feature {idx} lacks its u/v endpoints"
            )));
        };
        edges.push(RawStreetEdge {
            u,
            v,
            geometry: line,
            length,
        });
    }

    StreetGraph::from_raw(nodes, edges)
}

fn id_property(feature: &Feature, key: &str) -> Option<StreetNodeId> {
    match feature.property(key)? {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}
