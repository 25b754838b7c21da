use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde_json::json;

use crate::Error;
use crate::algo::classification::{Condition, PairClassification};
use crate::pathloss::{Pathloss, PathlossInput};

/// One point feature per transmitter, plus the receivers once each.
///
/// Transmitters carry the condition tag, distance, turn sum and relay
/// coordinate of their pair, and the pathloss if a model is given.
pub fn classifications_to_geojson(
    pairs: &[PairClassification],
    pathloss: Option<&dyn Pathloss>,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::with_capacity(pairs.len() + 1);

    let mut receivers: Vec<(usize, Point<f64>)> =
        pairs.iter().map(|pair| (pair.rx, pair.rx_point)).collect();
    receivers.sort_unstable_by_key(|&(id, _)| id);
    receivers.dedup_by_key(|&mut (id, _)| id);
    for (id, point) in receivers {
        features.push(create_receiver_feature(id, point)?);
    }

    for pair in pairs {
        features.push(create_pair_feature(pair, pathloss)?);
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn classifications_to_geojson_string(
    pairs: &[PairClassification],
    pathloss: Option<&dyn Pathloss>,
) -> Result<String, Error> {
    serde_json::to_string(&classifications_to_geojson(pairs, pathloss)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_receiver_feature(id: usize, point: Point<f64>) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeometryValue::from(&point)),
        "properties": {
            "vehicle": id,
            "role": "receiver",
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_pair_feature(
    pair: &PairClassification,
    pathloss: Option<&dyn Pathloss>,
) -> Result<Feature, Error> {
    let relay = match pair.condition {
        Condition::NlosOrthogonal { relay } => Some([relay.x(), relay.y()]),
        _ => None,
    };
    // JSON has no infinity, unreachable pairs get null
    let pathloss = pathloss
        .map(|model| PathlossInput::from(pair).evaluate(model))
        .filter(|value| value.is_finite());

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeometryValue::from(&pair.tx_point)),
        "properties": {
            "vehicle": pair.tx,
            "role": "transmitter",
            "receiver": pair.rx,
            "condition": pair.condition.as_str(),
            "distance": pair.distance,
            "angle_sum": pair.angle_sum,
            "relay": relay,
            "pathloss": pathloss,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(tx: usize, condition: Condition) -> PairClassification {
        PairClassification {
            rx: 0,
            tx,
            rx_point: Point::new(0.0, 50.0),
            tx_point: Point::new(50.0, tx as f64),
            condition,
            distance: 70.0,
            angle_sum: None,
        }
    }

    #[test]
    fn receiver_once_and_one_feature_per_pair() {
        let pairs = [
            pair(1, Condition::Los),
            pair(
                2,
                Condition::NlosOrthogonal {
                    relay: Point::new(0.0, 0.0),
                },
            ),
        ];
        let collection = classifications_to_geojson(&pairs, None).unwrap();
        assert_eq!(collection.features.len(), 3);

        let receiver = &collection.features[0];
        assert_eq!(receiver.property("role").unwrap(), "receiver");
        let corner = &collection.features[2];
        assert_eq!(corner.property("condition").unwrap(), "orthogonal");
        assert_eq!(corner.property("relay").unwrap(), &json!([0.0, 0.0]));
        assert!(corner.property("pathloss").unwrap().is_null());

        let text = classifications_to_geojson_string(&pairs, None).unwrap();
        assert!(text.contains("\"transmitter\""));
    }

    #[test]
    fn output_parses_as_point_features() {
        let pairs = [pair(1, Condition::Olos), pair(2, Condition::NlosParallel)];
        let text = classifications_to_geojson_string(&pairs, None).unwrap();
        let parsed = FeatureCollection::try_from(text.parse::<geojson::GeoJson>().unwrap()).unwrap();

        assert_eq!(parsed.features.len(), 3);
        for feature in &parsed.features {
            let geometry = serde_json::to_value(feature.geometry.as_ref().unwrap()).unwrap();
            assert_eq!(geometry["type"], "Point");
        }
        let parallel = &parsed.features[2];
        assert_eq!(parallel.property("condition").unwrap(), "parallel");
        assert!(parallel.property("relay").unwrap().is_null());
    }
}
