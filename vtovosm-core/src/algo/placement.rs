//! Placing vehicles on street edges

use geo::{BoundingRect, Distance, Euclidean, Length, MultiPoint, Point};
use log::{debug, info};
use petgraph::graph::EdgeIndex;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{interpolate_normalized, split_line_at_point};
use crate::model::{LocalEdge, LocalGraph, StreetGraph, VehicleRecord};
use crate::{Error, VehicleId};

/// Places a vehicle at the normalized `position` along the street `edge` and
/// builds its local graph.
///
/// # Errors
///
/// `InvalidPosition` outside of `[0, 1]`, `InvalidEdge` for an unknown edge.
pub fn place_vehicle(
    streets: &StreetGraph,
    edge: EdgeIndex,
    position: f64,
    id: VehicleId,
) -> Result<VehicleRecord, Error> {
    if !(0.0..=1.0).contains(&position) {
        return Err(Error::InvalidPosition(position));
    }
    let street = streets.edge(edge).ok_or(Error::InvalidEdge)?;
    let (u, v) = streets.endpoints(edge).ok_or(Error::InvalidEdge)?;
    let point = interpolate_normalized(&street.geometry, position).ok_or(Error::InvalidEdge)?;
    let (head, tail) = split_line_at_point(&street.geometry, point)?;

    // Geometry may have been digitized from v to u
    let (u_coord, v_coord) = match (streets.coord(u), streets.coord(v)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(Error::InvalidEdge),
    };
    let reversed = street.geometry.points().next().is_some_and(|start| {
        Euclidean.distance(start, Point::from(v_coord)) < Euclidean.distance(start, Point::from(u_coord))
    });
    let (to_u, to_v) = if reversed { (tail, head) } else { (head, tail) };

    let local_edge = |intersection, geometry| {
        let length = Euclidean.length(&geometry);
        LocalEdge {
            intersection,
            geometry,
            length,
        }
    };

    Ok(VehicleRecord {
        id,
        point,
        edge,
        local: LocalGraph {
            vehicle: id,
            point,
            edges: [local_edge(u, to_u), local_edge(v, to_v)],
        },
    })
}

/// Draws `count` street indices with probability proportional to `lengths`
///
/// # Errors
///
/// Fails if the lengths cannot serve as weights (empty, negative or all zero).
pub fn choose_random_streets<R: Rng + ?Sized>(
    lengths: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, Error> {
    let weights = WeightedIndex::new(lengths)
        .map_err(|e| Error::InvalidData(format!("Cannot weight streets by length: {e}")))?;
    Ok((0..count).map(|_| weights.sample(&mut *rng)).collect())
}

/// Places `count` vehicles on random street edges, line-of-sight edges are
/// never used. The result only depends on the graph and `seed`.
pub fn generate_vehicles(
    streets: &StreetGraph,
    count: usize,
    seed: u64,
) -> Result<Vec<VehicleRecord>, Error> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (edges, lengths): (Vec<EdgeIndex>, Vec<f64>) =
        streets.street_edges().map(|(idx, e)| (idx, e.length)).unzip();

    let chosen = choose_random_streets(&lengths, count, &mut rng)?;
    let vehicles = chosen
        .into_iter()
        .enumerate()
        .map(|(id, street)| {
            let position = rng.gen_range(0.0..1.0);
            debug!("Vehicle {id} on street {street} at {position:.3}");
            place_vehicle(streets, edges[street], position, id)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Placed {} vehicles on {} streets (seed {seed})", vehicles.len(), edges.len());
    Ok(vehicles)
}

/// Index of the point nearest to the centre of the bounding box of all
/// points, the first one on ties
pub fn find_center_vehicle(points: &[Point<f64>]) -> Option<usize> {
    let center = Point::from(MultiPoint::new(points.to_vec()).bounding_rect()?.center());

    points
        .iter()
        .enumerate()
        .map(|(idx, &p)| (idx, Euclidean.distance(p, center)))
        .fold(None, |best: Option<(usize, f64)>, (idx, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((idx, d)),
        })
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeKind;
    use geo::line_string;

    fn single_street(geometry: Option<geo::LineString<f64>>) -> (StreetGraph, EdgeIndex) {
        let mut streets = StreetGraph::new();
        let a = streets.add_node(1, Point::new(0.0, 0.0));
        let b = streets.add_node(2, Point::new(10.0, 0.0));
        let edge = streets.add_street(a, b, geometry, None).unwrap();
        (streets, edge)
    }

    #[test]
    fn vehicle_splits_its_street() {
        let (streets, edge) = single_street(None);
        let vehicle = place_vehicle(&streets, edge, 0.3, 7).unwrap();

        assert_eq!(vehicle.id, 7);
        assert!((vehicle.point.x() - 3.0).abs() < 1e-12);
        let [to_u, to_v] = &vehicle.local.edges;
        assert_eq!(streets.node(to_u.intersection).unwrap().id, 1);
        assert_eq!(streets.node(to_v.intersection).unwrap().id, 2);
        assert!((to_u.length - 3.0).abs() < 1e-9);
        assert!((to_v.length - 7.0).abs() < 1e-9);
        assert_eq!(vehicle.local.node_count(), 3);
    }

    #[test]
    fn reversed_geometry_keeps_lengths_with_their_endpoints() {
        let reversed = line_string![(x: 10.0, y: 0.0), (x: 0.0, y: 0.0)];
        let (streets, edge) = single_street(Some(reversed));
        let vehicle = place_vehicle(&streets, edge, 0.2, 0).unwrap();

        // 20% along the geometry means 2 m from node 2
        assert!((vehicle.point.x() - 8.0).abs() < 1e-12);
        let [to_u, to_v] = &vehicle.local.edges;
        assert!((to_u.length - 8.0).abs() < 1e-9);
        assert!((to_v.length - 2.0).abs() < 1e-9);
    }

    #[test]
    fn street_ends_are_valid_positions() {
        let (streets, edge) = single_street(None);
        let start = place_vehicle(&streets, edge, 0.0, 0).unwrap();
        assert_eq!(start.local.edges[0].length, 0.0);
        let end = place_vehicle(&streets, edge, 1.0, 1).unwrap();
        assert_eq!(end.local.edges[1].length, 0.0);
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let (streets, edge) = single_street(None);
        assert!(matches!(
            place_vehicle(&streets, edge, 1.5, 0),
            Err(Error::InvalidPosition(_))
        ));
        assert!(matches!(
            place_vehicle(&streets, edge, f64::NAN, 0),
            Err(Error::InvalidPosition(_))
        ));
        assert!(matches!(
            place_vehicle(&streets, EdgeIndex::new(5), 0.5, 0),
            Err(Error::InvalidEdge)
        ));
    }

    #[test]
    fn zero_weights_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(choose_random_streets(&[0.0, 0.0], 3, &mut rng).is_err());
        let picks = choose_random_streets(&[0.0, 5.0], 10, &mut rng).unwrap();
        assert!(picks.iter().all(|&idx| idx == 1));
    }

    #[test]
    fn generation_is_deterministic_and_uses_streets_only() {
        let mut streets = StreetGraph::new();
        let a = streets.add_node(1, Point::new(0.0, 0.0));
        let b = streets.add_node(2, Point::new(100.0, 0.0));
        let c = streets.add_node(3, Point::new(100.0, 100.0));
        streets.add_street(a, b, None, None).unwrap();
        streets.add_street(b, c, None, None).unwrap();
        streets.add_line_of_sight(a, c, 141.4);

        let first = generate_vehicles(&streets, 25, 42).unwrap();
        let second = generate_vehicles(&streets, 25, 42).unwrap();
        assert_eq!(first.len(), 25);
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.point, y.point);
            assert_eq!(x.edge, y.edge);
        }
        assert!(
            first
                .iter()
                .all(|v| streets.edge(v.edge).unwrap().kind == EdgeKind::Street)
        );
        assert!(generate_vehicles(&streets, 0, 42).unwrap().is_empty());
    }

    #[test]
    fn center_vehicle_is_nearest_to_bounding_box_center() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(48.0, 51.0),
            Point::new(52.0, 49.0),
        ];
        // Both candidates are equally close, the first wins
        assert_eq!(find_center_vehicle(&points), Some(2));
        assert_eq!(find_center_vehicle(&[]), None);
    }
}
