use geo::{Coord, Distance, Euclidean, LineString, Point};
use itertools::Itertools;
use log::trace;

use super::dijkstra::dijkstra_path;
use super::overlay::{OverlayEdge, RouteNode, RouteOverlay};
use crate::geometry::{TurnProfile, concat_lines};
use crate::{Error, VehicleId};

/// Shortest route between two vehicles through the composed graph
#[derive(Debug, Clone)]
pub struct Route {
    pub nodes: Vec<RouteNode>,
    /// Sum of the weights of the traversed edges
    pub length: f64,
    /// Traversed geometries joined in travel order
    pub geometry: LineString<f64>,
}

impl Route {
    pub fn turns(&self) -> TurnProfile {
        TurnProfile::from_coords(&self.geometry.0)
    }
}

impl RouteOverlay<'_> {
    /// Shortest route from vehicle `from` to vehicle `to`.
    ///
    /// Between two consecutive nodes the shortest of any parallel edges is
    /// taken, and each edge geometry is turned to start at the node it
    /// leaves.
    ///
    /// # Errors
    ///
    /// [`Error::NoPath`] if the vehicles are not connected, or one of them
    /// is not part of the overlay.
    pub fn shortest_route(&self, from: VehicleId, to: VehicleId) -> Result<Route, Error> {
        let (length, nodes) = dijkstra_path(self, RouteNode::Vehicle(from), RouteNode::Vehicle(to))
            .ok_or(Error::NoPath { from, to })?;

        let mut legs = Vec::with_capacity(nodes.len().saturating_sub(1));
        for (a, b) in nodes.iter().copied().tuple_windows() {
            let edge = self
                .neighbors(a)
                .into_iter()
                .filter(|edge| edge.to == b)
                .min_by(|x, y| x.length.total_cmp(&y.length))
                .ok_or(Error::NoPath { from, to })?;
            let start = self.coord(a).ok_or(Error::NoPath { from, to })?;
            legs.push(oriented_from(&edge, start));
        }

        let geometry = concat_lines(&legs);
        trace!(
            "Route {from} -> {to}: {} nodes, {} coordinates, length {length:.2}",
            nodes.len(),
            geometry.0.len()
        );

        Ok(Route {
            nodes,
            length,
            geometry,
        })
    }
}

/// Edge geometry running away from `start`
fn oriented_from(edge: &OverlayEdge<'_>, start: Coord<f64>) -> LineString<f64> {
    let coords = &edge.geometry.0;
    let start = Point::from(start);
    let forward = match (coords.first(), coords.last()) {
        (Some(&first), Some(&last)) => {
            Euclidean.distance(Point::from(first), start) <= Euclidean.distance(Point::from(last), start)
        }
        _ => true,
    };
    if forward {
        edge.geometry.clone()
    } else {
        LineString::new(coords.iter().rev().copied().collect())
    }
}
