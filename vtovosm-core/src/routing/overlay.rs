//! Street graph plus vehicle local graphs, without copying the street graph

use geo::{Coord, LineString};
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::VehicleId;
use crate::model::{LocalGraph, StreetGraph};

/// Node of the composed routing graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteNode {
    Intersection(NodeIndex),
    Vehicle(VehicleId),
}

/// Edge of the composed routing graph as seen from the node it leaves
#[derive(Debug, Clone, Copy)]
pub struct OverlayEdge<'a> {
    pub to: RouteNode,
    pub length: f64,
    /// Geometry as stored, not oriented
    pub geometry: &'a LineString<f64>,
    /// Street graph edge, `None` for a vehicle's local edge
    pub street: Option<EdgeIndex>,
}

/// Read-only union of the street graph with a few vehicle local graphs.
///
/// Intersections are shared by index; vehicle nodes and their two edges
/// each live only in the overlay.
#[derive(Debug, Clone)]
pub struct RouteOverlay<'a> {
    base: &'a StreetGraph,
    locals: Vec<&'a LocalGraph>,
}

impl<'a> RouteOverlay<'a> {
    /// A vehicle given twice is only added once
    pub fn new<I>(base: &'a StreetGraph, locals: I) -> Self
    where
        I: IntoIterator<Item = &'a LocalGraph>,
    {
        let mut unique: Vec<&'a LocalGraph> = Vec::new();
        for local in locals {
            if !unique.iter().any(|known| known.vehicle == local.vehicle) {
                unique.push(local);
            }
        }
        Self {
            base,
            locals: unique,
        }
    }

    fn local(&self, vehicle: VehicleId) -> Option<&'a LocalGraph> {
        self.locals.iter().copied().find(|local| local.vehicle == vehicle)
    }

    pub fn contains(&self, node: RouteNode) -> bool {
        self.coord(node).is_some()
    }

    pub fn coord(&self, node: RouteNode) -> Option<Coord<f64>> {
        match node {
            RouteNode::Intersection(idx) => self.base.coord(idx),
            RouteNode::Vehicle(id) => self.local(id).map(|local| local.point.0),
        }
    }

    /// All edges leaving `node`, parallel edges included
    pub fn neighbors(&self, node: RouteNode) -> Vec<OverlayEdge<'a>> {
        match node {
            RouteNode::Intersection(idx) => {
                let mut edges: Vec<OverlayEdge<'a>> = self
                    .base
                    .edges_at(idx)
                    .map(|(street, other, edge)| OverlayEdge {
                        to: RouteNode::Intersection(other),
                        length: edge.length,
                        geometry: &edge.geometry,
                        street: Some(street),
                    })
                    .collect();
                for &local in &self.locals {
                    edges.extend(
                        local
                            .edges
                            .iter()
                            .filter(|edge| edge.intersection == idx)
                            .map(|edge| OverlayEdge {
                                to: RouteNode::Vehicle(local.vehicle),
                                length: edge.length,
                                geometry: &edge.geometry,
                                street: None,
                            }),
                    );
                }
                edges
            }
            RouteNode::Vehicle(id) => self
                .local(id)
                .map(|local| {
                    local
                        .edges
                        .iter()
                        .map(|edge| OverlayEdge {
                            to: RouteNode::Intersection(edge.intersection),
                            length: edge.length,
                            geometry: &edge.geometry,
                            street: None,
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::placement::place_vehicle;
    use geo::Point;

    #[test]
    fn vehicles_attach_to_their_street_endpoints() {
        let mut streets = StreetGraph::new();
        let a = streets.add_node(1, Point::new(0.0, 0.0));
        let b = streets.add_node(2, Point::new(10.0, 0.0));
        let edge = streets.add_street(a, b, None, None).unwrap();
        let rx = place_vehicle(&streets, edge, 0.25, 0).unwrap();
        let tx = place_vehicle(&streets, edge, 0.75, 1).unwrap();

        let overlay = RouteOverlay::new(&streets, [&rx.local, &tx.local, &rx.local]);

        let from_a = overlay.neighbors(RouteNode::Intersection(a));
        assert_eq!(from_a.len(), 3);
        assert!(from_a.iter().any(|e| e.to == RouteNode::Vehicle(0) && e.length == 2.5));
        assert!(from_a.iter().any(|e| e.to == RouteNode::Vehicle(1) && e.length == 7.5));

        let from_rx = overlay.neighbors(RouteNode::Vehicle(0));
        assert_eq!(from_rx.len(), 2);
        assert!(from_rx.iter().all(|e| e.street.is_none()));

        // Base graph is untouched
        assert_eq!(streets.edge_count(), 1);
        assert!(overlay.neighbors(RouteNode::Vehicle(9)).is_empty());
        assert!(!overlay.contains(RouteNode::Vehicle(9)));
    }
}
