//! Placed vehicles and their local street graphs

mod collection;

pub use collection::{VehicleCollection, ViewId};

use geo::{LineString, Point};
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::VehicleId;

/// Sub-segment connecting a vehicle to one endpoint of its street
#[derive(Debug, Clone)]
pub struct LocalEdge {
    pub intersection: NodeIndex,
    /// Part of the street geometry between the intersection and the vehicle
    pub geometry: LineString<f64>,
    pub length: f64,
}

/// Vehicle node wired into the two endpoints of the street it stands on.
///
/// This is an overlay on the shared street graph: the intersections are
/// referenced by index, the street graph itself is never modified.
#[derive(Debug, Clone)]
pub struct LocalGraph {
    pub vehicle: VehicleId,
    pub point: Point<f64>,
    /// Edge to the street's first endpoint, then to its second
    pub edges: [LocalEdge; 2],
}

impl LocalGraph {
    /// Vehicle plus distinct intersections; 2 for a street that loops back
    /// onto its own start
    pub fn node_count(&self) -> usize {
        if self.edges[0].intersection == self.edges[1].intersection {
            2
        } else {
            3
        }
    }
}

/// Vehicle placed on a street segment
#[derive(Debug, Clone)]
pub struct VehicleRecord {
    pub id: VehicleId,
    pub point: Point<f64>,
    /// Street the vehicle was placed on
    pub edge: EdgeIndex,
    pub local: LocalGraph,
}
