//! Street network components - intersections and segments

use geo::{LineString, Point};

use crate::StreetNodeId;

/// Street graph node (intersection)
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: StreetNodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Origin of an edge in the street graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Native street segment
    Street,
    /// Direct line of sight between two intersections
    LineOfSight,
}

/// Street graph edge
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Length used as routing weight
    pub length: f64,
    /// Geometry from the first to the second endpoint as inserted
    pub geometry: LineString<f64>,
    pub kind: EdgeKind,
}

impl StreetEdge {
    pub fn is_street(&self) -> bool {
        self.kind == EdgeKind::Street
    }
}

/// Street segment as read from the input, before geometry is guaranteed
#[derive(Debug, Clone)]
pub struct RawStreetEdge {
    pub u: StreetNodeId,
    pub v: StreetNodeId,
    pub geometry: Option<LineString<f64>>,
    pub length: Option<f64>,
}
