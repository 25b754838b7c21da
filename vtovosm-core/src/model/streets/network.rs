//! Undirected street multigraph with a spatial index over intersections

use geo::{Coord, Euclidean, Length, LineString, Point};
use hashbrown::HashMap;
use log::{debug, info};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rstar::{RTree, primitives::GeomWithData};

use super::components::{EdgeKind, RawStreetEdge, StreetEdge, StreetNode};
use crate::geometry::straight_line;
use crate::{Error, StreetNodeId};

/// Intersection position stored in the R-tree
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Street network. Parallel edges are allowed, every edge carries geometry.
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub(crate) graph: UnGraph<StreetNode, StreetEdge>,
    node_ids: HashMap<StreetNodeId, NodeIndex>,
    rtree: RTree<IndexedPoint>,
}

impl Default for StreetGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl StreetGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            node_ids: HashMap::new(),
            rtree: RTree::new(),
        }
    }

    /// Builds the graph from raw input, synthesizing straight geometries for
    /// edges that come without one.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references an unknown node id.
    pub fn from_raw(nodes: Vec<StreetNode>, edges: Vec<RawStreetEdge>) -> Result<Self, Error> {
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
        let mut node_ids = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id;
            if node_ids.contains_key(&id) {
                debug!("Duplicate intersection {id} ignored");
                continue;
            }
            node_ids.insert(id, graph.add_node(node));
        }

        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|idx| {
                    let point = graph[idx].geometry;
                    GeomWithData::new([point.x(), point.y()], idx)
                })
                .collect(),
        );

        let mut streets = Self {
            graph,
            node_ids,
            rtree,
        };

        let mut synthesized = 0;
        for raw in edges {
            let lookup = |id: StreetNodeId| {
                streets
                    .node_by_id(id)
                    .ok_or_else(|| Error::InvalidData(format!("Street references unknown node {id}")))
            };
            let (u, v) = (lookup(raw.u)?, lookup(raw.v)?);
            if raw.geometry.as_ref().is_none_or(|g| g.0.len() < 2) {
                synthesized += 1;
            }
            streets.add_street(u, v, raw.geometry, raw.length)?;
        }

        info!(
            "Street graph with {} intersections and {} streets ({} straight geometries synthesized)",
            streets.node_count(),
            streets.edge_count(),
            synthesized
        );
        Ok(streets)
    }

    /// Adds an intersection, returning the existing index if the id is known
    pub fn add_node(&mut self, id: StreetNodeId, geometry: Point<f64>) -> NodeIndex {
        if let Some(&idx) = self.node_ids.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(StreetNode { id, geometry });
        self.node_ids.insert(id, idx);
        self.rtree
            .insert(GeomWithData::new([geometry.x(), geometry.y()], idx));
        idx
    }

    /// Adds a street segment between two intersections.
    ///
    /// A missing (or single-coordinate) geometry becomes the straight line
    /// between the endpoints, a missing length the length of the geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if either node index is not part of the graph.
    pub fn add_street(
        &mut self,
        u: NodeIndex,
        v: NodeIndex,
        geometry: Option<LineString<f64>>,
        length: Option<f64>,
    ) -> Result<EdgeIndex, Error> {
        let (a, b) = match (self.coord(u), self.coord(v)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(Error::InvalidData(format!("Invalid street endpoints {u:?}-{v:?}"))),
        };
        let geometry = geometry
            .filter(|g| g.0.len() >= 2)
            .unwrap_or_else(|| straight_line(a, b));
        let length = length.unwrap_or_else(|| Euclidean.length(&geometry));

        Ok(self.graph.add_edge(
            u,
            v,
            StreetEdge {
                length,
                geometry,
                kind: EdgeKind::Street,
            },
        ))
    }

    pub(crate) fn add_line_of_sight(&mut self, u: NodeIndex, v: NodeIndex, length: f64) -> EdgeIndex {
        let geometry = straight_line(self.graph[u].geometry.0, self.graph[v].geometry.0);
        self.graph.add_edge(
            u,
            v,
            StreetEdge {
                length,
                geometry,
                kind: EdgeKind::LineOfSight,
            },
        )
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_by_id(&self, id: StreetNodeId) -> Option<NodeIndex> {
        self.node_ids.get(&id).copied()
    }

    pub fn coord(&self, idx: NodeIndex) -> Option<Coord<f64>> {
        self.graph.node_weight(idx).map(|node| node.geometry.0)
    }

    pub fn edge(&self, idx: EdgeIndex) -> Option<&StreetEdge> {
        self.graph.edge_weight(idx)
    }

    pub fn endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Native street edges in insertion order, without line-of-sight edges
    pub fn street_edges(&self) -> impl Iterator<Item = (EdgeIndex, &StreetEdge)> + '_ {
        self.graph
            .edge_references()
            .filter(|edge| edge.weight().is_street())
            .map(|edge| (edge.id(), edge.weight()))
    }

    /// All edges touching `node` together with the node on their other end
    pub fn edges_at(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &StreetEdge)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let other = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (edge.id(), other, edge.weight())
        })
    }

    pub fn contains_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    /// Intersections within `radius` of `point` (inclusive)
    pub fn nodes_within(&self, point: Coord<f64>, radius: f64) -> impl Iterator<Item = NodeIndex> + '_ {
        self.rtree
            .locate_within_distance([point.x, point.y], radius * radius)
            .map(|item| item.data)
    }
}
