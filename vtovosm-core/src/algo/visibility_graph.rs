//! Line-of-sight edges between intersections that can see each other

use geo::{Distance, Euclidean, Line, Point};
use log::{debug, info};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::model::{BuildingSet, StreetGraph};

/// Street graph extended with line-of-sight edges, frozen for classification
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    streets: StreetGraph,
    added: usize,
}

impl VisibilityGraph {
    /// Adds line-of-sight edges to `streets` and freezes the result
    pub fn build(mut streets: StreetGraph, buildings: &BuildingSet, max_distance: f64) -> Self {
        let added = add_line_of_sight_edges(&mut streets, buildings, max_distance);
        Self { streets, added }
    }

    pub fn streets(&self) -> &StreetGraph {
        &self.streets
    }

    /// Number of line-of-sight edges added by [`VisibilityGraph::build`]
    pub fn line_of_sight_edges(&self) -> usize {
        self.added
    }
}

/// Connects every pair of intersections that are not yet adjacent, at most
/// `max_distance` apart and not separated by a building.
///
/// Returns the number of added edges. Running it again on the same graph
/// adds nothing.
pub fn add_line_of_sight_edges(
    streets: &mut StreetGraph,
    buildings: &BuildingSet,
    max_distance: f64,
) -> usize {
    let nodes: Vec<NodeIndex> = streets.node_indices().collect();
    info!(
        "Searching line-of-sight edges between {} intersections (max distance {max_distance})",
        nodes.len()
    );

    let mut candidates = find_visible_pairs(streets, buildings, &nodes, max_distance);
    candidates.sort_unstable_by_key(|&(u, v, _)| (u, v));

    for &(u, v, length) in &candidates {
        streets.add_line_of_sight(u, v, length);
    }

    info!("Added {} line-of-sight edges", candidates.len());
    candidates.len()
}

fn find_visible_pairs(
    streets: &StreetGraph,
    buildings: &BuildingSet,
    nodes: &[NodeIndex],
    max_distance: f64,
) -> Vec<(NodeIndex, NodeIndex, f64)> {
    nodes
        .par_iter()
        .flat_map_iter(|&u| {
            let Some(a) = streets.coord(u) else {
                return Vec::new();
            };
            streets
                .nodes_within(a, max_distance)
                .filter(|&v| u < v && !streets.contains_edge(u, v))
                .filter_map(|v| {
                    let b = streets.coord(v)?;
                    let length = Euclidean.distance(Point::from(a), Point::from(b));
                    if length > max_distance {
                        return None;
                    }
                    if buildings.intersects_line(&Line::new(a, b)) {
                        debug!("Line of sight {u:?}-{v:?} blocked by a building");
                        return None;
                    }
                    Some((u, v, length))
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
