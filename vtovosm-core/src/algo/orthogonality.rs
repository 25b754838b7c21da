//! Decides whether an NLOS pair is separated by a single corner

use geo::Point;
use log::trace;

use crate::algo::visibility_graph::VisibilityGraph;
use crate::geometry::{TurnProfile, interpolate_normalized};
use crate::model::VehicleRecord;
use crate::routing::{Route, RouteOverlay};
use crate::Error;

/// Result of routing an NLOS pair through the visibility graph
#[derive(Debug, Clone)]
pub struct Orthogonality {
    /// Summed turn angle is below the configured maximum
    pub is_orthogonal: bool,
    pub angle_sum: f64,
    /// Coordinate of the sharpest turn, the route midpoint if it has none
    pub relay: Point<f64>,
    pub route: Route,
}

/// Routes `rx` to `tx` and measures how much the route turns.
///
/// # Errors
///
/// [`Error::NoPath`] if the vehicles are not connected.
pub fn analyze_orthogonality(
    graph: &VisibilityGraph,
    rx: &VehicleRecord,
    tx: &VehicleRecord,
    max_angle: f64,
) -> Result<Orthogonality, Error> {
    let overlay = RouteOverlay::new(graph.streets(), [&rx.local, &tx.local]);
    let route = overlay.shortest_route(rx.id, tx.id)?;

    let TurnProfile {
        sum,
        sharpest_vertex,
        ..
    } = route.turns();
    let relay = sharpest_vertex
        .and_then(|idx| route.geometry.0.get(idx).copied())
        .map(Point::from)
        .or_else(|| interpolate_normalized(&route.geometry, 0.5))
        .unwrap_or(rx.point);

    trace!(
        "Vehicles {} and {}: turn sum {sum:.4}, relay ({:.2}, {:.2})",
        rx.id,
        tx.id,
        relay.x(),
        relay.y()
    );

    Ok(Orthogonality {
        is_orthogonal: sum < max_angle,
        angle_sum: sum,
        relay,
        route,
    })
}
