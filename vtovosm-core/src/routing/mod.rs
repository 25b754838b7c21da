//! Shortest routes between vehicles over the street graph

mod dijkstra;
mod overlay;
mod route;

pub use overlay::{OverlayEdge, RouteNode, RouteOverlay};
pub use route::Route;
