//! Street network model

pub mod components;
pub mod network;

pub use components::{EdgeKind, RawStreetEdge, StreetEdge, StreetNode};
pub use network::{IndexedPoint, StreetGraph};
