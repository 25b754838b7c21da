//! Data model for propagation analysis
//!
//! Street network, building footprints and placed vehicles.

pub mod buildings;
pub mod streets;
pub mod vehicles;

pub use buildings::BuildingSet;
pub use streets::{EdgeKind, RawStreetEdge, StreetEdge, StreetGraph, StreetNode};
pub use vehicles::{LocalEdge, LocalGraph, VehicleCollection, VehicleRecord, ViewId};
