//! Propagation conditions between vehicles on a street network.
//!
//! Vehicles are placed on the edges of a street graph, every pair is tested
//! against building footprints (NLOS) and other vehicle bodies (OLOS), and
//! NLOS pairs are routed through the street graph to decide whether the
//! obstruction is a single street corner (orthogonal) or not (parallel).

pub mod algo;
pub mod config;
mod error;
pub mod export;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod pathloss;
pub mod prelude;
pub mod routing;

pub use algo::classification::{
    Condition, PairClassification, classify_all_pairs, classify_from, classify_pair,
};
pub use algo::conditions::VisibilityCondition;
pub use algo::orthogonality::Orthogonality;
pub use algo::scenario::{ScenarioResult, run_scenario};
pub use algo::visibility_graph::VisibilityGraph;
pub use config::{ClassifierConfig, ScenarioConfig};
pub use error::Error;
pub use model::{BuildingSet, StreetGraph, VehicleCollection, VehicleRecord};

/// External identifier of an intersection (OSM node id)
pub type StreetNodeId = u64;
/// Index of a vehicle in the placement order
pub type VehicleId = usize;

/// Radius of the disk used when splitting a line at a point
pub const SPLIT_TOLERANCE: f64 = 1e-8;
