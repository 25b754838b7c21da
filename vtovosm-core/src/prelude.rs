pub use crate::SPLIT_TOLERANCE;

// Re-export key components
pub use crate::algo::classification::{
    Condition, PairClassification, classify_all_pairs, classify_from, classify_pair,
};
pub use crate::algo::conditions::{VisibilityCondition, classify_visibility};
pub use crate::algo::orthogonality::{Orthogonality, analyze_orthogonality};
pub use crate::algo::placement::{
    choose_random_streets, find_center_vehicle, generate_vehicles, place_vehicle,
};
pub use crate::algo::scenario::{ScenarioResult, run_scenario};
pub use crate::algo::visibility_graph::{VisibilityGraph, add_line_of_sight_edges};
pub use crate::config::{ClassifierConfig, ScenarioConfig};
pub use crate::loading::{NetworkConfig, load_network};
pub use crate::model::{
    BuildingSet, EdgeKind, LocalGraph, RawStreetEdge, StreetEdge, StreetGraph, StreetNode,
    VehicleCollection, VehicleRecord, ViewId,
};
pub use crate::pathloss::{Pathloss, PathlossInput};

// Core identifier types
pub use crate::StreetNodeId;
pub use crate::VehicleId;
