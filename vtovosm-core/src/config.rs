//! Tunable thresholds of the classifier and the scenario runner

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Thresholds used when classifying a vehicle pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum distance between two intersections connected by a
    /// line-of-sight edge
    pub max_los_distance: f64,
    /// Radius of a vehicle body when testing for OLOS
    pub vehicle_margin: f64,
    /// A route whose summed turn angle is below this is orthogonal
    pub max_angle: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_los_distance: 50.0,
            vehicle_margin: 2.0,
            max_angle: PI,
        }
    }
}

/// Parameters of one randomized scenario run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub vehicles: usize,
    pub seed: u64,
    /// Pathloss above which a vehicle counts as out of range
    pub max_pathloss: f64,
    pub classifier: ClassifierConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            vehicles: 100,
            seed: 0,
            max_pathloss: 150.0,
            classifier: ClassifierConfig::default(),
        }
    }
}
