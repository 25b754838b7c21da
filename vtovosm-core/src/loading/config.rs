use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Input files of a street network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// GeoJSON with intersections (points) and streets (lines)
    pub streets_path: PathBuf,
    /// Building footprints as GeoJSON, or WKT with a `.wkt` extension
    pub buildings_path: Option<PathBuf>,
}

impl NetworkConfig {
    pub fn new(streets_path: impl Into<PathBuf>) -> Self {
        Self {
            streets_path: streets_path.into(),
            buildings_path: None,
        }
    }

    #[must_use]
    pub fn with_buildings(mut self, buildings_path: impl Into<PathBuf>) -> Self {
        self.buildings_path = Some(buildings_path.into());
        self
    }
}
