use std::path::{Path, PathBuf};

use serde::Deserialize;
use vtovosm_core::ScenarioConfig;
use vtovosm_core::loading::NetworkConfig;

use crate::cli::Args;
use crate::error::CliError;

/// Contents of the `--config` TOML file
///
/// ```toml
/// streets_path = "streets.geojson"
/// buildings_path = "buildings.wkt"
///
/// [scenario]
/// vehicles = 200
/// seed = 7
///
/// [scenario.classifier]
/// vehicle_margin = 1.5
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub streets_path: Option<PathBuf>,
    pub buildings_path: Option<PathBuf>,
    pub scenario: ScenarioConfig,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Network and scenario settings after applying command line overrides
#[derive(Debug)]
pub struct RunConfig {
    pub network: NetworkConfig,
    pub scenario: ScenarioConfig,
}

impl RunConfig {
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self, CliError> {
        let streets = args
            .streets
            .clone()
            .or(file.streets_path)
            .ok_or(CliError::MissingStreets)?;
        let mut network = NetworkConfig::new(streets);
        if let Some(buildings) = args.buildings.clone().or(file.buildings_path) {
            network = network.with_buildings(buildings);
        }

        let mut scenario = file.scenario;
        if let Some(vehicles) = args.vehicles {
            scenario.vehicles = vehicles;
        }
        if let Some(seed) = args.seed {
            scenario.seed = seed;
        }
        let classifier = &mut scenario.classifier;
        if let Some(distance) = args.max_los_distance {
            classifier.max_los_distance = distance;
        }
        if let Some(margin) = args.margin {
            classifier.vehicle_margin = margin;
        }
        if let Some(angle) = args.max_angle {
            classifier.max_angle = angle;
        }

        Ok(Self { network, scenario })
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    const FILE: &str = r#"
streets_path = "from_file.geojson"
buildings_path = "from_file.wkt"

[scenario]
vehicles = 40
seed = 3

[scenario.classifier]
vehicle_margin = 1.5
"#;

    #[test]
    fn command_line_overrides_file_overrides_defaults() {
        let file: FileConfig = toml::from_str(FILE).unwrap();
        let args = Args {
            streets: Some(PathBuf::from("city.geojson")),
            seed: Some(9),
            max_angle: Some(2.0),
            ..Args::default()
        };
        let config = RunConfig::resolve(&args, file).unwrap();

        assert_eq!(config.network.streets_path, PathBuf::from("city.geojson"));
        assert_eq!(
            config.network.buildings_path,
            Some(PathBuf::from("from_file.wkt"))
        );
        assert_eq!(config.scenario.vehicles, 40);
        assert_eq!(config.scenario.seed, 9);
        assert_eq!(config.scenario.max_pathloss, 150.0);
        assert_eq!(config.scenario.classifier.vehicle_margin, 1.5);
        assert_eq!(config.scenario.classifier.max_angle, 2.0);
        assert_eq!(config.scenario.classifier.max_los_distance, 50.0);
    }

    #[test]
    fn defaults_without_file() {
        let args = Args {
            streets: Some(PathBuf::from("city.geojson")),
            ..Args::default()
        };
        let config = RunConfig::resolve(&args, FileConfig::default()).unwrap();
        assert_eq!(config.network.buildings_path, None);
        assert_eq!(config.scenario.vehicles, 100);
        assert_eq!(config.scenario.classifier.max_angle, PI);
    }

    #[test]
    fn streets_are_required() {
        let err = RunConfig::resolve(&Args::default(), FileConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingStreets));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "scenario = 3").unwrap();
        let err = FileConfig::read(&path).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
