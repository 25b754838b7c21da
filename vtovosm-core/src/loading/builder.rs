use geo::{ConvexHull, Intersects, MultiPoint};
use log::info;

use super::buildings::read_buildings;
use super::config::NetworkConfig;
use super::streets::read_streets;
use crate::Error;
use crate::model::{BuildingSet, StreetGraph};

/// Loads the street graph and building footprints named in `config`
///
/// # Errors
///
/// Returns an error if a file is missing or cannot be parsed
pub fn load_network(config: &NetworkConfig) -> Result<(StreetGraph, BuildingSet), Error> {
    validate_config(config)?;

    // Parse footprints in a separate thread while the streets are read
    let buildings_path = config.buildings_path.clone();
    let buildings_handle = std::thread::spawn(move || match buildings_path {
        Some(path) => read_buildings(&path),
        None => Ok(BuildingSet::new(Vec::new())),
    });

    info!("Processing street data: {}", config.streets_path.display());
    let streets = read_streets(&config.streets_path)?;

    let buildings = buildings_handle
        .join()
        .map_err(|_| Error::InvalidData("Building loading thread panicked".to_string()))??;

    validate_building_coverage(&streets, &buildings);
    info!(
        "Network loaded: {} intersections, {} streets, {} buildings",
        streets.node_count(),
        streets.edge_count(),
        buildings.len()
    );
    Ok((streets, buildings))
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    let missing = |path: &std::path::Path, what: &str| {
        Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{what} file not found: {}", path.display()),
        ))
    };

    if !config.streets_path.exists() {
        return Err(missing(&config.streets_path, "Street"));
    }
    if let Some(path) = &config.buildings_path
        && !path.exists()
    {
        return Err(missing(path, "Building"));
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn validate_building_coverage(streets: &StreetGraph, buildings: &BuildingSet) {
    if buildings.is_empty() || streets.node_count() == 0 {
        return;
    }

    let graph_nodes: MultiPoint = streets
        .graph
        .node_weights()
        .map(|node| node.geometry)
        .collect();
    let graph_hull = graph_nodes.convex_hull();

    let outside = buildings
        .footprints()
        .iter()
        .filter(|footprint| !footprint.intersects(&graph_hull))
        .count();

    if outside > 0 {
        let percentage = (outside as f64 / buildings.len() as f64) * 100.0;
        log::warn!(
            "{outside} of {} buildings ({percentage:.1}%) are outside the street network \
        coverage area. Check that both files use the same projection.",
            buildings.len()
        );
    }
}
