//! This module is responsible for loading street networks and building
//! footprints from GeoJSON and WKT files.

mod builder;
mod buildings;
mod config;
mod streets;

pub use builder::load_network;
pub use buildings::{buildings_from_geojson, buildings_from_wkt, read_buildings};
pub use config::NetworkConfig;
pub use streets::{read_streets, streets_from_geojson};
