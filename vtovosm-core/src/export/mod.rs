//! Classification results as GeoJSON and CSV

mod to_csv;
mod to_geojson;

pub use to_csv::write_csv;
pub use to_geojson::{classifications_to_geojson, classifications_to_geojson_string};
