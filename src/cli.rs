use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Default)]
#[command(name = "vtovosm")]
#[command(version, about = "Classify vehicle-to-vehicle propagation conditions on a street network")]
pub struct Args {
    /// TOML file with network paths and scenario parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Street network as GeoJSON
    #[arg(long)]
    pub streets: Option<PathBuf>,

    /// Building footprints as GeoJSON or WKT (`.wkt`)
    #[arg(long)]
    pub buildings: Option<PathBuf>,

    /// Number of vehicles to place
    #[arg(long)]
    pub vehicles: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Longest line-of-sight edge between two intersections, in metres
    #[arg(long)]
    pub max_los_distance: Option<f64>,

    /// Vehicle body radius for OLOS, in metres
    #[arg(long)]
    pub margin: Option<f64>,

    /// Turn budget of an orthogonal route, in radians
    #[arg(long)]
    pub max_angle: Option<f64>,

    /// Write the classified vehicles as GeoJSON
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    /// Write one CSV row per classified pair
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// More log output, repeat for trace level
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let args = Args::parse_from([
            "vtovosm",
            "--streets",
            "city.geojson",
            "--vehicles",
            "25",
            "--max-angle",
            "1.5",
            "-vv",
        ]);
        assert_eq!(args.streets, Some(PathBuf::from("city.geojson")));
        assert_eq!(args.vehicles, Some(25));
        assert_eq!(args.max_angle, Some(1.5));
        assert_eq!(args.margin, None);
        assert_eq!(args.log_level(), "trace");
    }
}
