mod cli;
mod config;
mod error;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;
use vtovosm_core::export::{classifications_to_geojson_string, write_csv};
use vtovosm_core::loading::load_network;
use vtovosm_core::{ScenarioResult, run_scenario};

use crate::cli::Args;
use crate::config::{FileConfig, RunConfig};
use crate::error::CliError;

/// Printed to stdout after a successful run
#[derive(Debug, Serialize)]
struct Summary {
    center: usize,
    vehicles: usize,
    line_of_sight_edges: usize,
    los: usize,
    olos: usize,
    orthogonal: usize,
    parallel: usize,
    failed: usize,
}

impl From<&ScenarioResult> for Summary {
    fn from(result: &ScenarioResult) -> Self {
        Self {
            center: result.center,
            vehicles: result.vehicles.len(),
            line_of_sight_edges: result.graph.line_of_sight_edges(),
            los: result.count("los"),
            olos: result.count("olos"),
            orthogonal: result.count("orthogonal"),
            parallel: result.count("parallel"),
            failed: result.failures.len(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    // RUST_LOG wins over -v; core `log` records are bridged by `init`
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args).and_then(|summary| Ok(serde_json::to_string_pretty(&summary)?)) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Summary, CliError> {
    let file = match &args.config {
        Some(path) => FileConfig::read(path)?,
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(args, file)?;
    tracing::debug!(?config, "resolved configuration");

    let (streets, buildings) = load_network(&config.network)?;
    let result = run_scenario(streets, &buildings, &config.scenario, None)?;
    for (vehicle, error) in &result.failures {
        tracing::warn!(vehicle, %error, "pair skipped");
    }

    if let Some(path) = &args.geojson {
        let text = classifications_to_geojson_string(&result.classifications, None)?;
        std::fs::write(path, text).map_err(|source| output_error(path, source))?;
        tracing::info!(path = %path.display(), "GeoJSON written");
    }
    if let Some(path) = &args.csv {
        let file = File::create(path).map_err(|source| output_error(path, source))?;
        write_csv(BufWriter::new(file), &result.classifications, None)?;
        tracing::info!(path = %path.display(), "CSV written");
    }

    Ok(Summary::from(&result))
}

fn output_error(path: &Path, source: std::io::Error) -> CliError {
    CliError::Output {
        path: path.to_path_buf(),
        source,
    }
}
