use thiserror::Error;

use crate::VehicleId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Point is not on line (distance {distance:e})")]
    PointNotOnLine { distance: f64 },
    #[error("No path between vehicle {from} and vehicle {to}")]
    NoPath { from: VehicleId, to: VehicleId },
    #[error("Position {0} is outside of [0, 1]")]
    InvalidPosition(f64),
    #[error("Invalid edge index")]
    InvalidEdge,
    #[error("Invalid vehicle id {0}")]
    InvalidVehicle(VehicleId),
    #[error("Invalid view: {0}")]
    InvalidView(String),
    #[error("Slot {index} is owned by view '{owner}'")]
    ViewConflict { index: usize, owner: String },
    #[error("Expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("WKT error: {0}")]
    WktError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// Errors raised by a violated precondition of a single geometry or
    /// routing operation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::PointNotOnLine { .. } | Error::NoPath { .. })
    }
}
