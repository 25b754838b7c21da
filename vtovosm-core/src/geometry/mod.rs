//! Planar geometry helpers shared by placement, classification and routing.
//!
//! All coordinates are in a projected, metric frame. Metrics come from
//! `geo`'s Euclidean algorithms; this module only adds the tolerant split
//! and the turn-angle accumulation.

mod angles;
mod lines;

pub use angles::{TurnProfile, signed_turn, turn_contributions};
pub use lines::{concat_lines, split_line_at_point};

use geo::{Coord, LineInterpolatePoint, LineString, Point};

/// Straight two-point line
pub fn straight_line(a: Coord<f64>, b: Coord<f64>) -> LineString<f64> {
    LineString::new(vec![a, b])
}

/// Point at `fraction` of the length of `line`; the first coordinate of a
/// zero-length line
pub fn interpolate_normalized(line: &LineString<f64>, fraction: f64) -> Option<Point<f64>> {
    line.line_interpolate_point(fraction.clamp(0.0, 1.0))
        .or_else(|| line.points().next())
}
