use geo::{Coord, Distance, Euclidean, LineString, Point};

use crate::{Error, SPLIT_TOLERANCE};

fn within_tolerance(a: Coord<f64>, b: Coord<f64>) -> bool {
    Euclidean.distance(Point::from(a), Point::from(b)) <= SPLIT_TOLERANCE
}

/// Splits `line` at `point` into the part before and the part after it.
///
/// The split locus is a disk of radius [`SPLIT_TOLERANCE`] around the point,
/// so vertices inside the disk are absorbed by the point itself and points
/// that are a few ulps off the line still split cleanly. A point at either
/// end yields a degenerate part of (near) zero length.
///
/// # Errors
///
/// [`Error::PointNotOnLine`] if the point is farther than the tolerance from
/// the line, or the line has fewer than two coordinates.
pub fn split_line_at_point(
    line: &LineString<f64>,
    point: Point<f64>,
) -> Result<(LineString<f64>, LineString<f64>), Error> {
    let distance_to_line = Euclidean.distance(&point, line);
    let off_line = Error::PointNotOnLine {
        distance: distance_to_line,
    };
    if !(distance_to_line <= SPLIT_TOLERANCE) {
        return Err(off_line);
    }

    let coords = &line.0;
    let segment = line
        .lines()
        .position(|segment| Euclidean.distance(&segment, &point) <= SPLIT_TOLERANCE)
        .ok_or(off_line)?;

    let p = point.0;
    let mut before: Vec<Coord<f64>> = coords[..=segment].to_vec();
    while before.last().is_some_and(|c| within_tolerance(*c, p)) {
        before.pop();
    }
    if before.is_empty() {
        before.push(coords[0]);
    }
    before.push(p);

    let mut after = vec![p];
    after.extend(
        coords[segment + 1..]
            .iter()
            .copied()
            .skip_while(|c| within_tolerance(*c, p)),
    );
    if after.len() == 1 {
        after.push(coords[coords.len() - 1]);
    }

    Ok((LineString::new(before), LineString::new(after)))
}

/// Concatenates lines that already run end to start.
///
/// The first coordinate of a line is dropped when it coincides (within
/// [`SPLIT_TOLERANCE`]) with the current end, as are any other consecutive
/// duplicates.
pub fn concat_lines<'a, I>(lines: I) -> LineString<f64>
where
    I: IntoIterator<Item = &'a LineString<f64>>,
{
    let mut merged: Vec<Coord<f64>> = Vec::new();
    for coord in lines.into_iter().flat_map(|line| line.0.iter().copied()) {
        if merged.last().is_some_and(|last| within_tolerance(*last, coord)) {
            continue;
        }
        merged.push(coord);
    }
    LineString::new(merged)
}
