use std::f64::consts::PI;

use geo::Coord;
use itertools::Itertools;

/// Signed smallest angle that turns direction `from` into direction `to`.
///
/// The result lies in (-π, π]: 0 means continuing straight, ±π/2 a right
/// angle, π a full reversal.
pub fn signed_turn(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let cross = from.x * to.y - from.y * to.x;
    let dot = from.x * to.x + from.y * to.y;
    let angle = cross.atan2(dot);
    if angle <= -PI { PI } else { angle }
}

/// Magnitude of the turn at every interior vertex of a polyline.
///
/// Fewer than three coordinates have no interior vertex and give an empty
/// result.
pub fn turn_contributions(coords: &[Coord<f64>]) -> Vec<f64> {
    if coords.len() < 3 {
        return Vec::new();
    }
    coords
        .iter()
        .tuple_windows()
        .map(|(a, b, c)| {
            let incoming = *b - *a;
            let outgoing = *c - *b;
            signed_turn(incoming, outgoing).abs()
        })
        .collect()
}

/// Turning summary of a route
#[derive(Debug, Clone, PartialEq)]
pub struct TurnProfile {
    /// Turn magnitude per interior vertex, in route order
    pub contributions: Vec<f64>,
    pub sum: f64,
    /// Index into the route coordinates of the sharpest turn
    pub sharpest_vertex: Option<usize>,
}

impl TurnProfile {
    pub fn from_coords(coords: &[Coord<f64>]) -> Self {
        let contributions = turn_contributions(coords);
        let sum = contributions.iter().sum();

        // First maximum wins on ties; +1 maps contribution index to vertex index
        let mut sharpest: Option<(usize, f64)> = None;
        for (idx, &value) in contributions.iter().enumerate() {
            if sharpest.is_none_or(|(_, best)| value > best) {
                sharpest = Some((idx, value));
            }
        }

        Self {
            contributions,
            sum,
            sharpest_vertex: sharpest.map(|(idx, _)| idx + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn boundary_turns() {
        let east = coord! { x: 1.0, y: 0.0 };
        assert_eq!(signed_turn(east, east), 0.0);
        assert_eq!(signed_turn(east, coord! { x: 0.0, y: 1.0 }), FRAC_PI_2);
        assert_eq!(signed_turn(east, coord! { x: 0.0, y: -1.0 }), -FRAC_PI_2);
        assert_eq!(signed_turn(east, coord! { x: -1.0, y: 0.0 }), PI);
        // Reversal with a negative zero cross product still maps to +π
        assert_eq!(signed_turn(coord! { x: -1.0, y: 0.0 }, east), PI);
    }

    #[test]
    fn near_wrap_boundary() {
        let east = coord! { x: 1.0, y: 0.0 };
        let almost_back_up = coord! { x: -1.0, y: 1e-9 };
        let almost_back_down = coord! { x: -1.0, y: -1e-9 };
        assert!((signed_turn(east, almost_back_up) - PI).abs() < 1e-8);
        assert!((signed_turn(east, almost_back_down) + PI).abs() < 1e-8);
        // Magnitudes agree no matter which side of the wrap the turn falls on
        assert!(
            (signed_turn(east, almost_back_up).abs() - signed_turn(east, almost_back_down).abs())
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn short_routes_have_no_turns() {
        assert!(turn_contributions(&[]).is_empty());
        assert!(turn_contributions(&[coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }]).is_empty());
        let profile = TurnProfile::from_coords(&[coord! { x: 0.0, y: 0.0 }]);
        assert_eq!(profile.sum, 0.0);
        assert_eq!(profile.sharpest_vertex, None);
    }

    #[test]
    fn profile_of_a_staircase() {
        let coords = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 20.0, y: 0.0 },
            coord! { x: 20.0, y: 10.0 },
            coord! { x: 30.0, y: 10.0 },
        ];
        let profile = TurnProfile::from_coords(&coords);
        assert_eq!(profile.contributions, vec![0.0, FRAC_PI_2, FRAC_PI_2]);
        assert_eq!(profile.sum, PI);
        assert_eq!(profile.sharpest_vertex, Some(2));
    }

    #[test]
    fn sharpest_prefers_the_larger_turn() {
        let coords = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 20.0, y: 5.0 },
            coord! { x: 20.0, y: 15.0 },
        ];
        let profile = TurnProfile::from_coords(&coords);
        assert_eq!(profile.sharpest_vertex, Some(2));
    }
}
