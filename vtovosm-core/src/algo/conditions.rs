//! Line-of-sight tests against building footprints and vehicle bodies

use geo::{Distance, Euclidean, Line, LineLocatePoint, Point};

use crate::model::BuildingSet;

/// Propagation condition of the direct path between two vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityCondition {
    /// Nothing in the way
    Los,
    /// Clear of buildings but blocked by another vehicle
    Olos,
    /// Blocked by a building
    Nlos,
}

impl VisibilityCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Los => "los",
            Self::Olos => "olos",
            Self::Nlos => "nlos",
        }
    }
}

/// Whether the direct path between `a` and `b` crosses a building
pub fn is_nlos(a: Point<f64>, b: Point<f64>, buildings: &BuildingSet) -> bool {
    buildings.intersects_line(&Line::new(a.0, b.0))
}

/// Whether any of `obstacles` sits on the direct path between `a` and `b`.
///
/// An obstacle blocks the path if its projection falls strictly between the
/// endpoints and it is closer than `margin` to the path. Obstacles level
/// with or behind an endpoint never block.
pub fn is_olos<I>(a: Point<f64>, b: Point<f64>, obstacles: I, margin: f64) -> bool
where
    I: IntoIterator<Item = Point<f64>>,
{
    let path = Line::new(a.0, b.0);
    obstacles.into_iter().any(|obstacle| {
        path.line_locate_point(&obstacle)
            .is_some_and(|fraction| fraction > 0.0 && fraction < 1.0)
            && Euclidean.distance(&path, &obstacle) < margin
    })
}

/// Classifies the direct path between `rx` and `tx`.
///
/// `others` are the positions of all vehicles except the pair itself. They
/// are only consulted when no building is in the way.
pub fn classify_visibility<I>(
    rx: Point<f64>,
    tx: Point<f64>,
    others: I,
    buildings: &BuildingSet,
    margin: f64,
) -> VisibilityCondition
where
    I: IntoIterator<Item = Point<f64>>,
{
    if is_nlos(rx, tx, buildings) {
        VisibilityCondition::Nlos
    } else if is_olos(rx, tx, others, margin) {
        VisibilityCondition::Olos
    } else {
        VisibilityCondition::Los
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn block() -> BuildingSet {
        BuildingSet::new(vec![polygon![
            (x: 10.0, y: -5.0),
            (x: 20.0, y: -5.0),
            (x: 20.0, y: 5.0),
            (x: 10.0, y: 5.0),
        ]])
    }

    #[test]
    fn building_between_vehicles_means_nlos() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(30.0, 0.0));
        assert_eq!(
            classify_visibility(a, b, [], &block(), 2.0),
            VisibilityCondition::Nlos
        );
        // Symmetric
        assert_eq!(
            classify_visibility(b, a, [], &block(), 2.0),
            VisibilityCondition::Nlos
        );
    }

    #[test]
    fn building_trumps_vehicle_bodies() {
        let (a, b) = (Point::new(0.0, 0.0), Point::new(30.0, 0.0));
        let others = [Point::new(5.0, 0.0)];
        assert_eq!(
            classify_visibility(a, b, others, &block(), 2.0),
            VisibilityCondition::Nlos
        );
    }

    #[test]
    fn vehicle_on_path_means_olos() {
        let empty = BuildingSet::new(Vec::new());
        let (a, b) = (Point::new(0.0, 0.0), Point::new(30.0, 0.0));
        assert_eq!(
            classify_visibility(a, b, [Point::new(15.0, 1.5)], &empty, 2.0),
            VisibilityCondition::Olos
        );
        assert_eq!(
            classify_visibility(a, b, [Point::new(15.0, 2.5)], &empty, 2.0),
            VisibilityCondition::Los
        );
    }

    #[test]
    fn vehicles_beside_the_endpoints_do_not_block() {
        let empty = BuildingSet::new(Vec::new());
        let (a, b) = (Point::new(0.0, 0.0), Point::new(30.0, 0.0));
        let others = [
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
            Point::new(30.0, 0.5),
            Point::new(31.0, 0.0),
        ];
        assert_eq!(
            classify_visibility(a, b, others, &empty, 2.0),
            VisibilityCondition::Los
        );
    }
}
