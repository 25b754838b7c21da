//! Building footprints with an R-tree over their bounding boxes

use geo::{BoundingRect, Intersects, Line, Polygon};
use log::warn;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

/// Bounding box of a footprint, data is the index into `footprints`
type BuildingRtreeItem = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Ordered, immutable collection of building footprints
#[derive(Debug, Clone)]
pub struct BuildingSet {
    footprints: Vec<Polygon<f64>>,
    rtree: RTree<BuildingRtreeItem>,
}

impl BuildingSet {
    pub fn new(footprints: Vec<Polygon<f64>>) -> Self {
        let mut items = Vec::with_capacity(footprints.len());
        for (index, footprint) in footprints.iter().enumerate() {
            if let Some(rect) = footprint.bounding_rect() {
                let envelope = Rectangle::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                items.push(GeomWithData::new(envelope, index));
            } else {
                warn!("Skipping empty building footprint {index}");
            }
        }

        Self {
            footprints,
            rtree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    pub fn footprints(&self) -> &[Polygon<f64>] {
        &self.footprints
    }

    /// Whether `line` touches or crosses any footprint.
    ///
    /// Stops at the first hit; the answer does not depend on footprint order.
    pub fn intersects_line(&self, line: &Line<f64>) -> bool {
        let rect = line.bounding_rect();
        let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .any(|item| line.intersects(&self.footprints[item.data]))
    }
}

impl FromIterator<Polygon<f64>> for BuildingSet {
    fn from_iter<I: IntoIterator<Item = Polygon<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
