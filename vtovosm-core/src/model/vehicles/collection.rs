//! Fixed-size table of vehicles with relational attributes addressed
//! through validated index views.

use fixedbitset::FixedBitSet;
use geo::Point;
use hashbrown::HashMap;

use super::VehicleRecord;
use crate::Error;

/// Handle of a view registered in a [`VehicleCollection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

#[derive(Debug, Clone)]
struct IndexView {
    name: String,
    indices: Vec<usize>,
}

/// One relational attribute with per-slot write ownership
#[derive(Debug, Clone)]
struct Relation<T> {
    values: Vec<T>,
    owners: Vec<Option<ViewId>>,
}

impl<T: Copy + Default> Relation<T> {
    fn new(size: usize) -> Self {
        Self {
            values: vec![T::default(); size],
            owners: vec![None; size],
        }
    }

    fn clear(&mut self) {
        self.values.fill(T::default());
        self.owners.fill(None);
    }

    fn read(&self, view: &IndexView) -> Vec<T> {
        view.indices.iter().map(|&idx| self.values[idx]).collect()
    }
}

/// Vehicles plus distance, pathloss and NLOS flag of each vehicle relative
/// to a reference vehicle.
///
/// Subsets are addressed through views created with
/// [`VehicleCollection::add_view`]. A slot written through one view cannot
/// be overwritten through another until [`VehicleCollection::clear_relations`]
/// is called; reads are unrestricted.
#[derive(Debug, Clone)]
pub struct VehicleCollection {
    vehicles: Vec<VehicleRecord>,
    distances: Relation<f64>,
    pathlosses: Relation<f64>,
    nlos: Relation<bool>,
    views: Vec<IndexView>,
    view_names: HashMap<String, ViewId>,
}

impl VehicleCollection {
    pub fn new(vehicles: Vec<VehicleRecord>) -> Self {
        let size = vehicles.len();
        Self {
            vehicles,
            distances: Relation::new(size),
            pathlosses: Relation::new(size),
            nlos: Relation::new(size),
            views: Vec::new(),
            view_names: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    /// Registers a named subset of vehicle indices.
    ///
    /// # Errors
    ///
    /// Fails for a name that is already taken, an index out of range or an
    /// index given twice.
    pub fn add_view<I>(&mut self, name: &str, indices: I) -> Result<ViewId, Error>
    where
        I: IntoIterator<Item = usize>,
    {
        if self.view_names.contains_key(name) {
            return Err(Error::InvalidView(format!("'{name}' already exists")));
        }

        let mut seen = FixedBitSet::with_capacity(self.len());
        let mut checked = Vec::new();
        for idx in indices {
            if idx >= self.len() {
                return Err(Error::InvalidView(format!(
                    "'{name}' index {idx} out of range for {} vehicles",
                    self.len()
                )));
            }
            if seen.put(idx) {
                return Err(Error::InvalidView(format!("'{name}' repeats index {idx}")));
            }
            checked.push(idx);
        }

        let id = ViewId(self.views.len());
        self.views.push(IndexView {
            name: name.to_string(),
            indices: checked,
        });
        self.view_names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn view(&self, name: &str) -> Result<ViewId, Error> {
        self.view_names
            .get(name)
            .copied()
            .ok_or_else(|| Error::InvalidView(format!("'{name}' does not exist")))
    }

    fn resolve(&self, view: ViewId) -> Result<&IndexView, Error> {
        resolve_view(&self.views, view)
    }

    pub fn view_name(&self, view: ViewId) -> Result<&str, Error> {
        Ok(self.resolve(view)?.name.as_str())
    }

    pub fn indices(&self, view: ViewId) -> Result<&[usize], Error> {
        Ok(&self.resolve(view)?.indices)
    }

    pub fn points(&self, view: ViewId) -> Result<Vec<Point<f64>>, Error> {
        Ok(self
            .resolve(view)?
            .indices
            .iter()
            .map(|&idx| self.vehicles[idx].point)
            .collect())
    }

    pub fn set_distances(&mut self, view: ViewId, values: &[f64]) -> Result<(), Error> {
        let indexed = resolve_view(&self.views, view)?;
        write_relation(&mut self.distances, view, indexed, &self.views, values)
    }

    pub fn distances(&self, view: ViewId) -> Result<Vec<f64>, Error> {
        Ok(self.distances.read(self.resolve(view)?))
    }

    pub fn set_pathlosses(&mut self, view: ViewId, values: &[f64]) -> Result<(), Error> {
        let indexed = resolve_view(&self.views, view)?;
        write_relation(&mut self.pathlosses, view, indexed, &self.views, values)
    }

    pub fn pathlosses(&self, view: ViewId) -> Result<Vec<f64>, Error> {
        Ok(self.pathlosses.read(self.resolve(view)?))
    }

    pub fn set_nlos(&mut self, view: ViewId, values: &[bool]) -> Result<(), Error> {
        let indexed = resolve_view(&self.views, view)?;
        write_relation(&mut self.nlos, view, indexed, &self.views, values)
    }

    pub fn nlos(&self, view: ViewId) -> Result<Vec<bool>, Error> {
        Ok(self.nlos.read(self.resolve(view)?))
    }

    /// Resets all relational values and releases slot ownership; views stay
    pub fn clear_relations(&mut self) {
        self.distances.clear();
        self.pathlosses.clear();
        self.nlos.clear();
    }
}

fn resolve_view(views: &[IndexView], view: ViewId) -> Result<&IndexView, Error> {
    views
        .get(view.0)
        .ok_or_else(|| Error::InvalidView(format!("unknown view id {}", view.0)))
}

/// Validates the whole write before touching any slot
fn write_relation<T: Copy>(
    relation: &mut Relation<T>,
    view: ViewId,
    indexed: &IndexView,
    views: &[IndexView],
    values: &[T],
) -> Result<(), Error> {
    if values.len() != indexed.indices.len() {
        return Err(Error::LengthMismatch {
            expected: indexed.indices.len(),
            actual: values.len(),
        });
    }

    for &idx in &indexed.indices {
        if let Some(owner) = relation.owners[idx].filter(|owner| *owner != view) {
            return Err(Error::ViewConflict {
                index: idx,
                owner: views[owner.0].name.clone(),
            });
        }
    }

    for (&idx, &value) in indexed.indices.iter().zip(values) {
        relation.values[idx] = value;
        relation.owners[idx] = Some(view);
    }
    Ok(())
}
