//! One randomized run: place vehicles, pick the centre vehicle and classify
//! it against all others

use geo::{Distance, Euclidean};
use log::{info, warn};

use crate::algo::classification::{Condition, PairClassification, classify_from};
use crate::algo::placement::{find_center_vehicle, generate_vehicles};
use crate::algo::visibility_graph::VisibilityGraph;
use crate::config::ScenarioConfig;
use crate::model::{BuildingSet, StreetGraph, VehicleCollection};
use crate::pathloss::{Pathloss, PathlossInput};
use crate::{Error, VehicleId};

/// Everything produced by [`run_scenario`]
#[derive(Debug)]
pub struct ScenarioResult {
    pub graph: VisibilityGraph,
    /// Views `center`, `other`, `classified`, `los`, `olos`, `nlos`,
    /// `orthogonal` and `parallel`; `in_range` and `out_of_range` when a
    /// pathloss model was given
    pub vehicles: VehicleCollection,
    pub center: VehicleId,
    /// Successful classifications, centre vehicle as receiver
    pub classifications: Vec<PairClassification>,
    /// Pairs that could not be classified
    pub failures: Vec<(VehicleId, Error)>,
}

impl ScenarioResult {
    pub fn count(&self, tag: &str) -> usize {
        self.classifications
            .iter()
            .filter(|pair| pair.condition.as_str() == tag)
            .count()
    }
}

/// Runs one scenario on `streets`.
///
/// # Errors
///
/// Fails if no vehicle can be placed or a view cannot be written; failures
/// of single pairs end up in [`ScenarioResult::failures`].
pub fn run_scenario(
    streets: StreetGraph,
    buildings: &BuildingSet,
    config: &ScenarioConfig,
    pathloss: Option<&dyn Pathloss>,
) -> Result<ScenarioResult, Error> {
    let graph = VisibilityGraph::build(streets, buildings, config.classifier.max_los_distance);
    let records = generate_vehicles(graph.streets(), config.vehicles, config.seed)?;
    let points: Vec<_> = records.iter().map(|vehicle| vehicle.point).collect();
    let center = find_center_vehicle(&points)
        .ok_or_else(|| Error::InvalidData("Scenario needs at least one vehicle".to_string()))?;

    let mut classifications = Vec::new();
    let mut failures = Vec::new();
    for (tx, result) in (0..records.len())
        .filter(|&tx| tx != center)
        .zip(classify_from(&graph, buildings, &records, center, &config.classifier))
    {
        match result {
            Ok(pair) => classifications.push(pair),
            Err(e) => {
                warn!("Vehicle {tx} not classified: {e}");
                failures.push((tx, e));
            }
        }
    }

    let mut vehicles = VehicleCollection::new(records);
    vehicles.add_view("center", [center])?;
    let other = vehicles.add_view("other", (0..points.len()).filter(|&idx| idx != center))?;
    let distances: Vec<f64> = vehicles
        .indices(other)?
        .iter()
        .map(|&idx| Euclidean.distance(points[center], points[idx]))
        .collect();
    vehicles.set_distances(other, &distances)?;

    let classified = vehicles.add_view("classified", classifications.iter().map(|pair| pair.tx))?;
    let flags: Vec<bool> = classifications
        .iter()
        .map(|pair| pair.condition.is_nlos())
        .collect();
    vehicles.set_nlos(classified, &flags)?;

    for tag in ["los", "olos", "orthogonal", "parallel"] {
        let subset = select(&classifications, |condition| condition.as_str() == tag);
        let view = vehicles.add_view(tag, subset.iter().map(|pair| pair.tx))?;
        if let Some(model) = pathloss {
            let values: Vec<f64> = subset
                .iter()
                .map(|pair| PathlossInput::from(*pair).evaluate(model))
                .collect();
            vehicles.set_pathlosses(view, &values)?;
        }
    }
    let nlos = select(&classifications, Condition::is_nlos);
    vehicles.add_view("nlos", nlos.iter().map(|pair| pair.tx))?;

    if pathloss.is_some() {
        let values = vehicles.pathlosses(classified)?;
        let (in_range, out_of_range): (Vec<_>, Vec<_>) = vehicles
            .indices(classified)?
            .iter()
            .zip(&values)
            .partition(|&(_, &value)| value < config.max_pathloss);
        let in_range: Vec<usize> = in_range.into_iter().map(|(&idx, _)| idx).collect();
        let out_of_range: Vec<usize> = out_of_range.into_iter().map(|(&idx, _)| idx).collect();
        info!(
            "{} of {} vehicles in range (pathloss < {})",
            in_range.len(),
            classifications.len(),
            config.max_pathloss
        );
        vehicles.add_view("in_range", in_range)?;
        vehicles.add_view("out_of_range", out_of_range)?;
    }

    let result = ScenarioResult {
        graph,
        vehicles,
        center,
        classifications,
        failures,
    };
    info!(
        "Centre vehicle {center}: {} LOS, {} OLOS, {} orthogonal, {} parallel, {} failed",
        result.count("los"),
        result.count("olos"),
        result.count("orthogonal"),
        result.count("parallel"),
        result.failures.len()
    );
    Ok(result)
}

fn select<F>(pairs: &[PairClassification], keep: F) -> Vec<&PairClassification>
where
    F: Fn(&Condition) -> bool,
{
    pairs.iter().filter(|pair| keep(&pair.condition)).collect()
}
