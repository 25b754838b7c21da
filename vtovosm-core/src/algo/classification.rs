//! Full propagation condition of vehicle pairs

use geo::{Distance, Euclidean, Point};
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::algo::conditions::{VisibilityCondition, classify_visibility};
use crate::algo::orthogonality::analyze_orthogonality;
use crate::algo::visibility_graph::VisibilityGraph;
use crate::config::ClassifierConfig;
use crate::model::{BuildingSet, VehicleRecord};
use crate::{Error, VehicleId};

/// Propagation condition of a vehicle pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Los,
    Olos,
    /// Around a single corner, the signal is relayed at `relay`
    NlosOrthogonal { relay: Point<f64> },
    /// Too many turns between the vehicles
    NlosParallel,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Los => "los",
            Self::Olos => "olos",
            Self::NlosOrthogonal { .. } => "orthogonal",
            Self::NlosParallel => "parallel",
        }
    }

    pub fn is_nlos(&self) -> bool {
        matches!(self, Self::NlosOrthogonal { .. } | Self::NlosParallel)
    }

    pub fn visibility(&self) -> VisibilityCondition {
        match self {
            Self::Los => VisibilityCondition::Los,
            Self::Olos => VisibilityCondition::Olos,
            Self::NlosOrthogonal { .. } | Self::NlosParallel => VisibilityCondition::Nlos,
        }
    }
}

/// Classification of the pair `rx`-`tx`
#[derive(Debug, Clone, PartialEq)]
pub struct PairClassification {
    pub rx: VehicleId,
    pub tx: VehicleId,
    pub rx_point: Point<f64>,
    pub tx_point: Point<f64>,
    pub condition: Condition,
    /// Euclidean distance between the vehicles
    pub distance: f64,
    /// Summed turn angle of the route, NLOS pairs only
    pub angle_sum: Option<f64>,
}

/// Classifies one pair. `vehicles` must be indexed by vehicle id.
///
/// # Errors
///
/// `InvalidVehicle` for an unknown id or `rx == tx`, `NoPath` for an NLOS
/// pair that the street graph does not connect.
pub fn classify_pair(
    graph: &VisibilityGraph,
    buildings: &BuildingSet,
    vehicles: &[VehicleRecord],
    rx: VehicleId,
    tx: VehicleId,
    config: &ClassifierConfig,
) -> Result<PairClassification, Error> {
    let rx_record = vehicles.get(rx).ok_or(Error::InvalidVehicle(rx))?;
    let tx_record = vehicles.get(tx).ok_or(Error::InvalidVehicle(tx))?;
    if rx == tx {
        return Err(Error::InvalidVehicle(tx));
    }

    let others = vehicles
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != rx && idx != tx)
        .map(|(_, vehicle)| vehicle.point);
    let visibility = classify_visibility(
        rx_record.point,
        tx_record.point,
        others,
        buildings,
        config.vehicle_margin,
    );

    let (condition, angle_sum) = match visibility {
        VisibilityCondition::Los => (Condition::Los, None),
        VisibilityCondition::Olos => (Condition::Olos, None),
        VisibilityCondition::Nlos => {
            let analysis = analyze_orthogonality(graph, rx_record, tx_record, config.max_angle)?;
            let condition = if analysis.is_orthogonal {
                Condition::NlosOrthogonal {
                    relay: analysis.relay,
                }
            } else {
                Condition::NlosParallel
            };
            (condition, Some(analysis.angle_sum))
        }
    };

    debug!("Vehicles {rx} -> {tx}: {}", condition.as_str());
    Ok(PairClassification {
        rx,
        tx,
        rx_point: rx_record.point,
        tx_point: tx_record.point,
        condition,
        distance: Euclidean.distance(rx_record.point, tx_record.point),
        angle_sum,
    })
}

/// Classifies `reference` against every other vehicle in parallel, one
/// result per other vehicle in id order.
pub fn classify_from(
    graph: &VisibilityGraph,
    buildings: &BuildingSet,
    vehicles: &[VehicleRecord],
    reference: VehicleId,
    config: &ClassifierConfig,
) -> Vec<Result<PairClassification, Error>> {
    let results: Vec<_> = (0..vehicles.len())
        .into_par_iter()
        .filter(|&tx| tx != reference)
        .map(|tx| classify_pair(graph, buildings, vehicles, reference, tx, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        "Classified vehicle {reference} against {} others ({failed} failed)",
        results.len()
    );
    results
}

/// Classifies every unordered pair `(i, j)` with `i < j`
pub fn classify_all_pairs(
    graph: &VisibilityGraph,
    buildings: &BuildingSet,
    vehicles: &[VehicleRecord],
    config: &ClassifierConfig,
) -> Vec<Result<PairClassification, Error>> {
    let pairs: Vec<(VehicleId, VehicleId)> = (0..vehicles.len()).tuple_combinations().collect();
    info!("Classifying {} vehicle pairs", pairs.len());

    pairs
        .into_par_iter()
        .map(|(rx, tx)| classify_pair(graph, buildings, vehicles, rx, tx, config))
        .collect()
}
