//! Boundary to an external pathloss model.
//!
//! The classifier only decides which geometry the signal takes; the model
//! turns that geometry into attenuation in dB.

use geo::{Distance, Euclidean};

use crate::algo::classification::{Condition, PairClassification};

/// Pathloss model for the three propagation conditions
pub trait Pathloss: Sync {
    fn los(&self, distance: f64) -> f64;
    fn olos(&self, distance: f64) -> f64;
    /// Signal bent at a single corner; distances from the receiver to the
    /// relay point and from the relay point to the transmitter
    fn nlos(&self, rx_to_relay: f64, relay_to_tx: f64) -> f64;
}

/// Distances a pathloss model needs for one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathlossInput {
    Los(f64),
    Olos(f64),
    Corner { rx_to_relay: f64, relay_to_tx: f64 },
    /// Parallel streets, no usable propagation path
    Unreachable,
}

impl From<&PairClassification> for PathlossInput {
    fn from(pair: &PairClassification) -> Self {
        match pair.condition {
            Condition::Los => Self::Los(pair.distance),
            Condition::Olos => Self::Olos(pair.distance),
            Condition::NlosOrthogonal { relay } => Self::Corner {
                rx_to_relay: Euclidean.distance(pair.rx_point, relay),
                relay_to_tx: Euclidean.distance(relay, pair.tx_point),
            },
            Condition::NlosParallel => Self::Unreachable,
        }
    }
}

impl PathlossInput {
    /// Pathloss in dB, infinite for unreachable pairs
    pub fn evaluate<M: Pathloss + ?Sized>(&self, model: &M) -> f64 {
        match *self {
            Self::Los(d) => model.los(d),
            Self::Olos(d) => model.olos(d),
            Self::Corner {
                rx_to_relay,
                relay_to_tx,
            } => model.nlos(rx_to_relay, relay_to_tx),
            Self::Unreachable => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    /// Free space at 5.9 GHz, plus a fixed penalty per obstruction kind
    struct Penalized;

    impl Pathloss for Penalized {
        fn los(&self, distance: f64) -> f64 {
            47.86 + 20.0 * distance.log10()
        }
        fn olos(&self, distance: f64) -> f64 {
            self.los(distance) + 10.0
        }
        fn nlos(&self, rx_to_relay: f64, relay_to_tx: f64) -> f64 {
            self.los(rx_to_relay + relay_to_tx) + 20.0
        }
    }

    fn pair(condition: Condition) -> PairClassification {
        PairClassification {
            rx: 0,
            tx: 1,
            rx_point: Point::new(0.0, 30.0),
            tx_point: Point::new(40.0, 0.0),
            condition,
            distance: 50.0,
            angle_sum: None,
        }
    }

    #[test]
    fn corner_distances_go_through_the_relay() {
        let input = PathlossInput::from(&pair(Condition::NlosOrthogonal {
            relay: Point::new(0.0, 0.0),
        }));
        assert_eq!(
            input,
            PathlossInput::Corner {
                rx_to_relay: 30.0,
                relay_to_tx: 40.0
            }
        );
        let expected = Penalized.los(70.0) + 20.0;
        assert!((input.evaluate(&Penalized) - expected).abs() < 1e-12);
    }

    #[test]
    fn direct_and_unreachable_pairs() {
        assert_eq!(PathlossInput::from(&pair(Condition::Los)), PathlossInput::Los(50.0));
        let olos = PathlossInput::from(&pair(Condition::Olos));
        assert!(olos.evaluate(&Penalized) > PathlossInput::Los(50.0).evaluate(&Penalized));

        let parallel = PathlossInput::from(&pair(Condition::NlosParallel));
        assert_eq!(parallel, PathlossInput::Unreachable);
        let model: &dyn Pathloss = &Penalized;
        assert_eq!(parallel.evaluate(model), f64::INFINITY);
    }
}
