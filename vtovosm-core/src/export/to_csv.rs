use std::io::Write;

use serde::Serialize;

use crate::Error;
use crate::algo::classification::{Condition, PairClassification};
use crate::pathloss::{Pathloss, PathlossInput};

/// One CSV row per classified pair
#[derive(Debug, Clone, Serialize)]
struct PairRow {
    rx: usize,
    tx: usize,
    condition: &'static str,
    distance: f64,
    angle_sum: Option<f64>,
    relay_x: Option<f64>,
    relay_y: Option<f64>,
    pathloss: Option<f64>,
}

impl PairRow {
    fn new(pair: &PairClassification, pathloss: Option<&dyn Pathloss>) -> Self {
        let relay = match pair.condition {
            Condition::NlosOrthogonal { relay } => Some(relay),
            _ => None,
        };
        Self {
            rx: pair.rx,
            tx: pair.tx,
            condition: pair.condition.as_str(),
            distance: pair.distance,
            angle_sum: pair.angle_sum,
            relay_x: relay.map(|p| p.x()),
            relay_y: relay.map(|p| p.y()),
            pathloss: pathloss.map(|model| PathlossInput::from(pair).evaluate(model)),
        }
    }
}

/// Writes the pairs as CSV with a header row
pub fn write_csv<W: Write>(
    writer: W,
    pairs: &[PairClassification],
    pathloss: Option<&dyn Pathloss>,
) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for pair in pairs {
        csv_writer.serialize(PairRow::new(pair, pathloss))?;
    }
    csv_writer.flush()?;
    Ok(())
}
