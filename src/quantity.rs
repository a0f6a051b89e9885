use std::fmt::{Debug, Formatter};

use serde::Deserialize;

/// Pence per kilowatt-hour, VAT included.
///
/// Displays as the shortest representation that round-trips, always with a fractional part:
/// `5.0p`, `23.457p`.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, PartialOrd, Deserialize, derive_more::Display)]
#[display("{_0:?}p")]
#[serde(transparent)]
pub struct PencePerKilowattHour(pub f64);

impl Debug for PencePerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}p/kWh", self.0)
    }
}
