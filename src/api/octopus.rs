//! [Octopus Energy](https://developer.octopus.energy/rest/guides/endpoints) unit rates client.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use ureq::Agent;

use crate::{core::interval::Interval, prelude::*, quantity::PencePerKilowattHour};

pub struct Api {
    client: Agent,
    url: String,
}

impl Api {
    /// The agent keeps the library's default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: Agent::new_with_defaults(), url: url.into() }
    }

    /// Fetch the first page of unit rates, in the order the API returns them.
    #[instrument(skip_all, fields(url = %self.url))]
    pub fn get_unit_rates(&self) -> Result<Vec<UnitRate>, Error> {
        info!("fetching…");
        let unit_rates = self
            .client
            .get(&self.url)
            .call()
            .map_err(|error| Error::network(&self.url, error))?
            .body_mut()
            .read_json::<Response>()
            .map_err(|error| match error {
                ureq::Error::Json(error) => Error::malformed_response(&self.url, error),
                error => Error::network(&self.url, error),
            })?
            .results;
        info!(n_unit_rates = unit_rates.len(), "fetched");
        Ok(unit_rates)
    }
}

#[derive(Deserialize)]
struct Response {
    results: Vec<UnitRate>,
}

/// Price of electricity within a half-hour.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct UnitRate {
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,

    #[serde(rename = "value_inc_vat")]
    pub value: PencePerKilowattHour,
}

impl UnitRate {
    pub const fn interval(&self) -> Interval {
        Interval::new(self.valid_from, self.valid_to)
    }
}
