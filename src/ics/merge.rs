use std::path::PathBuf;

use bon::Builder;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    api::octopus::UnitRate,
    ics::{CalendarEvent, CalendarFile, uid::UidGenerator},
    prelude::*,
};

/// Merges unit rates into a calendar file without duplicating events.
///
/// Events are identified by their floating start and end, so repeated runs with the same
/// rates add nothing. Previously written blocks are carried over verbatim.
///
/// Concurrent runs against the same file are not coordinated, and the last writer wins.
#[must_use]
#[derive(Builder)]
pub struct Merger {
    #[builder(into)]
    path: PathBuf,

    time_zone: Tz,
}

#[must_use]
pub struct MergeSummary {
    /// Distinct events found in the file before the merge.
    pub n_existing: usize,

    /// New events, in the order of the unit rates.
    pub added: Vec<CalendarEvent>,
}

impl Merger {
    pub fn merge(&self, unit_rates: &[UnitRate]) -> Result<MergeSummary, Error> {
        self.merge_at(unit_rates, Utc::now())
    }

    #[instrument(skip_all, fields(path = %self.path.display(), time_zone = %self.time_zone))]
    pub fn merge_at(
        &self,
        unit_rates: &[UnitRate],
        now: DateTime<Utc>,
    ) -> Result<MergeSummary, Error> {
        let mut file = CalendarFile::load(&self.path)?;
        let n_existing = file.n_events();
        info!(n_existing, "found existing events");

        let mut uids = UidGenerator::default();
        let mut added = Vec::new();
        for unit_rate in unit_rates {
            let interval = unit_rate.interval().to_floating(self.time_zone);
            if file.contains(&interval) {
                debug!(?interval, "skipped a duplicate");
                continue;
            }
            file.insert(interval.clone());
            added.push(CalendarEvent::from_unit_rate(unit_rate, interval, &mut uids, now));
        }
        info!(n_added = added.len(), "adding new events");

        CalendarFile::persist(&self.path, &file.render(&added))?;
        Ok(MergeSummary { n_existing, added })
    }
}
