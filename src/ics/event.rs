use std::fmt::{Display, Formatter};

use bon::Builder;
use chrono::{DateTime, Utc};

use crate::{
    api::octopus::UnitRate,
    core::{interval::FloatingInterval, price_level::PriceLevel},
    ics::uid::UidGenerator,
};

/// A single `VEVENT` block.
#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct CalendarEvent {
    #[builder(into)]
    pub uid: String,

    /// Creation time, written as `DTSTAMP` in UTC.
    pub stamp: DateTime<Utc>,

    pub interval: FloatingInterval,

    #[builder(into)]
    pub summary: String,

    pub price_level: PriceLevel,
}

impl CalendarEvent {
    /// Build the event for a unit rate whose floating interval has already been computed.
    pub fn from_unit_rate(
        unit_rate: &UnitRate,
        interval: FloatingInterval,
        uids: &mut UidGenerator,
        now: DateTime<Utc>,
    ) -> Self {
        let price_level = PriceLevel::from(unit_rate.value);
        Self::builder()
            .uid(uids.next(now))
            .stamp(now)
            .interval(interval)
            .summary(format!("{} {}", price_level.marker(), unit_rate.value))
            .price_level(price_level)
            .build()
    }
}

impl Display for CalendarEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BEGIN:VEVENT")?;
        writeln!(f, "UID:{}", self.uid)?;
        writeln!(f, "DTSTAMP:{}", self.stamp.format("%Y%m%dT%H%M%SZ"))?;
        writeln!(f, "DTSTART:{}", self.interval.start)?;
        writeln!(f, "DTEND:{}", self.interval.end)?;
        writeln!(f, "SUMMARY:{}", self.summary)?;
        writeln!(f, "END:VEVENT")
    }
}
