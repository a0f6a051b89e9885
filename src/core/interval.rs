use std::fmt::{Debug, Formatter};

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Local date-time without offset or zone, at second precision.
pub const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Validity interval of a unit rate.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Utc>,

    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Convert the bounds into the time zone's civil time, dropping the offset.
    pub fn to_floating(self, time_zone: Tz) -> FloatingInterval {
        FloatingInterval {
            start: format_floating(&self.start.with_timezone(&time_zone)),
            end: format_floating(&self.end.with_timezone(&time_zone)),
        }
    }
}

/// Calendar start and end fields as written to the file.
///
/// This is the event identity: two events with equal floating intervals are duplicates
/// regardless of their identifiers.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FloatingInterval {
    pub start: String,
    pub end: String,
}

impl FloatingInterval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: start.into(), end: end.into() }
    }
}

fn format_floating<Z: TimeZone>(timestamp: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    timestamp.format(FLOATING_FORMAT).to_string()
}
