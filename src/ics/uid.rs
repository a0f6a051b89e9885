use chrono::{DateTime, TimeDelta, Utc};

/// Issues event identifiers from a microsecond UTC clock.
///
/// Identifiers are strictly increasing within a generator: when the clock has not advanced
/// since the previous call, the last timestamp is bumped by a microsecond instead.
#[derive(Default)]
pub struct UidGenerator {
    last: Option<DateTime<Utc>>,
}

impl UidGenerator {
    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let timestamp = match self.last {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last = Some(timestamp);
        timestamp.format("%Y%m%dT%H%M%S%6fZ").to_string()
    }
}
