use std::path::PathBuf;

use chrono_tz::Tz;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Octopus Energy standard unit rates endpoint.
    #[clap(
        long,
        env = "OCTOPUS_RATES_URL",
        default_value = "https://api.octopus.energy/v1/products/AGILE-24-10-01/electricity-tariffs/E-1R-AGILE-24-10-01-B/standard-unit-rates/"
    )]
    pub url: String,

    /// Calendar file to create or merge into.
    #[clap(long = "calendar", env = "CALENDAR_PATH", default_value = "octopus_agile_event.ics")]
    pub calendar_path: PathBuf,

    /// Time zone of the event start and end times.
    #[clap(long, env = "TIME_ZONE", default_value = "Europe/London")]
    pub time_zone: Tz,

    /// Do not open the calendar file in the default application.
    #[clap(long, env = "NO_OPEN")]
    pub no_open: bool,
}
