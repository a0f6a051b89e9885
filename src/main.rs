#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod error;
mod ics;
mod prelude;
mod quantity;
mod tables;
mod viewer;

use clap::{Parser, crate_version};

use crate::{api::octopus, cli::Args, ics::Merger, prelude::*, tables::build_events_table};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    // Nothing touches the calendar until the fetch has succeeded.
    let unit_rates = octopus::Api::new(&args.url).get_unit_rates()?;
    let summary = Merger::builder()
        .path(&args.calendar_path)
        .time_zone(args.time_zone)
        .build()
        .merge(&unit_rates)
        .context("failed to merge the unit rates into the calendar")?;
    info!(
        n_existing = summary.n_existing,
        n_added = summary.added.len(),
        path = %args.calendar_path.display(),
        "saved",
    );
    if !summary.added.is_empty() {
        println!("{}", build_events_table(&summary.added));
    }

    if !args.no_open {
        viewer::open(&args.calendar_path);
    }

    info!("done!");
    Ok(())
}
