#![allow(unused_imports)]

pub use anyhow::{Context, bail, ensure};
pub use tracing::{debug, error, info, instrument, warn};

pub use crate::error::Error;

pub type Result<T = (), E = anyhow::Error> = anyhow::Result<T, E>;
