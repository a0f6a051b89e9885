use std::path::Path;

use crate::prelude::*;

/// Hand the calendar over to the default application, ignoring any failure.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn open(path: &Path) {
    match ::open::that(path) {
        Ok(()) => info!("opened"),
        Err(error) => warn!(%error, "could not open the calendar, import it manually"),
    }
}
