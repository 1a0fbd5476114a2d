use anyhow::Result;
use chrono::Local;

use crate::progress::{ProgressReport, update_progress};
use crate::store::Store;

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod plan;
pub mod profile;
pub mod session;
pub mod status;

/// Re-run the aggregator over the current session snapshot and persist
/// the derived collections. Called after every session-store mutation;
/// cheap enough to run on each change, and the full recomputation keeps
/// the derived state consistent with the store.
pub fn refresh_progress(store: &Store) -> Result<ProgressReport> {
    let sessions = store.load_sessions()?;
    let previous = store.load_badges()?;
    let report = update_progress(&sessions, &previous, Local::now());
    store.save_report(&report)?;
    Ok(report)
}
