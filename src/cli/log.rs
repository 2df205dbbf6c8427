//! dayplan log command: record a day's completed hours, then print the
//! next day's plan (mirroring the journal-advances-then-replan flow).

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::project::ProjectStore;
use crate::scheduler::Scheduler;
use crate::storage::Storage;

use super::plan::emit_plan;

pub fn run(
    storage: &Storage,
    options: OutputOptions,
    name: &str,
    day: u32,
    entries: &[String],
) -> Result<()> {
    let completed_hours = parse_entries(entries)?;

    let store = ProjectStore::new(storage.clone());
    let scheduler = Scheduler::new(&store);
    scheduler.log_completed(name, day, completed_hours)?;

    let next_plan = scheduler.plan_for_day(name, day + 1, None)?;
    emit_plan(options, "log", name, &next_plan)
}

/// Parse `task=hours` pairs. The split is on the last `=` so task
/// descriptions containing `=` still parse.
fn parse_entries(entries: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut completed_hours = BTreeMap::new();
    for entry in entries {
        let (task, hours) = entry.rsplit_once('=').ok_or_else(|| {
            Error::InvalidArgument(format!("expected task=hours, got \"{entry}\""))
        })?;
        let task = task.trim();
        if task.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "empty task name in \"{entry}\""
            )));
        }
        let hours: f64 = hours.trim().parse().map_err(|_| {
            Error::InvalidArgument(format!("invalid hours in \"{entry}\""))
        })?;
        if completed_hours.insert(task.to_string(), hours).is_some() {
            return Err(Error::InvalidArgument(format!(
                "task \"{task}\" reported more than once"
            )));
        }
    }
    Ok(completed_hours)
}
