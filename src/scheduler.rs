//! Plan orchestration: the replayable scheduling state machine.
//!
//! A project moves from "no journal entries" through `InProgress(day N)`
//! as days are logged, and reaches a terminal completion plan once the
//! backlog is exhausted. Each day's plan is a pure function of the
//! backlog, the schedule parameters, and the journal entries for prior
//! days only; replaying the journal from day 1 reproduces the same plans
//! byte for byte.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::backlog::Task;
use crate::calendar;
use crate::error::{Error, Result};
use crate::journal::{self, CompletionEntry};
use crate::plan::{self, DayPlan};
use crate::project::{ProjectRecord, ProjectStore};

/// Tolerance for cumulative-hours comparisons.
const HOURS_EPSILON: f64 = 1e-9;

/// Orchestrates planning and completion logging over a project store.
/// Holds no state of its own; every operation re-derives from the
/// stored document.
#[derive(Debug, Clone)]
pub struct Scheduler<'a> {
    store: &'a ProjectStore,
}

impl<'a> Scheduler<'a> {
    pub fn new(store: &'a ProjectStore) -> Self {
        Self { store }
    }

    /// Start a project: persist the resolved start date and return day
    /// 1's plan. Writes no journal entry; the journal only advances via
    /// [`Scheduler::log_completed`].
    pub fn start(&self, name: &str, start_date: Option<NaiveDate>) -> Result<DayPlan> {
        let record = self.store.load(name)?;
        let resolved = resolve_start_date(&record, start_date);
        let record = self.store.set_start_date(name, resolved)?;
        plan_for_record(&record, 1, resolved)
    }

    /// Compute the plan for an arbitrary day number.
    pub fn plan_for_day(
        &self,
        name: &str,
        day_number: u32,
        start_date: Option<NaiveDate>,
    ) -> Result<DayPlan> {
        let record = self.store.load(name)?;
        let resolved = resolve_start_date(&record, start_date);
        plan_for_record(&record, day_number, resolved)
    }

    /// Plan for the project's current day pointer.
    pub fn current_plan(&self, name: &str) -> Result<DayPlan> {
        let record = self.store.load(name)?;
        let day = record.current_day.max(1);
        let resolved = resolve_start_date(&record, None);
        plan_for_record(&record, day, resolved)
    }

    /// Append a completion entry for `day_number` and advance the day
    /// pointer. `completed_hours` maps task descriptions to hours
    /// reported done that day.
    ///
    /// The entry's `completed_tasks` and `carryover` are derived here:
    /// a task is complete once its cumulative reported hours reach its
    /// estimate, and partially-done tasks get a remaining-hours note.
    /// Sequencing (`day_number == journal.len() + 1`) is re-checked under
    /// the store lock, so concurrent logs for the same day cannot both
    /// succeed.
    pub fn log_completed(
        &self,
        name: &str,
        day_number: u32,
        completed_hours: BTreeMap<String, f64>,
    ) -> Result<ProjectRecord> {
        if day_number == 0 {
            return Err(Error::InvalidArgument(
                "day number must be at least 1".to_string(),
            ));
        }
        for (task, hours) in &completed_hours {
            if !hours.is_finite() || *hours < 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "completed hours for \"{task}\" must be a non-negative number, got {hours}"
                )));
            }
        }

        self.store.append_completion(name, day_number, |record| {
            derive_entry(record, day_number, completed_hours)
        })
    }
}

/// Build the journal entry for a day from the reported hours.
fn derive_entry(
    record: &ProjectRecord,
    day_number: u32,
    completed_hours: BTreeMap<String, f64>,
) -> Result<CompletionEntry> {
    let tasks = record.tasks()?;

    for task in completed_hours.keys() {
        if !tasks.iter().any(|t| &t.description == task) {
            return Err(Error::InvalidArgument(format!(
                "unknown task in completed hours: \"{task}\""
            )));
        }
    }

    // Cumulative totals including this day's report.
    let mut totals = journal::completed_hours_by_task(&record.journal, day_number);
    for (task, hours) in &completed_hours {
        *totals.entry(task.clone()).or_insert(0.0) += hours;
    }

    let mut entry = CompletionEntry::new(day_number, completed_hours);
    for task in &tasks {
        let done = totals.get(&task.description).copied().unwrap_or(0.0);
        if done + HOURS_EPSILON >= task.estimated_hours {
            entry.completed_tasks.push(task.description.clone());
        } else if done > HOURS_EPSILON {
            entry.carryover.push(format!(
                "{} ({} hour(s) left)",
                task.description,
                task.estimated_hours - done
            ));
        }
    }

    Ok(entry)
}

/// Resolve the start date: explicit argument, else the stored project
/// start date, else today.
fn resolve_start_date(record: &ProjectRecord, start_date: Option<NaiveDate>) -> NaiveDate {
    start_date
        .or(record.start_date)
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// Pure plan computation over a loaded record and a resolved start date.
fn plan_for_record(record: &ProjectRecord, day_number: u32, start_date: NaiveDate) -> Result<DayPlan> {
    if day_number == 0 {
        return Err(Error::InvalidArgument(
            "day number must be at least 1".to_string(),
        ));
    }

    let date = calendar::date_for_day(
        start_date,
        day_number,
        record.schedule.working_days_per_week,
    )?;

    let tasks = record.tasks()?;

    // Only journal entries for prior days contribute; this keeps the
    // plan a deterministic function of days 1..day_number-1 even when a
    // caller asks about an older day.
    let completed = journal::completed_task_set(&record.journal, day_number);
    let carryover_history = journal::carryover_list(&record.journal, day_number);
    let hours_done = journal::completed_hours_by_task(&record.journal, day_number);

    // Remaining-size view: drop finished tasks, shrink partially-done
    // ones to what is left.
    let pending: Vec<Task> = tasks
        .iter()
        .filter(|task| !completed.contains(&task.description))
        .filter_map(|task| {
            let done = hours_done.get(&task.description).copied().unwrap_or(0.0);
            let remaining = task.estimated_hours - done;
            (remaining > HOURS_EPSILON).then(|| Task::new(task.description.clone(), remaining))
        })
        .collect();

    let daily_hours = f64::from(record.schedule.daily_hours);

    if pending.is_empty() {
        return Ok(DayPlan {
            day: format!("Day {day_number}"),
            date,
            planned_hours: daily_hours,
            tasks: Vec::new(),
            carryover_from_previous_days: carryover_history,
            message: format!(
                "Project complete - all {} task(s) finished",
                tasks.len()
            ),
            complete: true,
        });
    }

    let assignment = plan::build(&pending, daily_hours);
    debug!(
        project = record.name.as_str(),
        day = day_number,
        assigned = assignment.tasks.len(),
        deferred = assignment.carryover_today.len(),
        hours_used = assignment.hours_used,
        "built day plan"
    );

    Ok(DayPlan {
        day: format!("Day {day_number}"),
        date,
        planned_hours: daily_hours,
        tasks: assignment.tasks,
        carryover_from_previous_days: carryover_history,
        message: format!(
            "Plan for Day {day_number} - {}",
            date.format("%A, %B %d, %Y")
        ),
        complete: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backlog::RawTask;
    use crate::project::ScheduleParameters;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn fixture(temp: &TempDir) -> ProjectStore {
        let storage = Storage::new(temp.path().join(".dayplan"));
        storage.init().unwrap();
        let store = ProjectStore::new(storage);
        store
            .create(
                "demo",
                vec![
                    RawTask::Detailed {
                        task: "Design".to_string(),
                        estimated_hours: 5.0,
                    },
                    RawTask::Detailed {
                        task: "Build".to_string(),
                        estimated_hours: 10.0,
                    },
                    RawTask::Detailed {
                        task: "Test".to_string(),
                        estimated_hours: 3.0,
                    },
                ],
                ScheduleParameters {
                    daily_hours: 4,
                    working_days_per_week: 5,
                },
            )
            .unwrap();
        store
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn day_one_has_no_carryover_history() {
        let temp = TempDir::new().unwrap();
        let store = fixture(&temp);
        let scheduler = Scheduler::new(&store);

        let plan = scheduler.start("demo", Some(monday())).unwrap();
        assert_eq!(plan.day, "Day 1");
        assert_eq!(plan.date, monday());
        assert!(plan.carryover_from_previous_days.is_empty());
        assert_eq!(plan.tasks, vec![Task::new("Design", 4.0)]);
        assert_eq!(plan.message, "Plan for Day 1 - Monday, January 01, 2024");
    }

    #[test]
    fn partially_done_tasks_return_at_remaining_size() {
        let temp = TempDir::new().unwrap();
        let store = fixture(&temp);
        let scheduler = Scheduler::new(&store);
        scheduler.start("demo", Some(monday())).unwrap();

        scheduler
            .log_completed("demo", 1, BTreeMap::from([("Design".to_string(), 4.0)]))
            .unwrap();

        let plan = scheduler.plan_for_day("demo", 2, None).unwrap();
        assert_eq!(plan.tasks[0], Task::new("Design", 1.0));
        assert_eq!(plan.tasks[1], Task::new("Build", 3.0));
        assert_eq!(
            plan.carryover_from_previous_days,
            vec!["Design (1 hour(s) left)".to_string()]
        );
    }

    #[test]
    fn finished_backlog_yields_terminal_plan() {
        let temp = TempDir::new().unwrap();
        let store = fixture(&temp);
        let scheduler = Scheduler::new(&store);
        scheduler.start("demo", Some(monday())).unwrap();

        scheduler
            .log_completed(
                "demo",
                1,
                BTreeMap::from([
                    ("Design".to_string(), 5.0),
                    ("Build".to_string(), 10.0),
                    ("Test".to_string(), 3.0),
                ]),
            )
            .unwrap();

        let plan = scheduler.current_plan("demo").unwrap();
        assert!(plan.complete);
        assert!(plan.tasks.is_empty());
        assert!(plan.message.contains("complete"));
    }

    #[test]
    fn rejects_unknown_tasks_and_bad_hours() {
        let temp = TempDir::new().unwrap();
        let store = fixture(&temp);
        let scheduler = Scheduler::new(&store);

        let err = scheduler
            .log_completed("demo", 1, BTreeMap::from([("Nope".to_string(), 1.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = scheduler
            .log_completed("demo", 1, BTreeMap::from([("Design".to_string(), -1.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
