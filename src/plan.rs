//! Day-plan construction.
//!
//! The builder greedily packs pending tasks into one day's hour budget,
//! in backlog order. It is a pure function: the caller supplies the
//! pending view and persists nothing here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::backlog::Task;

/// One day's assignment: tasks (possibly partial slices) plus carryover
/// notes for everything that did not fit.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAssignment {
    pub tasks: Vec<Task>,
    pub carryover_today: Vec<String>,
    pub hours_used: f64,
}

/// The caller-facing plan for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub date: NaiveDate,
    pub planned_hours: f64,
    pub tasks: Vec<Task>,
    pub carryover_from_previous_days: Vec<String>,
    pub message: String,
    /// Set once the backlog is exhausted; omitted otherwise.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub complete: bool,
}

/// Greedily assign pending tasks into `daily_hours`.
///
/// Every pending task is visited even after the budget runs out, so the
/// carryover list is exhaustive: a task either lands in `tasks` (fully or
/// as a partial slice) or produces a carryover note. A zero-hour task is
/// assigned in full and consumes no budget. Hours keep full floating
/// precision; nothing is rounded.
pub fn build(pending_tasks: &[Task], daily_hours: f64) -> DayAssignment {
    let mut hours_left = daily_hours;
    let mut tasks = Vec::new();
    let mut carryover_today = Vec::new();

    for task in pending_tasks {
        let est = task.estimated_hours;
        if est <= hours_left {
            tasks.push(task.clone());
            hours_left -= est;
        } else if hours_left > 0.0 {
            tasks.push(Task::new(task.description.clone(), hours_left));
            carryover_today.push(format!(
                "{} ({} hour(s) left)",
                task.description,
                est - hours_left
            ));
            hours_left = 0.0;
        } else {
            carryover_today.push(format!("{} ({} hour(s))", task.description, est));
        }
    }

    DayAssignment {
        tasks,
        carryover_today,
        hours_used: daily_hours - hours_left,
    }
}
