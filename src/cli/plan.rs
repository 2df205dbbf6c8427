//! Planning commands: start, plan, current.

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::plan::DayPlan;
use crate::project::ProjectStore;
use crate::scheduler::Scheduler;
use crate::storage::Storage;

use super::parse_date;

pub fn start(
    storage: &Storage,
    options: OutputOptions,
    name: &str,
    date: Option<&str>,
) -> Result<()> {
    let store = ProjectStore::new(storage.clone());
    let scheduler = Scheduler::new(&store);
    let start_date = date.map(parse_date).transpose()?;
    let plan = scheduler.start(name, start_date)?;
    emit_plan(options, "start", name, &plan)
}

pub fn for_day(
    storage: &Storage,
    options: OutputOptions,
    name: &str,
    day: Option<u32>,
) -> Result<()> {
    let store = ProjectStore::new(storage.clone());
    let scheduler = Scheduler::new(&store);
    let plan = match day {
        Some(day) => scheduler.plan_for_day(name, day, None)?,
        None => scheduler.current_plan(name)?,
    };
    emit_plan(options, "plan", name, &plan)
}

pub fn current(storage: &Storage, options: OutputOptions, name: &str) -> Result<()> {
    let store = ProjectStore::new(storage.clone());
    let scheduler = Scheduler::new(&store);
    let plan = scheduler.current_plan(name)?;
    emit_plan(options, "current", name, &plan)
}

/// Render a day plan for both output modes.
pub(crate) fn emit_plan(
    options: OutputOptions,
    command: &str,
    name: &str,
    plan: &DayPlan,
) -> Result<()> {
    let mut human = HumanOutput::new(plan.message.clone());
    human.push_summary("project", name);
    human.push_summary("date", plan.date.to_string());
    human.push_summary("planned hours", format!("{}", plan.planned_hours));

    for task in &plan.tasks {
        human.push_detail(format!("{} ({} hour(s))", task.description, task.estimated_hours));
    }
    for note in &plan.carryover_from_previous_days {
        human.push_detail(format!("carryover: {note}"));
    }

    if !plan.complete {
        human.push_next_step(format!(
            "dayplan log {name} --day {} <task>=<hours> ...",
            plan.day.trim_start_matches("Day ")
        ));
    }

    emit_success(options, command, plan, Some(&human))?;
    Ok(())
}
