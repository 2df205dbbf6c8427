//! Project management commands: create, list, show, delete.

use std::path::Path;

use crate::backlog::RawTask;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::{ProjectStore, ScheduleParameters};
use crate::storage::Storage;

pub fn create(
    storage: &Storage,
    options: OutputOptions,
    name: &str,
    backlog_path: &Path,
    daily_hours: Option<u32>,
    working_days: Option<u32>,
) -> Result<()> {
    storage.ensure_exists()?;
    let config = Config::load(&storage.config_file())?;

    let contents = std::fs::read_to_string(backlog_path).map_err(|e| {
        Error::InvalidArgument(format!(
            "cannot read backlog file {}: {e}",
            backlog_path.display()
        ))
    })?;
    let raw_backlog: Vec<RawTask> = serde_json::from_str(&contents)
        .map_err(|e| Error::MalformedBacklog(format!("backlog file is not a task array: {e}")))?;

    let schedule = ScheduleParameters {
        daily_hours: daily_hours.unwrap_or(config.schedule.daily_hours),
        working_days_per_week: working_days.unwrap_or(config.schedule.working_days_per_week),
    };

    let store = ProjectStore::new(storage.clone());
    let record = store.create(name, raw_backlog, schedule)?;

    let mut human = HumanOutput::new(format!("dayplan create: created project {name}"));
    human.push_summary("tasks", record.backlog.len().to_string());
    human.push_summary("daily hours", schedule.daily_hours.to_string());
    human.push_summary(
        "working days/week",
        schedule.working_days_per_week.to_string(),
    );
    human.push_next_step(format!("dayplan start {name} --date YYYY-MM-DD"));

    emit_success(options, "create", &record, Some(&human))?;
    Ok(())
}

pub fn list(storage: &Storage, options: OutputOptions) -> Result<()> {
    let store = ProjectStore::new(storage.clone());
    let summaries = store.list()?;

    let mut human = HumanOutput::new(format!("dayplan list: {} project(s)", summaries.len()));
    for summary in &summaries {
        human.push_detail(format!(
            "{} - {} task(s), day {}",
            summary.name, summary.tasks, summary.current_day
        ));
    }

    emit_success(options, "list", &summaries, Some(&human))?;
    Ok(())
}

pub fn show(storage: &Storage, options: OutputOptions, name: &str) -> Result<()> {
    let store = ProjectStore::new(storage.clone());
    let record = store.load(name)?;

    let mut human = HumanOutput::new(format!("dayplan show: {name}"));
    human.push_summary("created", record.created_at.to_rfc3339());
    human.push_summary("daily hours", record.schedule.daily_hours.to_string());
    human.push_summary(
        "working days/week",
        record.schedule.working_days_per_week.to_string(),
    );
    if let Some(start) = record.start_date {
        human.push_summary("start date", start.to_string());
    }
    human.push_summary("current day", record.current_day.to_string());
    human.push_summary("journal entries", record.journal.len().to_string());
    for task in record.tasks()? {
        human.push_detail(format!(
            "{} ({} hour(s))",
            task.description, task.estimated_hours
        ));
    }

    emit_success(options, "show", &record, Some(&human))?;
    Ok(())
}

pub fn delete(storage: &Storage, options: OutputOptions, name: &str) -> Result<()> {
    let store = ProjectStore::new(storage.clone());
    store.delete(name)?;

    let human = HumanOutput::new(format!("dayplan delete: removed project {name}"));

    #[derive(serde::Serialize)]
    struct DeleteReport<'a> {
        name: &'a str,
        deleted: bool,
    }

    emit_success(
        options,
        "delete",
        &DeleteReport {
            name,
            deleted: true,
        },
        Some(&human),
    )?;
    Ok(())
}
