//! Project records and the file-backed project store.
//!
//! A project document holds everything the scheduler needs: the backlog
//! (kept in its raw stored shape and normalized on read), the schedule
//! parameters, the start date, and the completion journal. The journal
//! plus the backlog and parameters fully determine every day's plan; the
//! `current_day` pointer is persisted for convenience but is always
//! `journal.len() + 1`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backlog::{self, RawTask, Task};
use crate::calendar;
use crate::error::{Error, Result};
use crate::journal::{self, CompletionEntry};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::storage::{validate_project_name, Storage};

/// Hour budget and working-week shape for a project. Set once at
/// creation; read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParameters {
    pub daily_hours: u32,
    pub working_days_per_week: u32,
}

impl ScheduleParameters {
    pub fn validate(&self) -> Result<()> {
        if self.daily_hours == 0 {
            return Err(Error::InvalidArgument(
                "daily hours must be at least 1".to_string(),
            ));
        }
        calendar::validate_working_days(self.working_days_per_week)
    }
}

/// A stored project document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub schedule: ScheduleParameters,
    /// Backlog in stored shape; normalize before scheduling.
    pub backlog: Vec<RawTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Next day number to plan. Redundant with `journal.len() + 1`.
    #[serde(default = "default_current_day")]
    pub current_day: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub journal: Vec<CompletionEntry>,
}

fn default_current_day() -> u32 {
    1
}

impl ProjectRecord {
    /// Normalized view of the backlog.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        backlog::normalize(&self.backlog)
    }
}

/// Summary row for project listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub tasks: usize,
    pub current_day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl From<&ProjectRecord> for ProjectSummary {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            name: record.name.clone(),
            created_at: record.created_at,
            tasks: record.backlog.len(),
            current_day: record.current_day,
            start_date: record.start_date,
        }
    }
}

/// File-backed project store: one JSON document per project, mutated
/// under a sidecar file lock.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    storage: Storage,
}

impl ProjectStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Create a new project. The backlog is normalized up front so a
    /// malformed backlog fails at creation, not at first planning.
    pub fn create(
        &self,
        name: &str,
        raw_backlog: Vec<RawTask>,
        schedule: ScheduleParameters,
    ) -> Result<ProjectRecord> {
        self.storage.ensure_exists()?;
        validate_project_name(name)?;
        schedule.validate()?;
        backlog::normalize(&raw_backlog)?;

        let path = self.storage.project_file(name);
        let _lock = FileLock::acquire(self.storage.project_lock_file(name), DEFAULT_LOCK_TIMEOUT_MS)?;
        if path.exists() {
            return Err(Error::ProjectExists(name.to_string()));
        }

        let record = ProjectRecord {
            name: name.to_string(),
            created_at: Utc::now(),
            schedule,
            backlog: raw_backlog,
            start_date: None,
            current_day: 1,
            journal: Vec::new(),
        };
        self.write(&record)?;
        debug!(project = name, tasks = record.backlog.len(), "created project");
        Ok(record)
    }

    /// Load a project document.
    pub fn load(&self, name: &str) -> Result<ProjectRecord> {
        self.storage.ensure_exists()?;
        validate_project_name(name)?;
        let path = self.storage.project_file(name);
        if !path.exists() {
            return Err(Error::ProjectNotFound(name.to_string()));
        }
        let contents = std::fs::read_to_string(&path)?;
        let record: ProjectRecord = serde_json::from_str(&contents)?;
        Ok(record)
    }

    /// List all projects, sorted by name.
    pub fn list(&self) -> Result<Vec<ProjectSummary>> {
        self.storage.ensure_exists()?;
        let mut names: Vec<String> = std::fs::read_dir(self.storage.projects_dir())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(|stem| stem.to_string())
            })
            .collect();
        names.sort();

        let mut summaries = Vec::with_capacity(names.len());
        for name in names {
            let record = self.load(&name)?;
            summaries.push(ProjectSummary::from(&record));
        }
        Ok(summaries)
    }

    /// Delete a project document.
    pub fn delete(&self, name: &str) -> Result<()> {
        self.storage.ensure_exists()?;
        validate_project_name(name)?;
        let path = self.storage.project_file(name);
        let _lock = FileLock::acquire(self.storage.project_lock_file(name), DEFAULT_LOCK_TIMEOUT_MS)?;
        if !path.exists() {
            return Err(Error::ProjectNotFound(name.to_string()));
        }
        std::fs::remove_file(&path)?;
        debug!(project = name, "deleted project");
        Ok(())
    }

    /// Set the project's start date if unset, or overwrite it when
    /// `date` is explicit. Returns the updated record.
    pub fn set_start_date(&self, name: &str, date: NaiveDate) -> Result<ProjectRecord> {
        let _lock = FileLock::acquire(self.storage.project_lock_file(name), DEFAULT_LOCK_TIMEOUT_MS)?;
        let mut record = self.load(name)?;
        record.start_date = Some(date);
        self.write(&record)?;
        Ok(record)
    }

    /// Compare-and-append a journal entry.
    ///
    /// The document is re-read under the project lock and the entry's day
    /// number is checked against `journal.len() + 1` at that point, so two
    /// racing appends for the same day cannot both land: the loser fails
    /// with [`Error::OutOfOrderDay`]. This is the sole mutation path for
    /// progress state.
    pub fn append_completion(
        &self,
        name: &str,
        day_number: u32,
        build_entry: impl FnOnce(&ProjectRecord) -> Result<CompletionEntry>,
    ) -> Result<ProjectRecord> {
        let _lock = FileLock::acquire(self.storage.project_lock_file(name), DEFAULT_LOCK_TIMEOUT_MS)?;
        let mut record = self.load(name)?;
        journal::check_append(name, &record.journal, day_number)?;

        let entry = build_entry(&record)?;
        debug_assert_eq!(entry.day_number, day_number);
        record.journal.push(entry);
        record.current_day = day_number + 1;
        self.write(&record)?;
        debug!(project = name, day = day_number, "appended completion entry");
        Ok(record)
    }

    fn write(&self, record: &ProjectRecord) -> Result<()> {
        let json = serde_json::to_vec_pretty(record)?;
        lock::write_atomic(self.storage.project_file(&record.name), &json)?;
        Ok(())
    }
}
