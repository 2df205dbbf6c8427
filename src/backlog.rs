//! Backlog normalization.
//!
//! Stored backlogs are heterogeneous: older projects carry plain task
//! strings, newer ones carry `{task, estimated_hours}` records. The
//! normalizer resolves that union once at this boundary; everything
//! downstream only ever sees [`Task`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default estimate for legacy string-only tasks.
const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// A canonical backlog task. The description is the identity key for
/// completion matching; order in the backlog is assignment priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task")]
    pub description: String,
    pub estimated_hours: f64,
}

impl Task {
    pub fn new(description: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            description: description.into(),
            estimated_hours,
        }
    }
}

/// Raw task shapes as they appear in stored or imported backlogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTask {
    /// Legacy shape: a bare description, estimated at one hour.
    Text(String),
    /// Structured shape. `description` is accepted as an alias for `task`.
    Detailed {
        #[serde(alias = "description")]
        task: String,
        estimated_hours: f64,
    },
}

/// Coerce raw tasks into an ordered, validated task list.
///
/// Fails with [`Error::MalformedBacklog`] on empty descriptions,
/// non-positive or non-finite estimates, or duplicate descriptions.
/// Duplicates are ambiguous as identity keys, so they fail loudly rather
/// than being merged.
pub fn normalize(raw_tasks: &[RawTask]) -> Result<Vec<Task>> {
    let mut tasks = Vec::with_capacity(raw_tasks.len());
    let mut seen: HashSet<String> = HashSet::new();

    for (index, raw) in raw_tasks.iter().enumerate() {
        let task = match raw {
            RawTask::Text(text) => Task::new(text.trim(), DEFAULT_ESTIMATED_HOURS),
            RawTask::Detailed {
                task,
                estimated_hours,
            } => Task::new(task.trim(), *estimated_hours),
        };

        if task.description.is_empty() {
            return Err(Error::MalformedBacklog(format!(
                "task {} has an empty description",
                index + 1
            )));
        }
        if !task.estimated_hours.is_finite() || task.estimated_hours <= 0.0 {
            return Err(Error::MalformedBacklog(format!(
                "task \"{}\" has a non-positive estimate: {}",
                task.description, task.estimated_hours
            )));
        }
        if !seen.insert(task.description.clone()) {
            return Err(Error::MalformedBacklog(format!(
                "duplicate task description: \"{}\"",
                task.description
            )));
        }

        tasks.push(task);
    }

    Ok(tasks)
}
