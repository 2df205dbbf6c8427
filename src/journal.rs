//! Completion journal: the append-only record of what was reported done
//! each day. The journal is the sole durable source of progress truth;
//! every plan is re-derived from it rather than from mutable state.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// One journal entry per advanced day.
///
/// `completed_tasks` and `carryover` are derived from the reported hours
/// at append time (see the scheduler) and stored denormalized so that
/// queries stay a straight scan over entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub entry_id: String,
    pub day_number: u32,
    pub logged_at: DateTime<Utc>,
    /// Task description -> hours reported done that day.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub completed_hours: BTreeMap<String, f64>,
    /// Tasks fully finished as of this day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed_tasks: Vec<String>,
    /// Human-readable notes for partially-done work as of this day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carryover: Vec<String>,
}

impl CompletionEntry {
    pub fn new(day_number: u32, completed_hours: BTreeMap<String, f64>) -> Self {
        Self {
            entry_id: Ulid::new().to_string(),
            day_number,
            logged_at: Utc::now(),
            completed_hours,
            completed_tasks: Vec::new(),
            carryover: Vec::new(),
        }
    }
}

/// The next valid day number for an append (`len + 1`).
pub fn expected_next_day(entries: &[CompletionEntry]) -> u32 {
    entries.len() as u32 + 1
}

/// Enforce sequential, gap-free appends. The journal is filled day by
/// day; anything else is rejected rather than reordered.
pub fn check_append(project: &str, entries: &[CompletionEntry], day_number: u32) -> Result<()> {
    let expected = expected_next_day(entries);
    if day_number != expected {
        return Err(Error::OutOfOrderDay {
            project: project.to_string(),
            expected,
            got: day_number,
        });
    }
    Ok(())
}

/// Union of `completed_tasks` across entries strictly before `day_number`.
///
/// The strict bound keeps day N's plan a function of days 1..N-1 only, so
/// replaying any prefix of the journal reproduces the same plans.
pub fn completed_task_set(entries: &[CompletionEntry], day_number: u32) -> HashSet<String> {
    entries
        .iter()
        .filter(|entry| entry.day_number < day_number)
        .flat_map(|entry| entry.completed_tasks.iter().cloned())
        .collect()
}

/// Carryover notes from entries strictly before `day_number`, in journal
/// order. Each day's notes are preserved verbatim; duplicates are not
/// merged.
pub fn carryover_list(entries: &[CompletionEntry], day_number: u32) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.day_number < day_number)
        .flat_map(|entry| entry.carryover.iter().cloned())
        .collect()
}

/// Cumulative reported hours per task across entries strictly before
/// `day_number`.
pub fn completed_hours_by_task(
    entries: &[CompletionEntry],
    day_number: u32,
) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for entry in entries.iter().filter(|entry| entry.day_number < day_number) {
        for (task, hours) in &entry.completed_hours {
            *totals.entry(task.clone()).or_insert(0.0) += hours;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, completed: &[&str], carryover: &[&str]) -> CompletionEntry {
        let mut e = CompletionEntry::new(day, BTreeMap::new());
        e.completed_tasks = completed.iter().map(|s| s.to_string()).collect();
        e.carryover = carryover.iter().map(|s| s.to_string()).collect();
        e
    }

    #[test]
    fn append_must_be_sequential() {
        let entries = vec![entry(1, &[], &[])];
        assert!(check_append("demo", &entries, 2).is_ok());
        let err = check_append("demo", &entries, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfOrderDay {
                expected: 2,
                got: 1,
                ..
            }
        ));
        assert!(check_append("demo", &entries, 4).is_err());
    }

    #[test]
    fn queries_are_day_bounded() {
        let entries = vec![
            entry(1, &["A"], &["A note"]),
            entry(2, &["B"], &["B note"]),
        ];

        let completed = completed_task_set(&entries, 2);
        assert!(completed.contains("A"));
        assert!(!completed.contains("B"));

        assert_eq!(carryover_list(&entries, 2), vec!["A note".to_string()]);
        assert_eq!(carryover_list(&entries, 3).len(), 2);
        assert!(carryover_list(&entries, 1).is_empty());
    }

    #[test]
    fn duplicate_notes_are_preserved_verbatim() {
        let entries = vec![
            entry(1, &[], &["Build (6 hour(s))"]),
            entry(2, &[], &["Build (6 hour(s))"]),
        ];
        assert_eq!(carryover_list(&entries, 3).len(), 2);
    }

    #[test]
    fn hours_accumulate_across_days() {
        let mut first = CompletionEntry::new(1, BTreeMap::from([("A".to_string(), 2.0)]));
        first.completed_tasks = Vec::new();
        let second = CompletionEntry::new(2, BTreeMap::from([("A".to_string(), 1.5)]));
        let totals = completed_hours_by_task(&[first, second], 3);
        assert_eq!(totals.get("A"), Some(&3.5));
    }
}
