//! dayplan - Daily Work-Plan Scheduler Library
//!
//! This library provides the core functionality for the dayplan CLI:
//! partitioning a project's estimated-hours backlog into day-sized plans,
//! recording reported completion in an append-only journal, and
//! re-deriving any day's plan from that journal rather than from mutable
//! in-memory state.
//!
//! # Core Concepts
//!
//! - **Backlog**: ordered tasks with hour estimates; order is priority
//! - **Day Plan**: greedy assignment of pending hours into one day's budget
//! - **Completion Journal**: append-only per-day records, the sole source
//!   of progress truth; day N's plan depends only on days 1..N-1
//! - **Working Days**: the first N weekdays from Monday count toward the
//!   schedule; other dates are stepped over
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: schedule defaults from `dayplan.toml`
//! - `error`: error types and result aliases
//! - `calendar`: working-day date arithmetic
//! - `backlog`: raw task shapes and normalization
//! - `plan`: day-plan builder and wire types
//! - `journal`: completion journal entries and queries
//! - `project`: project records and the file-backed store
//! - `scheduler`: plan orchestration over a store
//! - `storage`: store directory layout
//! - `lock`: file locking and atomic writes

pub mod backlog;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod journal;
pub mod lock;
pub mod output;
pub mod plan;
pub mod project;
pub mod scheduler;
pub mod storage;

pub use error::{Error, Result};
