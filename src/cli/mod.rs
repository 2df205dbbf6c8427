//! Command-line interface for dayplan
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand group is implemented in its own submodule.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::storage::{Storage, DEFAULT_STORE_DIR};

mod init;
mod log;
mod plan;
mod project;

/// dayplan - daily work-plan scheduler
///
/// Partitions an estimated-hours backlog into day-sized plans, tracks
/// reported completion in an append-only journal, and re-derives any
/// day's plan from that journal.
#[derive(Parser, Debug)]
#[command(name = "dayplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store directory
    #[arg(long, global = true, env = "DAYPLAN_STORE", default_value = DEFAULT_STORE_DIR)]
    pub store: PathBuf,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a dayplan store
    Init,

    /// Create a project from a backlog file
    Create {
        /// Project name
        name: String,

        /// Path to a JSON backlog: an array of task strings or
        /// {"task", "estimated_hours"} records
        #[arg(long)]
        backlog: PathBuf,

        /// Hours available per working day (default from dayplan.toml)
        #[arg(long)]
        daily_hours: Option<u32>,

        /// Working days per week, counted from Monday (default from dayplan.toml)
        #[arg(long)]
        working_days: Option<u32>,
    },

    /// List projects
    List,

    /// Show a project's stored state
    Show {
        /// Project name
        name: String,
    },

    /// Delete a project
    Delete {
        /// Project name
        name: String,
    },

    /// Start a project and print day 1's plan
    Start {
        /// Project name
        name: String,

        /// Start date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Print the plan for a specific day
    Plan {
        /// Project name
        name: String,

        /// Day number (defaults to the project's current day)
        #[arg(long)]
        day: Option<u32>,
    },

    /// Log completed hours for a day and print the next day's plan
    Log {
        /// Project name
        name: String,

        /// Day number being reported
        #[arg(long)]
        day: u32,

        /// Completed hours as task=hours pairs, e.g. "Design=4"
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Print the current day's plan
    Current {
        /// Project name
        name: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let storage = Storage::new(self.store.clone());
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init => init::run(&storage, options),
            Commands::Create {
                name,
                backlog,
                daily_hours,
                working_days,
            } => project::create(&storage, options, &name, &backlog, daily_hours, working_days),
            Commands::List => project::list(&storage, options),
            Commands::Show { name } => project::show(&storage, options, &name),
            Commands::Delete { name } => project::delete(&storage, options, &name),
            Commands::Start { name, date } => plan::start(&storage, options, &name, date.as_deref()),
            Commands::Plan { name, day } => plan::for_day(&storage, options, &name, day),
            Commands::Log { name, day, entries } => {
                log::run(&storage, options, &name, day, &entries)
            }
            Commands::Current { name } => plan::current(&storage, options, &name),
        }
    }
}

/// Parse an ISO start date argument.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidStartDate(input.to_string()))
}
