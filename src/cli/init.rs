//! dayplan init command implementation
//!
//! Creates the store directory structure and a default config file.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

#[derive(serde::Serialize)]
struct InitReport {
    store: PathBuf,
    created: InitCreated,
}

#[derive(serde::Serialize)]
struct InitCreated {
    projects_dir: bool,
    config: bool,
}

pub fn run(storage: &Storage, options: OutputOptions) -> Result<()> {
    let created_projects_dir = !storage.exists();
    storage.init()?;

    let config_path = storage.config_file();
    let created_config = !config_path.exists();
    if created_config {
        Config::default().save(&config_path)?;
    }

    let report = InitReport {
        store: storage.root().to_path_buf(),
        created: InitCreated {
            projects_dir: created_projects_dir,
            config: created_config,
        },
    };

    let header = if created_projects_dir || created_config {
        "dayplan init: initialized store"
    } else {
        "dayplan init: nothing to do"
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("store", storage.root().display().to_string());
    human.push_next_step("dayplan create <name> --backlog tasks.json");

    emit_success(options, "init", &report, Some(&human))?;

    Ok(())
}
