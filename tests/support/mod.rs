use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use dayplan::backlog::RawTask;
use dayplan::project::{ProjectStore, ScheduleParameters};
use dayplan::storage::Storage;
use tempfile::TempDir;

pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let store = Self { dir };
        store.storage().init().expect("failed to init store");
        store
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join(".dayplan")
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.store_dir())
    }

    pub fn project_store(&self) -> ProjectStore {
        ProjectStore::new(self.storage())
    }

    /// Create the standard three-task fixture project used across tests:
    /// Design 5h, Build 10h, Test 3h with a 4-hour day.
    pub fn create_demo_project(&self) -> ProjectStore {
        let store = self.project_store();
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
            .expect("failed to create demo project");
        store
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// A dayplan command pointed at this store.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dayplan").expect("dayplan binary");
        cmd.current_dir(self.dir.path());
        cmd.arg("--store").arg(self.store_dir());
        cmd
    }
}
