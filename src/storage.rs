//! Storage layout for dayplan
//!
//! All state lives under a single store directory (default `.dayplan/`):
//!
//! ```text
//! .dayplan/
//!   dayplan.toml                # Optional schedule defaults
//!   projects/
//!     <name>.json               # One document per project
//!     <name>.json.lock          # Sidecar lock for mutations
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default store directory name
pub const DEFAULT_STORE_DIR: &str = ".dayplan";

/// Config file name inside the store
pub const CONFIG_FILE: &str = "dayplan.toml";

/// Storage manager for a dayplan store directory
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path to the store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the optional config file
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Path to the projects directory
    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    /// Path to a project document
    pub fn project_file(&self, name: &str) -> PathBuf {
        self.projects_dir().join(format!("{name}.json"))
    }

    /// Path to a project's sidecar lock file
    pub fn project_lock_file(&self, name: &str) -> PathBuf {
        self.projects_dir().join(format!("{name}.json.lock"))
    }

    /// Whether the store has been initialized
    pub fn exists(&self) -> bool {
        self.projects_dir().is_dir()
    }

    /// Create the store directory structure
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.projects_dir())?;
        Ok(())
    }

    /// Fail unless the store exists
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.exists() {
            return Err(Error::StoreNotFound(self.root.clone()));
        }
        Ok(())
    }
}

/// Validate a project name for use as a store key.
///
/// Names become file names, so path separators and empty strings are
/// rejected up front with a user error.
pub fn validate_project_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(
            "project name cannot be empty".to_string(),
        ));
    }
    if trimmed != name {
        return Err(Error::InvalidArgument(format!(
            "project name has leading or trailing whitespace: \"{name}\""
        )));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidArgument(format!(
            "project name cannot contain path separators: \"{name}\""
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_projects_dir() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join(DEFAULT_STORE_DIR));
        assert!(!storage.exists());
        storage.init().unwrap();
        assert!(storage.exists());
        assert!(storage.ensure_exists().is_ok());
    }

    #[test]
    fn project_paths_are_store_relative() {
        let storage = Storage::new(PathBuf::from("/store"));
        assert_eq!(
            storage.project_file("demo"),
            PathBuf::from("/store/projects/demo.json")
        );
        assert_eq!(
            storage.project_lock_file("demo"),
            PathBuf::from("/store/projects/demo.json.lock")
        );
    }

    #[test]
    fn rejects_path_like_names() {
        assert!(validate_project_name("ok-name_1").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("..").is_err());
        assert!(validate_project_name(" padded ").is_err());
    }
}
