//! Durable single-value session state, one value per file next to the
//! config file. This is all the persistence the client keeps: the zombie
//! alert cursor and the last started description.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::AppResult;

const ZOMBIE_CURSOR_FILE: &str = "last_zombie_key";
const LAST_DESCRIPTION_FILE: &str = "last_description";

#[derive(Debug, Clone)]
pub struct AppState {
    dir: PathBuf,
}

impl AppState {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Root injection for tests (temp dirs).
    pub fn with_root(dir: &Path) -> Self {
        Self::new(dir.to_path_buf())
    }

    // ---------------------------
    // Zombie alert cursor
    // ---------------------------

    /// Key of the last record a zombie alert was emitted for, if any.
    pub fn last_zombie_key(&self) -> Option<String> {
        self.read(ZOMBIE_CURSOR_FILE)
    }

    pub fn set_last_zombie_key(&self, key: &str) -> AppResult<()> {
        self.write(ZOMBIE_CURSOR_FILE, key)
    }

    pub fn clear_last_zombie_key(&self) -> AppResult<()> {
        self.remove(ZOMBIE_CURSOR_FILE)
    }

    // ---------------------------
    // Last started description
    // ---------------------------

    /// Description of the last successfully started record, reused when
    /// `start` is called without one.
    pub fn last_description(&self) -> Option<String> {
        self.read(LAST_DESCRIPTION_FILE)
    }

    pub fn set_last_description(&self, description: &str) -> AppResult<()> {
        self.write(LAST_DESCRIPTION_FILE, description)
    }

    /// Drop everything tied to the session (logout).
    pub fn clear(&self) -> AppResult<()> {
        self.remove(ZOMBIE_CURSOR_FILE)?;
        self.remove(LAST_DESCRIPTION_FILE)?;
        Ok(())
    }

    // ---------------------------
    // One-value-per-file plumbing
    // ---------------------------

    fn read(&self, name: &str) -> Option<String> {
        let value = fs::read_to_string(self.dir.join(name)).ok()?;
        let value = value.trim().to_string();
        if value.is_empty() { None } else { Some(value) }
    }

    fn write(&self, name: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), value)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> AppResult<()> {
        match fs::remove_file(self.dir.join(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
