//! Store handle for the roster database.

use std::path::{Path, PathBuf};

/// Handle to the SQLite file backing the roster.
///
/// Cheap to clone; connections are opened per operation by the broker, so a
/// `Store` can be shared freely between request handlers.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl Store {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
