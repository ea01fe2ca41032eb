use crate::core::db;
use crate::core::error;
use crate::core::store::Store;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;

/// The DB Broker is the single path to the roster database.
/// It serializes access in-process and reports each operation to the log.
pub struct DbBroker {
    db_path: PathBuf,
}

impl DbBroker {
    pub fn new(store: &Store) -> Self {
        Self {
            db_path: store.db_path.clone(),
        }
    }

    /// Execute a closure with a serialized connection to the roster DB.
    pub fn with_conn<F, R>(&self, op_name: &str, f: F) -> Result<R, error::RosterError>
    where
        F: FnOnce(&Connection) -> Result<R, error::RosterError>,
    {
        static DB_LOCK: Mutex<()> = Mutex::new(());
        // Guards `()`: a poisoned lock holds no state to repair.
        let _lock = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let conn = db::db_connect(&self.db_path.to_string_lossy())?;
        let result = f(&conn);

        match &result {
            Ok(_) => tracing::debug!(op = op_name, status = "success", "db operation"),
            Err(err) => tracing::debug!(op = op_name, status = "error", error = %err, "db operation"),
        }

        result
    }
}
