use crate::core::broker::DbBroker;
use crate::core::error;
use crate::core::schemas;
use crate::core::store::Store;
use rusqlite::Connection;
use std::fs;

pub fn db_connect(db_path: &str) -> Result<Connection, error::RosterError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(error::RosterError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::RosterError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::RosterError::RusqliteError)?;
    Ok(conn)
}

/// Create the guardian and adolescent tables if they are missing.
pub fn initialize_roster_db(store: &Store) -> Result<(), error::RosterError> {
    if let Some(parent_dir) = store.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent_dir).map_err(|e| {
            error::RosterError::DatabaseInitializationError(format!(
                "cannot create {}: {}",
                parent_dir.display(),
                e
            ))
        })?;
    }

    let broker = DbBroker::new(store);
    broker.with_conn("roster.init", |conn| {
        for stmt in schemas::ROSTER_DB_SCHEMA {
            conn.execute(stmt, [])?;
        }
        Ok(())
    })?;

    tracing::info!(db = %store.db_path.display(), "roster database ready");
    Ok(())
}
