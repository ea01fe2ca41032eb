//! Database schema definitions for the roster store.
//!
//! A single SQLite file holds both tables. Tables are created once if missing and
//! never altered.

pub const ROSTER_DB_NAME: &str = "adolescentes.db";

pub const GUARDIANS_DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS guardians (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
";

// No ON DELETE clause: removing a guardian that still has dependents is refused
// by the foreign key.
pub const ADOLESCENTS_DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS adolescents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        birth_date TEXT NOT NULL,
        gender TEXT NOT NULL,
        guardian_id INTEGER NOT NULL,
        team TEXT NOT NULL,
        FOREIGN KEY(guardian_id) REFERENCES guardians(id)
    )
";
pub const ADOLESCENTS_DB_SCHEMA_INDEX_NAME: &str =
    "CREATE INDEX IF NOT EXISTS idx_adolescents_name ON adolescents(name)";
pub const ADOLESCENTS_DB_SCHEMA_INDEX_GUARDIAN: &str =
    "CREATE INDEX IF NOT EXISTS idx_adolescents_guardian ON adolescents(guardian_id)";

/// Every statement needed to bring an empty file up to the current schema, in order.
pub const ROSTER_DB_SCHEMA: &[&str] = &[
    GUARDIANS_DB_SCHEMA,
    ADOLESCENTS_DB_SCHEMA,
    ADOLESCENTS_DB_SCHEMA_INDEX_NAME,
    ADOLESCENTS_DB_SCHEMA_INDEX_GUARDIAN,
];
