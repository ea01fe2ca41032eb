//! Guardians ("PGs"): the adults responsible for one or more adolescents.

use crate::core::broker::DbBroker;
use crate::core::error;
use crate::core::output::OutputFormat;
use crate::core::store::Store;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Guardian {
    pub id: i64,
    pub name: String,
}

/// Register a guardian under the name exactly as given; only a blank name is refused.
pub fn add_guardian(store: &Store, name: &str) -> Result<Guardian, error::RosterError> {
    if name.trim().is_empty() {
        return Err(error::RosterError::ValidationError(
            "guardian name must not be empty".to_string(),
        ));
    }

    let broker = DbBroker::new(store);
    let id = broker.with_conn("guardian.add", |conn| {
        conn.execute("INSERT INTO guardians(name) VALUES(?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    })?;

    Ok(Guardian {
        id,
        name: name.to_string(),
    })
}

pub fn list_guardians(store: &Store) -> Result<Vec<Guardian>, error::RosterError> {
    let broker = DbBroker::new(store);
    broker.with_conn("guardian.list", |conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM guardians ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Guardian {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

pub fn get_guardian(store: &Store, id: i64) -> Result<Option<Guardian>, error::RosterError> {
    let broker = DbBroker::new(store);
    broker.with_conn("guardian.get", |conn| {
        let found = conn
            .query_row(
                "SELECT id, name FROM guardians WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Guardian {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    })
}

/// Remove a guardian. Refused while any adolescent still references it.
pub fn remove_guardian(store: &Store, id: i64) -> Result<(), error::RosterError> {
    let broker = DbBroker::new(store);
    broker.with_conn("guardian.remove", |conn| {
        let dependents: i64 = conn.query_row(
            "SELECT COUNT(*) FROM adolescents WHERE guardian_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if dependents > 0 {
            return Err(error::RosterError::ValidationError(format!(
                "guardian {} still has {} adolescent(s) assigned",
                id, dependents
            )));
        }

        let changed = conn.execute("DELETE FROM guardians WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(error::RosterError::NotFound(format!("guardian {}", id)));
        }
        Ok(())
    })
}

#[derive(Parser, Debug)]
#[clap(name = "guardian", about = "Manage guardians (PGs).")]
pub struct GuardianCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: GuardianCommand,
}

#[derive(Subcommand, Debug)]
pub enum GuardianCommand {
    /// Register a new guardian.
    Add {
        #[clap(value_name = "NAME")]
        name: String,
    },
    /// List all guardians.
    List,
    /// Remove a guardian that has no adolescents assigned.
    Remove {
        #[clap(value_name = "ID")]
        id: i64,
    },
}

pub fn run_guardian_cli(store: &Store, cli: GuardianCli) -> Result<(), error::RosterError> {
    println!("{}", render_guardian_cli(store, cli)?);
    Ok(())
}

/// Execute one guardian command and return what it prints.
pub fn render_guardian_cli(store: &Store, cli: GuardianCli) -> Result<String, error::RosterError> {
    let out = match cli.command {
        GuardianCommand::Add { name } => {
            let guardian = add_guardian(store, &name)?;
            match cli.format {
                OutputFormat::Json => serde_json::json!({ "item": guardian }).to_string(),
                OutputFormat::Text => {
                    format!("{} guardian {} ({})", "added".green(), guardian.id, guardian.name)
                }
            }
        }
        GuardianCommand::List => {
            let items = list_guardians(store)?;
            match cli.format {
                OutputFormat::Json => serde_json::json!({ "items": items }).to_string(),
                OutputFormat::Text => {
                    let mut lines = vec![format!("{:>5}  {}", "ID", "NAME").bold().to_string()];
                    lines.extend(items.iter().map(|g| format!("{:>5}  {}", g.id, g.name)));
                    lines.join("\n")
                }
            }
        }
        GuardianCommand::Remove { id } => {
            remove_guardian(store, id)?;
            match cli.format {
                OutputFormat::Json => serde_json::json!({ "removed": id }).to_string(),
                OutputFormat::Text => format!("{} guardian {}", "removed".yellow(), id),
            }
        }
    };
    Ok(out)
}
