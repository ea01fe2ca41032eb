//! Adolescent records: construction, persistence, and roster listing.
//!
//! [`create`] builds a record without touching storage. [`add`], [`get_by_id`],
//! [`update`] and [`delete`] are the only write/read paths for a single record; each
//! runs one statement through the broker and commits on return. [`count`] is
//! recomputed from storage on every call.

use crate::core::broker::DbBroker;
use crate::core::error;
use crate::core::output::OutputFormat;
use crate::core::store::Store;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rusqlite::{OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Adolescent {
    /// `None` until the record has been added.
    pub id: Option<i64>,
    pub name: String,
    pub age: i64,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub guardian_id: i64,
    /// The "empire" the adolescent is assigned to.
    pub team: String,
}

/// One line of the roster: an adolescent joined with the guardian's name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub guardian_name: String,
    pub team: String,
}

/// Parse a birth date strictly as `YYYY-MM-DD`.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, error::RosterError> {
    Ok(NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT)?)
}

pub fn create(
    name: &str,
    age: i64,
    birth_date: NaiveDate,
    gender: &str,
    guardian_id: i64,
    team: &str,
) -> Adolescent {
    Adolescent {
        id: None,
        name: name.to_string(),
        age,
        birth_date,
        gender: gender.to_string(),
        guardian_id,
        team: team.to_string(),
    }
}

fn adolescent_from_row(row: &Row<'_>) -> rusqlite::Result<Adolescent> {
    Ok(Adolescent {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        age: row.get(2)?,
        birth_date: row.get(3)?,
        gender: row.get(4)?,
        guardian_id: row.get(5)?,
        team: row.get(6)?,
    })
}

fn require_id(record: &Adolescent) -> Result<i64, error::RosterError> {
    record.id.ok_or_else(|| {
        error::RosterError::ValidationError(format!(
            "adolescent '{}' has not been added yet",
            record.name
        ))
    })
}

/// Insert `record` and stamp it with the generated id.
pub fn add(store: &Store, record: &mut Adolescent) -> Result<i64, error::RosterError> {
    let broker = DbBroker::new(store);
    let id = broker.with_conn("adolescent.add", |conn| {
        conn.execute(
            "INSERT INTO adolescents(name, age, birth_date, gender, guardian_id, team)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.name,
                record.age,
                record.birth_date,
                record.gender,
                record.guardian_id,
                record.team
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })?;
    record.id = Some(id);
    Ok(id)
}

pub fn get_by_id(store: &Store, id: i64) -> Result<Option<Adolescent>, error::RosterError> {
    let broker = DbBroker::new(store);
    broker.with_conn("adolescent.get", |conn| {
        let found = conn
            .query_row(
                "SELECT id, name, age, birth_date, gender, guardian_id, team
                 FROM adolescents WHERE id = ?1",
                params![id],
                adolescent_from_row,
            )
            .optional()?;
        Ok(found)
    })
}

/// Persist every field of a record that was fetched and then mutated in place.
pub fn update(store: &Store, record: &Adolescent) -> Result<(), error::RosterError> {
    let id = require_id(record)?;
    let broker = DbBroker::new(store);
    broker.with_conn("adolescent.update", |conn| {
        let changed = conn.execute(
            "UPDATE adolescents
             SET name = ?1, age = ?2, birth_date = ?3, gender = ?4, guardian_id = ?5, team = ?6
             WHERE id = ?7",
            params![
                record.name,
                record.age,
                record.birth_date,
                record.gender,
                record.guardian_id,
                record.team,
                id
            ],
        )?;
        if changed == 0 {
            return Err(error::RosterError::NotFound(format!("adolescent {}", id)));
        }
        Ok(())
    })
}

pub fn delete(store: &Store, record: &Adolescent) -> Result<(), error::RosterError> {
    let id = require_id(record)?;
    let broker = DbBroker::new(store);
    broker.with_conn("adolescent.delete", |conn| {
        let changed = conn.execute("DELETE FROM adolescents WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(error::RosterError::NotFound(format!("adolescent {}", id)));
        }
        Ok(())
    })
}

/// All adolescents with their guardian's name, ordered by adolescent name.
pub fn list_with_guardians(store: &Store) -> Result<Vec<RosterEntry>, error::RosterError> {
    let broker = DbBroker::new(store);
    broker.with_conn("adolescent.list", |conn| {
        let mut stmt = conn.prepare(
            "SELECT a.id, a.name, a.age, a.birth_date, a.gender, g.name, a.team
             FROM adolescents a
             JOIN guardians g ON g.id = a.guardian_id
             ORDER BY a.name ASC, a.id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RosterEntry {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                birth_date: row.get(3)?,
                gender: row.get(4)?,
                guardian_name: row.get(5)?,
                team: row.get(6)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

/// Total number of adolescent records, counted fresh from storage.
pub fn count(store: &Store) -> Result<i64, error::RosterError> {
    let broker = DbBroker::new(store);
    broker.with_conn("adolescent.count", |conn| {
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM adolescents", [], |row| row.get(0))?;
        Ok(total)
    })
}

#[derive(Parser, Debug)]
#[clap(name = "adolescent", about = "Inspect the adolescent roster.")]
pub struct AdolescentCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: AdolescentCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdolescentCommand {
    /// List the roster ordered by name.
    List,
    /// Print the total number of adolescents.
    Count,
}

pub fn run_adolescent_cli(store: &Store, cli: AdolescentCli) -> Result<(), error::RosterError> {
    println!("{}", render_adolescent_cli(store, cli)?);
    Ok(())
}

/// Execute one adolescent command and return what it prints.
pub fn render_adolescent_cli(
    store: &Store,
    cli: AdolescentCli,
) -> Result<String, error::RosterError> {
    let out = match cli.command {
        AdolescentCommand::List => {
            let items = list_with_guardians(store)?;
            match cli.format {
                OutputFormat::Json => serde_json::json!({ "items": items }).to_string(),
                OutputFormat::Text => {
                    let header = format!(
                        "{:>5}  {:<24} {:>4}  {:<10}  {:<6} {:<20} {}",
                        "ID", "NAME", "AGE", "BORN", "GENDER", "PG", "EMPIRE"
                    );
                    let mut lines = vec![header.bold().to_string()];
                    lines.extend(items.iter().map(|e| {
                        format!(
                            "{:>5}  {:<24} {:>4}  {:<10}  {:<6} {:<20} {}",
                            e.id,
                            e.name,
                            e.age,
                            e.birth_date.to_string(),
                            e.gender,
                            e.guardian_name,
                            e.team
                        )
                    }));
                    lines.join("\n")
                }
            }
        }
        AdolescentCommand::Count => {
            let total = count(store)?;
            match cli.format {
                OutputFormat::Json => serde_json::json!({ "total": total }).to_string(),
                OutputFormat::Text => total.to_string(),
            }
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_has_no_id_and_keeps_fields() {
        let born = NaiveDate::from_ymd_opt(2009, 5, 1).unwrap();
        let record = create("Ana", 15, born, "F", 1, "Norte");
        assert_eq!(record.id, None);
        assert_eq!(record.name, "Ana");
        assert_eq!(record.age, 15);
        assert_eq!(record.birth_date, born);
        assert_eq!(record.gender, "F");
        assert_eq!(record.guardian_id, 1);
        assert_eq!(record.team, "Norte");
    }

    #[test]
    fn test_parse_birth_date_accepts_iso_day() {
        let parsed = parse_birth_date("2009-05-01").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2009, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_birth_date_rejects_other_shapes() {
        for raw in ["not-a-date", "01/05/2009", "2009-13-01", "2009-02-30", ""] {
            let err = parse_birth_date(raw).unwrap_err();
            assert!(
                matches!(err, error::RosterError::DateParseError(_)),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_unsaved_record_cannot_be_updated_or_deleted() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path().join("roster.db"));
        let record = create("Bia", 14, NaiveDate::from_ymd_opt(2010, 1, 2).unwrap(), "F", 1, "Sul");
        assert!(matches!(
            update(&store, &record),
            Err(error::RosterError::ValidationError(_))
        ));
        assert!(matches!(
            delete(&store, &record),
            Err(error::RosterError::ValidationError(_))
        ));
    }

    fn seeded_store() -> (tempfile::TempDir, Store) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path().join("roster.db"));
        crate::core::db::initialize_roster_db(&store).unwrap();
        crate::plugins::guardian::add_guardian(&store, "Marta").unwrap();
        let mut ana = create("Ana", 15, NaiveDate::from_ymd_opt(2009, 5, 1).unwrap(), "F", 1, "Norte");
        add(&store, &mut ana).unwrap();
        (tmp, store)
    }

    fn parse(args: &[&str]) -> AdolescentCli {
        AdolescentCli::try_parse_from(std::iter::once("adolescent").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_cli_json_list_carries_guardian_name() {
        let (_tmp, store) = seeded_store();
        let out = render_adolescent_cli(&store, parse(&["--format", "json", "list"])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Ana");
        assert_eq!(items[0]["guardian_name"], "Marta");
        assert_eq!(items[0]["birth_date"], "2009-05-01");
    }

    #[test]
    fn test_cli_count_in_both_formats() {
        let (_tmp, store) = seeded_store();
        let json = render_adolescent_cli(&store, parse(&["count", "--format", "json"])).unwrap();
        assert_eq!(json, r#"{"total":1}"#);
        let text = render_adolescent_cli(&store, parse(&["count"])).unwrap();
        assert_eq!(text, "1");
    }
}
