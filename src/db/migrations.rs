use rusqlite::{Connection, Result};
use std::collections::HashMap;

/// Current registry schema version
const CURRENT_VERSION: u32 = 2;

/// Migration system for managing registry schema versions
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the registry with the current schema
    /// This creates the schema_version table and applies all pending migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version = Self::get_version(conn).unwrap_or(0);

        for version in (current_version + 1)..=CURRENT_VERSION {
            log::debug!("applying registry migration v{}", version);
            Self::apply_migration(conn, version)?;
        }

        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        if let Some(migration) = migrations.get(&version) {
            let tx = conn.unchecked_transaction()?;
            migration(&tx)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )?;
            tx.commit()?;
            Ok(())
        } else {
            Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_MISUSE),
                Some(format!("No migration found for version {}", version)),
            ))
        }
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> {
    let mut migrations: HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations.insert(2, migration_v2);
    migrations
}

/// Migration v1: patient registry
fn migration_v1(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    // Stage is free text on purpose: imports may carry values outside F0..F4.
    // The panel ignores those when aggregating.
    tx.execute(
        "CREATE TABLE patients (
            seq INTEGER PRIMARY KEY,
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            stage TEXT NULL,
            created_ts INTEGER NOT NULL,
            modified_ts INTEGER NOT NULL
        )",
        [],
    )?;

    tx.execute("CREATE INDEX idx_patients_stage ON patients(stage)", [])?;

    Ok(())
}

/// Migration v2: notes and consultations for the dashboard cards
fn migration_v2(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY,
            text TEXT NOT NULL,
            created_ts INTEGER NOT NULL
        )",
        [],
    )?;

    tx.execute(
        "CREATE TABLE consultations (
            id INTEGER PRIMARY KEY,
            patient_id TEXT NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
            requested_ts INTEGER NOT NULL,
            completed_ts INTEGER NULL
        )",
        [],
    )?;

    tx.execute(
        "CREATE INDEX idx_consultations_patient ON consultations(patient_id)",
        [],
    )?;

    Ok(())
}
