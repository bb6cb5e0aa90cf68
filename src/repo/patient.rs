use rusqlite::{Connection, OptionalExtension};
use crate::models::{PatientRecord, StageLabel};
use anyhow::{Context, Result};

/// Patient repository for registry operations
pub struct PatientRepo;

impl PatientRepo {
    /// Register a patient. Fails if the ID is already registered.
    pub fn create(conn: &Connection, patient: &PatientRecord) -> Result<()> {
        if Self::get_by_id(conn, &patient.id)?.is_some() {
            anyhow::bail!("Patient '{}' is already registered", patient.id);
        }

        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO patients (id, name, stage, created_ts, modified_ts)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![patient.id, patient.name, patient.stage, now, now],
        )
        .with_context(|| format!("Failed to insert patient '{}'", patient.id))?;

        Ok(())
    }

    /// Insert or replace a batch of records in one transaction.
    /// Returns (inserted, updated).
    pub fn upsert_all(conn: &Connection, patients: &[PatientRecord]) -> Result<(usize, usize)> {
        let tx = conn.unchecked_transaction()
            .context("Failed to start import transaction")?;
        let now = chrono::Utc::now().timestamp();
        let mut inserted = 0;
        let mut updated = 0;

        for patient in patients {
            let changed = tx.execute(
                "UPDATE patients SET name = ?2, stage = ?3, modified_ts = ?4 WHERE id = ?1",
                rusqlite::params![patient.id, patient.name, patient.stage, now],
            )
            .with_context(|| format!("Failed to update patient '{}'", patient.id))?;

            if changed == 0 {
                tx.execute(
                    "INSERT INTO patients (id, name, stage, created_ts, modified_ts)
                     VALUES (?1, ?2, ?3, ?4, ?4)",
                    rusqlite::params![patient.id, patient.name, patient.stage, now],
                )
                .with_context(|| format!("Failed to insert patient '{}'", patient.id))?;
                inserted += 1;
            } else {
                updated += 1;
            }
        }

        tx.commit().context("Failed to commit import transaction")?;
        log::debug!("import: {} inserted, {} updated", inserted, updated);
        Ok((inserted, updated))
    }

    /// Get a patient by exact ID
    pub fn get_by_id(conn: &Connection, id: &str) -> Result<Option<PatientRecord>> {
        let patient = conn
            .query_row(
                "SELECT id, name, stage FROM patients WHERE id = ?1",
                [id],
                |row| {
                    Ok(PatientRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        stage: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(patient)
    }

    /// All patients in registration order
    pub fn list_all(conn: &Connection) -> Result<Vec<PatientRecord>> {
        let mut stmt = conn.prepare("SELECT id, name, stage FROM patients ORDER BY seq")?;

        let rows = stmt.query_map([], |row| {
            Ok(PatientRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                stage: row.get(2)?,
            })
        })?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?);
        }
        Ok(patients)
    }

    /// Change a patient's stage
    pub fn set_stage(conn: &Connection, id: &str, stage: StageLabel) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let updated = conn.execute(
            "UPDATE patients SET stage = ?1, modified_ts = ?2 WHERE id = ?3",
            rusqlite::params![stage.as_str(), now, id],
        )
        .with_context(|| format!("Failed to update stage for patient '{}'", id))?;

        if updated == 0 {
            anyhow::bail!("Patient '{}' not found", id);
        }
        Ok(())
    }

    /// Remove a patient; their consultations go with them
    pub fn delete(conn: &Connection, id: &str) -> Result<()> {
        let deleted = conn.execute("DELETE FROM patients WHERE id = ?1", [id])
            .with_context(|| format!("Failed to delete patient '{}'", id))?;

        if deleted == 0 {
            anyhow::bail!("Patient '{}' not found", id);
        }
        Ok(())
    }
}
