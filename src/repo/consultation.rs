use rusqlite::{Connection, OptionalExtension};
use crate::models::Consultation;
use crate::repo::PatientRepo;
use anyhow::{Context, Result};

pub struct ConsultationRepo;

/// Consultation card figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsultationSummary {
    pub pending: usize,
    pub last_completed_ts: Option<i64>,
}

impl ConsultationRepo {
    /// Open a consultation request for a registered patient
    pub fn request(conn: &Connection, patient_id: &str) -> Result<Consultation> {
        if PatientRepo::get_by_id(conn, patient_id)?.is_none() {
            anyhow::bail!("Patient '{}' not found", patient_id);
        }

        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO consultations (patient_id, requested_ts) VALUES (?1, ?2)",
            rusqlite::params![patient_id, now],
        )
        .with_context(|| format!("Failed to insert consultation for patient '{}'", patient_id))?;

        Ok(Consultation {
            id: conn.last_insert_rowid(),
            patient_id: patient_id.to_string(),
            requested_ts: now,
            completed_ts: None,
        })
    }

    /// Mark a pending consultation as completed at `completed_ts`
    pub fn complete(conn: &Connection, id: i64, completed_ts: i64) -> Result<()> {
        let consultation = Self::get_by_id(conn, id)?
            .ok_or_else(|| anyhow::anyhow!("Consultation {} not found", id))?;
        if !consultation.is_pending() {
            anyhow::bail!("Consultation {} is already completed", id);
        }

        conn.execute(
            "UPDATE consultations SET completed_ts = ?1 WHERE id = ?2",
            rusqlite::params![completed_ts, id],
        )
        .with_context(|| format!("Failed to complete consultation {}", id))?;
        Ok(())
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Consultation>> {
        let consultation = conn
            .query_row(
                "SELECT id, patient_id, requested_ts, completed_ts FROM consultations WHERE id = ?1",
                [id],
                Self::from_row,
            )
            .optional()?;
        Ok(consultation)
    }

    pub fn list_all(conn: &Connection) -> Result<Vec<Consultation>> {
        Self::query(
            conn,
            "SELECT id, patient_id, requested_ts, completed_ts FROM consultations ORDER BY id",
            &[],
        )
    }

    pub fn list_for_patient(conn: &Connection, patient_id: &str) -> Result<Vec<Consultation>> {
        Self::query(
            conn,
            "SELECT id, patient_id, requested_ts, completed_ts FROM consultations
             WHERE patient_id = ?1 ORDER BY id",
            &[&patient_id],
        )
    }

    pub fn summary(conn: &Connection) -> Result<ConsultationSummary> {
        let (pending, last_completed_ts): (i64, Option<i64>) = conn.query_row(
            "SELECT COALESCE(SUM(completed_ts IS NULL), 0), MAX(completed_ts) FROM consultations",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(ConsultationSummary {
            pending: pending as usize,
            last_completed_ts,
        })
    }

    fn query(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Consultation>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::from_row)?;

        let mut consultations = Vec::new();
        for row in rows {
            consultations.push(row?);
        }
        Ok(consultations)
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Consultation> {
        Ok(Consultation {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            requested_ts: row.get(2)?,
            completed_ts: row.get(3)?,
        })
    }
}
