use rusqlite::{Connection, OptionalExtension};
use crate::models::Note;
use anyhow::{Context, Result};

pub struct NoteRepo;

impl NoteRepo {
    pub fn create(conn: &Connection, text: &str) -> Result<Note> {
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO notes (text, created_ts) VALUES (?1, ?2)",
            rusqlite::params![text, now],
        )
        .context("Failed to insert note")?;

        Ok(Note {
            id: conn.last_insert_rowid(),
            text: text.to_string(),
            created_ts: now,
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Note>> {
        let note = conn
            .query_row(
                "SELECT id, text, created_ts FROM notes WHERE id = ?1",
                [id],
                Self::from_row,
            )
            .optional()?;
        Ok(note)
    }

    /// All notes, oldest first
    pub fn list(conn: &Connection) -> Result<Vec<Note>> {
        let mut stmt = conn.prepare("SELECT id, text, created_ts FROM notes ORDER BY id")?;
        let rows = stmt.query_map([], Self::from_row)?;

        let mut notes = Vec::new();
        for row in rows {
            notes.push(row?);
        }
        Ok(notes)
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let deleted = conn.execute("DELETE FROM notes WHERE id = ?1", [id])
            .with_context(|| format!("Failed to delete note {}", id))?;
        if deleted == 0 {
            anyhow::bail!("Note {} not found", id);
        }
        Ok(())
    }

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            text: row.get(1)?,
            created_ts: row.get(2)?,
        })
    }
}
