// Data providers for the patient collection

use anyhow::Result;
use rusqlite::Connection;

use crate::models::PatientRecord;
use crate::repo::PatientRepo;

/// Supplies the patient collection the panel works on.
/// Read-only from the panel's point of view.
pub trait PatientSource {
    fn patients(&self) -> Result<Vec<PatientRecord>>;
}

impl PatientSource for [PatientRecord] {
    fn patients(&self) -> Result<Vec<PatientRecord>> {
        Ok(self.to_vec())
    }
}

impl PatientSource for Vec<PatientRecord> {
    fn patients(&self) -> Result<Vec<PatientRecord>> {
        Ok(self.clone())
    }
}

/// The SQLite registry, in registration order
impl PatientSource for Connection {
    fn patients(&self) -> Result<Vec<PatientRecord>> {
        PatientRepo::list_all(self)
    }
}
