use crate::models::PatientRecord;

/// Find the patient whose ID equals `query` after trimming the query.
///
/// Only the query is trimmed; stored IDs are compared verbatim.
pub fn find_patient<'a>(patients: &'a [PatientRecord], query: &str) -> Option<&'a PatientRecord> {
    let key = query.trim();
    if key.is_empty() {
        return None;
    }
    let found = patients.iter().find(|p| p.id == key);
    log::debug!("lookup '{}': {}", key, if found.is_some() { "hit" } else { "miss" });
    found
}
