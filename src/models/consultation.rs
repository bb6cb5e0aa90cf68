use serde::{Deserialize, Serialize};

/// A consultation request for a patient.
/// Pending until `completed_ts` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub patient_id: String,
    pub requested_ts: i64,
    pub completed_ts: Option<i64>,
}

impl Consultation {
    pub fn is_pending(&self) -> bool {
        self.completed_ts.is_none()
    }
}
