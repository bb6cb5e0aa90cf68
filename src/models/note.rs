use serde::{Deserialize, Serialize};

/// A line on the Notes card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub created_ts: i64,
}
