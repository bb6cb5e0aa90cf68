use serde::{Deserialize, Serialize};
use std::fmt;

/// Disease stage label, in its fixed display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageLabel {
    F0,
    F1,
    F2,
    F3,
    F4,
}

impl StageLabel {
    /// All labels, F0 first
    pub const ALL: [StageLabel; 5] = [
        StageLabel::F0,
        StageLabel::F1,
        StageLabel::F2,
        StageLabel::F3,
        StageLabel::F4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageLabel::F0 => "F0",
            StageLabel::F1 => "F1",
            StageLabel::F2 => "F2",
            StageLabel::F3 => "F3",
            StageLabel::F4 => "F4",
        }
    }

    /// Parse a label. Case-sensitive, no trimming, no synonyms.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "F0" => Some(StageLabel::F0),
            "F1" => Some(StageLabel::F1),
            "F2" => Some(StageLabel::F2),
            "F3" => Some(StageLabel::F3),
            "F4" => Some(StageLabel::F4),
            _ => None,
        }
    }
}

impl fmt::Display for StageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated count and share for one stage.
/// Transient: rebuilt on every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageBucket {
    pub label: StageLabel,
    pub count: usize,
    /// Share of the staged patients, rounded to one decimal
    pub percentage: f64,
}
