use serde::{Deserialize, Serialize};

use crate::models::StageLabel;

/// A registered patient.
///
/// `id` is the national ID exactly as it was stored (never trimmed).
/// `stage` is free text: normally one of the stage labels, but anything
/// (or nothing) is accepted and simply left out of the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stage: Option<String>,
}

impl PatientRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stage: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stage: stage.map(|s| s.to_string()),
        }
    }

    /// The stage label, if the stored stage is one of F0..F4 (exact match)
    pub fn stage_label(&self) -> Option<StageLabel> {
        self.stage.as_deref().and_then(StageLabel::from_str)
    }

    /// True when the stored stage is exactly `label`
    pub fn has_stage(&self, label: StageLabel) -> bool {
        self.stage.as_deref() == Some(label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_label_exact_match() {
        let p = PatientRecord::new("1", "A", Some("F2"));
        assert_eq!(p.stage_label(), Some(StageLabel::F2));
        assert!(p.has_stage(StageLabel::F2));
        assert!(!p.has_stage(StageLabel::F3));

        let lower = PatientRecord::new("2", "B", Some("f2"));
        assert_eq!(lower.stage_label(), None);
        assert!(!lower.has_stage(StageLabel::F2));

        let none = PatientRecord::new("3", "C", None);
        assert_eq!(none.stage_label(), None);
    }

    #[test]
    fn test_deserialize_missing_stage() {
        let p: PatientRecord = serde_json::from_str(r#"{"id":"1","name":"A"}"#).unwrap();
        assert_eq!(p.stage, None);
        let p: PatientRecord = serde_json::from_str(r#"{"id":"1","name":"A","stage":null}"#).unwrap();
        assert_eq!(p.stage, None);
    }
}
