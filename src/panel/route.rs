// Collaborator seams: where the panel hands off rendering and navigation

use anyhow::Result;
use serde::Serialize;

use crate::models::{StageBucket, StageLabel};

/// Destination views reachable from the panel, with their payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    /// All registered patients
    PatientList,
    /// History of the patient found by search
    PatientHistory { id: String, name: String },
    /// Patients in one stage (a chart segment was selected)
    StageDetail { stage: StageLabel },
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::PatientList => "/patients",
            Route::PatientHistory { .. } => "/patients/history",
            Route::StageDetail { .. } => "/stages/detail",
        }
    }
}

/// Draws the stage distribution (chart + legend)
pub trait Renderer {
    fn render(&mut self, buckets: &[StageBucket]) -> Result<()>;
}

/// Moves to another view
pub trait Navigator {
    fn navigate(&mut self, route: Route) -> Result<()>;
}
