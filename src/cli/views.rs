// Destination views reached through the panel's navigation routes

use crate::cli::output::{format_patient_history, format_patient_list, format_stage_detail};
use crate::models::PatientRecord;
use crate::panel::{Navigator, Route};
use crate::repo::ConsultationRepo;
use anyhow::Result;
use rusqlite::Connection;

/// Navigation collaborator for the CLI: each route renders its view into
/// an output buffer (text or JSON)
pub struct CliNavigator<'a> {
    conn: &'a Connection,
    patients: &'a [PatientRecord],
    json: bool,
    output: String,
}

impl<'a> CliNavigator<'a> {
    pub fn new(conn: &'a Connection, patients: &'a [PatientRecord], json: bool) -> Self {
        Self { conn, patients, json, output: String::new() }
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn patient_list(&self) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(self.patients)?);
        }
        Ok(format_patient_list(self.patients))
    }

    fn patient_history(&self, id: &str, name: &str) -> Result<String> {
        let stage = self
            .patients
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.stage.as_deref());
        let consultations = ConsultationRepo::list_for_patient(self.conn, id)?;

        if self.json {
            let view = serde_json::json!({
                "id": id,
                "name": name,
                "stage": stage,
                "consultations": consultations,
            });
            return Ok(serde_json::to_string_pretty(&view)?);
        }
        Ok(format_patient_history(id, name, stage, &consultations))
    }

    fn stage_detail(&self, route: &Route, stage: &str) -> Result<String> {
        let in_stage: Vec<&PatientRecord> = self
            .patients
            .iter()
            .filter(|p| p.stage.as_deref() == Some(stage))
            .collect();

        if self.json {
            let view = serde_json::json!({
                "route": route,
                "patients": in_stage,
            });
            return Ok(serde_json::to_string_pretty(&view)?);
        }
        Ok(format_stage_detail(stage, &in_stage))
    }
}

impl Navigator for CliNavigator<'_> {
    fn navigate(&mut self, route: Route) -> Result<()> {
        log::debug!("navigate to {} ({:?})", route.path(), route);
        let view = match &route {
            Route::PatientList => self.patient_list()?,
            Route::PatientHistory { id, name } => self.patient_history(id, name)?,
            Route::StageDetail { stage } => self.stage_detail(&route, stage.as_str())?,
        };
        self.output.push_str(&view);
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        Ok(())
    }
}
