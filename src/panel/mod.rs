//! The panel core: stage distribution, patient lookup, and the controller
//! that hands results to a renderer or navigator.

pub mod aggregate;
pub mod error;
pub mod lookup;
pub mod route;
pub mod source;

pub use aggregate::{distribution, percentage_of, stage_distribution};
pub use error::PanelError;
pub use lookup::find_patient;
pub use route::{Navigator, Renderer, Route};
pub use source::PatientSource;

use crate::models::{PatientRecord, StageBucket, StageLabel};

/// Dashboard controller over a borrowed patient collection
pub struct Panel<'a> {
    patients: &'a [PatientRecord],
}

impl<'a> Panel<'a> {
    pub fn new(patients: &'a [PatientRecord]) -> Self {
        Self { patients }
    }

    pub fn patients(&self) -> &'a [PatientRecord] {
        self.patients
    }

    /// Registered patients, staged or not
    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn distribution(&self) -> Vec<StageBucket> {
        distribution(self.patients)
    }

    pub fn render_distribution<R: Renderer>(&self, renderer: &mut R) -> Result<(), PanelError> {
        renderer.render(&self.distribution())?;
        Ok(())
    }

    pub fn show_all<N: Navigator>(&self, navigator: &mut N) -> Result<(), PanelError> {
        navigator.navigate(Route::PatientList)?;
        Ok(())
    }

    /// Open the history of the patient whose ID matches `query`.
    /// On a miss nothing is navigated.
    pub fn search<N: Navigator>(&self, query: &str, navigator: &mut N) -> Result<(), PanelError> {
        let patient = find_patient(self.patients, query).ok_or_else(|| PanelError::PatientNotFound {
            query: query.to_string(),
        })?;
        navigator.navigate(Route::PatientHistory {
            id: patient.id.clone(),
            name: patient.name.clone(),
        })?;
        Ok(())
    }

    pub fn select_stage<N: Navigator>(&self, stage: StageLabel, navigator: &mut N) -> Result<(), PanelError> {
        navigator.navigate(Route::StageDetail { stage })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Vec<Route>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) -> Result<()> {
            self.routes.push(route);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Vec<StageBucket>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, buckets: &[StageBucket]) -> Result<()> {
            self.frames.push(buckets.to_vec());
            Ok(())
        }
    }

    struct BrokenNavigator;

    impl Navigator for BrokenNavigator {
        fn navigate(&mut self, _route: Route) -> Result<()> {
            anyhow::bail!("view unavailable")
        }
    }

    fn registry() -> Vec<PatientRecord> {
        vec![
            PatientRecord::new("12345678901", "Ayse Yilmaz", Some("F1")),
            PatientRecord::new("23456789012", "Mehmet Demir", Some("F4")),
            PatientRecord::new("34567890123", "Unstaged", None),
        ]
    }

    #[test]
    fn test_patient_count_includes_unstaged() {
        let patients = registry();
        assert_eq!(Panel::new(&patients).patient_count(), 3);
    }

    #[test]
    fn test_search_hit_navigates_to_history() {
        let patients = registry();
        let mut nav = RecordingNavigator::default();
        Panel::new(&patients).search("  12345678901  ", &mut nav).unwrap();
        assert_eq!(
            nav.routes,
            vec![Route::PatientHistory { id: "12345678901".to_string(), name: "Ayse Yilmaz".to_string() }]
        );
    }

    #[test]
    fn test_search_miss_does_not_navigate() {
        let patients = registry();
        let mut nav = RecordingNavigator::default();
        let err = Panel::new(&patients).search("00000000000", &mut nav).unwrap_err();
        assert!(matches!(err, PanelError::PatientNotFound { ref query } if query == "00000000000"));
        assert_eq!(err.to_string(), "Patient ID not found!");
        assert!(nav.routes.is_empty());
    }

    #[test]
    fn test_navigator_failure_propagates() {
        let patients = registry();
        let err = Panel::new(&patients).show_all(&mut BrokenNavigator).unwrap_err();
        assert!(matches!(err, PanelError::Collaborator(_)));
        assert_eq!(err.to_string(), "view unavailable");
    }

    #[test]
    fn test_show_all_and_select_stage() {
        let patients = registry();
        let panel = Panel::new(&patients);
        let mut nav = RecordingNavigator::default();
        panel.show_all(&mut nav).unwrap();
        panel.select_stage(StageLabel::F4, &mut nav).unwrap();
        assert_eq!(nav.routes, vec![Route::PatientList, Route::StageDetail { stage: StageLabel::F4 }]);
    }

    #[test]
    fn test_render_distribution_recomputes_each_time() {
        let patients = registry();
        let panel = Panel::new(&patients);
        let mut renderer = RecordingRenderer::default();
        panel.render_distribution(&mut renderer).unwrap();
        panel.render_distribution(&mut renderer).unwrap();
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(renderer.frames[0], renderer.frames[1]);
        assert_eq!(renderer.frames[0].len(), 2);
        assert_eq!(renderer.frames[0][0].percentage, 50.0);
    }

    #[test]
    fn test_render_empty_registry() {
        let mut renderer = RecordingRenderer::default();
        Panel::new(&[]).render_distribution(&mut renderer).unwrap();
        assert_eq!(renderer.frames, vec![Vec::<StageBucket>::new()]);
    }
}
