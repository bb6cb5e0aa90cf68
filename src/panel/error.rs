use thiserror::Error;

/// Failures surfaced by panel actions
#[derive(Debug, Error)]
pub enum PanelError {
    /// Search query matched no registered patient
    #[error("Patient ID not found!")]
    PatientNotFound { query: String },
    /// A rendering or navigation collaborator failed
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
