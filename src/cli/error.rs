// Error handling utilities for consistent error messages and exit codes

use crate::models::StageLabel;
use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, unknown patients, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a stage label (exact, case-sensitive)
pub fn validate_stage(stage: &str) -> Result<StageLabel, String> {
    StageLabel::from_str(stage).ok_or_else(|| {
        let valid: Vec<&str> = StageLabel::ALL.iter().map(|s| s.as_str()).collect();
        format!("Invalid stage: '{}'. Stage must be one of {}.", stage, valid.join(", "))
    })
}

/// Validate a note or consultation ID (positive integer)
pub fn validate_record_id(id_str: &str, kind: &str) -> Result<i64, String> {
    id_str.parse::<i64>()
        .map_err(|_| format!("Invalid {} ID: '{}'. {} ID must be a number.", kind.to_lowercase(), id_str, kind))
        .and_then(|id| {
            if id > 0 {
                Ok(id)
            } else {
                Err(format!("Invalid {} ID: {}. {} ID must be positive.", kind.to_lowercase(), id, kind))
            }
        })
}
