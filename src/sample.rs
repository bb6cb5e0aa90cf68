//! Built-in sample registry, loaded by `dpanel patients seed`.
//!
//! All records are fictional.

use crate::models::PatientRecord;

const SAMPLE: &[(&str, &str, &str)] = &[
    ("12345678901", "Ayse Yilmaz", "F1"),
    ("23456789012", "Mehmet Demir", "F2"),
    ("34567890123", "Fatma Kaya", "F4"),
    ("45678901234", "Ali Celik", "F2"),
    ("56789012345", "Zeynep Sahin", "F3"),
    ("67890123456", "Mustafa Aydin", "F4"),
    ("78901234567", "Emine Ozturk", "F1"),
    ("89012345678", "Hasan Arslan", "F4"),
    ("90123456789", "Elif Dogan", "F2"),
    ("10293847561", "Ibrahim Kilic", "F4"),
];

/// A fresh copy of the sample patients
pub fn sample_patients() -> Vec<PatientRecord> {
    SAMPLE
        .iter()
        .map(|&(id, name, stage)| PatientRecord::new(id, name, Some(stage)))
        .collect()
}
