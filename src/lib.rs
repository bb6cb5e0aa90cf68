//! Doctor Panel - a command-line dashboard for a patient registry
//!
//! This library provides the core functionality for `dpanel`, including:
//! - The stage distribution over F0..F4 and exact patient lookup by national ID
//! - The panel controller and its rendering / navigation seams
//! - The SQLite patient registry, with migrations and repositories
//! - CLI command parsing, views and terminal output
//!
//! # Example
//!
//! ```
//! use dpanel::models::{PatientRecord, StageLabel};
//! use dpanel::panel::{distribution, find_patient};
//!
//! let patients = vec![
//!     PatientRecord::new("12345678901", "Ayse Yilmaz", Some("F1")),
//!     PatientRecord::new("23456789012", "Mehmet Demir", Some("F4")),
//! ];
//!
//! let buckets = distribution(&patients);
//! assert_eq!(buckets[0].label, StageLabel::F1);
//! assert_eq!(buckets[0].percentage, 50.0);
//!
//! assert!(find_patient(&patients, " 12345678901 ").is_some());
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod panel;
pub mod repo;
pub mod cli;
pub mod sample;
pub mod utils;
