use clap::{Parser, Subcommand};
use std::collections::HashSet;
use rusqlite::Connection;
use crate::config::Config;
use crate::db::DbConnection;
use crate::models::PatientRecord;
use crate::panel::{Panel, PanelError, PatientSource};
use crate::repo::{ConsultationRepo, NoteRepo, PatientRepo};
use crate::cli::error::{user_error, validate_non_empty, validate_record_id, validate_stage};
use crate::cli::output::{
    default_chart_width, format_consultation_list, format_dashboard, format_note_list,
    format_timestamp, use_color, DashboardSummary, TerminalRenderer,
};
use crate::cli::views::CliNavigator;
use crate::sample::sample_patients;
use crate::utils::parse_time_expr;
use anyhow::{Context, Result};

#[derive(Parser)]
#[command(name = "dpanel")]
#[command(about = "Doctor Panel - patient counts, lookup and stage distribution")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard (default when no command is given)
    Panel {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// List all registered patients
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Find a patient by national ID and show their history
    Search {
        /// National ID (surrounding whitespace is ignored)
        id: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the patients in one stage
    Stage {
        /// Stage label (F0, F1, F2, F3 or F4)
        stage: String,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the distribution of patients across stages
    Distribution {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Patient registry management
    Patients {
        #[command(subcommand)]
        subcommand: PatientCommands,
    },
    /// Notes card management
    Notes {
        #[command(subcommand)]
        subcommand: NoteCommands,
    },
    /// Consultation management
    Consult {
        #[command(subcommand)]
        subcommand: ConsultCommands,
    },
}

#[derive(Subcommand)]
pub enum PatientCommands {
    /// Register a patient
    Add {
        /// National ID
        id: String,
        /// Full name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Stage label (F0..F4)
        #[arg(long)]
        stage: Option<String>,
    },
    /// Change a patient's stage
    SetStage {
        /// National ID
        id: String,
        /// Stage label (F0..F4)
        stage: String,
    },
    /// Remove a patient and their consultations
    Remove {
        /// National ID
        id: String,
    },
    /// Import patients from a JSON array of {id, name, stage}
    Import {
        /// Path to the JSON file
        file: std::path::PathBuf,
    },
    /// Load the built-in sample patients
    Seed,
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Add a note
    Add {
        /// Note text
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List notes
    List,
    /// Remove a note
    Remove {
        /// Note ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConsultCommands {
    /// Request a consultation for a patient
    Request {
        /// National ID
        patient_id: String,
    },
    /// Mark a consultation as completed
    Complete {
        /// Consultation ID
        id: String,
        /// Completion time (HH:MM, YYYY-MM-DDTHH:MM or "now")
        #[arg(long, default_value = "now")]
        at: String,
    },
    /// List consultations
    List,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Panel { json: false }) {
        Commands::Panel { json } => handle_panel(json),
        Commands::List { json } => handle_list(json),
        Commands::Search { id, json } => handle_search(&id, json),
        Commands::Stage { stage, json } => handle_stage(&stage, json),
        Commands::Distribution { json } => handle_distribution(json),
        Commands::Patients { subcommand } => handle_patients(subcommand),
        Commands::Notes { subcommand } => handle_notes(subcommand),
        Commands::Consult { subcommand } => handle_consult(subcommand),
    }
}

/// Load the configuration and open the registry it points to
fn open_registry() -> Result<(Config, Connection)> {
    let config = Config::load()?;
    let conn = DbConnection::connect_at(&config.data_location)?;
    Ok((config, conn))
}

fn chart_renderer(config: &Config) -> TerminalRenderer {
    let width = config.chart_width.unwrap_or_else(default_chart_width);
    TerminalRenderer::new(width, use_color(config.color))
}

fn print_view(output: &str) {
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

fn handle_panel(json: bool) -> Result<()> {
    let (config, conn) = open_registry()?;
    let patients = conn.patients()?;
    let panel = Panel::new(&patients);

    let notes = NoteRepo::list(&conn)?;
    let consultations = ConsultationRepo::summary(&conn)?;
    let summary = DashboardSummary::new(panel.patient_count(), panel.distribution(), &notes, consultations);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut renderer = chart_renderer(&config);
    panel.render_distribution(&mut renderer)?;
    let chart = renderer.into_output();

    print_view(&format_dashboard(&summary, &chart, use_color(config.color)));
    Ok(())
}

fn handle_list(json: bool) -> Result<()> {
    let (_config, conn) = open_registry()?;
    let patients = conn.patients()?;

    let mut navigator = CliNavigator::new(&conn, &patients, json);
    Panel::new(&patients).show_all(&mut navigator)?;
    print_view(&navigator.into_output());
    Ok(())
}

fn handle_search(query: &str, json: bool) -> Result<()> {
    let (_config, conn) = open_registry()?;
    let patients = conn.patients()?;

    let mut navigator = CliNavigator::new(&conn, &patients, json);
    match Panel::new(&patients).search(query, &mut navigator) {
        Ok(()) => {
            print_view(&navigator.into_output());
            Ok(())
        }
        Err(e @ PanelError::PatientNotFound { .. }) => user_error(&e.to_string()),
        Err(e) => Err(e.into()),
    }
}

fn handle_stage(stage: &str, json: bool) -> Result<()> {
    let label = validate_stage(stage).unwrap_or_else(|e| user_error(&e));
    let (_config, conn) = open_registry()?;
    let patients = conn.patients()?;

    let mut navigator = CliNavigator::new(&conn, &patients, json);
    Panel::new(&patients).select_stage(label, &mut navigator)?;
    print_view(&navigator.into_output());
    Ok(())
}

fn handle_distribution(json: bool) -> Result<()> {
    let (config, conn) = open_registry()?;
    let patients = conn.patients()?;
    let panel = Panel::new(&patients);

    if json {
        println!("{}", serde_json::to_string_pretty(&panel.distribution())?);
        return Ok(());
    }

    let mut renderer = chart_renderer(&config);
    panel.render_distribution(&mut renderer)?;
    print_view(&renderer.into_output());
    Ok(())
}

fn handle_patients(cmd: PatientCommands) -> Result<()> {
    let (_config, conn) = open_registry()?;

    match cmd {
        PatientCommands::Add { id, name, stage } => {
            let name = name.join(" ");
            if let Err(e) = validate_non_empty(&id, "Patient ID") {
                user_error(&e);
            }
            if let Err(e) = validate_non_empty(&name, "Patient name") {
                user_error(&e);
            }
            let stage = stage
                .map(|s| validate_stage(&s).unwrap_or_else(|e| user_error(&e)));

            if PatientRepo::get_by_id(&conn, &id)?.is_some() {
                user_error(&format!("Patient '{}' is already registered", id));
            }
            let patient = PatientRecord::new(id, name, stage.map(|s| s.as_str()));
            PatientRepo::create(&conn, &patient)?;
            println!("Registered patient {} ({})", patient.id, patient.name);
        }
        PatientCommands::SetStage { id, stage } => {
            let label = validate_stage(&stage).unwrap_or_else(|e| user_error(&e));
            if PatientRepo::get_by_id(&conn, &id)?.is_none() {
                user_error(&format!("Patient '{}' not found", id));
            }
            PatientRepo::set_stage(&conn, &id, label)?;
            println!("Patient {} is now in stage {}", id, label);
        }
        PatientCommands::Remove { id } => {
            if PatientRepo::get_by_id(&conn, &id)?.is_none() {
                user_error(&format!("Patient '{}' not found", id));
            }
            PatientRepo::delete(&conn, &id)?;
            println!("Removed patient {}", id);
        }
        PatientCommands::Import { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read import file: {}", file.display()))?;
            let records: Vec<PatientRecord> = match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => user_error(&format!("Invalid import file {}: {}", file.display(), e)),
            };
            let mut seen = HashSet::new();
            for record in &records {
                if let Err(e) = validate_non_empty(&record.id, "Patient ID") {
                    user_error(&e);
                }
                if !seen.insert(record.id.as_str()) {
                    user_error(&format!("Duplicate patient ID '{}' in import file", record.id));
                }
            }
            let (inserted, updated) = PatientRepo::upsert_all(&conn, &records)?;
            println!("Imported {} patients ({} new, {} updated)", inserted + updated, inserted, updated);
        }
        PatientCommands::Seed => {
            let (inserted, updated) = PatientRepo::upsert_all(&conn, &sample_patients())?;
            println!("Loaded sample patients ({} new, {} updated)", inserted, updated);
        }
    }
    Ok(())
}

fn handle_notes(cmd: NoteCommands) -> Result<()> {
    let (_config, conn) = open_registry()?;

    match cmd {
        NoteCommands::Add { text } => {
            let text = text.join(" ");
            if let Err(e) = validate_non_empty(&text, "Note") {
                user_error(&e);
            }
            let note = NoteRepo::create(&conn, &text)?;
            println!("Added note {}", note.id);
        }
        NoteCommands::List => {
            print_view(&format_note_list(&NoteRepo::list(&conn)?));
        }
        NoteCommands::Remove { id } => {
            let id = validate_record_id(&id, "Note").unwrap_or_else(|e| user_error(&e));
            if NoteRepo::get_by_id(&conn, id)?.is_none() {
                user_error(&format!("Note {} not found", id));
            }
            NoteRepo::delete(&conn, id)?;
            println!("Removed note {}", id);
        }
    }
    Ok(())
}

fn handle_consult(cmd: ConsultCommands) -> Result<()> {
    let (_config, conn) = open_registry()?;

    match cmd {
        ConsultCommands::Request { patient_id } => {
            if PatientRepo::get_by_id(&conn, &patient_id)?.is_none() {
                user_error(&format!("Patient '{}' not found", patient_id));
            }
            let consultation = ConsultationRepo::request(&conn, &patient_id)?;
            println!("Requested consultation {} for patient {}", consultation.id, patient_id);
        }
        ConsultCommands::Complete { id, at } => {
            let id = validate_record_id(&id, "Consultation").unwrap_or_else(|e| user_error(&e));
            let completed_ts = parse_time_expr(&at).unwrap_or_else(|e| user_error(&e.to_string()));
            match ConsultationRepo::get_by_id(&conn, id)? {
                None => user_error(&format!("Consultation {} not found", id)),
                Some(c) if !c.is_pending() => {
                    user_error(&format!("Consultation {} is already completed", id))
                }
                Some(_) => ConsultationRepo::complete(&conn, id, completed_ts)?,
            }
            println!("Completed consultation {} at {}", id, format_timestamp(completed_ts));
        }
        ConsultCommands::List => {
            print_view(&format_consultation_list(&ConsultationRepo::list_all(&conn)?));
        }
    }
    Ok(())
}
