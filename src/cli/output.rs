// Output formatting utilities

use crate::config::{ColorMode, MAX_CHART_WIDTH};
use crate::models::{Consultation, Note, PatientRecord, StageBucket};
use crate::panel::Renderer;
use crate::repo::ConsultationSummary;
use anyhow::Result;
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";

// Chart palette, assigned by position among the shown stages
const CHART_PALETTE: &[&str] = &[
    ANSI_FG_BLUE,
    ANSI_FG_GREEN,
    ANSI_FG_YELLOW,
    ANSI_FG_RED,
    ANSI_FG_MAGENTA,
];

const BAR_CELL: &str = "█";
const LEGEND_MARKER: &str = "■";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Whether the terminal understands ANSI escapes (always true off Windows)
pub fn ansi_supported() -> bool {
    enable_ansi_support::enable_ansi_support().is_ok()
}

/// Resolve the configured color mode against the current terminal
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty() && ansi_supported(),
    }
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    80
}

/// Bar width when none is configured: the terminal minus a margin, within 10..=60 cells
pub fn default_chart_width() -> usize {
    get_terminal_width().saturating_sub(4).clamp(10, 60)
}

fn bold(text: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn paint(text: &str, fg: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", fg, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Format timestamp for display
pub fn format_timestamp(ts: i64) -> String {
    Local.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Format the local clock time of a timestamp (HH:MM)
pub fn format_clock_time(ts: i64) -> String {
    Local.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Split `width` cells among the buckets proportionally to their counts.
///
/// Largest-remainder apportionment, so the widths always add up to `width`.
/// Every bucket gets at least one cell while there are cells to spare.
pub fn segment_widths(buckets: &[StageBucket], width: usize) -> Vec<usize> {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    if total == 0 || width == 0 {
        return vec![0; buckets.len()];
    }

    let mut widths: Vec<usize> = buckets.iter().map(|b| b.count * width / total).collect();
    let mut remainders: Vec<(usize, usize)> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.count * width % total, i))
        .collect();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let assigned: usize = widths.iter().sum();
    for &(_, i) in remainders.iter().take(width - assigned) {
        widths[i] += 1;
    }

    for i in 0..widths.len() {
        if widths[i] > 0 {
            continue;
        }
        let donor = (0..widths.len())
            .filter(|&j| widths[j] > 1)
            .max_by_key(|&j| (widths[j], std::cmp::Reverse(j)));
        if let Some(j) = donor {
            widths[j] -= 1;
            widths[i] += 1;
        }
    }

    widths
}

/// Format the stage distribution as a stacked bar followed by a legend
pub fn format_distribution(buckets: &[StageBucket], width: usize, color: bool) -> String {
    if buckets.is_empty() {
        return "No stage data.\n".to_string();
    }

    let mut output = String::new();
    let widths = segment_widths(buckets, width);

    for (idx, (bucket, cells)) in buckets.iter().zip(&widths).enumerate() {
        let segment = if color {
            paint(&BAR_CELL.repeat(*cells), CHART_PALETTE[idx % CHART_PALETTE.len()], true)
        } else {
            // Stage digit as fill so segments stay distinguishable without color
            bucket.label.as_str()[1..].repeat(*cells)
        };
        output.push_str(&segment);
    }
    output.push('\n');

    for (idx, bucket) in buckets.iter().enumerate() {
        let marker = paint(LEGEND_MARKER, CHART_PALETTE[idx % CHART_PALETTE.len()], color);
        output.push_str(&format!(
            "  {} {}: {} patient{} ({:.1}%)\n",
            marker,
            bucket.label,
            bucket.count,
            plural(bucket.count),
            bucket.percentage
        ));
    }

    output
}

/// Terminal rendering collaborator: accumulates the chart for later printing
pub struct TerminalRenderer {
    width: usize,
    color: bool,
    output: String,
}

impl TerminalRenderer {
    pub fn new(width: usize, color: bool) -> Self {
        Self { width: width.min(MAX_CHART_WIDTH), color, output: String::new() }
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, buckets: &[StageBucket]) -> Result<()> {
        self.output.push_str(&format_distribution(buckets, self.width, self.color));
        Ok(())
    }
}

/// Format the patient list as a table
pub fn format_patient_list(patients: &[PatientRecord]) -> String {
    if patients.is_empty() {
        return "No patients registered.\n".to_string();
    }

    let id_width = patients.iter().map(|p| p.id.chars().count()).max().unwrap_or(0).max(2);
    let name_width = patients.iter().map(|p| p.name.chars().count()).max().unwrap_or(0).max(4);

    let mut output = String::new();
    output.push_str(&format!("{:<id_width$}  {:<name_width$}  Stage\n", "ID", "Name"));
    output.push_str(&format!("{}  {}  {}\n", "-".repeat(id_width), "-".repeat(name_width), "-----"));
    for p in patients {
        output.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            p.id,
            p.name,
            p.stage.as_deref().unwrap_or("-")
        ));
    }
    output.push_str(&format!("\n{} patient{}\n", patients.len(), plural(patients.len())));
    output
}

/// Format a patient's history view
pub fn format_patient_history(
    id: &str,
    name: &str,
    stage: Option<&str>,
    consultations: &[Consultation],
) -> String {
    let mut output = String::new();
    output.push_str(&format!("=== Patient History: {} ===\n", name));
    output.push_str(&format!("ID:    {}\n", id));
    output.push_str(&format!("Stage: {}\n", stage.unwrap_or("-")));
    output.push('\n');

    output.push_str("Consultations:\n");
    if consultations.is_empty() {
        output.push_str("  none\n");
    }
    for c in consultations {
        let state = match c.completed_ts {
            Some(ts) => format!("completed {}", format_timestamp(ts)),
            None => "pending".to_string(),
        };
        output.push_str(&format!(
            "  [{}] requested {}, {}\n",
            c.id,
            format_timestamp(c.requested_ts),
            state
        ));
    }
    output
}

/// Format the stage detail view
pub fn format_stage_detail(stage: &str, patients: &[&PatientRecord]) -> String {
    let mut output = String::new();
    output.push_str(&format!("=== Stage {} ===\n", stage));
    if patients.is_empty() {
        output.push_str("No patients in this stage.\n");
        return output;
    }
    for p in patients {
        output.push_str(&format!("  {}  {}\n", p.id, p.name));
    }
    output.push_str(&format!("\n{} patient{}\n", patients.len(), plural(patients.len())));
    output
}

pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes.\n".to_string();
    }
    notes
        .iter()
        .map(|n| format!("[{}] {}  ({})\n", n.id, n.text, format_timestamp(n.created_ts)))
        .collect()
}

pub fn format_consultation_list(consultations: &[Consultation]) -> String {
    if consultations.is_empty() {
        return "No consultations.\n".to_string();
    }
    let mut output = String::new();
    for c in consultations {
        let state = match c.completed_ts {
            Some(ts) => format!("completed {}", format_timestamp(ts)),
            None => "pending".to_string(),
        };
        output.push_str(&format!(
            "[{}] patient {}  requested {}  {}\n",
            c.id,
            c.patient_id,
            format_timestamp(c.requested_ts),
            state
        ));
    }
    output
}

/// Everything the dashboard shows, as data
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub patient_count: usize,
    pub distribution: Vec<StageBucket>,
    pub notes: Vec<String>,
    pub pending_consultations: usize,
    /// Local HH:MM of the last completed consultation
    pub last_consultation: Option<String>,
}

impl DashboardSummary {
    pub fn new(
        patient_count: usize,
        distribution: Vec<StageBucket>,
        notes: &[Note],
        consultations: ConsultationSummary,
    ) -> Self {
        Self {
            patient_count,
            distribution,
            notes: notes.iter().map(|n| n.text.clone()).collect(),
            pending_consultations: consultations.pending,
            last_consultation: consultations.last_completed_ts.map(format_clock_time),
        }
    }
}

/// Format the full dashboard. `chart` is the rendered distribution.
pub fn format_dashboard(summary: &DashboardSummary, chart: &str, color: bool) -> String {
    let mut output = String::new();

    output.push_str(&bold("=== Doctor Panel ===", color));
    output.push_str("\n\n");

    output.push_str("=== Registered Patients ===\n");
    output.push_str(&format!(
        "{} registered patient{}\n",
        summary.patient_count,
        plural(summary.patient_count)
    ));
    output.push_str("  all patients:  dpanel list\n");
    output.push_str("  search by ID:  dpanel search <ID>\n");
    output.push('\n');

    output.push_str("=== Distribution by Stage ===\n");
    output.push_str(chart);
    if !summary.distribution.is_empty() {
        output.push_str("  stage detail:  dpanel stage <F0..F4>\n");
    }
    output.push('\n');

    output.push_str("=== Notes ===\n");
    if summary.notes.is_empty() {
        output.push_str("No notes.\n");
    }
    for note in &summary.notes {
        output.push_str(&format!("- {}\n", note));
    }
    output.push('\n');

    output.push_str("=== Consultation ===\n");
    output.push_str(&format!("- Pending consultations: {}\n", summary.pending_consultations));
    output.push_str(&format!(
        "- Last consultation: {}\n",
        summary.last_consultation.as_deref().unwrap_or("none")
    ));

    output
}
