// Stage distribution: per-stage counts and shares over a patient collection

use crate::models::{PatientRecord, StageBucket, StageLabel};

/// Count patients per stage and annotate each non-empty stage with its share.
///
/// Labels are visited in the order given; stages nobody is in are dropped.
/// Stage values outside `labels` are ignored. Percentages are taken over the
/// retained total and rounded to one decimal. Never fails: an empty or
/// unstaged collection yields an empty vector.
pub fn stage_distribution(patients: &[PatientRecord], labels: &[StageLabel]) -> Vec<StageBucket> {
    let counts: Vec<(StageLabel, usize)> = labels
        .iter()
        .map(|&label| (label, patients.iter().filter(|p| p.has_stage(label)).count()))
        .filter(|&(_, count)| count > 0)
        .collect();

    let total: usize = counts.iter().map(|&(_, count)| count).sum();
    log::debug!("stage distribution: {} staged of {} patients", total, patients.len());

    counts
        .into_iter()
        .map(|(label, count)| StageBucket {
            label,
            count,
            percentage: percentage_of(count, total),
        })
        .collect()
}

/// Distribution over all five stages
pub fn distribution(patients: &[PatientRecord]) -> Vec<StageBucket> {
    stage_distribution(patients, &StageLabel::ALL)
}

/// `count / total * 100`, one decimal, half away from zero. Zero when total is zero.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = (count as f64 * 100.0) / total as f64;
    (raw * 10.0).round() / 10.0
}
