//! Output formatting and persistence for grade reports.
//!
//! Supports a human-readable summary, pretty-printing, JSON serialization,
//! and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::worksheet::{Report, Standing};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One flat CSV row summarizing a [`Report`].
#[derive(Debug, Serialize)]
pub struct ReportRecord {
    pub timestamp: DateTime<Utc>,
    pub course: String,
    pub professor: String,
    pub target_grade: f64,
    pub current_percentage: Option<f64>,
    pub current_letter: String,
    pub required_grade: f64,
    pub remaining_weight: f64,
    pub is_achievable: bool,
    pub top_priority: Option<String>,
}

impl From<&Report> for ReportRecord {
    fn from(report: &Report) -> Self {
        ReportRecord {
            timestamp: report.generated_at,
            course: report.course.clone(),
            professor: report.professor.clone(),
            target_grade: report.target_grade,
            current_percentage: report
                .current
                .is_available()
                .then_some(report.current.percentage),
            current_letter: report.current.letter.clone(),
            required_grade: report.required.required_grade,
            remaining_weight: report.required.remaining_weight,
            is_achievable: report.required.is_achievable,
            top_priority: report.plan.first().map(|r| r.component.name.clone()),
        }
    }
}

/// `★` per difficulty point, padded with `☆` to five.
pub fn difficulty_stars(difficulty: u8) -> String {
    let filled = usize::from(difficulty.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn standing_label(standing: Standing) -> &'static str {
    match standing {
        Standing::OnTrack => "on track",
        Standing::Borderline => "borderline",
        Standing::AtRisk => "at risk",
    }
}

/// Renders a report the way the interactive calculator presents it.
pub fn render_report(report: &Report) -> String {
    let mut out = format!("{} ({})\n", report.course, report.professor);

    if report.current.is_available() {
        let standing = report.standing.map(standing_label).unwrap_or_default();
        out.push_str(&format!(
            "Current grade: {}% ({}) [{}]\n",
            report.current.percentage, report.current.letter, standing
        ));
    } else {
        out.push_str("Current grade: enter your scores to see current grade\n");
    }

    out.push_str(&format!(
        "Target grade:  {}% ({})\n",
        report.target_grade, report.target_letter
    ));

    let required = &report.required;
    if required.remaining_weight > 0.0 {
        out.push_str(&format!(
            "Needed on remaining {}%: {}% ({})",
            required.remaining_weight, required.required_grade, report.required_letter
        ));
        if !required.is_achievable {
            out.push_str(" (Not achievable)");
        }
        out.push('\n');
    } else {
        out.push_str("Needed: all components completed\n");
    }

    out.push_str("Study plan:\n");
    if report.plan.is_empty() {
        out.push_str("  All components completed! Great job!\n");
    }
    for (rank, item) in report.plan.iter().enumerate() {
        let c = &item.component;
        out.push_str(&format!(
            "  {}. {} - {}% of grade, difficulty {}\n",
            rank + 1,
            c.name,
            c.weight,
            difficulty_stars(c.difficulty)
        ));
        if item.current_score > 0.0 {
            out.push_str(&format!(
                "     Current: {}% (aim for: {}%)\n",
                item.current_score, item.aim_for
            ));
        } else {
            out.push_str(&format!("     Not yet started, target: {}%\n", item.aim_for));
        }
    }

    out
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Prints a report to stdout as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Appends a [`ReportRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &ReportRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
