//! Letter-grade bands and GPA points.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single letter band. Both ends of `[min, max]` are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeScaleEntry {
    pub letter: String,
    pub min: f64,
    pub max: f64,
    pub points: f64,
}

impl GradeScaleEntry {
    fn new(letter: &str, min: f64, max: f64, points: f64) -> Self {
        GradeScaleEntry {
            letter: letter.to_string(),
            min,
            max,
            points,
        }
    }

    pub fn contains(&self, percentage: f64) -> bool {
        percentage >= self.min && percentage <= self.max
    }
}

/// Ordered table of letter bands.
///
/// | Range    | Letter | Points |
/// |----------|--------|--------|
/// | 90 – 100 | A+     | 4.0    |
/// | 85 – 89  | A      | 4.0    |
/// | 80 – 84  | A-     | 3.7    |
/// | 77 – 79  | B+     | 3.3    |
/// | 73 – 76  | B      | 3.0    |
/// | 70 – 72  | B-     | 2.7    |
/// | 67 – 69  | C+     | 2.3    |
/// | 63 – 66  | C      | 2.0    |
/// | 60 – 62  | C-     | 1.7    |
/// | 50 – 59  | D      | 1.0    |
/// | 0 – 49   | F      | 0.0    |
///
/// Lookup takes the first band containing the percentage. Values that fall
/// between bands (84.5, 59.5, ...) or outside every band resolve to the
/// lowest band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradeScale {
    entries: Vec<GradeScaleEntry>,
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::standard()
    }
}

impl GradeScale {
    pub fn standard() -> Self {
        GradeScale {
            entries: vec![
                GradeScaleEntry::new("A+", 90.0, 100.0, 4.0),
                GradeScaleEntry::new("A", 85.0, 89.0, 4.0),
                GradeScaleEntry::new("A-", 80.0, 84.0, 3.7),
                GradeScaleEntry::new("B+", 77.0, 79.0, 3.3),
                GradeScaleEntry::new("B", 73.0, 76.0, 3.0),
                GradeScaleEntry::new("B-", 70.0, 72.0, 2.7),
                GradeScaleEntry::new("C+", 67.0, 69.0, 2.3),
                GradeScaleEntry::new("C", 63.0, 66.0, 2.0),
                GradeScaleEntry::new("C-", 60.0, 62.0, 1.7),
                GradeScaleEntry::new("D", 50.0, 59.0, 1.0),
                GradeScaleEntry::new("F", 0.0, 49.0, 0.0),
            ],
        }
    }

    /// Builds a scale from ordered entries. At least one band is required.
    pub fn from_entries(entries: Vec<GradeScaleEntry>) -> Result<Self> {
        if entries.is_empty() {
            bail!("grade scale must contain at least one band");
        }
        Ok(GradeScale { entries })
    }

    /// Loads an ordered JSON array of [`GradeScaleEntry`] from `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grade scale '{path}'"))?;
        let entries: Vec<GradeScaleEntry> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse grade scale '{path}'"))?;
        debug!(path, bands = entries.len(), "Loaded grade scale");
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[GradeScaleEntry] {
        &self.entries
    }

    /// The band with the smallest `min`, used when nothing matches.
    fn fallback(&self) -> &GradeScaleEntry {
        self.entries
            .iter()
            .min_by(|a, b| a.min.total_cmp(&b.min))
            .unwrap_or(&self.entries[0])
    }

    pub fn entry_for(&self, percentage: f64) -> &GradeScaleEntry {
        self.entries
            .iter()
            .find(|e| e.contains(percentage))
            .unwrap_or_else(|| self.fallback())
    }

    pub fn letter_for(&self, percentage: f64) -> &str {
        &self.entry_for(percentage).letter
    }

    pub fn points_for(&self, percentage: f64) -> f64 {
        self.entry_for(percentage).points
    }
}
