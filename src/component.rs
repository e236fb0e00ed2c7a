//! The gradable unit of a course and the rules for filling it in.

use serde::{Deserialize, Serialize};

/// Lowest and highest score a component may hold once stored.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

pub(crate) fn default_difficulty() -> u8 {
    1
}

/// One gradable unit of a course (exam, assignment, ...).
///
/// `score` is `None` until the student enters an achieved score. A stored
/// non-finite score is treated as non-numeric, i.e. not completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeComponent {
    pub name: String,
    /// Percentage points this component contributes to the course total.
    pub weight: f64,
    /// Study effort from 1 (easy) to 5 (hard).
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub target: Option<f64>,
}

impl GradeComponent {
    pub fn new(name: &str, weight: f64, difficulty: u8) -> Self {
        GradeComponent {
            name: name.to_string(),
            weight,
            difficulty,
            score: None,
            target: None,
        }
    }

    /// Sets the achieved score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the per-component aspirational score
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// The achieved score, if one is present and numeric.
    pub fn completed_score(&self) -> Option<f64> {
        self.score.filter(|s| s.is_finite())
    }

    pub fn is_completed(&self) -> bool {
        self.completed_score().is_some()
    }

    /// Difficulty used for prioritising; a missing (zero) difficulty counts as 1.
    pub fn effective_difficulty(&self) -> u8 {
        self.difficulty.max(1)
    }
}

/// Clamps a raw user value into `[0, 100]`.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}
