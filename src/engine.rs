//! Grade calculations over a caller-owned list of components.
//!
//! Every operation is a pure function of its inputs and recomputes from the
//! full list. Missing or non-numeric scores never fail a calculation: they
//! count as "not completed" (or as 0 for [`GradeEngine::final_grade`]), and a
//! zero total weight yields the [`GradeSummary::not_available`] sentinel.

use serde::Serialize;
use tracing::debug;

use crate::component::GradeComponent;
use crate::scale::GradeScale;
use crate::utility::{round2, weighted};

/// Letter reported when there is nothing to grade yet.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of recommendations a study plan holds at most.
pub const STUDY_PLAN_LEN: usize = 3;

/// A percentage and its letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub percentage: f64,
    pub letter: String,
}

impl GradeSummary {
    /// `{0, "N/A"}`, distinct from a real 0% grade.
    pub fn not_available() -> Self {
        GradeSummary {
            percentage: 0.0,
            letter: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.letter != NOT_AVAILABLE
    }
}

/// Score needed uniformly across the remaining components to reach a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredGrade {
    /// Floored at 0 but never capped, so an impossible target reports e.g. 120.
    pub required_grade: f64,
    pub remaining_weight: f64,
    pub is_achievable: bool,
    /// Weighted average over completed components only.
    pub current_grade: f64,
}

/// An incomplete component picked for study, with its ranking data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyRecommendation {
    #[serde(flatten)]
    pub component: GradeComponent,
    pub is_completed: bool,
    pub priority: f64,
    pub current_score: f64,
    /// The component's own target, or the overall target when none is set.
    pub aim_for: f64,
}

#[derive(Default)]
struct Partition {
    completed_weight: f64,
    completed_score: f64,
    remaining_weight: f64,
}

impl Partition {
    fn of(components: &[GradeComponent]) -> Self {
        let mut p = Partition::default();
        for c in components {
            match c.completed_score() {
                Some(score) => {
                    p.completed_score += weighted(score, c.weight);
                    p.completed_weight += c.weight;
                }
                None => p.remaining_weight += c.weight,
            }
        }
        p
    }

    /// Completed-only average, 0 when nothing has been completed.
    fn current(&self) -> f64 {
        if self.completed_weight == 0.0 {
            0.0
        } else {
            self.completed_score / self.completed_weight * 100.0
        }
    }
}

/// Stateless calculator bound to a [`GradeScale`].
#[derive(Debug, Clone, Default)]
pub struct GradeEngine {
    scale: GradeScale,
}

impl GradeEngine {
    pub fn new(scale: GradeScale) -> Self {
        GradeEngine { scale }
    }

    pub fn scale(&self) -> &GradeScale {
        &self.scale
    }

    fn summarize(&self, percentage: f64) -> GradeSummary {
        GradeSummary {
            percentage: round2(percentage),
            letter: self.scale.letter_for(percentage).to_string(),
        }
    }

    /// Weighted grade over completed components, re-normalized against the
    /// completed weight. A single 20%-weight quiz scored 100 reports 100, not 20.
    pub fn current_grade(&self, components: &[GradeComponent]) -> GradeSummary {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut has_scores = false;

        for c in components {
            if let Some(score) = c.completed_score() {
                weighted_sum += weighted(score, c.weight);
                total_weight += c.weight;
                has_scores = true;
            }
        }

        if !has_scores || total_weight == 0.0 {
            return GradeSummary::not_available();
        }

        self.summarize(weighted_sum / total_weight * 100.0)
    }

    /// Solves `completed_score + x * remaining_weight / 100 == target` for `x`.
    ///
    /// `is_achievable` is judged on the unclamped `x`, so a negative
    /// requirement (target already secured) is still achievable.
    pub fn required_grade(&self, target_grade: f64, components: &[GradeComponent]) -> RequiredGrade {
        let p = Partition::of(components);
        let current = p.current();

        if p.remaining_weight == 0.0 {
            return RequiredGrade {
                required_grade: 0.0,
                remaining_weight: 0.0,
                is_achievable: current >= target_grade,
                current_grade: round2(current),
            };
        }

        let required = (target_grade - p.completed_score) / (p.remaining_weight / 100.0);
        debug!(
            target_grade,
            completed_score = p.completed_score,
            remaining_weight = p.remaining_weight,
            required,
            "Solved required grade"
        );

        RequiredGrade {
            required_grade: round2(required.max(0.0)),
            remaining_weight: p.remaining_weight,
            is_achievable: required <= 100.0,
            current_grade: round2(current),
        }
    }

    /// Ranks incomplete components by `weight * difficulty`, boosted by
    /// `1 + gap / 20` when the current score (0 if absent) is below a
    /// positive target.
    /// Returns at most [`STUDY_PLAN_LEN`] items; ties keep input order.
    pub fn study_plan(
        &self,
        components: &[GradeComponent],
        target_grade: f64,
    ) -> Vec<StudyRecommendation> {
        let mut plan: Vec<StudyRecommendation> = components
            .iter()
            .filter(|c| !c.is_completed())
            .map(|c| {
                // Reported as 0 either way, but a non-numeric score never
                // compares below the target, so only an absent one is boosted.
                let current_score = 0.0;
                let mut priority = c.weight * f64::from(c.effective_difficulty());
                if c.score.is_none() && target_grade > 0.0 && current_score < target_grade {
                    let gap = target_grade - current_score;
                    priority *= 1.0 + gap / 20.0;
                }

                StudyRecommendation {
                    component: c.clone(),
                    is_completed: false,
                    priority,
                    current_score,
                    aim_for: c.target.filter(|t| *t > 0.0).unwrap_or(target_grade),
                }
            })
            .collect();

        plan.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        plan.truncate(STUDY_PLAN_LEN);
        plan
    }

    /// Grade if nothing else changes: every component counts at full weight
    /// and missing scores count as 0.
    pub fn final_grade(&self, components: &[GradeComponent]) -> GradeSummary {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for c in components {
            weighted_sum += weighted(c.completed_score().unwrap_or(0.0), c.weight);
            total_weight += c.weight;
        }

        if components.is_empty() || total_weight == 0.0 {
            return GradeSummary::not_available();
        }

        self.summarize(weighted_sum / (total_weight / 100.0))
    }
}
