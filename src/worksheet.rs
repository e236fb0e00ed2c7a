//! A student's in-progress worksheet for one course.
//!
//! The worksheet owns the mutable component list and applies the input rules
//! of an interactive front end: values are clamped to `[0, 100]`, blank input
//! clears a field, and unparseable input leaves it untouched. Every
//! [`Worksheet::evaluate`] recomputes from the full list.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, Professor};
use crate::component::{GradeComponent, clamp_score};
use crate::engine::{GradeEngine, GradeSummary, RequiredGrade, StudyRecommendation};
use crate::parser::parse_percentage;

/// Default overall target: the floor of an A.
pub const DEFAULT_TARGET: f64 = 85.0;

/// Display classification of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    OnTrack,
    Borderline,
    AtRisk,
}

impl Standing {
    pub fn of(percentage: f64) -> Self {
        match percentage {
            p if p >= 85.0 => Standing::OnTrack,
            p if p >= 70.0 => Standing::Borderline,
            _ => Standing::AtRisk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Score,
    Target,
}

#[derive(Debug, Clone)]
pub struct Worksheet {
    course: String,
    professor: String,
    components: Vec<GradeComponent>,
    target_grade: f64,
}

impl Worksheet {
    pub fn new(course: &str, professor: &str, components: Vec<GradeComponent>) -> Self {
        Worksheet {
            course: course.to_string(),
            professor: professor.to_string(),
            components,
            target_grade: DEFAULT_TARGET,
        }
    }

    pub fn from_professor(course: &str, professor: &Professor) -> Self {
        Self::new(course, &professor.name, professor.components())
    }

    /// Opens a worksheet for `course_id`. Without a professor id the course's
    /// only professor is selected; courses with several require one.
    pub fn open(catalog: &Catalog, course_id: &str, professor_id: Option<&str>) -> Result<Self> {
        let course = catalog
            .course(course_id)
            .with_context(|| format!("unknown course '{course_id}'"))?;

        let professor = match professor_id {
            Some(id) => course
                .professor(id)
                .with_context(|| format!("unknown professor '{id}' for course '{course_id}'"))?,
            None => course.sole_professor().with_context(|| {
                let ids: Vec<_> = course.professors.iter().map(|p| p.id.as_str()).collect();
                format!(
                    "course '{course_id}' has several professors, pick one of: {}",
                    ids.join(", ")
                )
            })?,
        };

        debug!(course_id, professor = %professor.id, "Opened worksheet");
        Ok(Self::from_professor(&course.name, professor))
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn professor(&self) -> &str {
        &self.professor
    }

    pub fn components(&self) -> &[GradeComponent] {
        &self.components
    }

    pub fn target_grade(&self) -> f64 {
        self.target_grade
    }

    /// Sets the overall target, clamped to `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite target.
    pub fn set_target_grade(&mut self, target: f64) -> Result<()> {
        if !target.is_finite() {
            bail!("target grade must be a number, got {target}");
        }
        self.target_grade = clamp_score(target);
        Ok(())
    }

    /// Index of the component named `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.find(name).with_context(|| {
            let names: Vec<_> = self.components.iter().map(|c| c.name.as_str()).collect();
            format!("no component named '{name}', expected one of: {}", names.join(", "))
        })
    }

    fn apply(&mut self, index: usize, field: Field, raw: &str) -> Result<Option<f64>> {
        let len = self.components.len();
        let component = self
            .components
            .get_mut(index)
            .with_context(|| format!("component index {index} out of range (len {len})"))?;

        let slot = match field {
            Field::Score => &mut component.score,
            Field::Target => &mut component.target,
        };

        if raw.trim().is_empty() {
            *slot = None;
        } else if let Some(value) = parse_percentage(raw) {
            *slot = Some(clamp_score(value));
        } else {
            warn!(component = %component.name, ?field, raw, "Ignoring non-numeric input");
        }

        Ok(*slot)
    }

    /// Stores the achieved score for component `index` and returns what was stored.
    pub fn set_score(&mut self, index: usize, raw: &str) -> Result<Option<f64>> {
        self.apply(index, Field::Score, raw)
    }

    /// Stores the per-component target for component `index`.
    pub fn set_target(&mut self, index: usize, raw: &str) -> Result<Option<f64>> {
        self.apply(index, Field::Target, raw)
    }

    pub fn set_score_by_name(&mut self, name: &str, raw: &str) -> Result<Option<f64>> {
        let index = self.index_of(name)?;
        self.set_score(index, raw)
    }

    pub fn set_target_by_name(&mut self, name: &str, raw: &str) -> Result<Option<f64>> {
        let index = self.index_of(name)?;
        self.set_target(index, raw)
    }

    /// Runs the current-grade, required-grade and study-plan calculations.
    pub fn evaluate(&self, engine: &GradeEngine) -> Report {
        let current = engine.current_grade(&self.components);
        let required = engine.required_grade(self.target_grade, &self.components);
        let plan = engine.study_plan(&self.components, self.target_grade);
        let standing = current.is_available().then(|| Standing::of(current.percentage));

        Report {
            generated_at: Utc::now(),
            course: self.course.clone(),
            professor: self.professor.clone(),
            target_grade: self.target_grade,
            target_letter: engine.scale().letter_for(self.target_grade).to_string(),
            required_letter: engine.scale().letter_for(required.required_grade).to_string(),
            current,
            required,
            plan,
            standing,
        }
    }
}

/// Everything a front end displays after one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub course: String,
    pub professor: String,
    pub target_grade: f64,
    pub target_letter: String,
    /// Letter of the score needed on the remaining components.
    pub required_letter: String,
    pub current: GradeSummary,
    pub required: RequiredGrade,
    pub plan: Vec<StudyRecommendation>,
    /// `None` while no score has been entered.
    pub standing: Option<Standing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smith() -> Worksheet {
        Worksheet::open(&Catalog::builtin(), "cs101", Some("smith")).unwrap()
    }

    #[test]
    fn test_open_with_sole_professor() {
        let ws = Worksheet::open(&Catalog::builtin(), "math201", None).unwrap();
        assert_eq!(ws.professor(), "Dr. Brown");
        assert_eq!(ws.course(), "MATH 201 - Linear Algebra");
        assert_eq!(ws.components().len(), 5);
        assert_eq!(ws.target_grade(), DEFAULT_TARGET);
    }

    #[test]
    fn test_open_requires_professor_when_ambiguous() {
        let err = Worksheet::open(&Catalog::builtin(), "cs101", None).unwrap_err();
        assert!(err.to_string().contains("smith, johnson"));
    }

    #[test]
    fn test_open_unknown_course_and_professor() {
        let catalog = Catalog::builtin();
        assert!(Worksheet::open(&catalog, "art100", None).is_err());
        assert!(Worksheet::open(&catalog, "cs101", Some("nobody")).is_err());
    }

    #[test]
    fn test_set_score_clamps() {
        let mut ws = smith();
        assert_eq!(ws.set_score(0, "120").unwrap(), Some(100.0));
        assert_eq!(ws.set_score(1, "-5").unwrap(), Some(0.0));
        assert_eq!(ws.set_score(2, " 77.25 ").unwrap(), Some(77.25));
        assert_eq!(ws.components()[2].score, Some(77.25));
    }

    #[test]
    fn test_blank_clears_and_garbage_is_ignored() {
        let mut ws = smith();
        ws.set_score(0, "90").unwrap();
        assert_eq!(ws.set_score(0, "abc").unwrap(), Some(90.0));
        assert_eq!(ws.set_score(0, "  ").unwrap(), None);
        assert_eq!(ws.components()[0].score, None);

        assert_eq!(ws.set_target(1, "95").unwrap(), Some(95.0));
        assert_eq!(ws.set_target(1, "").unwrap(), None);
    }

    #[test]
    fn test_set_score_out_of_range_index() {
        let mut ws = smith();
        assert!(ws.set_score(10, "50").is_err());
    }

    #[test]
    fn test_set_by_name_ignores_case() {
        let mut ws = smith();
        ws.set_score_by_name("midterm exam", "88").unwrap();
        assert_eq!(ws.components()[1].score, Some(88.0));
        assert!(ws.set_score_by_name("Lab", "50").is_err());
    }

    #[test]
    fn test_set_target_grade_clamps() {
        let mut ws = smith();
        ws.set_target_grade(150.0).unwrap();
        assert_eq!(ws.target_grade(), 100.0);
    }

    #[test]
    fn test_set_target_grade_rejects_nan() {
        let mut ws = smith();
        assert!(ws.set_target_grade(f64::NAN).is_err());
        assert!(ws.set_target_grade(f64::INFINITY).is_err());
        assert_eq!(ws.target_grade(), DEFAULT_TARGET);
    }

    #[test]
    fn test_evaluate_fresh_worksheet() {
        let ws = smith();
        let report = ws.evaluate(&GradeEngine::default());
        assert!(!report.current.is_available());
        assert_eq!(report.standing, None);
        assert_eq!(report.required.required_grade, 85.0);
        assert_eq!(report.required.remaining_weight, 100.0);
        assert_eq!(report.plan.len(), 3);
        assert_eq!(report.target_letter, "A");
    }

    #[test]
    fn test_evaluate_partial_worksheet() {
        let mut ws = smith();
        ws.set_score_by_name("Assignments", "90").unwrap();
        ws.set_score_by_name("Midterm Exam", "70").unwrap();
        let report = ws.evaluate(&GradeEngine::default());

        // (18 + 21) / 50
        assert_eq!(report.current.percentage, 78.0);
        assert_eq!(report.current.letter, "B+");
        assert_eq!(report.standing, Some(Standing::Borderline));
        // (85 - 39) / 0.5
        assert_eq!(report.required.required_grade, 92.0);
        assert!(report.required.is_achievable);

        let names: Vec<_> = report.plan.iter().map(|r| r.component.name.as_str()).collect();
        assert_eq!(names, ["Final Exam", "Participation"]);
    }

    #[test]
    fn test_standing_thresholds() {
        assert_eq!(Standing::of(85.0), Standing::OnTrack);
        assert_eq!(Standing::of(84.99), Standing::Borderline);
        assert_eq!(Standing::of(70.0), Standing::Borderline);
        assert_eq!(Standing::of(69.0), Standing::AtRisk);
    }
}
