//! Static course catalog: courses, their professors, and each professor's
//! grading components.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::component::{GradeComponent, default_difficulty};

/// A grading component as published in the syllabus, before any scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    pub name: String,
    pub weight: f64,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
}

impl ComponentTemplate {
    fn new(name: &str, weight: f64, difficulty: u8) -> Self {
        ComponentTemplate {
            name: name.to_string(),
            weight,
            difficulty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub id: String,
    pub name: String,
    pub grade_components: Vec<ComponentTemplate>,
}

impl Professor {
    /// Fresh, unscored components for a new worksheet.
    pub fn components(&self) -> Vec<GradeComponent> {
        self.grade_components
            .iter()
            .map(|t| GradeComponent::new(&t.name, t.weight, t.difficulty))
            .collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.grade_components.iter().map(|t| t.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub professors: Vec<Professor>,
}

impl Course {
    pub fn professor(&self, professor_id: &str) -> Option<&Professor> {
        self.professors.iter().find(|p| p.id == professor_id)
    }

    /// The professor to select automatically when the course has only one.
    pub fn sole_professor(&self) -> Option<&Professor> {
        match self.professors.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Read-only lookup table keyed by course id.
///
/// Stored as a JSON object on disk:
/// ```json
/// {
///   "cs101": {
///     "name": "CS 101 - Introduction to Computer Science",
///     "professors": [
///       { "id": "smith", "name": "Dr. Smith",
///         "gradeComponents": [{ "name": "Final Exam", "weight": 40, "difficulty": 5 }] }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: BTreeMap<String, Course>,
}

impl Catalog {
    /// Loads the catalog from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog '{path}'"))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse catalog '{path}'"))?;
        debug!(path, courses = catalog.courses.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    pub fn professor(&self, course_id: &str, professor_id: &str) -> Option<&Professor> {
        self.course(course_id)?.professor(professor_id)
    }

    /// Iterates over all `(course_id, course)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Course)> {
        self.courses.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        let t = ComponentTemplate::new;
        let prof = |id: &str, name: &str, grade_components: Vec<ComponentTemplate>| Professor {
            id: id.to_string(),
            name: name.to_string(),
            grade_components,
        };

        let mut courses = BTreeMap::new();

        courses.insert(
            "cs101".to_string(),
            Course {
                name: "CS 101 - Introduction to Computer Science".to_string(),
                professors: vec![
                    prof(
                        "smith",
                        "Dr. Smith",
                        vec![
                            t("Assignments", 20.0, 3),
                            t("Midterm Exam", 30.0, 4),
                            t("Final Exam", 40.0, 5),
                            t("Participation", 10.0, 1),
                        ],
                    ),
                    prof(
                        "johnson",
                        "Prof. Johnson",
                        vec![
                            t("Labs", 25.0, 3),
                            t("Projects", 35.0, 4),
                            t("Midterm", 20.0, 4),
                            t("Final Exam", 20.0, 5),
                        ],
                    ),
                ],
            },
        );

        courses.insert(
            "math201".to_string(),
            Course {
                name: "MATH 201 - Linear Algebra".to_string(),
                professors: vec![prof(
                    "brown",
                    "Dr. Brown",
                    vec![
                        t("Homework", 25.0, 4),
                        t("Quizzes", 15.0, 3),
                        t("Midterm 1", 20.0, 4),
                        t("Midterm 2", 20.0, 4),
                        t("Final Exam", 20.0, 5),
                    ],
                )],
            },
        );

        courses.insert(
            "phys101".to_string(),
            Course {
                name: "PHYS 101 - Physics I".to_string(),
                professors: vec![
                    prof(
                        "wilson",
                        "Dr. Wilson",
                        vec![
                            t("Labs", 20.0, 3),
                            t("Homework", 20.0, 3),
                            t("Midterm 1", 15.0, 4),
                            t("Midterm 2", 15.0, 4),
                            t("Final Exam", 30.0, 5),
                        ],
                    ),
                    prof(
                        "chen",
                        "Prof. Chen",
                        vec![
                            t("Problem Sets", 30.0, 4),
                            t("Lab Reports", 20.0, 3),
                            t("Midterm Exam", 20.0, 4),
                            t("Final Project", 20.0, 5),
                            t("Class Participation", 10.0, 2),
                        ],
                    ),
                ],
            },
        );

        Catalog { courses }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
