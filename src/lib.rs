//! Weighted grade calculations: current grade, the score still needed to
//! reach a target, and a prioritized study plan.

pub mod catalog;
pub mod component;
pub mod config;
pub mod engine;
pub mod output;
pub mod parser;
pub mod scale;
pub mod utility;
pub mod worksheet;

pub use component::GradeComponent;
pub use engine::{GradeEngine, GradeSummary, RequiredGrade, StudyRecommendation};
pub use scale::{GradeScale, GradeScaleEntry};
pub use worksheet::{Report, Worksheet};
