//! Runtime settings read from the environment (after `.env` is loaded).

use anyhow::{Context, Result};
use tracing::debug;

use crate::catalog::Catalog;
use crate::engine::GradeEngine;
use crate::parser::parse_percentage;
use crate::scale::GradeScale;
use crate::worksheet::DEFAULT_TARGET;

pub const DEFAULT_LOG_FILE: &str = "logs/gradecalc.log";

/// | Variable            | Meaning                                   |
/// |---------------------|-------------------------------------------|
/// | `GRADECALC_CATALOG` | JSON catalog replacing the built-in table |
/// | `GRADECALC_SCALE`   | JSON grade scale replacing the standard   |
/// | `GRADECALC_TARGET`  | default target grade (85)                 |
/// | `LOG_FILE_PATH`     | JSON log file (`logs/gradecalc.log`)      |
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog_path: Option<String>,
    pub scale_path: Option<String>,
    pub default_target: f64,
    pub log_file_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalog_path: None,
            scale_path: None,
            default_target: DEFAULT_TARGET,
            log_file_path: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_target = match get("GRADECALC_TARGET") {
            Some(raw) => parse_percentage(&raw)
                .with_context(|| format!("GRADECALC_TARGET is not a number: '{raw}'"))?,
            None => DEFAULT_TARGET,
        };

        Ok(Settings {
            catalog_path: get("GRADECALC_CATALOG"),
            scale_path: get("GRADECALC_SCALE"),
            default_target,
            log_file_path: get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }

    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => {
                debug!("Using built-in catalog");
                Ok(Catalog::builtin())
            }
        }
    }

    pub fn engine(&self) -> Result<GradeEngine> {
        let scale = match &self.scale_path {
            Some(path) => GradeScale::load(path)?,
            None => GradeScale::standard(),
        };
        Ok(GradeEngine::new(scale))
    }
}
