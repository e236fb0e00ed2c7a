//! Parsing of raw user input: percentages and `NAME=VALUE` assignments.

use anyhow::{Result, bail};

/// Parses a trimmed float. Blank or unparseable input yields `None`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Splits `"Final Exam=92"` into `("Final Exam", "92")`.
///
/// The value may be empty (`"Final Exam="`), which clears a score.
///
/// # Errors
///
/// Returns an error when there is no `=` or the name is empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected NAME=VALUE, got '{raw}'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("missing component name in '{raw}'");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("85"), Some(85.0));
        assert_eq!(parse_percentage("  72.5 "), Some(72.5));
        assert_eq!(parse_percentage("-3"), Some(-3.0));
        assert_eq!(parse_percentage(""), None);
        assert_eq!(parse_percentage("   "), None);
        assert_eq!(parse_percentage("abc"), None);
        assert_eq!(parse_percentage("NaN"), None);
        assert_eq!(parse_percentage("inf"), None);
    }

    #[test]
    fn test_parse_assignment() {
        let (name, value) = parse_assignment("Final Exam=92").unwrap();
        assert_eq!(name, "Final Exam");
        assert_eq!(value, "92");

        let (name, value) = parse_assignment(" Labs = ").unwrap();
        assert_eq!(name, "Labs");
        assert_eq!(value, "");
    }

    #[test]
    fn test_parse_assignment_invalid() {
        assert!(parse_assignment("Final Exam").is_err());
        assert!(parse_assignment("=90").is_err());
    }
}
