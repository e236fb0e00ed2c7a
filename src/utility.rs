/// Rounds to two decimal places, the precision every reported percentage uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Contribution of a score to the overall grade, in percentage points.
pub fn weighted(score: f64, weight: f64) -> f64 {
    score * weight / 100.0
}
