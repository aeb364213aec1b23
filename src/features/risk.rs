//! Medical-history risk normalization.
//!
//! Medical history arrives as free text such as `"Diabetes & Heart disease"`.
//! Each `" & "`-separated token is weighted, the weights are summed and the sum
//! is min-max rescaled against the fixed range `[0, 14]`.

/// Token separator used by the questionnaire.
pub const SEPARATOR: &str = " & ";

/// Upper end of the rescaling range (heart disease + diabetes).
pub const MAX_RISK_SCORE: f64 = 14.0;
pub const MIN_RISK_SCORE: f64 = 0.0;

const RISK_WEIGHTS: [(&str, f64); 6] = [
    ("diabetes", 6.0),
    ("heart disease", 8.0),
    ("high blood pressure", 6.0),
    ("thyroid", 5.0),
    ("no disease", 0.0),
    ("none", 0.0),
];

fn weight(token: &str) -> Option<f64> {
    RISK_WEIGHTS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, w)| *w)
}

fn tokens(medical_history: &str) -> Vec<String> {
    medical_history
        .to_lowercase()
        .split(SEPARATOR)
        .map(|t| t.trim().to_string())
        .collect()
}

/// Normalized risk score for a medical-history label.
///
/// Unknown tokens weigh 0. The result is not clamped, so a history listing
/// more conditions than the two heaviest scores above 1.
pub fn normalize(medical_history: &str) -> f64 {
    let total: f64 = tokens(medical_history)
        .iter()
        .map(|t| weight(t).unwrap_or(0.0))
        .sum();
    (total - MIN_RISK_SCORE) / (MAX_RISK_SCORE - MIN_RISK_SCORE)
}

/// Tokens that are not in the weight table (they contributed 0).
pub fn unknown_tokens(medical_history: &str) -> Vec<String> {
    tokens(medical_history)
        .into_iter()
        .filter(|t| weight(t).is_none())
        .collect()
}
