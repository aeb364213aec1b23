//! Formatted terminal output for explain, batch and schema commands.

use crate::app::pipeline::BatchOutput;
use crate::features::{FeatureColumn, column_names};
use crate::predictor::{Explanation, Prediction};
use crate::report::format_amount;

/// One-line prediction result.
pub fn format_prediction(prediction: &Prediction, precise: bool) -> String {
    format!(
        "Predicted insurance cost: {} ({} model)",
        format_amount(prediction, precise),
        prediction.tier
    )
}

/// Encoded and scaled rows side by side, with the chosen tier.
pub fn format_explanation(explanation: &Explanation, precise: bool) -> String {
    let mut out = String::new();

    out.push_str("=== premium - prediction breakdown ===\n");
    out.push_str(&format!("Tier: {}\n", explanation.tier));
    out.push_str(&format!(
        "Scaled columns: {}\n",
        explanation.scaled_columns.join(", ")
    ));
    if !explanation.unknown_tokens.is_empty() {
        out.push_str(&format!(
            "Warning: medical history tokens scored 0: {}\n",
            explanation.unknown_tokens.join(", ")
        ));
    }

    let width = column_names().iter().map(|n| n.len()).max().unwrap_or(0);
    out.push_str(&format!("\n{:<width$}  {:>12}  {:>12}\n", "feature", "encoded", "scaled"));
    for column in FeatureColumn::ALL {
        out.push_str(&format!(
            "{:<width$}  {:>12.4}  {:>12.4}\n",
            column.name(),
            explanation.encoded.get(column),
            explanation.scaled.get(column),
        ));
    }

    out.push_str(&format!(
        "\nModel output: {:.4}\n{}\n",
        explanation.prediction.value,
        format_prediction(&explanation.prediction, precise)
    ));
    out
}

/// Batch summary, per-row results and row errors.
pub fn format_batch(output: &BatchOutput, precise: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Rows: read={} | predicted={} | skipped={}\n",
        output.rows_read,
        output.predictions.len(),
        output.row_errors.len()
    ));
    for (tier, count) in output.tier_counts() {
        out.push_str(&format!("  {tier}: {count}\n"));
    }

    if !output.predictions.is_empty() {
        out.push_str(&format!("\n{:>6}  {:>4}  {:<8}  {:>14}\n", "line", "age", "tier", "premium"));
        for p in &output.predictions {
            out.push_str(&format!(
                "{:>6}  {:>4}  {:<8}  {:>14}\n",
                p.line,
                p.age,
                p.prediction.tier,
                format_amount(&p.prediction, precise)
            ));
        }
    }

    if !output.row_errors.is_empty() {
        out.push_str("\nSkipped rows:\n");
        for e in &output.row_errors {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }
    out
}

/// Feature columns, one per line, with their positions.
pub fn format_schema() -> String {
    FeatureColumn::ALL
        .iter()
        .map(|c| format!("{:>2}  {}\n", c.index(), c.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::Predictor;
    use crate::testing::{reference_applicant, reference_router};

    #[test]
    fn explanation_lists_every_column() {
        let predictor = Predictor::new(reference_router());
        let explanation = predictor.explain(&reference_applicant()).unwrap();
        let text = format_explanation(&explanation, false);

        assert!(text.contains("Tier: young"));
        assert!(text.contains("income_level"));
        for name in column_names() {
            assert!(text.contains(name), "{name}");
        }
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn schema_listing_has_eighteen_lines() {
        let text = format_schema();
        assert_eq!(text.lines().count(), 18);
        assert!(text.lines().next().unwrap().ends_with("age"));
        assert!(text.lines().last().unwrap().ends_with("employment_status_Self-Employed"));
    }
}
