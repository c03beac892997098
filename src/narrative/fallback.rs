//! Deterministic narrative builder.
//!
//! Used when no generative backend is configured. Output is assembled
//! purely from graph facts and fixed template fragments, so identical
//! inputs always produce identical text.

use crate::config::{DISCLAIMER, LIFESTYLE_TIPS};
use crate::models::{ContraindicationMap, HerbFact};
use crate::rank::rank;

/// Bullet shown when the graph produced no candidate herbs.
pub const NO_MATCH_MESSAGE: &str =
    "- No direct herb matches found in the graph. Consider general digestive and sleep support.";

/// Markdown recommendation text built from facts alone.
///
/// Grouping is the ranker's: first-seen herb order, deduplicated merged
/// reasons, at most 5 herbs.
pub fn recommendation_text(facts: &[HerbFact], avoid: &ContraindicationMap) -> String {
    let suggestions = rank(facts, avoid);

    let mut lines = vec!["### Suggested Herbs".to_string()];
    if suggestions.is_empty() {
        lines.push(NO_MATCH_MESSAGE.to_string());
    } else {
        for s in &suggestions {
            let avoid_text = if s.avoid_with.is_empty() {
                "—".to_string()
            } else {
                s.avoid_with.join(", ")
            };
            lines.push(format!(
                "- **{}** — Why: {}. How: {}. Avoid with: {}",
                s.name, s.why, s.how_to_use, avoid_text
            ));
        }
    }

    lines.push(String::new());
    lines.push("### General Tips".to_string());
    for tip in LIFESTYLE_TIPS {
        lines.push(format!("- {tip}"));
    }

    lines.push(String::new());
    lines.push(format!("**Disclaimer:** {DISCLAIMER}"));
    lines.join("\n")
}

/// Heuristic rationale text for diagnosis without a generative model.
pub fn diagnosis_text(conditions: &[String]) -> String {
    let listed = if conditions.is_empty() {
        "none found".to_string()
    } else {
        conditions.join(", ")
    };
    format!(
        "Likely conditions (from graph): {listed}. \
         This is a heuristic summary built without a generative model.\n\
         Caution: this is not medical advice."
    )
}

/// Crude monotonic confidence: clamp(count / 5) into [0.3, 1.0].
pub fn diagnosis_confidence(condition_count: usize) -> f64 {
    (condition_count as f64 / 5.0).clamp(0.3, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HerbFact;

    fn fact(herb: &str, condition: &str, evidence: Option<&str>) -> HerbFact {
        HerbFact {
            herb: herb.into(),
            condition: condition.into(),
            evidence: evidence.map(str::to_string),
            properties: vec![],
        }
    }

    #[test]
    fn no_facts_produce_no_match_message_and_disclaimer() {
        let text = recommendation_text(&[], &ContraindicationMap::new());
        assert!(text.contains("No direct herb matches found in the graph"));
        assert!(text.contains("### General Tips"));
        assert!(text.ends_with(&format!("**Disclaimer:** {DISCLAIMER}")));
    }

    #[test]
    fn facts_render_why_how_and_avoid() {
        let mut avoid = ContraindicationMap::new();
        avoid.insert("Ashwagandha".into(), vec!["Licorice".into()]);

        let facts = vec![
            fact("Ashwagandha", "Stress", Some("Adaptogenic support")),
            fact("Ginger", "Indigestion", None),
        ];
        let text = recommendation_text(&facts, &avoid);

        assert!(text.contains("- **Ashwagandha** — Why: Adaptogenic support."));
        assert!(text.contains("Avoid with: Licorice"));
        // No avoid entry renders the placeholder dash.
        assert!(text.contains("- **Ginger** — Why: Indigestion. How: tea/decoction 1-2x daily. Avoid with: —"));
    }

    #[test]
    fn recommendation_text_is_deterministic() {
        let mut avoid = ContraindicationMap::new();
        avoid.insert("Ashwagandha".into(), vec!["Licorice".into()]);
        let facts = vec![
            fact("Ashwagandha", "Stress", Some("Adaptogenic support")),
            fact("Ashwagandha", "Insomnia", None),
            fact("Brahmi", "Stress", None),
        ];

        let first = recommendation_text(&facts, &avoid);
        let second = recommendation_text(&facts, &avoid);
        assert_eq!(first, second);
    }

    #[test]
    fn diagnosis_text_lists_conditions_or_none_found() {
        let text = diagnosis_text(&["Stress".into(), "Insomnia".into()]);
        assert!(text.contains("Stress, Insomnia"));
        assert!(text.contains("not medical advice"));

        let empty = diagnosis_text(&[]);
        assert!(empty.contains("none found"));
    }

    #[test]
    fn confidence_boundaries() {
        assert_eq!(diagnosis_confidence(0), 0.3);
        assert_eq!(diagnosis_confidence(5), 1.0);
        assert_eq!(diagnosis_confidence(7), 1.0);
    }

    #[test]
    fn confidence_monotonic_non_decreasing() {
        let mut previous = 0.0;
        for count in 0..10 {
            let current = diagnosis_confidence(count);
            assert!(current >= previous, "confidence decreased at {count}");
            assert!((0.3..=1.0).contains(&current));
            previous = current;
        }
    }
}
