//! Suggestion ranking: collapse raw facts into a bounded suggestion list.
//!
//! Ordering is purely positional: the first 5 distinct herbs by first
//! appearance win. There is no popularity or evidence-strength ranking.

use crate::config::MAX_SUGGESTIONS;
use crate::models::{ContraindicationMap, HerbFact, HerbSuggestion};

/// Fixed usage guidance attached to every suggestion.
pub const USAGE_GUIDANCE: &str = "tea/decoction 1-2x daily";

/// Rationale shown when a herb's facts carry neither evidence nor condition.
pub const DEFAULT_RATIONALE: &str = "Traditional support";

/// Fold facts into at most [`MAX_SUGGESTIONS`] deduplicated suggestions.
///
/// Facts are grouped by herb in arrival order; each group accumulates a
/// deduplicated ordered reason list, preferring the fact's evidence text
/// and falling back to its condition name. A herb missing from the avoid
/// map gets an empty avoid-list.
pub fn rank(facts: &[HerbFact], avoid: &ContraindicationMap) -> Vec<HerbSuggestion> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

    for fact in facts {
        let pos = match grouped.iter().position(|(name, _)| name == &fact.herb) {
            Some(pos) => pos,
            None => {
                grouped.push((fact.herb.clone(), Vec::new()));
                grouped.len() - 1
            }
        };

        let why = fact
            .evidence
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(fact.condition.as_str());
        let reasons = &mut grouped[pos].1;
        if !why.is_empty() && !reasons.iter().any(|r| r == why) {
            reasons.push(why.to_string());
        }
    }

    grouped
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, reasons)| {
            let why = if reasons.is_empty() {
                DEFAULT_RATIONALE.to_string()
            } else {
                reasons.join("; ")
            };
            let avoid_with = avoid.get(&name).cloned().unwrap_or_default();
            HerbSuggestion {
                name,
                why,
                how_to_use: USAGE_GUIDANCE.to_string(),
                avoid_with,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(herb: &str, condition: &str, evidence: Option<&str>) -> HerbFact {
        HerbFact {
            herb: herb.into(),
            condition: condition.into(),
            evidence: evidence.map(str::to_string),
            properties: vec![],
        }
    }

    #[test]
    fn no_facts_yield_no_suggestions() {
        assert!(rank(&[], &ContraindicationMap::new()).is_empty());
    }

    #[test]
    fn duplicate_herb_facts_merge_rationale() {
        let facts = vec![
            fact("Ashwagandha", "Stress", None),
            fact("Ashwagandha", "Insomnia", None),
        ];
        let out = rank(&facts, &ContraindicationMap::new());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Ashwagandha");
        assert_eq!(out[0].why, "Stress; Insomnia");
    }

    #[test]
    fn evidence_preferred_over_condition_name() {
        let facts = vec![
            fact("Ginger", "Indigestion", Some("Stimulates digestion")),
            fact("Triphala", "Indigestion", None),
            fact("Triphala", "Indigestion", Some("")),
        ];
        let out = rank(&facts, &ContraindicationMap::new());

        assert_eq!(out[0].why, "Stimulates digestion");
        // Empty evidence falls back to the condition, and repeats dedupe.
        assert_eq!(out[1].why, "Indigestion");
    }

    #[test]
    fn identical_reasons_are_deduplicated() {
        let facts = vec![
            fact("Tulsi", "Common Cold", Some("Eases congestion")),
            fact("Tulsi", "Cough", Some("Eases congestion")),
        ];
        let out = rank(&facts, &ContraindicationMap::new());
        assert_eq!(out[0].why, "Eases congestion");
    }

    #[test]
    fn output_capped_at_five_distinct_herbs_in_first_seen_order() {
        let herbs = ["A", "B", "C", "D", "E", "F", "G"];
        let mut facts: Vec<HerbFact> = herbs
            .iter()
            .map(|h| fact(h, "Condition", None))
            .collect();
        // A late duplicate of an early herb must not displace anyone.
        facts.push(fact("A", "Other", None));

        let out = rank(&facts, &ContraindicationMap::new());
        assert_eq!(out.len(), 5);
        let names: Vec<&str> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn no_duplicate_herb_names_in_output() {
        let facts = vec![
            fact("A", "X", None),
            fact("B", "X", None),
            fact("A", "Y", None),
            fact("B", "Y", None),
        ];
        let out = rank(&facts, &ContraindicationMap::new());
        let mut names: Vec<&str> = out.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), out.len());
    }

    #[test]
    fn avoid_list_drawn_only_from_supplied_map() {
        let mut avoid = ContraindicationMap::new();
        avoid.insert("A".into(), vec!["Licorice".into()]);

        let facts = vec![fact("A", "X", None), fact("B", "X", None)];
        let out = rank(&facts, &avoid);

        assert_eq!(out[0].avoid_with, vec!["Licorice".to_string()]);
        // Missing entry means empty, never fabricated.
        assert!(out[1].avoid_with.is_empty());
        for suggestion in &out {
            for herb in &suggestion.avoid_with {
                assert!(avoid
                    .values()
                    .any(|listed| listed.contains(herb)));
            }
        }
    }

    #[test]
    fn usage_guidance_is_the_fixed_placeholder() {
        let out = rank(&[fact("A", "X", None)], &ContraindicationMap::new());
        assert_eq!(out[0].how_to_use, USAGE_GUIDANCE);
    }
}
