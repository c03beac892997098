//! In-memory knowledge store for tests and offline use.
//!
//! Holds the same node/edge shapes the graph loader populates (herbs with
//! properties, conditions with symptom lists, helps-with edges with
//! evidence, directed interactions) and answers the contract queries with
//! the same case-insensitive semantics as the Cypher versions.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{ContraindicationMap, HerbFact, HerbSummary};

use super::{KnowledgeStore, StoreError, CONDITION_QUERY_LIMIT, HERB_SEARCH_LIMIT};

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedHerb {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCondition {
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRemedy {
    pub herb: String,
    pub condition: String,
    #[serde(default)]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedInteraction {
    pub herb1: String,
    pub herb2: String,
}

/// JSON seed file shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub herbs: Vec<SeedHerb>,
    #[serde(default)]
    pub conditions: Vec<SeedCondition>,
    #[serde(default)]
    pub herb_conditions: Vec<SeedRemedy>,
    #[serde(default)]
    pub interactions: Vec<SeedInteraction>,
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MemoryStore {
    herbs: Vec<SeedHerb>,
    conditions: Vec<SeedCondition>,
    remedies: Vec<SeedRemedy>,
    interactions: Vec<SeedInteraction>,
}

impl MemoryStore {
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            herbs: seed.herbs,
            conditions: seed.conditions,
            remedies: seed.herb_conditions,
            interactions: seed.interactions,
        }
    }

    /// Load a seed file from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::SeedLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let seed: SeedData = serde_json::from_str(&raw).map_err(|e| StoreError::SeedParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Small built-in Ayurvedic sample graph (no file I/O).
    pub fn sample() -> Self {
        let seed = SeedData {
            herbs: vec![
                herb("Ashwagandha", &["adaptogen", "calming"]),
                herb("Brahmi", &["nootropic", "calming"]),
                herb("Tulsi", &["adaptogen", "respiratory support"]),
                herb("Ginger", &["digestive", "warming"]),
                herb("Triphala", &["digestive", "gentle laxative"]),
                herb("Licorice", &["demulcent", "soothing"]),
            ],
            conditions: vec![
                condition("Stress", &["anxiety", "irritability", "fatigue"]),
                condition("Insomnia", &["insomnia", "restless sleep"]),
                condition("Indigestion", &["indigestion", "bloating", "nausea"]),
                condition("Common Cold", &["cough", "sore throat", "congestion"]),
            ],
            herb_conditions: vec![
                remedy(
                    "Ashwagandha",
                    "Stress",
                    Some("Adaptogenic support for everyday tension"),
                ),
                remedy(
                    "Ashwagandha",
                    "Insomnia",
                    Some("Traditionally taken at night to ease restlessness"),
                ),
                remedy("Brahmi", "Stress", Some("Calming herb used for mental fatigue")),
                remedy("Tulsi", "Common Cold", Some("Warm tulsi tea eases congestion")),
                remedy("Ginger", "Indigestion", Some("Stimulates digestion")),
                remedy("Triphala", "Indigestion", None),
            ],
            interactions: vec![
                interaction("Ashwagandha", "Licorice"),
                interaction("Ginger", "Licorice"),
            ],
        };
        Self::from_seed(seed)
    }

    fn matching_conditions(&self, symptoms: &[String]) -> Vec<&SeedCondition> {
        let wanted: Vec<String> = symptoms.iter().map(|s| s.to_lowercase()).collect();
        self.conditions
            .iter()
            .filter(|c| {
                c.symptoms
                    .iter()
                    .any(|s| wanted.contains(&s.to_lowercase()))
            })
            .collect()
    }

    fn herb_properties(&self, name: &str) -> Vec<String> {
        self.herbs
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.properties.clone())
            .unwrap_or_default()
    }
}

impl KnowledgeStore for MemoryStore {
    fn all_symptoms(&self) -> Result<Vec<String>, StoreError> {
        let names: BTreeSet<String> = self
            .conditions
            .iter()
            .flat_map(|c| c.symptoms.iter().cloned())
            .collect();
        Ok(names.into_iter().collect())
    }

    fn herbs_for_symptoms(&self, symptoms: &[String]) -> Result<Vec<HerbFact>, StoreError> {
        let matched: Vec<String> = self
            .matching_conditions(symptoms)
            .iter()
            .map(|c| c.name.to_lowercase())
            .collect();

        Ok(self
            .remedies
            .iter()
            .filter(|r| matched.contains(&r.condition.to_lowercase()))
            .map(|r| HerbFact {
                herb: r.herb.clone(),
                condition: r.condition.clone(),
                evidence: r.evidence.clone().filter(|e| !e.is_empty()),
                properties: self.herb_properties(&r.herb),
            })
            .collect())
    }

    fn contraindications(&self, herbs: &[String]) -> Result<ContraindicationMap, StoreError> {
        let wanted: Vec<String> = herbs.iter().map(|h| h.to_lowercase()).collect();
        let mut map = ContraindicationMap::new();
        for i in &self.interactions {
            if wanted.contains(&i.herb1.to_lowercase()) {
                let avoid = map.entry(i.herb1.clone()).or_default();
                if !avoid.contains(&i.herb2) {
                    avoid.push(i.herb2.clone());
                }
            }
        }
        Ok(map)
    }

    fn conditions_from_symptoms(&self, symptoms: &[String]) -> Result<Vec<String>, StoreError> {
        let mut conditions: Vec<String> = Vec::new();
        for c in self.matching_conditions(symptoms) {
            if !conditions.contains(&c.name) {
                conditions.push(c.name.clone());
            }
        }
        conditions.truncate(CONDITION_QUERY_LIMIT);
        Ok(conditions)
    }

    fn search_herbs(&self, query: &str) -> Result<Vec<HerbSummary>, StoreError> {
        let q = query.to_lowercase();
        let mut herbs: Vec<HerbSummary> = self
            .herbs
            .iter()
            .filter(|h| q.is_empty() || h.name.to_lowercase().contains(&q))
            .map(|h| HerbSummary {
                name: h.name.clone(),
                properties: h.properties.clone(),
            })
            .collect();
        herbs.sort_by(|a, b| a.name.cmp(&b.name));
        herbs.truncate(HERB_SEARCH_LIMIT);
        Ok(herbs)
    }
}

fn herb(name: &str, properties: &[&str]) -> SeedHerb {
    SeedHerb {
        name: name.into(),
        properties: properties.iter().map(|p| p.to_string()).collect(),
    }
}

fn condition(name: &str, symptoms: &[&str]) -> SeedCondition {
    SeedCondition {
        name: name.into(),
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
    }
}

fn remedy(herb: &str, condition: &str, evidence: Option<&str>) -> SeedRemedy {
    SeedRemedy {
        herb: herb.into(),
        condition: condition.into(),
        evidence: evidence.map(str::to_string),
    }
}

fn interaction(herb1: &str, herb2: &str) -> SeedInteraction {
    SeedInteraction {
        herb1: herb1.into(),
        herb2: herb2.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn sample_symptom_catalog_is_sorted_and_distinct() {
        let store = MemoryStore::sample();
        let symptoms = store.all_symptoms().unwrap();
        assert!(symptoms.contains(&"anxiety".to_string()));
        assert!(symptoms.contains(&"insomnia".to_string()));

        let mut sorted = symptoms.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(symptoms, sorted);
    }

    #[test]
    fn herbs_for_symptoms_matches_case_insensitively() {
        let store = MemoryStore::sample();
        let facts = store.herbs_for_symptoms(&["ANXIETY".to_string()]).unwrap();
        assert!(facts.iter().any(|f| f.herb == "Ashwagandha"));
        assert!(facts.iter().any(|f| f.herb == "Brahmi"));
        assert!(facts.iter().all(|f| f.condition == "Stress"));
    }

    #[test]
    fn herbs_for_symptoms_empty_input_yields_nothing() {
        let store = MemoryStore::sample();
        assert!(store.herbs_for_symptoms(&[]).unwrap().is_empty());
    }

    #[test]
    fn facts_carry_herb_properties_and_filter_empty_evidence() {
        let store = MemoryStore::sample();
        let facts = store
            .herbs_for_symptoms(&["indigestion".to_string()])
            .unwrap();
        let ginger = facts.iter().find(|f| f.herb == "Ginger").unwrap();
        assert!(ginger.properties.contains(&"digestive".to_string()));

        let triphala = facts.iter().find(|f| f.herb == "Triphala").unwrap();
        assert_eq!(triphala.evidence, None);
    }

    #[test]
    fn contraindications_are_directed() {
        let store = MemoryStore::sample();
        let map = store
            .contraindications(&["ashwagandha".to_string(), "Licorice".to_string()])
            .unwrap();
        assert_eq!(map.get("Ashwagandha").unwrap(), &vec!["Licorice".to_string()]);
        // Licorice is only ever the target of the relation, never the source.
        assert!(!map.contains_key("Licorice"));
    }

    #[test]
    fn conditions_from_symptoms_distinct_and_capped() {
        let store = MemoryStore::sample();
        let conditions = store
            .conditions_from_symptoms(&["anxiety".to_string(), "fatigue".to_string()])
            .unwrap();
        assert_eq!(conditions, vec!["Stress".to_string()]);
        assert!(conditions.len() <= CONDITION_QUERY_LIMIT);
    }

    #[test]
    fn search_herbs_empty_query_returns_all_sorted() {
        let store = MemoryStore::sample();
        let herbs = store.search_herbs("").unwrap();
        assert_eq!(herbs.len(), 6);
        assert_eq!(herbs[0].name, "Ashwagandha");
        assert!(herbs.len() <= HERB_SEARCH_LIMIT);
    }

    #[test]
    fn search_herbs_substring_case_insensitive() {
        let store = MemoryStore::sample();
        let herbs = store.search_herbs("gandh").unwrap();
        assert_eq!(herbs.len(), 1);
        assert_eq!(herbs[0].name, "Ashwagandha");
    }

    #[test]
    fn seed_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "herbs": [{{"name": "Neem", "properties": ["bitter"]}}],
                "conditions": [{{"name": "Skin Irritation", "symptoms": ["itching"]}}],
                "herb_conditions": [{{"herb": "Neem", "condition": "Skin Irritation"}}],
                "interactions": []
            }}"#
        )
        .unwrap();

        let store = MemoryStore::load(file.path()).unwrap();
        let facts = store.herbs_for_symptoms(&["itching".to_string()]).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].herb, "Neem");
    }

    #[test]
    fn missing_seed_file_is_a_load_error() {
        let err = MemoryStore::load(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert!(matches!(err, StoreError::SeedLoad { .. }));
    }

    #[test]
    fn malformed_seed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = MemoryStore::load(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::SeedParse { .. }));
    }
}
