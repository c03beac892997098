//! Graph fact retrieval for the recommendation pipeline.
//!
//! Thin, policy-free layer over the store contract: no retries, no
//! deduplication. Store faults propagate unchanged.

use std::sync::Arc;

use crate::models::{ContraindicationMap, HerbFact};
use crate::store::{KnowledgeStore, StoreError, CONDITION_QUERY_LIMIT};

pub struct FactAggregator {
    store: Arc<dyn KnowledgeStore>,
}

impl FactAggregator {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Candidate (herb, condition) edges for the given symptoms.
    ///
    /// An empty symptom set yields an empty fact list, never "all herbs".
    /// Duplicate (herb, condition) pairs from the store are passed through.
    pub fn facts_for(&self, symptoms: &[String]) -> Result<Vec<HerbFact>, StoreError> {
        if symptoms.is_empty() {
            return Ok(Vec::new());
        }
        self.store.herbs_for_symptoms(symptoms)
    }

    /// Avoid-combining map for the given herbs. Asymmetric as stored.
    pub fn contraindications_for(
        &self,
        herbs: &[String],
    ) -> Result<ContraindicationMap, StoreError> {
        if herbs.is_empty() {
            return Ok(ContraindicationMap::new());
        }
        self.store.contraindications(herbs)
    }

    /// Distinct candidate conditions, at most [`CONDITION_QUERY_LIMIT`].
    pub fn conditions_for(&self, symptoms: &[String]) -> Result<Vec<String>, StoreError> {
        if symptoms.is_empty() {
            return Ok(Vec::new());
        }
        let mut conditions = self.store.conditions_from_symptoms(symptoms)?;
        conditions.truncate(CONDITION_QUERY_LIMIT);
        Ok(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HerbSummary;
    use crate::store::MemoryStore;

    fn aggregator() -> FactAggregator {
        FactAggregator::new(Arc::new(MemoryStore::sample()))
    }

    #[test]
    fn empty_symptoms_short_circuit_without_store_calls() {
        let agg = aggregator();
        assert!(agg.facts_for(&[]).unwrap().is_empty());
        assert!(agg.contraindications_for(&[]).unwrap().is_empty());
        assert!(agg.conditions_for(&[]).unwrap().is_empty());
    }

    #[test]
    fn facts_pass_through_unmodified() {
        let agg = aggregator();
        let facts = agg.facts_for(&["anxiety".to_string()]).unwrap();
        assert!(facts.len() >= 2);
        assert!(facts.iter().any(|f| f.herb == "Ashwagandha"));
    }

    #[test]
    fn store_failure_propagates_without_retry() {
        struct BrokenStore;
        impl KnowledgeStore for BrokenStore {
            fn all_symptoms(&self) -> Result<Vec<String>, StoreError> {
                Err(StoreError::Connection("http://localhost:7474".into()))
            }
            fn herbs_for_symptoms(&self, _: &[String]) -> Result<Vec<HerbFact>, StoreError> {
                Err(StoreError::Connection("http://localhost:7474".into()))
            }
            fn contraindications(&self, _: &[String]) -> Result<ContraindicationMap, StoreError> {
                Err(StoreError::Connection("http://localhost:7474".into()))
            }
            fn conditions_from_symptoms(&self, _: &[String]) -> Result<Vec<String>, StoreError> {
                Err(StoreError::Connection("http://localhost:7474".into()))
            }
            fn search_herbs(&self, _: &str) -> Result<Vec<HerbSummary>, StoreError> {
                Err(StoreError::Connection("http://localhost:7474".into()))
            }
        }

        let agg = FactAggregator::new(Arc::new(BrokenStore));
        let err = agg.facts_for(&["anxiety".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[test]
    fn conditions_capped_at_query_limit() {
        struct OverflowingStore;
        impl KnowledgeStore for OverflowingStore {
            fn all_symptoms(&self) -> Result<Vec<String>, StoreError> {
                Ok(vec![])
            }
            fn herbs_for_symptoms(&self, _: &[String]) -> Result<Vec<HerbFact>, StoreError> {
                Ok(vec![])
            }
            fn contraindications(&self, _: &[String]) -> Result<ContraindicationMap, StoreError> {
                Ok(ContraindicationMap::new())
            }
            fn conditions_from_symptoms(&self, _: &[String]) -> Result<Vec<String>, StoreError> {
                Ok((0..20).map(|i| format!("Condition {i}")).collect())
            }
            fn search_herbs(&self, _: &str) -> Result<Vec<HerbSummary>, StoreError> {
                Ok(vec![])
            }
        }

        let agg = FactAggregator::new(Arc::new(OverflowingStore));
        let conditions = agg.conditions_for(&["anything".to_string()]).unwrap();
        assert_eq!(conditions.len(), CONDITION_QUERY_LIMIT);
        assert_eq!(conditions[0], "Condition 0");
    }
}
