//! Free-text signal extraction.
//!
//! Turns a chat message into known symptom labels and lifestyle buckets by
//! substring matching against the store's symptom catalog and a fixed
//! keyword table. Deliberately coarse and recall-oriented: substring
//! coincidences are an accepted trade-off, covered by tests rather than
//! silently "fixed".

use std::sync::{Arc, LazyLock, OnceLock};

use regex::Regex;

use crate::models::{ExtractedSignals, LifestyleLabel};
use crate::store::{KnowledgeStore, StoreError};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Trim, lowercase, collapse whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}

pub struct SignalExtractor {
    store: Arc<dyn KnowledgeStore>,
    /// Symptom catalog, fetched at most once per engine lifetime and never
    /// invalidated. Concurrent first use may fetch more than once but
    /// converges to the same value; the catalog is treated as immutable.
    /// Known limitation: a catalog change in the store after first use is
    /// not picked up.
    catalog: OnceLock<Vec<String>>,
}

impl SignalExtractor {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            store,
            catalog: OnceLock::new(),
        }
    }

    fn catalog(&self) -> Result<&[String], StoreError> {
        if let Some(cached) = self.catalog.get() {
            return Ok(cached);
        }
        let fetched = self.store.all_symptoms()?;
        tracing::debug!(symptoms = fetched.len(), "Symptom catalog cached");
        Ok(self.catalog.get_or_init(|| fetched))
    }

    /// Extract known symptoms and lifestyle signals from free text.
    ///
    /// Both output lists preserve first-match order (catalog order for
    /// symptoms, table order for lifestyle) with duplicates removed.
    /// Empty input yields two empty lists, not an error.
    pub fn extract(&self, message: &str) -> Result<ExtractedSignals, StoreError> {
        let text = normalize(message);

        let mut symptoms: Vec<String> = Vec::new();
        for label in self.catalog()? {
            let needle = label.to_lowercase();
            if !needle.is_empty() && text.contains(&needle) && !symptoms.contains(label) {
                symptoms.push(label.clone());
            }
        }

        let mut lifestyle: Vec<LifestyleLabel> = Vec::new();
        for label in LifestyleLabel::ALL {
            if label.keywords().iter().any(|k| text.contains(k)) {
                lifestyle.push(label);
            }
        }

        Ok(ExtractedSignals { symptoms, lifestyle })
    }
}
