//! Recommendation engine orchestration.
//!
//! Each call is a stateless pipeline over the request and current store
//! contents: extract → retrieve facts → synthesize narrative → rank →
//! assemble. The only mutable state is the extractor's lazily cached
//! symptom catalog. Failures are atomic: a store fault yields an error,
//! never a silently degraded response.

use std::sync::Arc;
use std::time::Instant;

use crate::chat::{self, ChatReply, DEFAULT_CHAT_AGE, DEFAULT_CHAT_GENDER};
use crate::config::{Settings, DISCLAIMER, LIFESTYLE_TIPS, MAX_CONDITIONS, MAX_DEBUG_CHARS};
use crate::error::EngineError;
use crate::extract::SignalExtractor;
use crate::facts::FactAggregator;
use crate::models::{
    DebugNarrative, DiagnosisRequest, DiagnosisResponse, ExtractedSignals, HerbFact, HerbSummary,
    RecommendRequest, RecommendResponse,
};
use crate::narrative::Synthesizer;
use crate::rank::rank;
use crate::store::{HttpGraphStore, KnowledgeStore, HERB_SEARCH_LIMIT};

pub struct RecommendationEngine {
    store: Arc<dyn KnowledgeStore>,
    extractor: SignalExtractor,
    aggregator: FactAggregator,
    synthesizer: Synthesizer,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn KnowledgeStore>, synthesizer: Synthesizer) -> Self {
        Self {
            extractor: SignalExtractor::new(store.clone()),
            aggregator: FactAggregator::new(store.clone()),
            store,
            synthesizer,
        }
    }

    /// Engine over the configured graph store and narrative backend.
    pub fn from_settings(settings: &Settings) -> Self {
        let store: Arc<dyn KnowledgeStore> = Arc::new(HttpGraphStore::from_settings(settings));
        Self::new(store, Synthesizer::from_settings(settings))
    }

    /// Produce a bounded suggestion list with narrative, tips, disclaimer.
    pub fn recommend(&self, req: &RecommendRequest) -> Result<RecommendResponse, EngineError> {
        let start = Instant::now();

        let facts = self.aggregator.facts_for(&req.symptoms)?;
        let herbs = distinct_herbs(&facts);
        let avoid = self.aggregator.contraindications_for(&herbs)?;

        let narrative = self.synthesizer.recommendation_text(
            req.age,
            &req.gender,
            &req.symptoms,
            &req.lifestyle,
            &facts,
            &avoid,
        )?;
        let suggestions = rank(&facts, &avoid);

        tracing::info!(
            symptoms = req.symptoms.len(),
            facts = facts.len(),
            suggestions = suggestions.len(),
            generative = self.synthesizer.is_generative(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendation assembled"
        );

        Ok(RecommendResponse {
            suggestions,
            tips: LIFESTYLE_TIPS.iter().map(|t| t.to_string()).collect(),
            disclaimer: DISCLAIMER.to_string(),
            debug: DebugNarrative {
                narrative: truncate_chars(&narrative, MAX_DEBUG_CHARS),
            },
        })
    }

    /// Probable conditions (≤3) with narration and heuristic confidence.
    pub fn diagnose(&self, req: &DiagnosisRequest) -> Result<DiagnosisResponse, EngineError> {
        let conditions = self.aggregator.conditions_for(&req.symptoms)?;
        let narrative =
            self.synthesizer
                .diagnosis_text(&req.symptoms, &req.lifestyle, &conditions)?;

        let mut probable = conditions;
        probable.truncate(MAX_CONDITIONS);

        tracing::info!(
            conditions = probable.len(),
            confidence = narrative.confidence,
            "Diagnosis assembled"
        );

        Ok(DiagnosisResponse {
            probable_conditions: probable,
            confidence: narrative.confidence,
            rationale: narrative.text,
            disclaimer: DISCLAIMER.to_string(),
        })
    }

    /// Extract known symptoms and lifestyle signals from free text.
    pub fn extract_signals(&self, text: &str) -> Result<ExtractedSignals, EngineError> {
        Ok(self.extractor.extract(text)?)
    }

    /// Herb name search, pass-through to the store (≤50 rows).
    pub fn search_herbs(&self, query: &str) -> Result<Vec<HerbSummary>, EngineError> {
        let mut herbs = self.store.search_herbs(query)?;
        herbs.truncate(HERB_SEARCH_LIMIT);
        Ok(herbs)
    }

    /// Conversational entry point: extract signals, recommend with default
    /// demographics, format a markdown reply.
    pub fn reply(&self, message: &str) -> Result<ChatReply, EngineError> {
        let extracted = self.extract_signals(message)?;
        let req = RecommendRequest {
            age: DEFAULT_CHAT_AGE,
            gender: DEFAULT_CHAT_GENDER.to_string(),
            symptoms: extracted.symptoms.clone(),
            lifestyle: extracted
                .lifestyle
                .iter()
                .map(|l| l.as_str().to_string())
                .collect(),
            conditions_history: vec![],
        };
        let rec = self.recommend(&req)?;
        Ok(chat::build_reply(extracted, &rec))
    }
}

/// Distinct herb names from facts, first-seen order.
fn distinct_herbs(facts: &[HerbFact]) -> Vec<String> {
    let mut herbs: Vec<String> = Vec::new();
    for fact in facts {
        if !herbs.contains(&fact.herb) {
            herbs.push(fact.herb.clone());
        }
    }
    herbs
}

/// Truncate to a character count on a UTF-8 boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
