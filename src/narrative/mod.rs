//! Natural-language synthesis of recommendations and diagnoses.
//!
//! Two mutually exclusive strategies, selected once at engine construction:
//! a generative backend when one is configured, and a deterministic builder
//! over graph facts otherwise. Absence of a backend is a supported mode,
//! never an error. Both paths end with the not-medical-advice disclaimer.

pub mod fallback;
pub mod ollama;
pub mod prompt;

pub use ollama::{LlmClient, MockLlmClient, OllamaClient};

use thiserror::Error;

use crate::config::Settings;
use crate::models::{ContraindicationMap, HerbFact};

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Cannot reach generative backend at {0}")]
    Connection(String),

    #[error("Generative request timed out after {0}s")]
    Timeout(u64),

    #[error("Generative request failed: {0}")]
    Http(String),

    #[error("Generative backend returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse generative response: {0}")]
    ResponseParsing(String),
}

/// Diagnosis narration plus its heuristic confidence.
#[derive(Debug, Clone)]
pub struct DiagnosisNarrative {
    pub text: String,
    pub confidence: f64,
}

/// Narrative strategy, fixed for the engine's lifetime.
pub enum Synthesizer {
    Generative {
        client: Box<dyn LlmClient>,
        model: String,
    },
    Deterministic,
}

impl Synthesizer {
    pub fn deterministic() -> Self {
        Self::Deterministic
    }

    pub fn generative(client: Box<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self::Generative {
            client,
            model: model.into(),
        }
    }

    /// Select the strategy from configuration. A missing backend URL means
    /// the deterministic path; no probing happens per call.
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.ollama_url {
            Some(url) => Self::generative(
                Box::new(OllamaClient::new(url, settings.ollama_timeout_secs)),
                settings.ollama_model.clone(),
            ),
            None => Self::Deterministic,
        }
    }

    pub fn is_generative(&self) -> bool {
        matches!(self, Self::Generative { .. })
    }

    /// Recommendation narrative from demographics, signals, and graph facts.
    pub fn recommendation_text(
        &self,
        age: u32,
        gender: &str,
        symptoms: &[String],
        lifestyle: &[String],
        facts: &[HerbFact],
        avoid: &ContraindicationMap,
    ) -> Result<String, NarrativeError> {
        match self {
            Self::Deterministic => Ok(fallback::recommendation_text(facts, avoid)),
            Self::Generative { client, model } => {
                let user_prompt =
                    prompt::recommendation_prompt(age, gender, symptoms, lifestyle, facts, avoid);
                client.generate(model, &user_prompt, prompt::SYSTEM_PROMPT)
            }
        }
    }

    /// Diagnosis narration. Confidence is always the fallback heuristic;
    /// the generative backend narrates, it does not score.
    pub fn diagnosis_text(
        &self,
        symptoms: &[String],
        lifestyle: &[String],
        conditions: &[String],
    ) -> Result<DiagnosisNarrative, NarrativeError> {
        let confidence = fallback::diagnosis_confidence(conditions.len());
        let text = match self {
            Self::Deterministic => fallback::diagnosis_text(conditions),
            Self::Generative { client, model } => {
                let user_prompt = prompt::diagnosis_prompt(symptoms, lifestyle, conditions);
                client.generate(model, &user_prompt, prompt::SYSTEM_PROMPT)?
            }
        };
        Ok(DiagnosisNarrative { text, confidence })
    }
}
