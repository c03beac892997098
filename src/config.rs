//! Engine configuration and fixed response fragments.
//!
//! All knobs come from `ATREYA_*` environment variables with sensible local
//! defaults. The generative backend is a capability, not a requirement:
//! leaving `ATREYA_OLLAMA_URL` unset selects the deterministic narrative
//! path, a supported mode rather than an error.

use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Atreya";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response caps, part of the calling-layer contract.
pub const MAX_SUGGESTIONS: usize = 5;
pub const MAX_CONDITIONS: usize = 3;
pub const MAX_DEBUG_CHARS: usize = 1200;

/// Every response carries this, verbatim.
pub const DISCLAIMER: &str =
    "This is an educational demo and not medical advice. Consult a qualified professional.";

/// Fixed lifestyle tips appended to every recommendation, in this order.
pub const LIFESTYLE_TIPS: [&str; 3] = [
    "Prioritize 7–8 hours of consistent sleep.",
    "Hydrate regularly; warm water or herbal tea can support digestion.",
    "Gentle daily movement (e.g., yoga, walking) supports overall balance.",
];

const DEFAULT_GRAPH_URL: &str = "http://localhost:7474";
const DEFAULT_GRAPH_DATABASE: &str = "neo4j";
const DEFAULT_GRAPH_USER: &str = "neo4j";
const DEFAULT_GRAPH_PASSWORD: &str = "password";
const DEFAULT_GRAPH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 300;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Runtime settings for the engine's external collaborators.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Graph store HTTP endpoint (Neo4j transaction API).
    pub graph_url: String,
    pub graph_database: String,
    pub graph_user: String,
    pub graph_password: String,
    pub graph_timeout_secs: u64,
    /// Generative backend endpoint. `None` selects the deterministic
    /// narrative fallback.
    pub ollama_url: Option<String>,
    pub ollama_model: String,
    pub ollama_timeout_secs: u64,
}

impl Settings {
    /// Read settings from `ATREYA_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            graph_url: env_or("ATREYA_GRAPH_URL", DEFAULT_GRAPH_URL),
            graph_database: env_or("ATREYA_GRAPH_DATABASE", DEFAULT_GRAPH_DATABASE),
            graph_user: env_or("ATREYA_GRAPH_USER", DEFAULT_GRAPH_USER),
            graph_password: env_or("ATREYA_GRAPH_PASSWORD", DEFAULT_GRAPH_PASSWORD),
            graph_timeout_secs: DEFAULT_GRAPH_TIMEOUT_SECS,
            ollama_url: env::var("ATREYA_OLLAMA_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            ollama_model: env_or("ATREYA_OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            ollama_timeout_secs: DEFAULT_OLLAMA_TIMEOUT_SECS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graph_url: DEFAULT_GRAPH_URL.into(),
            graph_database: DEFAULT_GRAPH_DATABASE.into(),
            graph_user: DEFAULT_GRAPH_USER.into(),
            graph_password: DEFAULT_GRAPH_PASSWORD.into(),
            graph_timeout_secs: DEFAULT_GRAPH_TIMEOUT_SECS,
            ollama_url: None,
            ollama_model: DEFAULT_OLLAMA_MODEL.into(),
            ollama_timeout_secs: DEFAULT_OLLAMA_TIMEOUT_SECS,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
