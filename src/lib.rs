//! Atreya: graph-backed herbal wellness recommendation engine.
//!
//! Pipeline: free text or structured request → signal extraction →
//! knowledge-graph fact retrieval → suggestion ranking → narrative
//! synthesis (generative backend when configured, deterministic fallback
//! otherwise) → structured response.
//!
//! The engine is read-only against the graph store and stateless per call;
//! HTTP routing and schema validation live in the calling layer.

pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod facts;
pub mod models;
pub mod narrative;
pub mod rank;
pub mod store;

pub use config::Settings;
pub use engine::RecommendationEngine;
pub use error::EngineError;
