//! Knowledge-store read contract.
//!
//! The graph (herbs, conditions, symptoms, interactions) lives in an
//! external store. The engine only depends on this read-only contract;
//! retry policy, if any, belongs to the store implementation.

pub mod http;
pub mod memory;

pub use http::HttpGraphStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::models::{ContraindicationMap, HerbFact, HerbSummary};

/// Upper bound on conditions returned per symptom query.
pub const CONDITION_QUERY_LIMIT: usize = 10;
/// Upper bound on herb search results.
pub const HERB_SEARCH_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot reach graph store at {0}")]
    Connection(String),

    #[error("Graph store request timed out after {0}s")]
    Timeout(u64),

    #[error("Graph store request failed: {0}")]
    Http(String),

    #[error("Graph store returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse graph store response: {0}")]
    ResponseParsing(String),

    #[error("Graph query failed: {0}")]
    Query(String),

    #[error("Failed to read seed data from {path}: {reason}")]
    SeedLoad { path: String, reason: String },

    #[error("Failed to parse seed data from {path}: {reason}")]
    SeedParse { path: String, reason: String },
}

/// Read-only fact store over the herb/condition/symptom graph.
///
/// Queries are case-insensitive on the stored side. Implementations must
/// be shareable across concurrent engine calls.
pub trait KnowledgeStore: Send + Sync {
    /// All known symptom labels, ordered by name.
    fn all_symptoms(&self) -> Result<Vec<String>, StoreError>;

    /// (herb, condition) edges for conditions exhibiting any of the given
    /// symptoms. Not deduplicated.
    fn herbs_for_symptoms(&self, symptoms: &[String]) -> Result<Vec<HerbFact>, StoreError>;

    /// Directed avoid-combining relations for the given herbs.
    fn contraindications(&self, herbs: &[String]) -> Result<ContraindicationMap, StoreError>;

    /// Distinct conditions exhibiting any of the given symptoms, at most
    /// [`CONDITION_QUERY_LIMIT`].
    fn conditions_from_symptoms(&self, symptoms: &[String]) -> Result<Vec<String>, StoreError>;

    /// Herbs whose name contains the query (empty query matches all),
    /// ordered by name, at most [`HERB_SEARCH_LIMIT`].
    fn search_herbs(&self, query: &str) -> Result<Vec<HerbSummary>, StoreError>;
}
