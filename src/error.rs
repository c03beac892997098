//! Crate-level error taxonomy.
//!
//! The engine never catches or retries collaborator failures; it surfaces
//! them as one of three tagged variants so the calling layer can map them
//! to a user-facing failure without leaking internal query text.

use thiserror::Error;

use crate::narrative::NarrativeError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A knowledge-store query failed (network, auth, or query error).
    #[error("knowledge store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// A generative backend is configured but the call failed.
    #[error("narrative backend unavailable: {0}")]
    BackendUnavailable(#[from] NarrativeError),

    /// Malformed request shape. Constructed by the wire layer, not the core.
    #[error("invalid request: {0}")]
    InputInvalid(String),
}

impl EngineError {
    /// Whether a caller could reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::StoreUnavailable(_) | Self::BackendUnavailable(_) => true,
            Self::InputInvalid(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_faults_are_retryable() {
        let err = EngineError::from(StoreError::Connection("http://localhost:7474".into()));
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_input_is_not_retryable() {
        let err = EngineError::InputInvalid("age out of range".into());
        assert!(!err.is_retryable());
    }

    #[test]
    fn display_does_not_leak_query_text() {
        let err = EngineError::from(StoreError::Connection("http://localhost:7474".into()));
        let message = err.to_string();
        assert!(message.contains("knowledge store unavailable"));
        assert!(!message.contains("MATCH"));
    }
}
