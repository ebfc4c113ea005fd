//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid council member: {0}")]
    InvalidMember(String),

    #[error("Consensus threshold must be in (0, 1], got {0}")]
    InvalidConsensusThreshold(f64),

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Malformed member response: {0}")]
    MalformedResponse(String),

    #[error("Unknown vote: {0}")]
    UnknownVote(String),

    #[error("Unknown decision status: {0}")]
    UnknownStatus(String),

    #[error("Unknown decision type: {0}")]
    UnknownDecisionType(String),

    #[error("Decision {id} already resolved as {status}")]
    AlreadyResolved { id: String, status: String },

    #[error("A decision can only be resolved to a terminal status")]
    NonTerminalResolution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_error_display() {
        let error = DomainError::InvalidConsensusThreshold(1.5);
        assert_eq!(
            error.to_string(),
            "Consensus threshold must be in (0, 1], got 1.5"
        );
    }

    #[test]
    fn test_unknown_vote_display() {
        let error = DomainError::UnknownVote("maybe".to_string());
        assert!(error.to_string().contains("maybe"));
    }
}
