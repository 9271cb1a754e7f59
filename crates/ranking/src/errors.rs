//! Error types for the ranking engine
//!
//! Every variant is a configuration or validation failure detected before
//! any ranking work starts. Noisy edges are never errors; they are dropped
//! during graph construction.

use impactrank_common::errors::AppError;
use thiserror::Error;

/// Result type alias for ranking operations
pub type Result<T> = std::result::Result<T, RankingError>;

/// Ranking configuration and input validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankingError {
    #[error("Unsupported citation policy: {policy}")]
    UnsupportedCitationPolicy { policy: String },

    #[error("Missing impact weight keys: {keys:?}")]
    MissingImpactWeights { keys: Vec<String> },

    #[error("Unknown impact weight key: {key}")]
    UnknownImpactWeight { key: String },

    #[error("Impact weights must be non-negative ({key} = {value})")]
    NegativeImpactWeight { key: String, value: f64 },

    #[error("Impact weights must sum to a positive value (total = {total})")]
    NonPositiveImpactWeights { total: f64 },

    #[error(
        "reference_weights length must match reference_citations length for paper {paper_id} \
         ({weights} weights, {references} references)"
    )]
    ReferenceWeightsMismatch {
        paper_id: String,
        weights: usize,
        references: usize,
    },

    #[error("Edge weight for kind {kind} must be a finite number, got {value}")]
    NonFiniteEdgeWeight { kind: String, value: f64 },

    #[error("Convergence tolerance must be a positive finite number, got {value}")]
    InvalidTolerance { value: f64 },

    #[error("Duplicate paper id: {paper_id}")]
    DuplicatePaperId { paper_id: String },

    #[error("Paper at index {index} has an empty id")]
    EmptyPaperId { index: usize },
}

impl From<RankingError> for AppError {
    fn from(err: RankingError) -> Self {
        AppError::InvalidRankingConfig {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = RankingError::UnsupportedCitationPolicy {
            policy: "median".into(),
        };
        assert_eq!(err.to_string(), "Unsupported citation policy: median");

        let err = RankingError::MissingImpactWeights {
            keys: vec!["novelty".into()],
        };
        assert!(err.to_string().contains("novelty"));
    }

    #[test]
    fn test_converts_to_bad_request() {
        let err: AppError = RankingError::NonPositiveImpactWeights { total: 0.0 }.into();
        assert!(err.is_client_error());
        assert!(matches!(err, AppError::InvalidRankingConfig { .. }));
    }
}
