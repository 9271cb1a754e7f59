//! Impact score blending
//!
//! Combines max-normalized rank with the paper's own evidence and novelty
//! into one bounded score.

use crate::errors::{RankingError, Result};
use crate::types::clamp01;
use std::collections::BTreeMap;

pub const PAGERANK_KEY: &str = "pagerank";
pub const EVIDENCE_KEY: &str = "evidence";
pub const NOVELTY_KEY: &str = "novelty";

/// Validated blend weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactWeights {
    pub pagerank: f64,
    pub evidence: f64,
    pub novelty: f64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            pagerank: 0.7,
            evidence: 0.2,
            novelty: 0.1,
        }
    }
}

impl ImpactWeights {
    /// Parse a weight table that must hold exactly `pagerank`, `evidence`
    /// and `novelty`, all non-negative with a positive sum.
    pub fn from_map(weights: &BTreeMap<String, f64>) -> Result<Self> {
        let required = [PAGERANK_KEY, EVIDENCE_KEY, NOVELTY_KEY];

        let missing: Vec<String> = required
            .iter()
            .filter(|key| !weights.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RankingError::MissingImpactWeights { keys: missing });
        }

        if let Some(key) = weights.keys().find(|key| !required.contains(&key.as_str())) {
            return Err(RankingError::UnknownImpactWeight { key: key.clone() });
        }

        // NaN fails both checks below
        if let Some((key, &value)) = weights.iter().find(|(_, value)| !(**value >= 0.0)) {
            return Err(RankingError::NegativeImpactWeight {
                key: key.clone(),
                value,
            });
        }

        let total: f64 = weights.values().sum();
        if !(total > 0.0) {
            return Err(RankingError::NonPositiveImpactWeights { total });
        }

        Ok(Self {
            pagerank: weights[PAGERANK_KEY],
            evidence: weights[EVIDENCE_KEY],
            novelty: weights[NOVELTY_KEY],
        })
    }

    /// Blend the three components into an impact score in [0, 1]
    pub fn blend(&self, rank_norm: f64, evidence: f64, novelty: f64) -> f64 {
        clamp01(self.pagerank * rank_norm + self.evidence * evidence + self.novelty * novelty)
    }
}

/// Scale `scores` by their maximum so the top paper gets 1.0.
///
/// A non-positive maximum is treated as 1.
pub fn normalize_by_max(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };
    scores.iter().map(|score| score / max).collect()
}
