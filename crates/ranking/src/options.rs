//! Ranking parameters
//!
//! Service defaults come from configuration; a request may override any of
//! them. Everything is validated here, before any ranking work starts.

use crate::citation::CitationPolicy;
use crate::errors::{RankingError, Result};
use crate::graph::EdgeWeights;
use crate::pagerank::PageRankConfig;
use crate::scoring::ImpactWeights;
use impactrank_common::config::RankingConfig;
use std::collections::BTreeMap;

/// Fully validated parameters for one ranking call
#[derive(Debug, Clone, PartialEq)]
pub struct RankingOptions {
    pub citation_policy: CitationPolicy,
    pub edge_weights: EdgeWeights,
    pub impact_weights: ImpactWeights,
    pub pagerank: PageRankConfig,

    /// Fallback edge weight for request-supplied tables without `llm_inferred`
    pub fallback_edge_weight: f64,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            citation_policy: CitationPolicy::default(),
            edge_weights: EdgeWeights::default(),
            impact_weights: ImpactWeights::default(),
            pagerank: PageRankConfig::default(),
            fallback_edge_weight: 0.3,
        }
    }
}

/// Per-request overrides; `None` keeps the default
#[derive(Debug, Clone, Default)]
pub struct RankingOverrides {
    pub citation_policy: Option<String>,
    pub edge_weights: Option<BTreeMap<String, f64>>,
    pub impact_weights: Option<BTreeMap<String, f64>>,
    pub damping: Option<f64>,
    pub iterations: Option<usize>,
    pub tolerance: Option<f64>,
}

impl RankingOptions {
    /// Resolve the service defaults from configuration
    pub fn from_config(config: &RankingConfig) -> Result<Self> {
        check_edge_weights(&config.edge_weights)?;
        check_finite_weight("fallback", config.fallback_edge_weight)?;
        check_tolerance(config.tolerance)?;

        Ok(Self {
            citation_policy: config.citation_policy.parse()?,
            edge_weights: EdgeWeights::new(
                config.edge_weights.clone(),
                config.fallback_edge_weight,
            ),
            impact_weights: ImpactWeights::from_map(&config.impact_weights)?,
            pagerank: PageRankConfig {
                damping: config.damping,
                max_iterations: config.iterations,
                tolerance: config.tolerance,
            },
            fallback_edge_weight: config.fallback_edge_weight,
        })
    }

    /// Apply request overrides on top of these options.
    ///
    /// An empty edge weight table keeps the defaults; a non-empty one
    /// replaces them entirely.
    pub fn with_overrides(&self, overrides: RankingOverrides) -> Result<Self> {
        let mut options = self.clone();

        if let Some(policy) = overrides.citation_policy {
            options.citation_policy = policy.parse()?;
        }
        if let Some(weights) = overrides.impact_weights {
            options.impact_weights = ImpactWeights::from_map(&weights)?;
        }
        if let Some(weights) = overrides.edge_weights.filter(|w| !w.is_empty()) {
            check_edge_weights(&weights)?;
            options.edge_weights = EdgeWeights::new(weights, self.fallback_edge_weight);
        }
        if let Some(damping) = overrides.damping {
            options.pagerank.damping = damping;
        }
        if let Some(iterations) = overrides.iterations {
            options.pagerank.max_iterations = iterations;
        }
        if let Some(tolerance) = overrides.tolerance {
            check_tolerance(tolerance)?;
            options.pagerank.tolerance = tolerance;
        }

        Ok(options)
    }
}

/// Negative weights are allowed (those edges are dropped); NaN and infinities are not
fn check_edge_weights(weights: &BTreeMap<String, f64>) -> Result<()> {
    weights
        .iter()
        .try_for_each(|(kind, &value)| check_finite_weight(kind, value))
}

fn check_finite_weight(kind: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RankingError::NonFiniteEdgeWeight {
            kind: kind.to_string(),
            value,
        })
    }
}

fn check_tolerance(value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RankingError::InvalidTolerance { value })
    }
}
