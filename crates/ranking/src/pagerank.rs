//! Personalized, damping-adjusted PageRank over the influence graph
//!
//! The prior is the teleportation target and also absorbs the mass of sink
//! papers, so rank never leaks and never drifts toward uniform.

use crate::graph::InfluenceGraph;

/// Lowest damping the engine will run with
pub const MIN_DAMPING: f64 = 0.01;

/// Highest damping the engine will run with
pub const MAX_DAMPING: f64 = 0.99;

/// PageRank configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor, clamped to [0.01, 0.99] when run
    pub damping: f64,

    /// Maximum iterations
    pub max_iterations: usize,

    /// L1 convergence threshold
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 80,
            tolerance: 1e-9,
        }
    }
}

impl PageRankConfig {
    /// Damping actually used by the iteration
    pub fn effective_damping(&self) -> f64 {
        self.damping.max(MIN_DAMPING).min(MAX_DAMPING)
    }
}

/// Outcome of one PageRank run
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Rank per node in graph order, summing to 1
    pub scores: Vec<f64>,

    /// Iterations performed
    pub iterations: usize,

    /// Whether the L1 delta reached the tolerance within the budget
    pub converged: bool,

    /// L1 delta of the last iteration
    pub delta: f64,
}

/// Power-iteration PageRank scorer
pub struct PageRankScorer {
    config: PageRankConfig,
}

impl PageRankScorer {
    /// Create a new scorer
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    /// Run power iteration with `priors` (parallel to graph nodes) as the
    /// personalization vector.
    pub fn compute(&self, graph: &InfluenceGraph, priors: &[f64]) -> PageRankResult {
        let n = graph.node_count();
        debug_assert_eq!(n, priors.len());
        if n == 0 {
            return PageRankResult {
                scores: Vec::new(),
                iterations: 0,
                converged: true,
                delta: 0.0,
            };
        }

        let damping = self.config.effective_damping();
        let shares: Vec<Vec<(usize, f64)>> =
            (0..n).map(|node| graph.transition_shares(node)).collect();

        let mut rank = vec![1.0 / n as f64; n];
        let mut iterations = 0;
        let mut converged = false;
        let mut delta = f64::INFINITY;

        while iterations < self.config.max_iterations {
            iterations += 1;

            // Teleportation toward the prior
            let mut next: Vec<f64> = priors.iter().map(|&p| (1.0 - damping) * p).collect();
            let mut sink_mass = 0.0;

            for (source, targets) in shares.iter().enumerate() {
                if targets.is_empty() {
                    sink_mass += damping * rank[source];
                    continue;
                }
                for &(target, share) in targets {
                    next[target] += damping * rank[source] * share;
                }
            }

            if sink_mass > 0.0 {
                for (value, &prior) in next.iter_mut().zip(priors) {
                    *value += sink_mass * prior;
                }
            }

            delta = next
                .iter()
                .zip(&rank)
                .map(|(new, old)| (new - old).abs())
                .sum();
            rank = next;

            if delta <= self.config.tolerance {
                converged = true;
                break;
            }
        }

        let total: f64 = rank.iter().sum();
        if total > 0.0 {
            for value in &mut rank {
                *value /= total;
            }
        }

        tracing::debug!(
            nodes = n,
            damping,
            iterations,
            converged,
            delta,
            "PageRank finished"
        );

        PageRankResult {
            scores: rank,
            iterations,
            converged,
            delta,
        }
    }
}
