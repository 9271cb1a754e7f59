//! Weighted influence graph
//!
//! Turns the caller's noisy edge list into a weighted outgoing adjacency over
//! the paper set. Edges that cannot contribute are dropped, not rejected.

use crate::types::{clamp01, InfluenceEdge, Paper, LLM_INFERRED_KIND};
use std::collections::{BTreeMap, HashMap};

/// Confidence floor: a low-confidence edge is discounted, never erased
pub const MIN_CONFIDENCE: f64 = 0.05;

/// Base weight per edge kind
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWeights {
    weights: BTreeMap<String, f64>,
    fallback: f64,
}

impl EdgeWeights {
    /// Build a weight table.
    ///
    /// Unknown kinds take the table's `llm_inferred` weight, or
    /// `default_fallback` when the table has none.
    pub fn new(weights: BTreeMap<String, f64>, default_fallback: f64) -> Self {
        let fallback = weights
            .get(LLM_INFERRED_KIND)
            .copied()
            .unwrap_or(default_fallback);
        Self { weights, fallback }
    }

    /// Base weight for `kind`, never negative
    pub fn base_weight(&self, kind: &str) -> f64 {
        self.weights
            .get(kind)
            .copied()
            .unwrap_or(self.fallback)
            .max(0.0)
    }
}

impl Default for EdgeWeights {
    fn default() -> Self {
        Self::new(
            BTreeMap::from([
                ("citation".to_string(), 1.0),
                (LLM_INFERRED_KIND.to_string(), 0.5),
            ]),
            0.3,
        )
    }
}

/// Counts of edges discarded while building the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DroppedEdges {
    pub unknown_endpoint: usize,
    pub self_loop: usize,
    pub non_positive_weight: usize,
}

impl DroppedEdges {
    pub fn total(&self) -> usize {
        self.unknown_endpoint + self.self_loop + self.non_positive_weight
    }
}

/// Weighted directed graph over one request's papers.
///
/// Nodes are indexed in paper input order; targets of each source keep the
/// order in which they were first seen. Accumulated weights saturate at
/// `f64::MAX`.
#[derive(Debug, Clone)]
pub struct InfluenceGraph {
    /// Adjacency list: source -> (target, accumulated weight)
    outgoing: Vec<Vec<(usize, f64)>>,

    dropped: DroppedEdges,
}

impl InfluenceGraph {
    /// Build the graph for `papers` from `edges`
    pub fn build(papers: &[Paper], edges: &[InfluenceEdge], weights: &EdgeWeights) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(papers.len());
        for (i, paper) in papers.iter().enumerate() {
            index.entry(paper.paper_id.as_str()).or_insert(i);
        }

        let mut outgoing: Vec<Vec<(usize, f64)>> = vec![Vec::new(); papers.len()];
        let mut slots: HashMap<(usize, usize), usize> = HashMap::new();
        let mut dropped = DroppedEdges::default();

        for edge in edges {
            let endpoints = (
                index.get(edge.source_id.as_str()),
                index.get(edge.target_id.as_str()),
            );
            let (source, target) = match endpoints {
                (Some(&s), Some(&t)) => (s, t),
                _ => {
                    tracing::debug!(
                        source = %edge.source_id,
                        target = %edge.target_id,
                        "Dropping edge with unknown endpoint"
                    );
                    dropped.unknown_endpoint += 1;
                    continue;
                }
            };

            if source == target {
                tracing::debug!(paper = %edge.source_id, "Dropping self-loop edge");
                dropped.self_loop += 1;
                continue;
            }

            let confidence = MIN_CONFIDENCE.max(clamp01(edge.confidence));
            let weight = (weights.base_weight(&edge.kind) * confidence).min(f64::MAX);
            if weight <= 0.0 {
                tracing::debug!(
                    source = %edge.source_id,
                    target = %edge.target_id,
                    kind = %edge.kind,
                    "Dropping zero-weight edge"
                );
                dropped.non_positive_weight += 1;
                continue;
            }

            match slots.get(&(source, target)) {
                Some(&slot) => {
                    let total = &mut outgoing[source][slot].1;
                    *total = (*total + weight).min(f64::MAX);
                }
                None => {
                    slots.insert((source, target), outgoing[source].len());
                    outgoing[source].push((target, weight));
                }
            }
        }

        Self { outgoing, dropped }
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of distinct (source, target) pairs
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Share of a node's outgoing weight sent to each target.
    ///
    /// Shares sum to 1; a sink yields none. Weights are scaled by the node's
    /// heaviest edge first so sums of near-`f64::MAX` weights stay finite.
    pub fn transition_shares(&self, node: usize) -> Vec<(usize, f64)> {
        let edges = &self.outgoing[node];
        let peak = edges.iter().map(|&(_, w)| w).fold(0.0, f64::max);
        if peak <= 0.0 {
            return Vec::new();
        }
        let total: f64 = edges.iter().map(|&(_, w)| w / peak).sum();
        edges
            .iter()
            .map(|&(target, w)| (target, (w / peak) / total))
            .collect()
    }

    /// Edges discarded during construction
    pub fn dropped(&self) -> DroppedEdges {
        self.dropped
    }
}
