//! ImpactRank ranking engine
//!
//! Ranks a supplied set of papers by impact:
//! - Citation resolution across noisy sources, with inheritance from references
//! - Prior belief per paper from citations, evidence, and novelty
//! - Weighted influence graph from typed, confidence-scored edges
//! - Personalized PageRank with prior-directed sink redistribution
//! - Linear impact blend and a deterministic leaderboard
//!
//! Every call is pure and synchronous: no I/O, no shared state.

pub mod citation;
pub mod errors;
pub mod graph;
pub mod leaderboard;
pub mod options;
pub mod pagerank;
pub mod prior;
pub mod scoring;
pub mod types;

pub use citation::{resolve, resolve_inherited, CitationPolicy, CitationSummary};
pub use errors::{RankingError, Result};
pub use graph::{DroppedEdges, EdgeWeights, InfluenceGraph};
pub use leaderboard::{
    compute_impact_leaderboard, CitationBreakdown, Leaderboard, LeaderboardEntry, RankingStats,
};
pub use options::{RankingOptions, RankingOverrides};
pub use pagerank::{PageRankConfig, PageRankResult, PageRankScorer};
pub use scoring::ImpactWeights;
pub use types::{CitationCounts, InfluenceEdge, Paper};
