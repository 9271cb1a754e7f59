//! Impact leaderboard assembly
//!
//! Runs the full pipeline for one request: citation resolution, priors,
//! influence graph, PageRank, impact blending, and a stable descending sort.

use crate::citation::{self, CitationSummary};
use crate::errors::{RankingError, Result};
use crate::graph::{DroppedEdges, InfluenceGraph};
use crate::options::RankingOptions;
use crate::pagerank::PageRankScorer;
use crate::prior::build_priors;
use crate::scoring::normalize_by_max;
use crate::types::{InfluenceEdge, Paper};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Citation provenance reported with each ranked paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBreakdown {
    /// Effective count used for the prior
    pub resolved: u64,
    pub direct: u64,
    pub inherited: u64,
    pub openalex: Option<i64>,
    pub semantic_scholar: Option<i64>,
    pub scholar_csv: Option<i64>,
}

/// One ranked paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub paper_id: String,
    pub title: Option<String>,
    pub doi: Option<String>,

    /// PageRank scaled so the top paper is 1.0
    pub pagerank_score: f64,
    pub novelty_score: f64,
    pub evidence_score: f64,
    pub impact_score: f64,
    pub citations: CitationBreakdown,
}

/// How the ranking run went
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankingStats {
    pub iterations: usize,
    pub converged: bool,
    pub delta: f64,
    pub edges_kept: usize,
    pub dropped: DroppedEdges,
}

/// Ranked papers plus run statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    /// Entries sorted by descending impact; ties keep input order
    pub entries: Vec<LeaderboardEntry>,
    pub stats: RankingStats,
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank `papers` by impact.
///
/// All validation happens before any computation; an error means no
/// partial output. Bad edges are dropped silently.
#[tracing::instrument(
    skip_all,
    fields(papers = papers.len(), edges = edges.len(), policy = %options.citation_policy)
)]
pub fn compute_impact_leaderboard(
    papers: &[Paper],
    edges: &[InfluenceEdge],
    options: &RankingOptions,
) -> Result<Leaderboard> {
    validate_papers(papers)?;
    let summaries: Vec<CitationSummary> = papers
        .iter()
        .map(|paper| citation::summarize(paper, options.citation_policy))
        .collect::<Result<_>>()?;

    if papers.is_empty() {
        return Ok(Leaderboard::default());
    }

    let priors = build_priors(papers, &summaries);
    let graph = InfluenceGraph::build(papers, edges, &options.edge_weights);
    let pagerank = PageRankScorer::new(options.pagerank.clone()).compute(&graph, &priors);
    let rank_norm = normalize_by_max(&pagerank.scores);

    let mut entries: Vec<LeaderboardEntry> = papers
        .iter()
        .zip(&summaries)
        .zip(&rank_norm)
        .map(|((paper, summary), &rank)| {
            let novelty = paper.novelty();
            let evidence = paper.evidence();
            let impact = options.impact_weights.blend(rank, evidence, novelty);

            LeaderboardEntry {
                paper_id: paper.paper_id.clone(),
                title: paper.title.clone(),
                doi: paper.doi.clone(),
                pagerank_score: round6(rank),
                novelty_score: round6(novelty),
                evidence_score: round6(evidence),
                impact_score: round6(impact),
                citations: CitationBreakdown {
                    resolved: summary.effective(),
                    direct: summary.direct,
                    inherited: summary.inherited,
                    openalex: paper.citations.openalex,
                    semantic_scholar: paper.citations.semantic_scholar,
                    scholar_csv: paper.citations.scholar_csv,
                },
            }
        })
        .collect();

    // Stable: equal impact keeps input order
    entries.sort_by(|a, b| {
        b.impact_score
            .partial_cmp(&a.impact_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let stats = RankingStats {
        iterations: pagerank.iterations,
        converged: pagerank.converged,
        delta: pagerank.delta,
        edges_kept: graph.edge_count(),
        dropped: graph.dropped(),
    };

    tracing::debug!(
        iterations = stats.iterations,
        converged = stats.converged,
        edges_kept = stats.edges_kept,
        edges_dropped = stats.dropped.total(),
        "Leaderboard computed"
    );

    Ok(Leaderboard { entries, stats })
}

fn validate_papers(papers: &[Paper]) -> Result<()> {
    let mut seen = HashSet::with_capacity(papers.len());
    for (index, paper) in papers.iter().enumerate() {
        if paper.paper_id.is_empty() {
            return Err(RankingError::EmptyPaperId { index });
        }
        if !seen.insert(paper.paper_id.as_str()) {
            return Err(RankingError::DuplicatePaperId {
                paper_id: paper.paper_id.clone(),
            });
        }
    }
    Ok(())
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
