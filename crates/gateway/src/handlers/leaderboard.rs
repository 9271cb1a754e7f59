//! Impact leaderboard handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use impactrank_common::{
    errors::{AppError, Result},
    metrics,
};
use impactrank_ranking::{
    compute_impact_leaderboard, InfluenceEdge, LeaderboardEntry, Paper, RankingOverrides,
};

/// Leaderboard request
#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardRequest {
    /// Papers to rank; order sets tie-break precedence
    pub papers: Vec<Paper>,

    #[serde(default)]
    pub edges: Vec<InfluenceEdge>,

    /// Citation policy: max, mean
    #[serde(default)]
    pub citation_policy: Option<String>,

    #[serde(default)]
    pub edge_weights: Option<BTreeMap<String, f64>>,

    #[serde(default)]
    pub impact_weights: Option<BTreeMap<String, f64>>,

    #[serde(default)]
    pub damping: Option<f64>,

    #[validate(range(min = 1, max = 10000))]
    #[serde(default)]
    pub iterations: Option<usize>,

    #[serde(default)]
    pub tolerance: Option<f64>,
}

/// Leaderboard response
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub count: usize,
    pub items: Vec<LeaderboardEntry>,
    pub processing_time_ms: u64,
}

/// Rank the supplied papers by impact
pub async fn leaderboard(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LeaderboardRequest>, JsonRejection>,
) -> Result<Json<LeaderboardResponse>> {
    let start = Instant::now();

    let Json(request) = payload.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::BodyTooLarge {
            limit: state.config.server.max_body_bytes,
        },
        _ => AppError::InvalidFormat {
            message: e.body_text(),
        },
    })?;

    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let limit = state.config.server.max_papers;
    if request.papers.len() > limit {
        return Err(AppError::PayloadTooLarge {
            size: request.papers.len(),
            limit,
        });
    }

    // Configuration errors surface here, before any ranking work
    let options = state.defaults.with_overrides(RankingOverrides {
        citation_policy: request.citation_policy,
        edge_weights: request.edge_weights,
        impact_weights: request.impact_weights,
        damping: request.damping,
        iterations: request.iterations,
        tolerance: request.tolerance,
    })?;
    let policy = options.citation_policy;

    let papers = request.papers;
    let edges = request.edges;
    let board = tokio::task::spawn_blocking(move || {
        compute_impact_leaderboard(&papers, &edges, &options)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Ranking task failed: {}", e),
    })??;

    let elapsed = start.elapsed();
    metrics::record_leaderboard(
        elapsed.as_secs_f64(),
        policy.as_str(),
        board.len(),
        board.stats.iterations,
        board.stats.converged,
    );
    metrics::record_dropped_edges("unknown_endpoint", board.stats.dropped.unknown_endpoint);
    metrics::record_dropped_edges("self_loop", board.stats.dropped.self_loop);
    metrics::record_dropped_edges("non_positive_weight", board.stats.dropped.non_positive_weight);

    tracing::info!(
        papers = board.len(),
        policy = %policy,
        iterations = board.stats.iterations,
        converged = board.stats.converged,
        edges_kept = board.stats.edges_kept,
        edges_dropped = board.stats.dropped.total(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Leaderboard ranked"
    );

    if !board.stats.converged && !board.is_empty() {
        tracing::warn!(
            iterations = board.stats.iterations,
            delta = board.stats.delta,
            "PageRank stopped at iteration budget before converging"
        );
    }

    Ok(Json(LeaderboardResponse {
        count: board.len(),
        items: board.entries,
        processing_time_ms: elapsed.as_millis() as u64,
    }))
}
