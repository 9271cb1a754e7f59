//! API handlers module

pub mod health;
pub mod leaderboard;

use axum::http::Uri;
use impactrank_common::errors::AppError;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        resource_type: "route".to_string(),
        id: uri.path().to_string(),
    }
}
