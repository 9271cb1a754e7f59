//! Citation count resolution
//!
//! Collapses noisy multi-source citation counts into a single integer and,
//! for papers nobody has counted yet, estimates one from their references.

mod inherited;

pub use inherited::resolve_inherited;

use crate::errors::{RankingError, Result};
use crate::types::{CitationCounts, Paper};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How multiple citation sources are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationPolicy {
    /// Largest reported count
    #[default]
    Max,
    /// Arithmetic mean, rounded half to even
    Mean,
}

impl CitationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationPolicy::Max => "max",
            CitationPolicy::Mean => "mean",
        }
    }
}

impl fmt::Display for CitationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationPolicy {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "max" => Ok(CitationPolicy::Max),
            "mean" => Ok(CitationPolicy::Mean),
            other => Err(RankingError::UnsupportedCitationPolicy {
                policy: other.to_string(),
            }),
        }
    }
}

/// Resolve one paper's counts under `policy`. No present source yields 0.
pub fn resolve(counts: &CitationCounts, policy: CitationPolicy) -> u64 {
    match policy {
        CitationPolicy::Max => counts.present().max().unwrap_or(0),
        CitationPolicy::Mean => {
            let (sum, n) = counts
                .present()
                .fold((0.0f64, 0usize), |(sum, n), value| (sum + value as f64, n + 1));
            if n == 0 {
                0
            } else {
                (sum / n as f64).round_ties_even() as u64
            }
        }
    }
}

/// Direct, inherited, and effective citation counts for one paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationSummary {
    pub direct: u64,
    pub inherited: u64,
}

impl CitationSummary {
    /// Own count when positive, otherwise the inherited estimate
    pub fn effective(&self) -> u64 {
        if self.direct > 0 {
            self.direct
        } else {
            self.inherited
        }
    }
}

/// Resolve both the paper's own count and its reference-inherited estimate.
///
/// The inherited estimate is always computed so that malformed reference
/// weights are reported even for papers with direct counts.
pub fn summarize(paper: &Paper, policy: CitationPolicy) -> Result<CitationSummary> {
    let direct = resolve(&paper.citations, policy);
    let inherited = resolve_inherited(
        &paper.reference_citations,
        policy,
        paper.reference_weights.as_deref(),
    )
    .map_err(|err| match err {
        RankingError::ReferenceWeightsMismatch {
            weights,
            references,
            ..
        } => RankingError::ReferenceWeightsMismatch {
            paper_id: paper.paper_id.clone(),
            weights,
            references,
        },
        other => other,
    })?;

    Ok(CitationSummary { direct, inherited })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sources() -> CitationCounts {
        CitationCounts {
            openalex: Some(100),
            semantic_scholar: Some(50),
            scholar_csv: Some(80),
        }
    }

    #[test]
    fn test_max_and_mean() {
        assert_eq!(resolve(&all_sources(), CitationPolicy::Max), 100);
        assert_eq!(resolve(&all_sources(), CitationPolicy::Mean), 77);
    }

    #[test]
    fn test_no_sources_is_zero() {
        let empty = CitationCounts::default();
        assert_eq!(resolve(&empty, CitationPolicy::Max), 0);
        assert_eq!(resolve(&empty, CitationPolicy::Mean), 0);
    }

    #[test]
    fn test_mean_ignores_absent_sources() {
        let counts = CitationCounts {
            openalex: Some(10),
            semantic_scholar: None,
            scholar_csv: Some(20),
        };
        assert_eq!(resolve(&counts, CitationPolicy::Mean), 15);
    }

    #[test]
    fn test_mean_rounds_half_to_even() {
        let low = CitationCounts {
            openalex: Some(2),
            semantic_scholar: Some(3),
            scholar_csv: None,
        };
        let high = CitationCounts {
            openalex: Some(3),
            semantic_scholar: Some(4),
            scholar_csv: None,
        };
        assert_eq!(resolve(&low, CitationPolicy::Mean), 2);
        assert_eq!(resolve(&high, CitationPolicy::Mean), 4);
    }

    #[test]
    fn test_negative_counts_clamped() {
        let counts = CitationCounts {
            openalex: Some(-30),
            semantic_scholar: Some(-1),
            scholar_csv: None,
        };
        assert_eq!(resolve(&counts, CitationPolicy::Max), 0);
        assert_eq!(resolve(&counts, CitationPolicy::Mean), 0);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("max".parse::<CitationPolicy>().unwrap(), CitationPolicy::Max);
        assert_eq!("mean".parse::<CitationPolicy>().unwrap(), CitationPolicy::Mean);
        assert_eq!(
            "median".parse::<CitationPolicy>(),
            Err(RankingError::UnsupportedCitationPolicy {
                policy: "median".into()
            })
        );
        assert!("MAX".parse::<CitationPolicy>().is_err());
    }

    #[test]
    fn test_effective_prefers_direct() {
        let paper = Paper::new("p1")
            .with_citations(CitationCounts::openalex(7))
            .with_references(vec![CitationCounts::openalex(1000)], None);
        let summary = summarize(&paper, CitationPolicy::Max).unwrap();
        assert_eq!(summary.direct, 7);
        assert_eq!(summary.inherited, 1000);
        assert_eq!(summary.effective(), 7);
    }

    #[test]
    fn test_effective_falls_back_to_inherited() {
        let paper = Paper::new("p1").with_references(
            vec![CitationCounts::openalex(10), CitationCounts::openalex(30)],
            None,
        );
        let summary = summarize(&paper, CitationPolicy::Max).unwrap();
        assert_eq!(summary.direct, 0);
        assert_eq!(summary.effective(), 20);
    }

    #[test]
    fn test_summarize_names_paper_on_mismatch() {
        let paper = Paper::new("p9")
            .with_citations(CitationCounts::openalex(5))
            .with_references(vec![CitationCounts::openalex(10)], Some(vec![Some(1.0), Some(2.0)]));
        let err = summarize(&paper, CitationPolicy::Max).unwrap_err();
        assert_eq!(
            err,
            RankingError::ReferenceWeightsMismatch {
                paper_id: "p9".into(),
                weights: 2,
                references: 1,
            }
        );
    }
}
