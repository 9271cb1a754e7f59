//! Core data model for a ranking request
//!
//! All values are supplied by the caller and consumed within one call.

use serde::{Deserialize, Serialize};

/// Edge kind for a resolved bibliographic citation
pub const CITATION_KIND: &str = "citation";

/// Edge kind for an influence relation inferred by an upstream heuristic
pub const LLM_INFERRED_KIND: &str = "llm_inferred";

/// Citation counts for one paper from independent provenance sources.
///
/// `None` means the source has no answer, which is not the same as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCounts {
    #[serde(default)]
    pub openalex: Option<i64>,

    #[serde(default)]
    pub semantic_scholar: Option<i64>,

    #[serde(default)]
    pub scholar_csv: Option<i64>,
}

impl CitationCounts {
    /// Counts known to OpenAlex only
    pub fn openalex(count: i64) -> Self {
        Self {
            openalex: Some(count),
            ..Self::default()
        }
    }

    /// Present sources, each clamped to be non-negative
    pub fn present(&self) -> impl Iterator<Item = u64> + '_ {
        [self.openalex, self.semantic_scholar, self.scholar_csv]
            .into_iter()
            .flatten()
            .map(|value| value.max(0) as u64)
    }
}

/// A paper to be ranked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique, non-empty identifier
    pub paper_id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub doi: Option<String>,

    /// Heuristic novelty in [0, 1]; out-of-range values are clamped
    #[serde(default)]
    pub novelty_score: f64,

    /// Heuristic evidence strength in [0, 1]; out-of-range values are clamped
    #[serde(default)]
    pub evidence_score: f64,

    /// The paper's own citation counts
    #[serde(default)]
    pub citations: CitationCounts,

    /// Citation counts of the papers this paper references
    #[serde(default)]
    pub reference_citations: Vec<CitationCounts>,

    /// Optional per-reference weights, parallel to `reference_citations`
    #[serde(default)]
    pub reference_weights: Option<Vec<Option<f64>>>,
}

impl Paper {
    pub fn new(paper_id: impl Into<String>) -> Self {
        Self {
            paper_id: paper_id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_scores(mut self, novelty: f64, evidence: f64) -> Self {
        self.novelty_score = novelty;
        self.evidence_score = evidence;
        self
    }

    pub fn with_citations(mut self, citations: CitationCounts) -> Self {
        self.citations = citations;
        self
    }

    pub fn with_references(
        mut self,
        reference_citations: Vec<CitationCounts>,
        reference_weights: Option<Vec<Option<f64>>>,
    ) -> Self {
        self.reference_citations = reference_citations;
        self.reference_weights = reference_weights;
        self
    }

    /// Novelty clamped to [0, 1]
    pub fn novelty(&self) -> f64 {
        clamp01(self.novelty_score)
    }

    /// Evidence clamped to [0, 1]
    pub fn evidence(&self) -> f64 {
        clamp01(self.evidence_score)
    }
}

/// Directed, typed influence relation between two papers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEdge {
    pub source_id: String,

    pub target_id: String,

    /// Open kind tag; unknown kinds get the fallback weight
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Confidence in [0, 1]; out-of-range values are clamped
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_kind() -> String { CITATION_KIND.to_string() }
fn default_confidence() -> f64 { 1.0 }

impl InfluenceEdge {
    /// A full-confidence citation edge
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: default_kind(),
            confidence: default_confidence(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Clamp to [0, 1]; NaN maps to 0
pub(crate) fn clamp01(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_skips_missing_and_clamps_negative() {
        let counts = CitationCounts {
            openalex: Some(-4),
            semantic_scholar: None,
            scholar_csv: Some(12),
        };
        let values: Vec<u64> = counts.present().collect();
        assert_eq!(values, vec![0, 12]);
    }

    #[test]
    fn test_scores_are_clamped() {
        let paper = Paper::new("p1").with_scores(1.7, -0.2);
        assert_eq!(paper.novelty(), 1.0);
        assert_eq!(paper.evidence(), 0.0);
    }

    #[test]
    fn test_clamp01_nan() {
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    #[test]
    fn test_deserialize_defaults() {
        let paper: Paper = serde_json::from_str(r#"{"paper_id": "p1"}"#).unwrap();
        assert_eq!(paper.citations, CitationCounts::default());
        assert!(paper.reference_citations.is_empty());
        assert!(paper.reference_weights.is_none());

        let edge: InfluenceEdge =
            serde_json::from_str(r#"{"source_id": "a", "target_id": "b"}"#).unwrap();
        assert_eq!(edge.kind, CITATION_KIND);
        assert_eq!(edge.confidence, 1.0);
    }
}
