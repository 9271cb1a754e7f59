//! Prior belief per paper
//!
//! The prior is both the teleportation target of the random walk and the
//! distribution that absorbs rank mass trapped at sink papers.

use crate::citation::CitationSummary;
use crate::types::{clamp01, Paper};

/// Citation count at which the citation signal saturates to 1.0
pub const CITATION_SATURATION: f64 = 10_000.0;

const CITATION_SHARE: f64 = 0.6;
const EVIDENCE_SHARE: f64 = 0.25;
const NOVELTY_SHARE: f64 = 0.15;

/// Log-compressed citation signal in [0, 1]
pub fn citation_signal(citations: u64) -> f64 {
    clamp01((citations as f64).ln_1p() / CITATION_SATURATION.ln_1p())
}

/// Unnormalized belief mass for one paper
pub fn raw_mass(paper: &Paper, effective_citations: u64) -> f64 {
    CITATION_SHARE * citation_signal(effective_citations)
        + EVIDENCE_SHARE * paper.evidence()
        + NOVELTY_SHARE * paper.novelty()
}

/// Normalized prior distribution, parallel to `papers`.
///
/// Falls back to uniform when the total raw mass is not positive.
pub fn build_priors(papers: &[Paper], citations: &[CitationSummary]) -> Vec<f64> {
    debug_assert_eq!(papers.len(), citations.len());
    if papers.is_empty() {
        return Vec::new();
    }

    let raw: Vec<f64> = papers
        .iter()
        .zip(citations)
        .map(|(paper, summary)| raw_mass(paper, summary.effective()))
        .collect();

    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        let uniform = 1.0 / papers.len() as f64;
        return vec![uniform; papers.len()];
    }

    raw.into_iter().map(|mass| mass / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(direct: u64) -> CitationSummary {
        CitationSummary { direct, inherited: 0 }
    }

    #[test]
    fn test_citation_signal_bounds() {
        assert_eq!(citation_signal(0), 0.0);
        assert!((citation_signal(10_000) - 1.0).abs() < 1e-12);
        assert_eq!(citation_signal(5_000_000), 1.0);
        assert!(citation_signal(100) < citation_signal(1000));
    }

    #[test]
    fn test_priors_sum_to_one() {
        let papers = vec![
            Paper::new("a").with_scores(0.4, 0.5),
            Paper::new("b").with_scores(0.9, 0.1),
            Paper::new("c"),
        ];
        let citations = vec![summary(10), summary(0), summary(250)];
        let priors = build_priors(&papers, &citations);
        let total: f64 = priors.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(priors.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_all_zero_falls_back_to_uniform() {
        let papers = vec![Paper::new("a"), Paper::new("b"), Paper::new("c"), Paper::new("d")];
        let citations = vec![summary(0); 4];
        let priors = build_priors(&papers, &citations);
        assert_eq!(priors, vec![0.25; 4]);
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        let wild = Paper::new("a").with_scores(7.0, -3.0);
        let tame = Paper::new("b").with_scores(1.0, 0.0);
        assert_eq!(raw_mass(&wild, 0), raw_mass(&tame, 0));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_priors(&[], &[]).is_empty());
    }
}
