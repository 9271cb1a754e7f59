//! Citation estimates inherited from a paper's references

use super::{resolve, CitationPolicy};
use crate::errors::{RankingError, Result};
use crate::types::CitationCounts;

/// Weighted average of the resolved counts of `references`, rounded half
/// to even.
///
/// Without `weights` every reference counts once. Supplied weights must be
/// parallel to `references`; missing or negative entries count as zero, and
/// a zero weight total yields 0.
pub fn resolve_inherited(
    references: &[CitationCounts],
    policy: CitationPolicy,
    weights: Option<&[Option<f64>]>,
) -> Result<u64> {
    if references.is_empty() {
        return Ok(0);
    }

    let weights = normalize_weights(references.len(), weights)?;
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return Ok(0);
    }

    let weighted_total: f64 = references
        .iter()
        .zip(&weights)
        .map(|(counts, weight)| resolve(counts, policy) as f64 * weight)
        .sum();

    Ok((weighted_total / total_weight).round_ties_even() as u64)
}

fn normalize_weights(len: usize, weights: Option<&[Option<f64>]>) -> Result<Vec<f64>> {
    match weights {
        None => Ok(vec![1.0; len]),
        Some(weights) if weights.len() != len => Err(RankingError::ReferenceWeightsMismatch {
            paper_id: String::new(),
            weights: weights.len(),
            references: len,
        }),
        Some(weights) => Ok(weights
            .iter()
            .map(|weight| weight.unwrap_or(0.0).max(0.0))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(counts: &[i64]) -> Vec<CitationCounts> {
        counts.iter().map(|&c| CitationCounts::openalex(c)).collect()
    }

    #[test]
    fn test_uniform_average() {
        let inherited = resolve_inherited(&refs(&[10, 20, 40]), CitationPolicy::Max, None).unwrap();
        assert_eq!(inherited, 23);
    }

    #[test]
    fn test_weighted_average() {
        let weights = [Some(3.0), Some(1.0)];
        let inherited =
            resolve_inherited(&refs(&[100, 0]), CitationPolicy::Max, Some(&weights)).unwrap();
        assert_eq!(inherited, 75);
    }

    #[test]
    fn test_missing_and_negative_weights_count_as_zero() {
        let weights = [None, Some(-5.0), Some(2.0)];
        let inherited =
            resolve_inherited(&refs(&[1000, 500, 40]), CitationPolicy::Max, Some(&weights))
                .unwrap();
        assert_eq!(inherited, 40);
    }

    #[test]
    fn test_zero_weight_total_is_zero() {
        let weights = [Some(0.0), None];
        let inherited =
            resolve_inherited(&refs(&[10, 20]), CitationPolicy::Max, Some(&weights)).unwrap();
        assert_eq!(inherited, 0);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let weights = [Some(1.0)];
        let err = resolve_inherited(&refs(&[10, 20]), CitationPolicy::Max, Some(&weights))
            .unwrap_err();
        assert!(matches!(
            err,
            RankingError::ReferenceWeightsMismatch { weights: 1, references: 2, .. }
        ));
    }

    #[test]
    fn test_no_references_ignores_weights() {
        let weights = [Some(1.0), Some(2.0)];
        let inherited = resolve_inherited(&[], CitationPolicy::Mean, Some(&weights)).unwrap();
        assert_eq!(inherited, 0);
    }

    #[test]
    fn test_references_resolved_with_policy() {
        let references = vec![CitationCounts {
            openalex: Some(10),
            semantic_scholar: Some(30),
            scholar_csv: None,
        }];
        assert_eq!(resolve_inherited(&references, CitationPolicy::Max, None).unwrap(), 30);
        assert_eq!(resolve_inherited(&references, CitationPolicy::Mean, None).unwrap(), 20);
    }
}
