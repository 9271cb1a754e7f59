//! Property-based tests using proptest

use impactrank_ranking::citation::CitationSummary;
use impactrank_ranking::prior::build_priors;
use impactrank_ranking::*;
use proptest::prelude::*;

fn arb_counts() -> impl Strategy<Value = CitationCounts> {
    (
        proptest::option::of(-50i64..20_000),
        proptest::option::of(-50i64..20_000),
        proptest::option::of(-50i64..20_000),
    )
        .prop_map(|(openalex, semantic_scholar, scholar_csv)| CitationCounts {
            openalex,
            semantic_scholar,
            scholar_csv,
        })
}

fn arb_papers() -> impl Strategy<Value = Vec<Paper>> {
    proptest::collection::vec((-0.5f64..1.5, -0.5f64..1.5, arb_counts()), 1..12).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (novelty, evidence, counts))| {
                    Paper::new(format!("p{}", i))
                        .with_scores(novelty, evidence)
                        .with_citations(counts)
                })
                .collect()
        },
    )
}

/// Edges over ids p0..p14, so some endpoints are unknown and some are loops
fn arb_edges() -> impl Strategy<Value = Vec<InfluenceEdge>> {
    let kinds = prop_oneof![
        Just("citation".to_string()),
        Just("llm_inferred".to_string()),
        Just("shared_author".to_string()),
    ];
    proptest::collection::vec((0usize..15, 0usize..15, kinds, -0.5f64..1.5), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(s, t, kind, confidence)| {
                    InfluenceEdge::new(format!("p{}", s), format!("p{}", t))
                        .with_kind(kind)
                        .with_confidence(confidence)
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_output_length_matches_input(papers in arb_papers(), edges in arb_edges()) {
        let options = RankingOptions::default();
        let board = compute_impact_leaderboard(&papers, &edges, &options).unwrap();
        prop_assert_eq!(board.len(), papers.len());
    }

    #[test]
    fn test_scores_are_bounded(papers in arb_papers(), edges in arb_edges()) {
        let options = RankingOptions::default();
        let board = compute_impact_leaderboard(&papers, &edges, &options).unwrap();
        for entry in &board.entries {
            prop_assert!((0.0..=1.0).contains(&entry.pagerank_score));
            prop_assert!((0.0..=1.0).contains(&entry.impact_score));
            prop_assert!((0.0..=1.0).contains(&entry.novelty_score));
            prop_assert!((0.0..=1.0).contains(&entry.evidence_score));
        }
        for pair in board.entries.windows(2) {
            prop_assert!(pair[0].impact_score >= pair[1].impact_score);
        }
    }

    #[test]
    fn test_priors_sum_to_one(papers in arb_papers()) {
        let summaries: Vec<CitationSummary> = papers
            .iter()
            .map(|p| citation::summarize(p, CitationPolicy::Max).unwrap())
            .collect();
        let priors = build_priors(&papers, &summaries);
        let total: f64 = priors.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "priors sum to {}", total);
    }

    #[test]
    fn test_pagerank_scores_sum_to_one(
        papers in arb_papers(),
        edges in arb_edges(),
        damping in -1.0f64..2.0
    ) {
        let summaries: Vec<CitationSummary> = papers
            .iter()
            .map(|p| citation::summarize(p, CitationPolicy::Mean).unwrap())
            .collect();
        let priors = build_priors(&papers, &summaries);
        let graph = InfluenceGraph::build(&papers, &edges, &EdgeWeights::default());
        let config = PageRankConfig { damping, ..PageRankConfig::default() };
        let result = PageRankScorer::new(config).compute(&graph, &priors);

        let total: f64 = result.scores.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-6, "scores sum to {}", total);
        prop_assert!(result.iterations <= 80);
    }

    #[test]
    fn test_leaderboard_deterministic(papers in arb_papers(), edges in arb_edges()) {
        let options = RankingOptions::default();
        let first = compute_impact_leaderboard(&papers, &edges, &options).unwrap();
        let second = compute_impact_leaderboard(&papers, &edges, &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_mean_never_exceeds_max(counts in arb_counts()) {
        let mean = resolve(&counts, CitationPolicy::Mean);
        let max = resolve(&counts, CitationPolicy::Max);
        prop_assert!(mean <= max);
    }
}
