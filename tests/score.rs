extern crate hdrguide;

use hdrguide::score::*;

struct LengthScorer;

// Scores guides by how many G/C bases they contain
impl GuideScorer for LengthScorer {
    fn off_target(&self, guide: &str) -> f64 {
        guide.len() as f64
    }

    fn raw_on_target(&self, guide: &str) -> f64 {
        guide.matches(|c: char| c == 'G' || c == 'C').count() as f64
    }

    fn finetune_on_target(&self, _guide: &str, raw: f64) -> f64 {
        raw * 10.0
    }

    fn forecast(&self, guide: &str) -> f64 {
        guide.matches('A').count() as f64
    }
}

fn guides(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_final_score_blend() {
    assert!((final_score(10.0, 20.0) - 17.0).abs() < 1e-9);
    assert!((final_score(0.0, 0.0)).abs() < 1e-9);
}

#[test]
fn test_score_guide() {
    let ranked = score_guide(&LengthScorer, "GCAA");

    assert_eq!(ranked.guide, "GCAA");
    assert_eq!(ranked.off_target, 4.0);
    assert_eq!(ranked.raw_on_target, 2.0);
    assert_eq!(ranked.fine_tuned_on_target, 20.0);
    assert_eq!(ranked.forecast, 2.0);
    assert!((ranked.final_score - (0.3 * 20.0 + 0.7 * 2.0)).abs() < 1e-9);
}

#[test]
fn test_rank_descending() {
    let ranked = rank(&LengthScorer, &guides(&["AAAA", "GGGG", "GAAA"]), 10);
    let order: Vec<&str> = ranked.iter().map(|r| r.guide.as_str()).collect();

    assert_eq!(order, vec!["GGGG", "GAAA", "AAAA"]);
}

#[test]
fn test_rank_truncates() {
    let ranked = rank(&LengthScorer, &guides(&["AAAA", "GGGG", "GAAA"]), 2);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].guide, "GGGG");
}

#[test]
fn test_rank_ties_keep_input_order() {
    let input = guides(&["TTTT", "TTTA", "ATTT", "TTAT"]);
    let ranked = rank(&PlaceholderScorer, &input, 20);
    let order: Vec<String> = ranked.into_iter().map(|r| r.guide).collect();

    assert_eq!(order, input);
}

#[test]
fn test_placeholder_scores() {
    let ranked = score_guide(&PlaceholderScorer, "ACGT");

    assert_eq!(ranked.final_score, 0.0);
    assert_eq!(ranked.fine_tuned_on_target, ranked.raw_on_target);
}
