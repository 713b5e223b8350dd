//! Ranking of candidate guides by an external scoring collaborator.
use rayon::prelude::*;
use serde::Serialize;

use crate::constants::{FINAL_SCORE_RATIO, FORECAST_RATIO};

/// Scores computed for a single guide sequence.
///
/// Implementations must be pure: the same guide always yields the same scores.
pub trait GuideScorer: Sync {
    fn off_target(&self, guide: &str) -> f64;

    fn raw_on_target(&self, guide: &str) -> f64;

    fn finetune_on_target(&self, guide: &str, raw: f64) -> f64;

    fn forecast(&self, guide: &str) -> f64;
}

/// Stand-in used until real models are wired up; every guide scores 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderScorer;

impl GuideScorer for PlaceholderScorer {
    fn off_target(&self, _guide: &str) -> f64 {
        0.0
    }

    fn raw_on_target(&self, _guide: &str) -> f64 {
        0.0
    }

    fn finetune_on_target(&self, _guide: &str, raw: f64) -> f64 {
        raw
    }

    fn forecast(&self, _guide: &str) -> f64 {
        0.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedGuide {
    pub guide: String,
    pub off_target: f64,
    pub raw_on_target: f64,
    pub fine_tuned_on_target: f64,
    pub forecast: f64,
    pub final_score: f64,
}

pub fn final_score(fine_tuned_on_target: f64, forecast: f64) -> f64 {
    FINAL_SCORE_RATIO * fine_tuned_on_target + FORECAST_RATIO * forecast
}

pub fn score_guide<S: GuideScorer + ?Sized>(scorer: &S, guide: &str) -> RankedGuide {
    let off_target = scorer.off_target(guide);
    let raw_on_target = scorer.raw_on_target(guide);
    let fine_tuned_on_target = scorer.finetune_on_target(guide, raw_on_target);
    let forecast = scorer.forecast(guide);

    RankedGuide {
        guide: guide.to_string(),
        off_target,
        raw_on_target,
        fine_tuned_on_target,
        forecast,
        final_score: final_score(fine_tuned_on_target, forecast),
    }
}

/// Scores guides in parallel and returns the best `limit`, highest first.
/// Ties keep their input order.
pub fn rank<S: GuideScorer + ?Sized>(scorer: &S, guides: &[String], limit: usize) -> Vec<RankedGuide> {
    let mut ranked: Vec<RankedGuide> = guides
        .par_iter()
        .map(|guide| score_guide(scorer, guide))
        .collect();

    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);

    ranked
}
