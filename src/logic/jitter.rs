//! Optional display-side tie breaking.
//!
//! The engine itself is deterministic. Presentation layers that want near-equal
//! crops shuffled a little can apply a small, explicitly seeded perturbation
//! here; the same seed always yields the same ordering.

use super::calculations::{clamp_score, round2};
use super::profile::TierThresholds;
use crate::models::CropRecommendation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default perturbation, in points either side of the original score.
pub const DEFAULT_AMPLITUDE: f64 = 2.0;

/// Perturb each total by up to `amplitude` points, re-tier and re-rank.
///
/// Sub-score breakdowns are left untouched.
pub fn apply_seeded_jitter(
    mut recommendations: Vec<CropRecommendation>,
    seed: u64,
    amplitude: f64,
    tiers: &TierThresholds,
) -> Vec<CropRecommendation> {
    if !amplitude.is_finite() || amplitude <= 0.0 {
        return recommendations;
    }

    // Draw in catalog order so the result does not depend on the incoming ranking.
    recommendations.sort_by_key(|r| r.catalog_index);

    let mut rng = StdRng::seed_from_u64(seed);
    for rec in &mut recommendations {
        let delta: f64 = rng.gen_range(-amplitude..=amplitude);
        rec.suitability_score = clamp_score(round2(rec.suitability_score + delta));
        rec.suitability_level = tiers.classify(rec.suitability_score);
    }

    recommendations.sort_by(|a, b| {
        b.suitability_score
            .total_cmp(&a.suitability_score)
            .then_with(|| a.catalog_index.cmp(&b.catalog_index))
    });
    tracing::debug!(seed, amplitude, "Applied seeded score jitter");
    recommendations
}
