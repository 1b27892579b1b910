use super::{Dimension, ScoringContext};
use crate::logic::calculations::{clamp_score, MAX_SCORE};
use crate::logic::profile::RotationCurve;
use crate::logic::reference::ReferenceTables;
use crate::models::{same_crop_name, Crop, DimensionKind, EnvironmentalInputs};

/// Crop rotation fit.
///
/// Rewards planting after a listed beneficial predecessor and penalizes
/// planting the same crop twice in a row.
///
/// Checks, in order:
/// 1. No previous crop: 100
/// 2. Crop lists no predecessors: 85
/// 3. Previous crop is this crop: 20 (monoculture)
/// 4. Previous crop is a listed predecessor: 100
/// 5. Reference table says this crop follows the previous one well: 90
/// 6. Otherwise: 70
pub struct RotationDimension;

impl Dimension for RotationDimension {
    fn id(&self) -> &'static str {
        "rotation"
    }

    fn name(&self) -> &'static str {
        "Crop Rotation"
    }

    fn kind(&self) -> DimensionKind {
        DimensionKind::Rotation
    }

    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64 {
        rotation_score(
            &crop.name,
            &crop.crop_rotation,
            inputs.previous_crop(),
            &ctx.profile.rotation,
            ctx.reference,
        )
    }
}

pub fn rotation_score(
    crop_name: &str,
    predecessors: &[String],
    previous: Option<&str>,
    curve: &RotationCurve,
    reference: &ReferenceTables,
) -> f64 {
    let Some(previous) = previous else {
        return MAX_SCORE;
    };

    let score = if predecessors.is_empty() {
        curve.no_data
    } else if same_crop_name(previous, crop_name) {
        curve.same_crop
    } else if predecessors.iter().any(|p| same_crop_name(p, previous)) {
        MAX_SCORE
    } else if reference.is_beneficial_successor(previous, crop_name) {
        curve.beneficial_successor
    } else {
        curve.acceptable
    };
    clamp_score(score)
}
