use super::{Dimension, ScoringContext};
use crate::logic::calculations::range_score;
use crate::models::{Crop, DimensionKind, EnvironmentalInputs};

/// Annual rainfall fit (mm).
///
/// Rainfall ranges span hundreds of millimetres, so the per-mm slope is two
/// orders of magnitude smaller than the temperature slope: 100 mm outside
/// the range costs 8 points in the standard profile.
pub struct RainfallDimension;

impl Dimension for RainfallDimension {
    fn id(&self) -> &'static str {
        "rainfall"
    }

    fn name(&self) -> &'static str {
        "Rainfall"
    }

    fn kind(&self) -> DimensionKind {
        DimensionKind::Rainfall
    }

    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64 {
        range_score(crop.rainfall_range(), inputs.rainfall, &ctx.profile.rainfall)
    }
}
