use super::{Dimension, ScoringContext};
use crate::logic::calculations::range_score;
use crate::models::{Crop, DimensionKind, EnvironmentalInputs};

/// Soil acidity fit.
///
/// pH carries the largest weight: most crops lock out nutrients once soil
/// drifts more than a point outside their range.
///
/// Scoring (standard profile):
/// - No range data: 60
/// - In range: 100 at the midpoint, 95 at either bound
/// - Out of range: -15 per pH unit from the nearer bound
pub struct PhDimension;

impl Dimension for PhDimension {
    fn id(&self) -> &'static str {
        "ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn kind(&self) -> DimensionKind {
        DimensionKind::Ph
    }

    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64 {
        range_score(crop.ph_range(), inputs.ph, &ctx.profile.ph)
    }
}
