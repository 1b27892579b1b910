use super::{Dimension, ScoringContext};
use crate::logic::calculations::range_score;
use crate::models::{Crop, DimensionKind, EnvironmentalInputs};

/// Ambient temperature fit (°C).
///
/// Crops tolerate temperature swings far better than pH swings, so both the
/// in-range edge penalty and the out-of-range slope are gentler.
pub struct TemperatureDimension;

impl Dimension for TemperatureDimension {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Temperature"
    }

    fn kind(&self) -> DimensionKind {
        DimensionKind::Temperature
    }

    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64 {
        range_score(
            crop.temperature_range(),
            inputs.temperature,
            &ctx.profile.temperature,
        )
    }
}
