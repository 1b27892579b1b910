pub mod ph;
pub mod rainfall;
pub mod rotation;
pub mod season;
pub mod soil;
pub mod temperature;

pub use ph::PhDimension;
pub use rainfall::RainfallDimension;
pub use rotation::RotationDimension;
pub use season::SeasonDimension;
pub use soil::SoilDimension;
pub use temperature::TemperatureDimension;

use super::profile::ScoringProfile;
use super::reference::ReferenceTables;
use crate::models::{Crop, DimensionKind, EnvironmentalInputs};

/// Read-only data every dimension scorer may consult.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub profile: &'a ScoringProfile,
    pub reference: &'a ReferenceTables,
}

/// One axis of the suitability score.
pub trait Dimension: Send + Sync {
    /// Unique identifier for this dimension
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn kind(&self) -> DimensionKind;

    /// Score in [0, 100]. Must never return NaN.
    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64;
}

/// The six dimensions in breakdown order.
pub fn all() -> Vec<Box<dyn Dimension>> {
    vec![
        Box::new(PhDimension),
        Box::new(TemperatureDimension),
        Box::new(RainfallDimension),
        Box::new(SoilDimension),
        Box::new(SeasonDimension),
        Box::new(RotationDimension),
    ]
}
