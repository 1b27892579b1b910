use super::{Dimension, ScoringContext};
use crate::logic::calculations::{clamp_score, MAX_SCORE};
use crate::logic::profile::SeasonCurve;
use crate::models::{Crop, DimensionKind, EnvironmentalInputs, Month};

/// Planting window fit.
///
/// Scoring (standard profile):
/// - Current month inside the window: 100
/// - Window one month away (either side, wrapping Dec/Jan): 75
/// - Window two months away: 50
/// - Otherwise: 25
/// - No window on record, or current month unknown: 75
pub struct SeasonDimension;

impl Dimension for SeasonDimension {
    fn id(&self) -> &'static str {
        "season"
    }

    fn name(&self) -> &'static str {
        "Planting Season"
    }

    fn kind(&self) -> DimensionKind {
        DimensionKind::Season
    }

    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64 {
        season_score(&crop.growing_season, inputs.current_season, &ctx.profile.season)
    }
}

pub fn season_score(growing: &[Month], current: Option<Month>, curve: &SeasonCurve) -> f64 {
    let Some(current) = current else {
        return clamp_score(curve.no_data);
    };

    let Some(nearest) = growing.iter().map(|m| current.distance(*m)).min() else {
        return clamp_score(curve.no_data);
    };

    let score = match nearest {
        0 => MAX_SCORE,
        1 => curve.adjacent,
        2 => curve.two_away.unwrap_or(curve.off_season),
        _ => curve.off_season,
    };
    clamp_score(score)
}
