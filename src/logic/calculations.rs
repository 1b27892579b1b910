use super::profile::RangeCurve;
use crate::models::ToleranceRange;

pub const MAX_SCORE: f64 = 100.0;

/// Score a measured value against a crop's tolerance range.
///
/// Inside the range the score peaks at the midpoint and drops linearly to
/// `100 - edge_penalty` at either bound. Outside it loses `slope` points per
/// unit of distance from the nearer bound, floored at 0.
pub fn range_score(range: ToleranceRange, actual: f64, curve: &RangeCurve) -> f64 {
    if range.is_unknown() {
        return clamp_score(curve.unknown);
    }

    if range.contains(actual) {
        let half_width = range.half_width();
        if half_width <= 0.0 {
            return MAX_SCORE;
        }
        let off_center = (actual - range.midpoint()).abs() / half_width;
        return clamp_score(MAX_SCORE - off_center * curve.edge_penalty);
    }

    clamp_score(MAX_SCORE - range.distance_to(actual) * curve.slope)
}

/// Clamp into [0, 100]; NaN collapses to 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
