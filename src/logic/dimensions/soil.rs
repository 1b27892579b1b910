use super::{Dimension, ScoringContext};
use crate::logic::calculations::{clamp_score, MAX_SCORE};
use crate::logic::profile::SoilCurve;
use crate::logic::reference::ReferenceTables;
use crate::models::{Crop, DimensionKind, EnvironmentalInputs, SoilType};

/// Soil category fit.
///
/// Exact match earns full marks. Otherwise the compatibility table gives
/// partial credit for related soils (loam is forgiving, rock is not).
pub struct SoilDimension;

impl Dimension for SoilDimension {
    fn id(&self) -> &'static str {
        "soil_type"
    }

    fn name(&self) -> &'static str {
        "Soil Type"
    }

    fn kind(&self) -> DimensionKind {
        DimensionKind::SoilType
    }

    fn score(&self, crop: &Crop, inputs: &EnvironmentalInputs, ctx: &ScoringContext<'_>) -> f64 {
        soil_score(
            crop.soil_type,
            inputs.soil_type,
            &ctx.profile.soil,
            ctx.reference,
        )
    }
}

pub fn soil_score(
    preferred: Option<SoilType>,
    actual: Option<SoilType>,
    curve: &SoilCurve,
    reference: &ReferenceTables,
) -> f64 {
    let Some(preferred) = preferred else {
        return clamp_score(curve.no_data);
    };

    match actual {
        Some(actual) if actual == preferred => MAX_SCORE,
        Some(actual) => clamp_score(
            reference
                .soil_affinity(actual, preferred)
                .unwrap_or(curve.unlisted),
        ),
        None => clamp_score(curve.unlisted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::profile::ScoringProfile;

    fn standard(preferred: Option<SoilType>, actual: Option<SoilType>) -> f64 {
        soil_score(
            preferred,
            actual,
            &ScoringProfile::standard().soil,
            &ReferenceTables::builtin(),
        )
    }

    #[test]
    fn exact_match_is_full_marks() {
        for soil in SoilType::ALL {
            assert_eq!(standard(Some(soil), Some(soil)), 100.0);
        }
    }

    #[test]
    fn unknown_preference_is_neutral() {
        assert_eq!(standard(None, Some(SoilType::Rocky)), 75.0);
        assert_eq!(standard(None, None), 75.0);
    }

    #[test]
    fn related_soils_get_partial_credit() {
        assert_eq!(standard(Some(SoilType::Organic), Some(SoilType::Loam)), 90.0);
        assert_eq!(standard(Some(SoilType::Loam), Some(SoilType::Clay)), 85.0);
        assert_eq!(standard(Some(SoilType::Organic), Some(SoilType::Rocky)), 30.0);
    }

    #[test]
    fn unknown_actual_soil_gets_unlisted_default() {
        assert_eq!(standard(Some(SoilType::Loam), None), 35.0);
    }

    #[test]
    fn legacy_table_falls_back_to_forty() {
        let curve = ScoringProfile::legacy().soil;
        let legacy = ReferenceTables::legacy();
        assert_eq!(
            soil_score(Some(SoilType::Loam), Some(SoilType::Clay), &curve, &legacy),
            75.0
        );
        assert_eq!(
            soil_score(Some(SoilType::Sandy), Some(SoilType::Rocky), &curve, &legacy),
            40.0
        );
        assert_eq!(soil_score(None, Some(SoilType::Rocky), &curve, &legacy), 70.0);
    }
}
