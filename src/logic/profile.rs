//! Scoring constants.
//!
//! Every number the engine uses to turn a measurement into a score lives in a
//! [`ScoringProfile`]. Two profiles ship built in: [`ScoringProfile::standard`],
//! the default, and [`ScoringProfile::legacy`], which reproduces the older
//! 90/70-threshold behaviour.

use crate::error::{CropFitError, Result};
use crate::models::{DimensionKind, SuitabilityLevel};
use serde::{Deserialize, Serialize};

/// Allowed drift of the weight sum from 1.0 caused by binary fractions.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Standard,
    Legacy,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Legacy => "legacy",
        }
    }

    pub fn profile(&self) -> ScoringProfile {
        match self {
            Variant::Standard => ScoringProfile::standard(),
            Variant::Legacy => ScoringProfile::legacy(),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub ph: f64,
    pub temperature: f64,
    pub rainfall: f64,
    pub soil_type: f64,
    pub season: f64,
    pub rotation: f64,
}

impl Weights {
    pub fn get(&self, kind: DimensionKind) -> f64 {
        match kind {
            DimensionKind::Ph => self.ph,
            DimensionKind::Temperature => self.temperature,
            DimensionKind::Rainfall => self.rainfall,
            DimensionKind::SoilType => self.soil_type,
            DimensionKind::Season => self.season,
            DimensionKind::Rotation => self.rotation,
        }
    }

    pub fn sum(&self) -> f64 {
        DimensionKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    pub fn validate(&self) -> Result<()> {
        for kind in DimensionKind::ALL {
            let w = self.get(kind);
            if !w.is_finite() || w < 0.0 {
                return Err(CropFitError::Config(format!(
                    "weight for {} must be a non-negative number, got {}",
                    kind, w
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CropFitError::Config(format!(
                "dimension weights must sum to 1.0, got {}",
                sum
            )));
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            ph: 0.30,
            temperature: 0.20,
            rainfall: 0.20,
            soil_type: 0.10,
            season: 0.10,
            rotation: 0.10,
        }
    }
}

/// Shape of a tolerance-range score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeCurve {
    /// Score when the crop's range is the (0,0) sentinel.
    pub unknown: f64,
    /// Points lost at the edge of the range relative to its midpoint.
    pub edge_penalty: f64,
    /// Points lost per unit of distance outside the range.
    pub slope: f64,
}

impl RangeCurve {
    fn validate(&self, label: &str) -> Result<()> {
        check_score(&format!("{} unknown", label), self.unknown)?;
        check_non_negative(&format!("{} edge_penalty", label), self.edge_penalty)?;
        if self.edge_penalty > 100.0 {
            return Err(CropFitError::Config(format!(
                "{} edge_penalty must not exceed 100",
                label
            )));
        }
        check_non_negative(&format!("{} slope", label), self.slope)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoilCurve {
    /// Crop has no preferred soil.
    pub no_data: f64,
    /// Soil pair missing from the compatibility table.
    pub unlisted: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonCurve {
    /// No planting window known, or the current month is unknown.
    pub no_data: f64,
    /// Planting window starts or ends one month away.
    pub adjacent: f64,
    /// Planting window two months away; `None` treats it as off-season.
    pub two_away: Option<f64>,
    pub off_season: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationCurve {
    /// Crop lists no beneficial predecessors.
    pub no_data: f64,
    /// Previous crop is the same crop.
    pub same_crop: f64,
    /// This crop is a known good successor of the previous one.
    pub beneficial_successor: f64,
    pub acceptable: f64,
}

/// Minimum totals for each tier. Anything below `good` is poor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholds {
    pub excellent: f64,
    pub good: f64,
}

impl TierThresholds {
    pub fn classify(&self, score: f64) -> SuitabilityLevel {
        if score >= self.excellent {
            SuitabilityLevel::Excellent
        } else if score >= self.good {
            SuitabilityLevel::Good
        } else {
            SuitabilityLevel::Poor
        }
    }

    fn validate(&self) -> Result<()> {
        check_score("tiers excellent", self.excellent)?;
        check_score("tiers good", self.good)?;
        if self.good > self.excellent {
            return Err(CropFitError::Config(format!(
                "good threshold {} is above excellent threshold {}",
                self.good, self.excellent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringProfile {
    pub weights: Weights,
    pub ph: RangeCurve,
    pub temperature: RangeCurve,
    pub rainfall: RangeCurve,
    pub soil: SoilCurve,
    pub season: SeasonCurve,
    pub rotation: RotationCurve,
    pub tiers: TierThresholds,
}

impl ScoringProfile {
    /// Default profile: graded in-range scores, two-month season tolerance
    /// and 85/65 tiers.
    pub fn standard() -> Self {
        Self {
            weights: Weights::default(),
            ph: RangeCurve {
                unknown: 60.0,
                edge_penalty: 5.0,
                slope: 15.0,
            },
            temperature: RangeCurve {
                unknown: 60.0,
                edge_penalty: 2.5,
                slope: 2.5,
            },
            // Rainfall is measured in hundreds of mm, so the per-mm slope is small.
            rainfall: RangeCurve {
                unknown: 60.0,
                edge_penalty: 4.0,
                slope: 0.08,
            },
            soil: SoilCurve {
                no_data: 75.0,
                unlisted: 35.0,
            },
            season: SeasonCurve {
                no_data: 75.0,
                adjacent: 75.0,
                two_away: Some(50.0),
                off_season: 25.0,
            },
            rotation: RotationCurve {
                no_data: 85.0,
                same_crop: 20.0,
                beneficial_successor: 90.0,
                acceptable: 70.0,
            },
            tiers: TierThresholds {
                excellent: 85.0,
                good: 65.0,
            },
        }
    }

    /// Flat in-range scores, steeper penalties and 90/70 tiers.
    pub fn legacy() -> Self {
        Self {
            weights: Weights::default(),
            ph: RangeCurve {
                unknown: 50.0,
                edge_penalty: 0.0,
                slope: 20.0,
            },
            temperature: RangeCurve {
                unknown: 50.0,
                edge_penalty: 0.0,
                slope: 3.0,
            },
            rainfall: RangeCurve {
                unknown: 50.0,
                edge_penalty: 0.0,
                slope: 0.1,
            },
            soil: SoilCurve {
                no_data: 70.0,
                unlisted: 40.0,
            },
            season: SeasonCurve {
                no_data: 70.0,
                adjacent: 60.0,
                two_away: None,
                off_season: 20.0,
            },
            rotation: RotationCurve {
                no_data: 80.0,
                same_crop: 30.0,
                beneficial_successor: 70.0,
                acceptable: 70.0,
            },
            tiers: TierThresholds {
                excellent: 90.0,
                good: 70.0,
            },
        }
    }

    /// Apply a partial YAML override on top of this profile. Keys missing
    /// from `overrides`, at any depth, keep their current values.
    pub fn with_overrides(&self, overrides: &serde_yaml::Value) -> Result<Self> {
        let mut merged = serde_yaml::to_value(self)?;
        merge_yaml(&mut merged, overrides);
        serde_yaml::from_value(merged)
            .map_err(|e| CropFitError::Config(format!("Invalid scoring override: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.ph.validate("ph")?;
        self.temperature.validate("temperature")?;
        self.rainfall.validate("rainfall")?;

        check_score("soil no_data", self.soil.no_data)?;
        check_score("soil unlisted", self.soil.unlisted)?;

        check_score("season no_data", self.season.no_data)?;
        check_score("season adjacent", self.season.adjacent)?;
        if let Some(two_away) = self.season.two_away {
            check_score("season two_away", two_away)?;
        }
        check_score("season off_season", self.season.off_season)?;

        check_score("rotation no_data", self.rotation.no_data)?;
        check_score("rotation same_crop", self.rotation.same_crop)?;
        check_score(
            "rotation beneficial_successor",
            self.rotation.beneficial_successor,
        )?;
        check_score("rotation acceptable", self.rotation.acceptable)?;

        self.tiers.validate()
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

fn merge_yaml(base: &mut serde_yaml::Value, overlay: &serde_yaml::Value) {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(base), serde_yaml::Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn check_score(label: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(CropFitError::Config(format!(
            "{} must be between 0 and 100, got {}",
            label, value
        )));
    }
    Ok(())
}

fn check_non_negative(label: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CropFitError::Config(format!(
            "{} must be a non-negative number, got {}",
            label, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = Weights::default();
        assert!((weights.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn builtin_profiles_are_valid() {
        assert!(ScoringProfile::standard().validate().is_ok());
        assert!(ScoringProfile::legacy().validate().is_ok());
    }

    #[test]
    fn reweighting_must_keep_sum_at_one() {
        let mut profile = ScoringProfile::standard();
        profile.weights.ph = 0.5;
        assert!(matches!(profile.validate(), Err(CropFitError::Config(_))));

        profile.weights.temperature = 0.1;
        profile.weights.rainfall = 0.1;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut weights = Weights::default();
        weights.ph = -0.1;
        weights.temperature = 0.6;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn standard_tiers() {
        let tiers = ScoringProfile::standard().tiers;
        assert_eq!(tiers.classify(85.0), SuitabilityLevel::Excellent);
        assert_eq!(tiers.classify(84.99), SuitabilityLevel::Good);
        assert_eq!(tiers.classify(65.0), SuitabilityLevel::Good);
        assert_eq!(tiers.classify(64.99), SuitabilityLevel::Poor);
    }

    #[test]
    fn legacy_tiers() {
        let tiers = Variant::Legacy.profile().tiers;
        assert_eq!(tiers.classify(89.0), SuitabilityLevel::Good);
        assert_eq!(tiers.classify(90.0), SuitabilityLevel::Excellent);
        assert_eq!(tiers.classify(69.0), SuitabilityLevel::Poor);
    }

    #[test]
    fn inverted_tiers_are_rejected() {
        let mut profile = ScoringProfile::standard();
        profile.tiers = TierThresholds {
            excellent: 60.0,
            good: 80.0,
        };
        assert!(profile.validate().is_err());
    }

    fn yaml(s: &str) -> serde_yaml::Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn nested_override_keeps_sibling_constants() {
        let profile = ScoringProfile::standard()
            .with_overrides(&yaml("ph:\n  slope: 10\nseason:\n  two_away: 40\n"))
            .unwrap();
        assert_eq!(profile.ph.slope, 10.0);
        assert_eq!(profile.ph.unknown, 60.0);
        assert_eq!(profile.ph.edge_penalty, 5.0);
        assert_eq!(profile.season.two_away, Some(40.0));
        assert_eq!(profile.season.off_season, 25.0);
        assert_eq!(profile.temperature, ScoringProfile::standard().temperature);
    }

    #[test]
    fn override_starts_from_the_given_profile() {
        let profile = ScoringProfile::legacy()
            .with_overrides(&yaml("tiers:\n  good: 75\n"))
            .unwrap();
        assert_eq!(profile.tiers.good, 75.0);
        assert_eq!(profile.tiers.excellent, 90.0);
        assert_eq!(profile.ph, ScoringProfile::legacy().ph);
        assert_eq!(profile.season.two_away, None);
    }

    #[test]
    fn misspelled_override_key_is_rejected() {
        let err = ScoringProfile::standard()
            .with_overrides(&yaml("ph:\n  slop: 10\n"))
            .unwrap_err();
        assert!(matches!(err, CropFitError::Config(_)));
    }

    #[test]
    fn partial_yaml_falls_back_to_standard() {
        let profile: ScoringProfile =
            serde_yaml::from_str("tiers:\n  excellent: 90\n  good: 70\n").unwrap();
        assert_eq!(profile.tiers.excellent, 90.0);
        assert_eq!(profile.weights, Weights::default());
        assert_eq!(profile.ph, ScoringProfile::standard().ph);
    }
}
