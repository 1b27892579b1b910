use super::crop::Crop;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityLevel {
    Poor,
    Good,
    Excellent,
}

impl SuitabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLevel::Excellent => "excellent",
            SuitabilityLevel::Good => "good",
            SuitabilityLevel::Poor => "poor",
        }
    }

    /// Display colour for the tier (green, amber, red).
    pub fn color_hex(&self) -> &'static str {
        match self {
            SuitabilityLevel::Excellent => "#10B981",
            SuitabilityLevel::Good => "#F59E0B",
            SuitabilityLevel::Poor => "#EF4444",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            SuitabilityLevel::Excellent => "★",
            SuitabilityLevel::Good => "+",
            SuitabilityLevel::Poor => "-",
        }
    }
}

impl std::fmt::Display for SuitabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The six scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Ph,
    Temperature,
    Rainfall,
    SoilType,
    Season,
    Rotation,
}

impl DimensionKind {
    pub const ALL: [DimensionKind; 6] = [
        DimensionKind::Ph,
        DimensionKind::Temperature,
        DimensionKind::Rainfall,
        DimensionKind::SoilType,
        DimensionKind::Season,
        DimensionKind::Rotation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKind::Ph => "pH",
            DimensionKind::Temperature => "Temperature",
            DimensionKind::Rainfall => "Rainfall",
            DimensionKind::SoilType => "Soil Type",
            DimensionKind::Season => "Season",
            DimensionKind::Rotation => "Rotation",
        }
    }
}

impl std::fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-dimension sub-scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ph: f64,
    pub temperature: f64,
    pub rainfall: f64,
    pub soil_type: f64,
    pub season: f64,
    pub rotation: f64,
}

impl ScoreBreakdown {
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

    pub fn set(&mut self, kind: DimensionKind, score: f64) {
        match kind {
            DimensionKind::Ph => self.ph = score,
            DimensionKind::Temperature => self.temperature = score,
            DimensionKind::Rainfall => self.rainfall = score,
            DimensionKind::SoilType => self.soil_type = score,
            DimensionKind::Season => self.season = score,
            DimensionKind::Rotation => self.rotation = score,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DimensionKind, f64)> + '_ {
        DimensionKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Dimension with the lowest sub-score; first one wins on ties.
    pub fn weakest(&self) -> (DimensionKind, f64) {
        self.iter()
            .fold((DimensionKind::Ph, f64::INFINITY), |acc, (k, v)| {
                if v < acc.1 {
                    (k, v)
                } else {
                    acc
                }
            })
    }
}

/// A scored crop. Built fresh on every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    #[serde(flatten)]
    pub crop: Crop,
    pub suitability_score: f64,
    pub suitability_level: SuitabilityLevel,
    pub score_breakdown: ScoreBreakdown,
    /// Position of the crop in the caller's catalog.
    pub catalog_index: usize,
}

impl CropRecommendation {
    pub fn name(&self) -> &str {
        &self.crop.name
    }
}
