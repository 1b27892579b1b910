use super::inputs::EnvironmentalInputs;
use super::month::Month;
use super::soil::{deserialize_optional_soil, SoilType};
use crate::error::{CropFitError, Result};
use serde::{Deserialize, Serialize};

/// Inclusive tolerance interval. `(0, 0)` is the "no data" sentinel, never a
/// real zero-width range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToleranceRange {
    pub min: f64,
    pub max: f64,
}

impl ToleranceRange {
    pub const UNKNOWN: ToleranceRange = ToleranceRange { min: 0.0, max: 0.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_unknown(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    // Halve before combining so bounds near f64::MAX stay finite.
    pub fn midpoint(&self) -> f64 {
        self.min / 2.0 + self.max / 2.0
    }

    pub fn half_width(&self) -> f64 {
        self.max / 2.0 - self.min / 2.0
    }

    /// Distance from `value` to the nearer bound; zero inside the range.
    pub fn distance_to(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }

    fn validate(&self, crop: &str, field: &str, domain: Option<(f64, f64)>) -> Result<()> {
        let field = format!("crop '{}' {}", crop, field);
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CropFitError::validation(field, "bounds must be finite numbers"));
        }
        if self.is_unknown() {
            return Ok(());
        }
        if self.min > self.max {
            return Err(CropFitError::validation(
                field,
                format!("minimum {} exceeds maximum {}", self.min, self.max),
            ));
        }
        if let Some((lo, hi)) = domain {
            if self.min < lo || self.max > hi {
                return Err(CropFitError::validation(
                    field,
                    format!("bounds must lie within [{}, {}]", lo, hi),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for ToleranceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "unknown")
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Catalog entry describing what a crop tolerates.
///
/// Field names follow snake_case; the camelCase names used by JavaScript
/// catalogs (`phMin`, `tempMax`, `growingSeason`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub name: String,
    #[serde(default, alias = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, alias = "scientificName", skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, alias = "phMin")]
    pub ph_min: f64,
    #[serde(default, alias = "phMax")]
    pub ph_max: f64,
    #[serde(default, alias = "tempMin")]
    pub temp_min: f64,
    #[serde(default, alias = "tempMax")]
    pub temp_max: f64,
    #[serde(default, alias = "rainMin")]
    pub rain_min: f64,
    #[serde(default, alias = "rainMax")]
    pub rain_max: f64,

    #[serde(
        default,
        alias = "soilType",
        deserialize_with = "deserialize_optional_soil",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_type: Option<SoilType>,
    #[serde(default, alias = "growingSeason")]
    pub growing_season: Vec<Month>,
    #[serde(default, alias = "cropRotation")]
    pub crop_rotation: Vec<String>,
}

impl Crop {
    /// A crop with no tolerance data at all.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            scientific_name: None,
            category: None,
            ph_min: 0.0,
            ph_max: 0.0,
            temp_min: 0.0,
            temp_max: 0.0,
            rain_min: 0.0,
            rain_max: 0.0,
            soil_type: None,
            growing_season: Vec::new(),
            crop_rotation: Vec::new(),
        }
    }

    pub fn with_ph(mut self, min: f64, max: f64) -> Self {
        self.ph_min = min;
        self.ph_max = max;
        self
    }

    pub fn with_temperature(mut self, min: f64, max: f64) -> Self {
        self.temp_min = min;
        self.temp_max = max;
        self
    }

    pub fn with_rainfall(mut self, min: f64, max: f64) -> Self {
        self.rain_min = min;
        self.rain_max = max;
        self
    }

    pub fn with_soil(mut self, soil: SoilType) -> Self {
        self.soil_type = Some(soil);
        self
    }

    pub fn with_season(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.growing_season = months.into_iter().collect();
        self
    }

    pub fn with_rotation<S: Into<String>>(mut self, predecessors: impl IntoIterator<Item = S>) -> Self {
        self.crop_rotation = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn ph_range(&self) -> ToleranceRange {
        ToleranceRange::new(self.ph_min, self.ph_max)
    }

    pub fn temperature_range(&self) -> ToleranceRange {
        ToleranceRange::new(self.temp_min, self.temp_max)
    }

    pub fn rainfall_range(&self) -> ToleranceRange {
        ToleranceRange::new(self.rain_min, self.rain_max)
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Rejects data that would make the scores meaningless: non-finite bounds,
    /// inverted ranges, pH outside 0-14 and negative rainfall.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CropFitError::validation("crop name", "must not be empty"));
        }
        self.ph_range()
            .validate(&self.name, "ph range", Some((0.0, 14.0)))?;
        self.temperature_range()
            .validate(&self.name, "temperature range", None)?;
        self.rainfall_range()
            .validate(&self.name, "rainfall range", Some((0.0, f64::INFINITY)))?;
        Ok(())
    }

    /// Strict pre-filter: every known range must contain the measured value.
    /// Unknown ranges do not disqualify a crop.
    pub fn tolerates(&self, inputs: &EnvironmentalInputs) -> bool {
        [
            (self.ph_range(), inputs.ph),
            (self.temperature_range(), inputs.temperature),
            (self.rainfall_range(), inputs.rainfall),
        ]
        .iter()
        .all(|(range, value)| range.is_unknown() || range.contains(*value))
    }
}

/// Crops whose known ranges all contain the measured conditions.
pub fn filter_tolerant(crops: &[Crop], inputs: &EnvironmentalInputs) -> Vec<Crop> {
    crops
        .iter()
        .filter(|c| c.tolerates(inputs))
        .cloned()
        .collect()
}

pub fn same_crop_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
