//! Built-in agronomic reference data: soil compatibility, default tolerances
//! for common crops and known beneficial rotation pairs.

use crate::error::{CropFitError, Result};
use crate::models::{same_crop_name, Crop, Month, SoilType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Known tolerances used to fill gaps in catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDefaults {
    pub name: String,
    pub ph_min: f64,
    pub ph_max: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub rain_min: f64,
    pub rain_max: f64,
    #[serde(default)]
    pub growing_season: Vec<Month>,
    #[serde(default)]
    pub soil_type: Option<SoilType>,
}

impl CropDefaults {
    fn new(
        name: &str,
        ph: (f64, f64),
        temp: (f64, f64),
        rain: (f64, f64),
        growing_season: &[Month],
        soil_type: SoilType,
    ) -> Self {
        Self {
            name: name.to_string(),
            ph_min: ph.0,
            ph_max: ph.1,
            temp_min: temp.0,
            temp_max: temp.1,
            rain_min: rain.0,
            rain_max: rain.1,
            growing_season: growing_season.to_vec(),
            soil_type: Some(soil_type),
        }
    }

    pub fn to_crop(&self) -> Crop {
        let mut crop = Crop::new(self.name.clone())
            .with_ph(self.ph_min, self.ph_max)
            .with_temperature(self.temp_min, self.temp_max)
            .with_rainfall(self.rain_min, self.rain_max)
            .with_season(self.growing_season.iter().copied());
        crop.soil_type = self.soil_type;
        crop
    }
}

/// Immutable lookup tables bundled with an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// `actual soil -> preferred soil -> partial credit`.
    pub soil_compatibility: BTreeMap<SoilType, BTreeMap<SoilType, f64>>,
    pub crop_defaults: Vec<CropDefaults>,
    /// `previous crop -> crops that do well after it`.
    pub beneficial_successors: BTreeMap<String, Vec<String>>,
}

impl ReferenceTables {
    pub fn builtin() -> Self {
        Self {
            soil_compatibility: standard_soil_compatibility(),
            crop_defaults: builtin_crop_defaults(),
            beneficial_successors: builtin_successors(),
        }
    }

    /// Coarser soil table with a single partial-credit value and no crop defaults.
    pub fn legacy() -> Self {
        use SoilType::*;
        let pairs: [(SoilType, &[SoilType]); 4] = [
            (Clay, &[Loam]),
            (Sandy, &[Loam]),
            (Loam, &[Clay, Sandy]),
            (Organic, &[Loam, Clay]),
        ];
        let soil_compatibility = pairs
            .into_iter()
            .map(|(actual, preferred)| {
                (actual, preferred.iter().map(|p| (*p, 75.0)).collect())
            })
            .collect();

        Self {
            soil_compatibility,
            crop_defaults: Vec::new(),
            beneficial_successors: BTreeMap::new(),
        }
    }

    pub fn soil_affinity(&self, actual: SoilType, preferred: SoilType) -> Option<f64> {
        self.soil_compatibility
            .get(&actual)
            .and_then(|row| row.get(&preferred))
            .copied()
    }

    pub fn defaults_for(&self, crop_name: &str) -> Option<&CropDefaults> {
        self.crop_defaults
            .iter()
            .find(|d| same_crop_name(&d.name, crop_name))
    }

    /// Whether `crop_name` is a recorded good successor of `previous`.
    pub fn is_beneficial_successor(&self, previous: &str, crop_name: &str) -> bool {
        self.beneficial_successors
            .iter()
            .filter(|(prev, _)| same_crop_name(prev, previous))
            .flat_map(|(_, successors)| successors.iter())
            .any(|s| same_crop_name(s, crop_name))
    }

    /// The reference crops as a ready-to-score catalog.
    pub fn default_catalog(&self) -> Vec<Crop> {
        self.crop_defaults.iter().map(CropDefaults::to_crop).collect()
    }

    pub fn validate(&self) -> Result<()> {
        for (actual, row) in &self.soil_compatibility {
            for (preferred, score) in row {
                if !(0.0..=100.0).contains(score) {
                    return Err(CropFitError::Config(format!(
                        "soil compatibility {} -> {} must be between 0 and 100, got {}",
                        actual, preferred, score
                    )));
                }
            }
        }
        for defaults in &self.crop_defaults {
            defaults.to_crop().validate().map_err(|e| {
                CropFitError::Config(format!("reference defaults for '{}': {}", defaults.name, e))
            })?;
        }
        Ok(())
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

fn standard_soil_compatibility() -> BTreeMap<SoilType, BTreeMap<SoilType, f64>> {
    use SoilType::*;
    let rows: [(SoilType, [(SoilType, f64); 4]); 5] = [
        (Clay, [(Loam, 85.0), (Organic, 70.0), (Sandy, 40.0), (Rocky, 30.0)]),
        (Sandy, [(Loam, 80.0), (Rocky, 60.0), (Clay, 40.0), (Organic, 50.0)]),
        (Loam, [(Clay, 85.0), (Sandy, 80.0), (Organic, 90.0), (Rocky, 50.0)]),
        (Organic, [(Loam, 90.0), (Clay, 70.0), (Sandy, 50.0), (Rocky, 30.0)]),
        (Rocky, [(Sandy, 60.0), (Loam, 50.0), (Clay, 30.0), (Organic, 30.0)]),
    ];
    rows.into_iter()
        .map(|(actual, row)| (actual, row.into_iter().collect()))
        .collect()
}

fn builtin_crop_defaults() -> Vec<CropDefaults> {
    use Month::*;
    use SoilType::*;
    vec![
        CropDefaults::new("date palm", (7.0, 8.5), (20.0, 45.0), (100.0, 400.0), &[March, April, May], Sandy),
        CropDefaults::new("cotton", (5.8, 8.0), (20.0, 35.0), (500.0, 1200.0), &[April, May, June], Clay),
        CropDefaults::new("maize", (5.5, 7.5), (18.0, 30.0), (400.0, 1200.0), &[March, April, May], Loam),
        CropDefaults::new("citrus", (6.0, 7.5), (15.0, 30.0), (600.0, 1200.0), &[February, March, April], Loam),
        CropDefaults::new("peanut", (5.8, 6.2), (20.0, 30.0), (500.0, 1000.0), &[April, May], Sandy),
        CropDefaults::new("sweet pepper", (6.0, 7.0), (18.0, 27.0), (400.0, 700.0), &[March, April, May], Loam),
        CropDefaults::new("grape", (6.0, 7.5), (15.0, 25.0), (400.0, 800.0), &[February, March], Loam),
        CropDefaults::new("orange", (6.0, 7.5), (15.0, 30.0), (600.0, 1200.0), &[February, March, April], Loam),
        CropDefaults::new("alfalfa", (6.5, 8.0), (15.0, 30.0), (400.0, 800.0), &[September, October, November], Loam),
        CropDefaults::new("apple", (6.0, 7.0), (10.0, 25.0), (600.0, 1000.0), &[February, March], Loam),
        CropDefaults::new("apricot", (6.0, 7.5), (15.0, 25.0), (400.0, 800.0), &[February, March], Loam),
        CropDefaults::new("peach", (6.0, 7.0), (15.0, 25.0), (500.0, 900.0), &[February, March], Loam),
        CropDefaults::new("pomegranate", (5.5, 7.5), (15.0, 35.0), (300.0, 600.0), &[February, March, April], Loam),
        CropDefaults::new("lemon", (6.0, 7.5), (15.0, 30.0), (600.0, 1200.0), &[February, March, April], Loam),
        CropDefaults::new("mint", (6.0, 7.5), (15.0, 25.0), (500.0, 800.0), &[March, April, May], Loam),
        CropDefaults::new("sorghum", (6.0, 8.5), (25.0, 35.0), (400.0, 800.0), &[April, May, June], Clay),
    ]
}

fn builtin_successors() -> BTreeMap<String, Vec<String>> {
    let pairs: [(&str, &[&str]); 5] = [
        ("wheat", &["faba bean", "lentil", "chickpea"]),
        ("barley", &["faba bean", "lentil", "chickpea"]),
        ("maize", &["faba bean", "bean"]),
        ("tomato", &["onion", "garlic"]),
        ("potato", &["bean", "lentil"]),
    ];
    pairs
        .into_iter()
        .map(|(prev, next)| (prev.to_string(), next.iter().map(|s| s.to_string()).collect()))
        .collect()
}
