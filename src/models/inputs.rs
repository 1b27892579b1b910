use super::month::{deserialize_optional_month, Month};
use super::soil::{deserialize_optional_soil, SoilType};
use crate::error::{CropFitError, Result};
use serde::{Deserialize, Serialize};

/// Lowest physically meaningful temperature in degrees Celsius.
const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Conditions a catalog is scored against. Immutable for the duration of a
/// scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalInputs {
    /// Soil acidity, 0-14.
    pub ph: f64,
    /// Representative ambient temperature, °C.
    pub temperature: f64,
    /// Annual rainfall, mm.
    pub rainfall: f64,
    #[serde(
        default,
        alias = "soilType",
        deserialize_with = "deserialize_optional_soil",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_type: Option<SoilType>,
    #[serde(
        default,
        alias = "currentSeason",
        deserialize_with = "deserialize_optional_month",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_season: Option<Month>,
    #[serde(default, alias = "previousCrop", skip_serializing_if = "Option::is_none")]
    pub previous_crop: Option<String>,
}

impl EnvironmentalInputs {
    pub fn new(ph: f64, temperature: f64, rainfall: f64) -> Self {
        Self {
            ph,
            temperature,
            rainfall,
            soil_type: None,
            current_season: None,
            previous_crop: None,
        }
    }

    pub fn with_soil(mut self, soil: SoilType) -> Self {
        self.soil_type = Some(soil);
        self
    }

    pub fn with_season(mut self, month: Month) -> Self {
        self.current_season = Some(month);
        self
    }

    pub fn with_previous_crop(mut self, crop: impl Into<String>) -> Self {
        let crop = crop.into();
        self.previous_crop = if crop.trim().is_empty() {
            None
        } else {
            Some(crop)
        };
        self
    }

    /// Previous crop name, ignoring blank values.
    pub fn previous_crop(&self) -> Option<&str> {
        self.previous_crop
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Boundary check run before any scoring. Values are never clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.ph.is_finite() {
            return Err(CropFitError::validation("ph", "must be a finite number"));
        }
        if !(0.0..=14.0).contains(&self.ph) {
            return Err(CropFitError::validation(
                "ph",
                format!("{} is outside the 0-14 scale", self.ph),
            ));
        }

        if !self.temperature.is_finite() {
            return Err(CropFitError::validation(
                "temperature",
                "must be a finite number",
            ));
        }
        if self.temperature < ABSOLUTE_ZERO_C {
            return Err(CropFitError::validation(
                "temperature",
                format!("{}°C is below absolute zero", self.temperature),
            ));
        }

        if !self.rainfall.is_finite() {
            return Err(CropFitError::validation("rainfall", "must be a finite number"));
        }
        if self.rainfall < 0.0 {
            return Err(CropFitError::validation(
                "rainfall",
                format!("{} mm is negative", self.rainfall),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_inputs_pass() {
        let inputs = EnvironmentalInputs::new(6.5, 22.0, 550.0)
            .with_soil(SoilType::Loam)
            .with_season(Month::March)
            .with_previous_crop("onion");
        assert!(inputs.validate().is_ok());
        assert!(EnvironmentalInputs::new(0.0, -30.0, 0.0).validate().is_ok());
        assert!(EnvironmentalInputs::new(14.0, 50.0, 4000.0).validate().is_ok());
    }

    #[test]
    fn nan_ph_is_rejected() {
        let err = EnvironmentalInputs::new(f64::NAN, 22.0, 550.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("ph"));
    }

    #[test]
    fn out_of_domain_ph_is_rejected() {
        let err = EnvironmentalInputs::new(14.5, 22.0, 550.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("ph"));
        assert!(EnvironmentalInputs::new(-0.1, 22.0, 550.0).validate().is_err());
    }

    #[test]
    fn negative_rainfall_is_rejected() {
        let err = EnvironmentalInputs::new(6.5, 22.0, -1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("rainfall"));
    }

    #[test]
    fn malformed_temperature_is_rejected() {
        let err = EnvironmentalInputs::new(6.5, f64::INFINITY, 550.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("temperature"));
        assert!(EnvironmentalInputs::new(6.5, -300.0, 550.0).validate().is_err());
    }

    #[test]
    fn blank_previous_crop_is_absent() {
        let inputs = EnvironmentalInputs::new(6.5, 22.0, 550.0).with_previous_crop("  ");
        assert_eq!(inputs.previous_crop(), None);

        let mut inputs = EnvironmentalInputs::new(6.5, 22.0, 550.0);
        inputs.previous_crop = Some(" wheat ".into());
        assert_eq!(inputs.previous_crop(), Some("wheat"));
    }

    #[test]
    fn deserializes_ui_payload() {
        let json = r#"{
            "ph": 6.5, "temperature": 22, "rainfall": 550,
            "soilType": "", "currentSeason": "March", "previousCrop": "onion"
        }"#;
        let inputs: EnvironmentalInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.soil_type, None);
        assert_eq!(inputs.current_season, Some(Month::March));
        assert_eq!(inputs.previous_crop(), Some("onion"));
    }
}
