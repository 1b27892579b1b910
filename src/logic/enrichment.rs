use super::reference::ReferenceTables;
use crate::models::Crop;

/// Fill unknown crop data from the reference table.
///
/// Only (0,0) ranges, an empty growing season and a missing soil preference
/// are replaced. Caller-supplied values are never overwritten.
pub fn enrich_crop(crop: &Crop, reference: &ReferenceTables) -> Crop {
    let mut enriched = crop.clone();
    let Some(defaults) = reference.defaults_for(&crop.name) else {
        return enriched;
    };

    if crop.ph_range().is_unknown() {
        enriched.ph_min = defaults.ph_min;
        enriched.ph_max = defaults.ph_max;
    }
    if crop.temperature_range().is_unknown() {
        enriched.temp_min = defaults.temp_min;
        enriched.temp_max = defaults.temp_max;
    }
    if crop.rainfall_range().is_unknown() {
        enriched.rain_min = defaults.rain_min;
        enriched.rain_max = defaults.rain_max;
    }
    if crop.growing_season.is_empty() {
        enriched.growing_season = defaults.growing_season.clone();
    }
    if crop.soil_type.is_none() {
        enriched.soil_type = defaults.soil_type;
    }

    if enriched != *crop {
        tracing::debug!(crop = %crop.name, "Filled missing crop data from reference table");
    }
    enriched
}

/// Tolerance ranges still at the unknown sentinel.
pub fn missing_ranges(crop: &Crop) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if crop.ph_range().is_unknown() {
        missing.push("ph");
    }
    if crop.temperature_range().is_unknown() {
        missing.push("temperature");
    }
    if crop.rainfall_range().is_unknown() {
        missing.push("rainfall");
    }
    missing
}
