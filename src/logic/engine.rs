use super::calculations::{clamp_score, round2};
use super::dimensions::{self, Dimension, ScoringContext};
use super::enrichment::{enrich_crop, missing_ranges};
use super::profile::{ScoringProfile, Variant};
use super::reference::ReferenceTables;
use crate::error::{CropFitError, Result};
use crate::models::{Crop, CropRecommendation, EnvironmentalInputs, ScoreBreakdown};
use rayon::prelude::*;

/// Multi-criteria suitability scorer.
///
/// Holds only immutable data, so a single engine can be shared across threads.
pub struct SuitabilityEngine {
    profile: ScoringProfile,
    reference: ReferenceTables,
    dimensions: Vec<Box<dyn Dimension>>,
}

impl SuitabilityEngine {
    pub fn new(profile: ScoringProfile, reference: ReferenceTables) -> Result<Self> {
        profile.validate()?;
        reference.validate()?;
        Ok(Self {
            profile,
            reference,
            dimensions: dimensions::all(),
        })
    }

    pub fn standard() -> Self {
        Self {
            profile: ScoringProfile::standard(),
            reference: ReferenceTables::builtin(),
            dimensions: dimensions::all(),
        }
    }

    pub fn legacy() -> Self {
        Self {
            profile: ScoringProfile::legacy(),
            reference: ReferenceTables::legacy(),
            dimensions: dimensions::all(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Standard => Self::standard(),
            Variant::Legacy => Self::legacy(),
        }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn reference(&self) -> &ReferenceTables {
        &self.reference
    }

    /// `(id, name, weight)` for each dimension, in breakdown order.
    pub fn dimensions(&self) -> Vec<(&'static str, &'static str, f64)> {
        self.dimensions
            .iter()
            .map(|d| (d.id(), d.name(), self.profile.weights.get(d.kind())))
            .collect()
    }

    /// Score every crop and rank them, best first.
    ///
    /// Inputs and catalog are validated before anything is scored. Crops with
    /// equal scores keep their catalog order.
    pub fn score_crops(
        &self,
        crops: &[Crop],
        inputs: &EnvironmentalInputs,
    ) -> Result<Vec<CropRecommendation>> {
        validate_request(crops, inputs)?;

        let mut recommendations: Vec<CropRecommendation> = crops
            .iter()
            .enumerate()
            .map(|(index, crop)| self.score_crop(index, crop, inputs))
            .collect();

        recommendations.sort_by(|a, b| b.suitability_score.total_cmp(&a.suitability_score));

        tracing::debug!(
            crops = recommendations.len(),
            top = recommendations.first().map(|r| r.crop.name.as_str()),
            "Ranked crop catalog"
        );
        Ok(recommendations)
    }

    /// Same result as [`score_crops`](Self::score_crops), with the catalog
    /// split into chunks scored on the rayon pool.
    pub fn score_crops_parallel(
        &self,
        crops: &[Crop],
        inputs: &EnvironmentalInputs,
        chunk_size: usize,
    ) -> Result<Vec<CropRecommendation>> {
        validate_request(crops, inputs)?;
        let chunk_size = chunk_size.max(1);

        let partitions: Vec<Vec<CropRecommendation>> = crops
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(chunk, part)| {
                part.iter()
                    .enumerate()
                    .map(|(offset, crop)| {
                        self.score_crop(chunk * chunk_size + offset, crop, inputs)
                    })
                    .collect()
            })
            .collect();

        Ok(merge_ranked(partitions))
    }

    /// Score a single crop. Assumes the inputs were validated.
    pub fn score_crop(
        &self,
        catalog_index: usize,
        crop: &Crop,
        inputs: &EnvironmentalInputs,
    ) -> CropRecommendation {
        let enriched = enrich_crop(crop, &self.reference);

        let missing = missing_ranges(&enriched);
        if !missing.is_empty() {
            tracing::warn!(
                crop = %enriched.name,
                missing = ?missing,
                "Incomplete tolerance data; using neutral scores"
            );
        }

        let ctx = ScoringContext {
            profile: &self.profile,
            reference: &self.reference,
        };

        let mut breakdown = ScoreBreakdown::default();
        let mut total = 0.0;
        for dimension in &self.dimensions {
            let kind = dimension.kind();
            let score = clamp_score(dimension.score(&enriched, inputs, &ctx));
            total += score * self.profile.weights.get(kind);
            breakdown.set(kind, round2(score));
        }

        let total = clamp_score(round2(total));
        let level = self.profile.tiers.classify(total);

        tracing::trace!(
            crop = %enriched.name,
            score = total,
            level = %level,
            "Scored crop"
        );

        CropRecommendation {
            crop: enriched,
            suitability_score: total,
            suitability_level: level,
            score_breakdown: breakdown,
            catalog_index,
        }
    }
}

impl Default for SuitabilityEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rank crops with the standard profile and built-in reference tables.
pub fn score_crops(crops: &[Crop], inputs: &EnvironmentalInputs) -> Result<Vec<CropRecommendation>> {
    SuitabilityEngine::standard().score_crops(crops, inputs)
}

/// Concatenate independently scored partitions and restore the ranking:
/// score descending, then catalog order.
pub fn merge_ranked(partitions: Vec<Vec<CropRecommendation>>) -> Vec<CropRecommendation> {
    let mut merged: Vec<CropRecommendation> = partitions.into_iter().flatten().collect();
    merged.sort_by(|a, b| {
        b.suitability_score
            .total_cmp(&a.suitability_score)
            .then_with(|| a.catalog_index.cmp(&b.catalog_index))
    });
    merged
}

fn validate_request(crops: &[Crop], inputs: &EnvironmentalInputs) -> Result<()> {
    inputs.validate()?;
    for (index, crop) in crops.iter().enumerate() {
        crop.validate().map_err(|e| match e {
            CropFitError::Validation { field, reason } => CropFitError::Validation {
                field: format!("catalog[{}] {}", index, field),
                reason,
            },
            other => other,
        })?;
    }
    Ok(())
}
