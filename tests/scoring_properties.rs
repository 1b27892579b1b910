use approx::assert_relative_eq;
use cropfit::logic::jitter::{apply_seeded_jitter, DEFAULT_AMPLITUDE};
use cropfit::logic::{ScoringProfile, SuitabilityEngine, Variant};
use cropfit::models::{
    Crop, CropRecommendation, DimensionKind, EnvironmentalInputs, Month, SoilType,
    SuitabilityLevel,
};
use cropfit::score_crops;

fn sweet_pepper() -> Crop {
    Crop::new("sweet pepper")
        .with_ph(6.0, 7.0)
        .with_temperature(18.0, 27.0)
        .with_rainfall(400.0, 700.0)
        .with_soil(SoilType::Loam)
        .with_season([Month::March, Month::April])
        .with_rotation(["onion"])
}

fn field_bean() -> Crop {
    Crop::new("field bean")
        .with_ph(6.0, 8.0)
        .with_temperature(15.0, 25.0)
        .with_rainfall(500.0, 900.0)
        .with_soil(SoilType::Clay)
        .with_season([Month::October, Month::November])
        .with_rotation(["wheat", "barley"])
}

fn catalog() -> Vec<Crop> {
    let mut crops = SuitabilityEngine::standard().reference().default_catalog();
    crops.push(sweet_pepper());
    crops.push(field_bean());
    crops.push(Crop::new("unknown tuber"));
    crops
}

fn input_sweep() -> Vec<EnvironmentalInputs> {
    let mut sweep = Vec::new();
    for ph in [0.0, 4.5, 6.5, 9.0, 14.0] {
        for temperature in [-20.0, 5.0, 22.0, 45.0] {
            for rainfall in [0.0, 300.0, 1200.0, 5000.0] {
                sweep.push(EnvironmentalInputs::new(ph, temperature, rainfall));
            }
        }
    }
    let mut enriched = Vec::new();
    for (i, inputs) in sweep.into_iter().enumerate() {
        let soil = SoilType::ALL[i % SoilType::ALL.len()];
        let month = Month::ALL[i % Month::ALL.len()];
        let inputs = match i % 3 {
            0 => inputs,
            1 => inputs.with_soil(soil).with_season(month),
            _ => inputs
                .with_soil(soil)
                .with_season(month)
                .with_previous_crop("wheat"),
        };
        enriched.push(inputs);
    }
    enriched
}

fn spring_loam() -> EnvironmentalInputs {
    EnvironmentalInputs::new(6.5, 22.0, 550.0)
        .with_soil(SoilType::Loam)
        .with_season(Month::March)
        .with_previous_crop("onion")
}

fn assert_in_bounds(rec: &CropRecommendation) {
    assert!(!rec.suitability_score.is_nan(), "{} total is NaN", rec.name());
    assert!(
        (0.0..=100.0).contains(&rec.suitability_score),
        "{} total {}",
        rec.name(),
        rec.suitability_score
    );
    for (kind, score) in rec.score_breakdown.iter() {
        assert!(!score.is_nan(), "{} {} is NaN", rec.name(), kind);
        assert!((0.0..=100.0).contains(&score), "{} {} = {}", rec.name(), kind, score);
    }
}

#[test]
fn scores_stay_within_bounds() {
    let crops = catalog();
    for variant in [Variant::Standard, Variant::Legacy] {
        let engine = SuitabilityEngine::for_variant(variant);
        for inputs in input_sweep() {
            for rec in engine.score_crops(&crops, &inputs).unwrap() {
                assert_in_bounds(&rec);
            }
        }
    }
}

#[test]
fn weights_sum_to_one() {
    for variant in [Variant::Standard, Variant::Legacy] {
        assert_relative_eq!(variant.profile().weights.sum(), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn perfect_sub_scores_give_a_perfect_total() {
    let crop = Crop::new("test crop")
        .with_ph(6.0, 7.0)
        .with_temperature(20.0, 30.0)
        .with_rainfall(400.0, 600.0)
        .with_soil(SoilType::Sandy)
        .with_season([Month::June])
        .with_rotation(["clover"]);
    let inputs = EnvironmentalInputs::new(6.5, 25.0, 500.0)
        .with_soil(SoilType::Sandy)
        .with_season(Month::June)
        .with_previous_crop("clover");

    let rec = &score_crops(&[crop], &inputs).unwrap()[0];
    for kind in DimensionKind::ALL {
        assert_eq!(rec.score_breakdown.get(kind), 100.0, "{}", kind);
    }
    assert_relative_eq!(rec.suitability_score, 100.0);
    assert_eq!(rec.suitability_level, SuitabilityLevel::Excellent);
}

#[test]
fn output_is_a_ranked_permutation_of_the_catalog() {
    let crops = catalog();
    for inputs in input_sweep() {
        let recs = score_crops(&crops, &inputs).unwrap();
        assert_eq!(recs.len(), crops.len());

        let mut indexes: Vec<usize> = recs.iter().map(|r| r.catalog_index).collect();
        indexes.sort_unstable();
        assert_eq!(indexes, (0..crops.len()).collect::<Vec<_>>());

        assert!(recs
            .windows(2)
            .all(|w| w[0].suitability_score >= w[1].suitability_score));
    }
}

#[test]
fn scoring_is_idempotent() {
    let crops = catalog();
    let inputs = spring_loam();
    let first = score_crops(&crops, &inputs).unwrap();
    let second = score_crops(&crops, &inputs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn caller_catalog_is_not_modified() {
    let crops = vec![Crop::new("sweet pepper"), sweet_pepper()];
    let before = crops.clone();
    let recs = score_crops(&crops, &spring_loam()).unwrap();
    assert_eq!(crops, before);
    // The bare entry was filled in from the reference tables for scoring only.
    assert!(recs.iter().all(|r| !r.crop.ph_range().is_unknown()));
}

#[test]
fn exact_match_scores_near_perfect() {
    let inputs = EnvironmentalInputs::new(7.0, 20.0, 700.0)
        .with_soil(SoilType::Clay)
        .with_season(Month::October)
        .with_previous_crop("wheat");
    let rec = &score_crops(&[field_bean()], &inputs).unwrap()[0];
    assert!(rec.suitability_score >= 99.0);
    assert_eq!(rec.suitability_level, SuitabilityLevel::Excellent);
}

#[test]
fn planting_the_same_crop_again_is_penalised() {
    let base = EnvironmentalInputs::new(7.0, 20.0, 700.0)
        .with_soil(SoilType::Clay)
        .with_season(Month::October);

    let repeat_inputs = base.clone().with_previous_crop(" Field Bean ");
    let unrelated_inputs = base.with_previous_crop("sunflower");
    let repeat = &score_crops(&[field_bean()], &repeat_inputs).unwrap()[0];
    let unrelated = &score_crops(&[field_bean()], &unrelated_inputs).unwrap()[0];

    assert!(repeat.score_breakdown.rotation < unrelated.score_breakdown.rotation);
    assert!(repeat.suitability_score < unrelated.suitability_score);
    assert_relative_eq!(repeat.score_breakdown.rotation, 20.0);
}

#[test]
fn repeat_planting_without_rotation_data_stays_neutral() {
    let inputs = EnvironmentalInputs::new(6.5, 22.0, 550.0).with_previous_crop("quinoa");
    let rec = &score_crops(&[Crop::new("quinoa")], &inputs).unwrap()[0];
    assert_relative_eq!(rec.score_breakdown.rotation, 85.0);
}

#[test]
fn boundary_scenario_is_excellent() {
    let rec = &score_crops(&[sweet_pepper()], &spring_loam()).unwrap()[0];
    assert_eq!(rec.suitability_level, SuitabilityLevel::Excellent);
    assert!(rec.suitability_score >= 85.0);
}

#[test]
fn unknown_ph_range_scores_neutral() {
    let crop = Crop::new("test crop").with_temperature(18.0, 27.0);
    for ph in [0.0, 3.0, 6.5, 10.0, 14.0] {
        for variant in [Variant::Standard, Variant::Legacy] {
            let engine = SuitabilityEngine::for_variant(variant);
            let rec = &engine
                .score_crops(&[crop.clone()], &EnvironmentalInputs::new(ph, 22.0, 550.0))
                .unwrap()[0];
            assert!((50.0..=60.0).contains(&rec.score_breakdown.ph));
        }
    }
}

#[test]
fn temperature_outside_range_scores_lower_but_not_negative() {
    let crop = Crop::new("test crop").with_temperature(15.0, 25.0);
    let score_at = |temperature: f64| {
        score_crops(&[crop.clone()], &EnvironmentalInputs::new(6.5, temperature, 550.0))
            .unwrap()[0]
            .score_breakdown
            .temperature
    };

    let inside = score_at(20.0);
    let hot = score_at(40.0);
    assert_relative_eq!(inside, 100.0);
    assert_relative_eq!(hot, 62.5);
    assert!(hot < inside);
    assert!(score_at(500.0) >= 0.0);
}

#[test]
fn legacy_tiers_are_ninety_and_seventy() {
    let tiers = ScoringProfile::legacy().tiers;
    assert_eq!(tiers.classify(90.0), SuitabilityLevel::Excellent);
    assert_eq!(tiers.classify(89.99), SuitabilityLevel::Good);
    assert_eq!(tiers.classify(70.0), SuitabilityLevel::Good);
    assert_eq!(tiers.classify(69.99), SuitabilityLevel::Poor);

    let tiers = ScoringProfile::standard().tiers;
    assert_eq!(tiers.classify(85.0), SuitabilityLevel::Excellent);
    assert_eq!(tiers.classify(65.0), SuitabilityLevel::Good);
    assert_eq!(tiers.classify(64.99), SuitabilityLevel::Poor);
}

#[test]
fn engine_can_be_shared_across_threads() {
    let engine = SuitabilityEngine::standard();
    let crops = catalog();
    let expected = engine.score_crops(&crops, &spring_loam()).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.score_crops(&crops, &spring_loam()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    assert_eq!(engine.score_crops_parallel(&crops, &spring_loam(), 4).unwrap(), expected);
}

#[test]
fn jitter_is_reproducible_per_seed() {
    let engine = SuitabilityEngine::standard();
    let recs = engine.score_crops(&catalog(), &spring_loam()).unwrap();
    let tiers = engine.profile().tiers;

    let a = apply_seeded_jitter(recs.clone(), 2024, DEFAULT_AMPLITUDE, &tiers);
    let b = apply_seeded_jitter(recs.clone(), 2024, DEFAULT_AMPLITUDE, &tiers);
    assert_eq!(a, b);
    for rec in &a {
        assert_in_bounds(rec);
    }
}
