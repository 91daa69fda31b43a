//! Property tests for the adjustment calculators through the public API

use price_adjuster::{
    AdjustmentEngine, ConditionCalculator, DecadeCalculator, FeatureCalculator,
    ModelCoefficientResolver, ModelRecord, OriginTier, OriginTierClassifier, PricingTables,
    TrendCalculator,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

const NO_TAGS: &[&str] = &[];

const TREND_VOCABULARY: &[&str] = &[
    "y2k",
    "vintage",
    "grunge",
    "streetwear",
    "minimalist",
    "bohemian",
    "preppy",
    "athleisure",
    "cottagecore",
    "gorpcore",
];

const FEATURE_VOCABULARY: &[&str] = &[
    "deadstock",
    "selvedge",
    "og_colorway",
    "limited_edition",
    "vintage_label",
    "original_box",
    "chain_stitching",
    "made_up_tag",
];

const SUPPLEMENT_VOCABULARY: &[&str] =
    &["original_box", "tags", "dust_bag", "authenticity_card", "receipt"];

const ORIGIN_VOCABULARY: &[&str] = &[
    "Italy", "France", "Japan", "USA", "UK", "Germany", "Spain", "Portugal", "China", "Vietnam",
    "Canada", "Atlantis",
];

const DECADES: &[&str] = &[
    "1950s", "1960s", "1970s", "1980s", "1990s", "2000s", "2010s", "2020s",
];

fn tags_from(vocabulary: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vocabulary), 0..6)
}

fn sensitivity() -> impl Strategy<Value = Decimal> {
    (50i64..=150).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

#[test]
fn test_condition_scenario_from_pricing_rules() {
    let adjustment = ConditionCalculator::default()
        .calculate(5, &["original_box", "tags"], dec!(1.0))
        .unwrap();
    assert_eq!(adjustment, dec!(0.28));
}

#[test]
fn test_condition_rejects_out_of_range_scores() {
    let calculator = ConditionCalculator::default();
    assert!(calculator.calculate(6, NO_TAGS, dec!(1.0)).unwrap_err().is_validation());
    assert!(calculator.calculate(-1, NO_TAGS, dec!(1.0)).unwrap_err().is_validation());
}

#[test]
fn test_premium_outranks_neighbor() {
    let tables = PricingTables::default();
    assert!(tables.is_neighbor_of("Germany", "France"));

    let classifier = OriginTierClassifier::default();
    assert_eq!(
        classifier.tier(Some("Germany"), &["France"]).unwrap(),
        OriginTier::Premium
    );
    assert_eq!(classifier.classify(Some("Germany"), &["France"]).unwrap(), dec!(0.15));
}

#[test]
fn test_empty_expected_lists() {
    let decade = DecadeCalculator::default().calculate(Some("1950s"), NO_TAGS);
    assert_eq!(decade.unwrap(), dec!(0.20));

    let origin = OriginTierClassifier::default().classify(Some("China"), NO_TAGS);
    assert_eq!(origin.unwrap(), dec!(-0.10));
}

#[test]
fn test_strict_validation_of_required_inputs() {
    let decade = DecadeCalculator::default().calculate(Some("1930s"), NO_TAGS);
    assert!(decade.unwrap_err().is_validation());

    let origin = OriginTierClassifier::default().classify(None, NO_TAGS);
    assert!(origin.unwrap_err().is_validation());

    let model = ModelCoefficientResolver.resolve::<ModelRecord>(None);
    assert!(model.unwrap_err().is_validation());
}

#[test]
fn test_max_versus_sum() {
    let trend = TrendCalculator::default().calculate(&["y2k", "vintage"], NO_TAGS);
    assert_eq!(trend.unwrap(), dec!(0.20));

    let feature = FeatureCalculator::default().calculate(&["selvedge", "original_box"], NO_TAGS);
    assert_eq!(feature.unwrap(), dec!(0.25));
}

#[test]
fn test_feature_cap_and_unknown_tags() {
    let calculator = FeatureCalculator::default();
    assert_eq!(
        calculator
            .calculate(&["deadstock", "selvedge", "og_colorway"], NO_TAGS)
            .unwrap(),
        dec!(0.30)
    );
    assert_eq!(
        calculator
            .calculate(&["deadstock", "made_up_tag"], NO_TAGS)
            .unwrap(),
        dec!(0.20)
    );
}

#[test]
fn test_calculators_share_tables_across_threads() {
    let engine = Arc::new(AdjustmentEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .trend()
                    .calculate(&["grunge", "preppy"], NO_TAGS)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), dec!(0.15));
    }
}

proptest! {
    #[test]
    fn prop_condition_within_band(
        score in 0i32..=5,
        sensitivity in sensitivity(),
        supplements in tags_from(SUPPLEMENT_VOCABULARY),
    ) {
        let calculator = ConditionCalculator::default();
        let first = calculator.calculate(score, &supplements, sensitivity).unwrap();
        let second = calculator.calculate(score, &supplements, sensitivity).unwrap();
        prop_assert!(first >= dec!(-0.30) && first <= dec!(0.30));
        prop_assert_eq!(first.scale(), 2);
        prop_assert_eq!(first.serialize(), second.serialize());
    }

    #[test]
    fn prop_condition_rejects_scores_outside_range(score in prop_oneof![i32::MIN..0, 6..i32::MAX]) {
        let result = ConditionCalculator::default().calculate(score, NO_TAGS, dec!(1.0));
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_origin_takes_one_of_three_values(
        origin in prop::sample::select(ORIGIN_VOCABULARY),
        expected in tags_from(ORIGIN_VOCABULARY),
    ) {
        let adjustment = OriginTierClassifier::default().classify(Some(origin), &expected).unwrap();
        prop_assert!([dec!(-0.10), dec!(0.00), dec!(0.15)].contains(&adjustment));
    }

    #[test]
    fn prop_decade_within_bounds(
        decade in prop::sample::select(DECADES),
        expected in tags_from(DECADES),
    ) {
        let bonus = DecadeCalculator::default().calculate(Some(decade), &expected).unwrap();
        prop_assert!(bonus >= Decimal::ZERO && bonus <= dec!(0.20));
        if expected.contains(&decade) {
            prop_assert_eq!(bonus, Decimal::ZERO);
        }
    }

    #[test]
    fn prop_trend_is_max_of_unexpected(
        actual in tags_from(TREND_VOCABULARY),
        expected in tags_from(TREND_VOCABULARY),
    ) {
        let tables = PricingTables::default();
        let bonus = TrendCalculator::default().calculate(&actual, &expected).unwrap();
        prop_assert!(bonus >= Decimal::ZERO && bonus <= dec!(0.20));

        let best = actual
            .iter()
            .filter(|tag| !expected.contains(*tag))
            .filter_map(|tag| tables.trend_coefficients().get(*tag).copied())
            .max()
            .unwrap_or(Decimal::ZERO);
        prop_assert_eq!(bonus, best);
    }

    #[test]
    fn prop_feature_within_cap(
        actual in tags_from(FEATURE_VOCABULARY),
        expected in tags_from(FEATURE_VOCABULARY),
    ) {
        let calculator = FeatureCalculator::default();
        let bonus = calculator.calculate(&actual, &expected).unwrap();
        prop_assert!(bonus >= Decimal::ZERO && bonus <= dec!(0.30));
        prop_assert_eq!(bonus, calculator.calculate(&actual, &expected).unwrap());
    }
}
