//! Behavioural properties of the harmonic analysis engine.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rstest::rstest;

use power_quality_analyser::power_quality::{
    calculate, ComplianceStatus, HarmonicAnalysisEngine, HarmonicComponent, PowerQualityInput,
    PowerQualityRating, SystemType,
};

fn input_with(
    fundamental: f64,
    system_type: SystemType,
    harmonics: &BTreeMap<u32, f64>,
) -> PowerQualityInput {
    PowerQualityInput::new(fundamental, system_type).with_harmonics(
        harmonics
            .iter()
            .map(|(&order, &current)| HarmonicComponent::new(order, current)),
    )
}

fn harmonic_set() -> impl Strategy<Value = BTreeMap<u32, f64>> {
    prop::collection::btree_map(2u32..=50, 0.01f64..100.0, 0..8)
}

fn system_type() -> impl Strategy<Value = SystemType> {
    prop_oneof![Just(SystemType::SinglePhase), Just(SystemType::ThreePhase)]
}

proptest! {
    #[test]
    fn undistorted_supply_baseline(
        fundamental in 0.1f64..1000.0,
        dpf in 0.01f64..=1.0,
        system in system_type(),
    ) {
        let input = PowerQualityInput::new(fundamental, system).with_displacement_pf(dpf);
        let result = calculate(&input).unwrap();

        prop_assert_eq!(result.thdi_current, 0.0);
        prop_assert_eq!(result.k_factor, 1.0);
        prop_assert_eq!(result.transformer_derating, 100.0);
        prop_assert_eq!(result.true_power_factor, dpf);
    }

    #[test]
    fn raising_one_harmonic_raises_thd_and_rms(
        fundamental in 1.0f64..500.0,
        harmonics in harmonic_set().prop_filter("need a harmonic", |h| !h.is_empty()),
        pick in any::<prop::sample::Index>(),
        delta in 0.1f64..10.0,
    ) {
        let before = calculate(&input_with(fundamental, SystemType::SinglePhase, &harmonics)).unwrap();

        let order = *pick.get(&harmonics.keys().copied().collect::<Vec<_>>());
        let mut raised = harmonics.clone();
        *raised.get_mut(&order).unwrap() += delta;
        let after = calculate(&input_with(fundamental, SystemType::SinglePhase, &raised)).unwrap();

        prop_assert!(after.thdi_current > before.thdi_current);
        prop_assert!(after.rms_current_total > before.rms_current_total);
    }

    #[test]
    fn higher_orders_weigh_more_in_k_factor(
        fundamental in 1.0f64..500.0,
        current in 0.1f64..100.0,
        low in 2u32..50,
        gap in 1u32..49,
    ) {
        let high = (low + gap).min(50);
        prop_assume!(high > low);

        let low_input = PowerQualityInput::new(fundamental, SystemType::SinglePhase).with_harmonic(low, current);
        let high_input = PowerQualityInput::new(fundamental, SystemType::SinglePhase).with_harmonic(high, current);
        let low_result = calculate(&low_input).unwrap();
        let high_result = calculate(&high_input).unwrap();

        prop_assert_eq!(low_result.thdi_current, high_result.thdi_current);
        prop_assert!(high_result.k_factor > low_result.k_factor);
    }

    #[test]
    fn single_phase_never_reports_neutral_current(
        fundamental in 1.0f64..500.0,
        harmonics in harmonic_set(),
    ) {
        let result = calculate(&input_with(fundamental, SystemType::SinglePhase, &harmonics)).unwrap();
        prop_assert_eq!(result.neutral_current, 0.0);
    }

    #[test]
    fn only_triplens_move_the_neutral(
        fundamental in 1.0f64..500.0,
        mut harmonics in harmonic_set(),
        third in 0.1f64..50.0,
        fifth in 0.1f64..50.0,
        delta in 0.1f64..10.0,
    ) {
        harmonics.insert(3, third);
        harmonics.insert(5, fifth);
        let base = calculate(&input_with(fundamental, SystemType::ThreePhase, &harmonics)).unwrap();

        let mut fifth_changed = harmonics.clone();
        fifth_changed.insert(5, fifth + delta);
        let after_fifth = calculate(&input_with(fundamental, SystemType::ThreePhase, &fifth_changed)).unwrap();
        prop_assert_eq!(after_fifth.neutral_current, base.neutral_current);

        let mut third_changed = harmonics.clone();
        third_changed.insert(3, third + delta);
        let after_third = calculate(&input_with(fundamental, SystemType::ThreePhase, &third_changed)).unwrap();
        prop_assert!(after_third.neutral_current > base.neutral_current);
    }

    #[test]
    fn identical_input_gives_identical_output(
        fundamental in 1.0f64..500.0,
        harmonics in harmonic_set(),
        system in system_type(),
        dpf in 0.01f64..=1.0,
    ) {
        let input = input_with(fundamental, system, &harmonics).with_displacement_pf(dpf);
        let engine = HarmonicAnalysisEngine::default();
        let first = engine.calculate(&input).unwrap();
        let second = engine.calculate(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distortion_never_improves_power_factor_or_capacity(
        fundamental in 1.0f64..500.0,
        harmonics in harmonic_set(),
        dpf in 0.01f64..=1.0,
    ) {
        let input = input_with(fundamental, SystemType::ThreePhase, &harmonics).with_displacement_pf(dpf);
        let result = calculate(&input).unwrap();

        prop_assert!(result.true_power_factor <= dpf);
        prop_assert!(result.transformer_derating <= 100.0 && result.transformer_derating > 0.0);
        prop_assert!(result.k_factor >= 1.0);
        prop_assert!(result.crest_factor_current >= std::f64::consts::SQRT_2 - 1e-12);
        prop_assert!(!result.practical_guidance.is_empty());
    }
}

#[test]
fn single_phase_worked_example() {
    let input = PowerQualityInput::new(10.0, SystemType::SinglePhase)
        .with_voltage(230.0)
        .with_frequency(50.0)
        .with_displacement_pf(0.95)
        .with_harmonic(3, 3.0)
        .with_harmonic(5, 2.0);
    let result = calculate(&input).unwrap();

    assert!((result.thdi_current - 36.06).abs() < 0.01);
    assert!((result.rms_current_total - 10.63).abs() < 0.01);
    assert!((result.k_factor - 2.81).abs() < 1e-9);
    assert!((result.transformer_derating - 95.76).abs() < 0.01);
}

#[test]
fn three_phase_neutral_example() {
    let input = PowerQualityInput::new(10.0, SystemType::ThreePhase)
        .with_harmonic(3, 4.0)
        .with_harmonic(9, 2.0)
        .with_harmonic(5, 3.0);
    let result = calculate(&input).unwrap();

    assert!((result.neutral_current - 7.75).abs() < 0.01);
}

#[rstest]
#[case(5.0, true, PowerQualityRating::Excellent)]
#[case(5.5, false, PowerQualityRating::Good)]
#[case(4.5, true, PowerQualityRating::Excellent)]
fn ieee_boundary_is_inclusive(
    #[case] fifth_percent: f64,
    #[case] ieee: bool,
    #[case] rating: PowerQualityRating,
) {
    // 100 A fundamental keeps the percentages exact
    let input = PowerQualityInput::new(100.0, SystemType::SinglePhase).with_harmonic(5, fifth_percent);
    let result = calculate(&input).unwrap();

    assert_eq!(result.thdi_current, fifth_percent);
    assert_eq!(result.ieee_compliance, ieee);
    assert_eq!(result.power_quality_rating, rating);
    assert!(result.bs7671_compliance);
    assert!(result.g_code5_compliance);
}

#[rstest]
#[case(4.0, ComplianceStatus::Compliant)]
#[case(7.0, ComplianceStatus::Borderline)]
#[case(9.0, ComplianceStatus::NonCompliant)]
fn compliance_aggregates_regulatory_flags(#[case] third_percent: f64, #[case] expected: ComplianceStatus) {
    let input = PowerQualityInput::new(100.0, SystemType::SinglePhase).with_harmonic(3, third_percent);
    let result = calculate(&input).unwrap();
    assert_eq!(result.compliance_status, expected);
}
