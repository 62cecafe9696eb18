//! Property tests for the emission, sink, and land-area calculators

use netzero_core::land_area::{to_hectares, AreaUnit, LandAreaInput};
use netzero_core::{Calculator, FactorTables};
use proptest::prelude::*;

fn activity_kinds() -> Vec<String> {
    FactorTables::builtin()
        .activities
        .kinds()
        .into_iter()
        .map(String::from)
        .collect()
}

proptest! {
    #[test]
    fn emission_is_quantity_times_factor(
        kind in proptest::sample::select(activity_kinds()),
        quantity in 0.0f64..1.0e9,
    ) {
        let calculator = Calculator::default();
        let factor = calculator.tables().activities.get(&kind).unwrap().factor;

        let co2e = calculator.calculate_emission(&kind, quantity).unwrap();
        prop_assert_eq!(co2e.kg(), quantity * factor);
    }

    #[test]
    fn negative_quantities_are_rejected(
        kind in proptest::sample::select(activity_kinds()),
        quantity in -1.0e9f64..-1.0e-9,
    ) {
        let calculator = Calculator::default();
        prop_assert!(calculator.calculate_emission(&kind, quantity).is_err());
    }

    #[test]
    fn hectares_round_trip(area in 0.0f64..1.0e7) {
        let once = to_hectares(area, AreaUnit::Hectares);
        prop_assert_eq!(to_hectares(once, AreaUnit::Hectares), area);
    }

    #[test]
    fn annual_offset_times_duration_is_total(
        area in 0.1f64..10_000.0,
        years in 1u32..100,
    ) {
        let calculator = Calculator::default();
        let input = LandAreaInput::new("teak", area, AreaUnit::Hectares, years);
        let offset = calculator.calculate_land_area_offset(&input).unwrap();

        let rebuilt = offset.annual().kg() * f64::from(years);
        prop_assert!((rebuilt - offset.total.kg()).abs() <= offset.total.kg() * 1e-12);
    }

    #[test]
    fn land_area_offset_scales_linearly_with_duration(
        area in 0.1f64..1_000.0,
        years in 1u32..50,
    ) {
        let calculator = Calculator::default();
        let one = calculator
            .calculate_land_area_offset(&LandAreaInput::new("bamboo", area, AreaUnit::Acres, 1))
            .unwrap();
        let many = calculator
            .calculate_land_area_offset(&LandAreaInput::new("bamboo", area, AreaUnit::Acres, years))
            .unwrap();

        let expected = one.total.kg() * f64::from(years);
        prop_assert!((many.total.kg() - expected).abs() <= expected * 1e-9);
    }
}

#[test]
fn reclamation_example_from_rate_area_and_duration() {
    let calculator = Calculator::default();
    let input = LandAreaInput::new("mine-reclamation", 10.0, AreaUnit::Hectares, 25);
    let offset = calculator.calculate_land_area_offset(&input).unwrap();

    assert!((offset.total.tonnes() - 5.2 * 10.0 * 25.0).abs() < 1e-9);
}
