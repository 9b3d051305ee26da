use approx::assert_relative_eq;
use proptest::prelude::*;
use unitconv::{Converter, Registry, UnitSystem};

fn seeded_symbols() -> Vec<String> {
    let mut symbols: Vec<String> = Registry::new().symbols().map(String::from).collect();
    symbols.sort();
    symbols
}

proptest! {
    #[test]
    fn seeded_units_round_trip(
        unit in prop::sample::select(seeded_symbols()),
        x in -1e12f64..1e12,
    ) {
        let conv = Converter::si();
        let unit = unit.as_str();
        let back = conv.from_internal(conv.to_internal(x, unit).unwrap(), unit).unwrap();
        prop_assert!((back - x).abs() <= 1e-9 * x.abs().max(1.0), "{unit}: {x} -> {back}");
    }
}

#[test]
fn compound_units_round_trip_in_every_system() {
    for system in [UnitSystem::si(), UnitSystem::cgs(), UnitSystem::planetary()] {
        let conv = Converter::with_system(&system);
        for unit in ["km/s", "m^3/(kg s^2)", "AU/d", "10^24 kg", "deg/yr", "kg m^2/s^2"] {
            let internal = conv.to_internal(3.25, unit).unwrap();
            assert_relative_eq!(conv.from_internal(internal, unit).unwrap(), 3.25, max_relative = 1e-12);
        }
    }
}

#[test]
fn internal_units_agree_across_systems() {
    let si = Converter::with_system(&UnitSystem::si());
    let cgs = Converter::with_system(&UnitSystem::cgs());
    // 1 J = 1e7 erg
    let erg = cgs.to_internal(1.0, "J").unwrap();
    assert_relative_eq!(erg, 1e7, max_relative = 1e-12);
    assert_relative_eq!(si.convert(1.0, "kg m^2/s^2", "J").unwrap(), 1.0);
}
