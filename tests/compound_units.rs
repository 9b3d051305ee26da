use approx::assert_relative_eq;
use unitconv::{ConvertOptions, Converter, Failure, Registry, UnitError};

fn base_units() -> Converter {
    let mut reg = Registry::empty();
    for (symbol, multiplier) in [("m", 1.0), ("s", 1.0), ("kg", 1.0), ("km", 1000.0), ("d", 86_400.0)] {
        reg.insert_linear(symbol, multiplier).unwrap();
    }
    Converter::new(reg)
}

fn parse(conv: &Converter, unit: &str) -> f64 {
    conv.parse_compound_unit(unit, Failure::Loud)
        .unwrap_or_else(|e| panic!("{unit:?} should parse: {e}"))
}

// ═══════════════════════════════════════════════════════════════════
//  Concrete scenarios
// ═══════════════════════════════════════════════════════════════════

#[test]
fn gravitational_constant_units_are_unity_in_base_units() {
    let conv = base_units();
    assert_eq!(parse(&conv, "m^3/(kg s^2)"), 1.0);
}

#[test]
fn km_per_second_is_a_thousand() {
    let conv = base_units();
    assert_eq!(parse(&conv, "km/s"), 1000.0);
}

// ═══════════════════════════════════════════════════════════════════
//  Algebraic properties
// ═══════════════════════════════════════════════════════════════════

#[test]
fn repeated_division() {
    let conv = base_units();
    assert_relative_eq!(parse(&conv, "m/s/s"), parse(&conv, "m/s^2"));
}

#[test]
fn precedence_of_power_over_division_over_product() {
    let conv = base_units();
    let whole = parse(&conv, "km^3/(kg d^2)");
    let parts = parse(&conv, "km^3") / (parse(&conv, "kg") * parse(&conv, "d^2"));
    assert_relative_eq!(whole, parts, max_relative = 1e-12);
}

#[test]
fn exponent_forms() {
    let conv = base_units();
    assert_relative_eq!(parse(&conv, "d^-1"), 1.0 / parse(&conv, "d"), max_relative = 1e-12);
    assert_relative_eq!(parse(&conv, "km^0.5"), parse(&conv, "km").sqrt(), max_relative = 1e-12);
}

#[test]
fn literal_factor() {
    let conv = base_units();
    assert_relative_eq!(parse(&conv, "10^24 kg"), 1e24 * parse(&conv, "kg"), max_relative = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════
//  Memoization
// ═══════════════════════════════════════════════════════════════════

#[test]
fn memoized_result_is_stored_under_the_original_string() {
    let conv = base_units();
    let first = conv.to_internal(2.0, "km/d").unwrap();
    let stored = conv.registry().read().unwrap().lookup_linear("km/d");
    assert_eq!(stored, Some(1000.0 / 86_400.0));
    assert_eq!(conv.to_internal(2.0, "km/d").unwrap(), first);
}

#[test]
fn memoized_units_work_without_compound_parsing() {
    let conv = base_units();
    let no_parse = ConvertOptions::new().parse_compound(false);
    assert!(conv.to_internal_with(1.0, "km/d", no_parse).is_err());
    conv.to_internal(1.0, "km/d").unwrap();
    assert!(conv.to_internal_with(1.0, "km/d", no_parse).is_ok());
}

// ═══════════════════════════════════════════════════════════════════
//  Failures, loud and quiet
// ═══════════════════════════════════════════════════════════════════

#[test]
fn unmatched_open_parenthesis() {
    let conv = base_units();
    let err = conv.parse_compound_unit("m/(kg", Failure::Loud).unwrap_err();
    assert!(matches!(err, UnitError::UnmatchedParenthesis(_)), "got {err:?}");
    assert!(conv.parse_compound_unit("m/(kg", Failure::Quiet).unwrap().is_nan());
}

#[test]
fn unregistered_symbols() {
    let conv = base_units();
    let err = conv.to_internal(1.0, "furlong/fortnight").unwrap_err();
    assert!(err.is_unresolvable(), "got {err:?}");
    assert_eq!(err, UnitError::Unresolvable("furlong".into()));
}

#[test]
fn quiet_probe_does_not_error() {
    let conv = base_units();
    assert!(!conv.is_valid_unit("furlong", true));
    assert!(!conv.is_valid_unit("m/", true));
    assert!(conv.is_valid_unit("m/s", true));
}

#[test]
fn pathologically_deep_units_are_rejected_quietly() {
    let conv = base_units();
    let nested = format!("{}m{}", "(".repeat(10_000), ")".repeat(10_000));
    let product = vec!["m"; 10_000].join(" ");
    for unit in [nested.as_str(), product.as_str()] {
        assert!(!conv.is_valid_unit(unit, true));
        let err = conv.to_internal(1.0, unit).unwrap_err();
        assert!(matches!(err, UnitError::TooDeep { .. }), "got {err:?}");
    }
}
