//! Human-readable rendering of quantities.
//!
//! Everything here works on plain `f64` values; functions that take a
//! [`Converter`] first convert from internal units with
//! [`Converter::from_internal`].

use converter::Converter;

use crate::error::Result;

// ── Significant digits ──────────────────────────────────────────────

/// Decimal exponent of the leading digit (`1234.0 → 3`, `0.05 → -2`).
fn magnitude(x: f64) -> i32 {
    x.abs().log10().floor() as i32
}

/// Round `x` to `digits` significant digits (at least one).
pub fn round_sig(x: f64, digits: u32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    // Let the float formatter do the decimal rounding; scaling by 10^n
    // overflows for subnormal inputs.
    let decimals = digits.max(1) as usize - 1;
    format!("{x:.decimals$e}").parse().unwrap_or(x)
}

/// Plain decimal notation with `digits` significant digits, keeping
/// trailing zeros (`format_sig(1.5, 3) == "1.50"`).
pub fn format_sig(x: f64, digits: u32) -> String {
    let rounded = round_sig(x, digits);
    if rounded == 0.0 || !rounded.is_finite() {
        return format!("{rounded}");
    }
    let decimals = (digits.max(1) as i32 - 1 - magnitude(rounded)).max(0) as usize;
    format!("{rounded:.decimals$}")
}

/// Scientific notation with `digits` significant digits (`1.23e24`).
pub fn format_scientific(x: f64, digits: u32) -> String {
    let decimals = digits.max(1) as usize - 1;
    format!("{x:.decimals$e}")
}

/// Decimal for moderate magnitudes, scientific outside `1e-3 ..= 1e6`.
pub fn format_auto(x: f64, digits: u32) -> String {
    let rounded = round_sig(x, digits);
    if rounded == 0.0 || !rounded.is_finite() {
        return format!("{rounded}");
    }
    match magnitude(rounded) {
        -3..=5 => format_sig(rounded, digits),
        _ => format_scientific(rounded, digits),
    }
}

// ── SI prefixes ─────────────────────────────────────────────────────

const SI_PREFIXES: [(i32, &str); 17] = [
    (-24, "y"), (-21, "z"), (-18, "a"), (-15, "f"), (-12, "p"),
    (-9, "n"), (-6, "µ"), (-3, "m"), (0, ""), (3, "k"),
    (6, "M"), (9, "G"), (12, "T"), (15, "P"), (18, "E"),
    (21, "Z"), (24, "Y"),
];

/// Scale `x` so that `1 <= |scaled| < 1000` and return the matching
/// prefix.  Values beyond yocto/yotta keep the extreme prefix.
pub fn si_prefix(x: f64) -> (f64, &'static str) {
    if x == 0.0 || !x.is_finite() {
        return (x, "");
    }
    let exp3 = (magnitude(x).div_euclid(3) * 3).clamp(-24, 24);
    let prefix = SI_PREFIXES
        .iter()
        .find(|(e, _)| *e == exp3)
        .map_or("", |(_, p)| *p);
    (x / 10f64.powi(exp3), prefix)
}

/// Convert `x_internal` to `base_unit` and render it with an SI prefix
/// (`1500 m → "1.50 km"`).
pub fn format_si(conv: &Converter, x_internal: f64, base_unit: &str, digits: u32) -> Result<String> {
    let value = round_sig(conv.from_internal(x_internal, base_unit)?, digits);
    let (scaled, prefix) = si_prefix(value);
    Ok(format!("{} {prefix}{base_unit}", format_sig(scaled, digits)))
}

/// Convert `x_internal` to `unit` and render `"<value> <unit>"`.
pub fn format_quantity(conv: &Converter, x_internal: f64, unit: &str, digits: u32) -> Result<String> {
    let value = format_auto(conv.from_internal(x_internal, unit)?, digits);
    if unit.is_empty() {
        Ok(value)
    } else {
        Ok(format!("{value} {unit}"))
    }
}

// ── Named large numbers ─────────────────────────────────────────────

const NAMED: [(f64, &str); 5] = [
    (1e15, "quadrillion"),
    (1e12, "trillion"),
    (1e9, "billion"),
    (1e6, "million"),
    (1e3, "thousand"),
];

/// `2_500_000.0 → "2.5 million"`.  Below a thousand the number is
/// printed plainly; from 10^18 on it switches to scientific notation.
pub fn format_named(x: f64, digits: u32) -> String {
    let rounded = round_sig(x, digits);
    let size = rounded.abs();
    if !rounded.is_finite() || size >= 1e18 {
        return format_scientific(rounded, digits);
    }
    match NAMED.iter().find(|(scale, _)| size >= *scale) {
        Some((scale, name)) => format!("{} {name}", trim_zeros(format_sig(rounded / scale, digits))),
        None => format_sig(rounded, digits),
    }
}

fn trim_zeros(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

// ── Latitude / longitude ────────────────────────────────────────────

/// Degrees → `12°34'56.7"` (tenths of an arcsecond).
fn dms(degrees: f64) -> String {
    let tenths = (degrees.abs() * 36_000.0).round() as u64;
    let d = tenths / 36_000;
    let m = (tenths % 36_000) / 600;
    let s = (tenths % 600) as f64 / 10.0;
    format!("{d}°{m:02}'{s:04.1}\"")
}

/// `-33.8568 → 33°51'24.5"S`.
pub fn format_lat(degrees: f64) -> String {
    let hemisphere = if degrees < 0.0 { 'S' } else { 'N' };
    format!("{}{hemisphere}", dms(degrees))
}

/// Longitudes are wrapped into (-180, 180] first.
pub fn format_lon(degrees: f64) -> String {
    let mut wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        wrapped = 180.0;
    }
    let hemisphere = if wrapped < 0.0 { 'W' } else { 'E' };
    format!("{}{hemisphere}", dms(wrapped))
}

pub fn format_latlon(lat: f64, lon: f64) -> String {
    format!("{}, {}", format_lat(lat), format_lon(lon))
}
