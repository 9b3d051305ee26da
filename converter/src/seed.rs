use crate::registry::AffineUnit;

// ────────────────────────────────────────────────────────────────────
//  UnitSystem — which SI-sized base units count as "internal"
// ────────────────────────────────────────────────────────────────────

/// Describes the internal (canonical) unit system a registry converts to.
///
/// Each field is the size of one internal base unit expressed in SI.
/// Create one with a preset (`si()`, `cgs()`, `planetary()`) or
/// customise individual bases with the builder methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSystem {
    /// Internal length unit, in metres.
    pub length: f64,
    /// Internal mass unit, in kilograms.
    pub mass: f64,
    /// Internal time unit, in seconds.
    pub time: f64,
}

impl UnitSystem {
    /// Start from SI.  Use the builder methods to change individual bases.
    pub fn new() -> Self { Self::si() }

    // ── Presets ──────────────────────────────────────────────────────

    /// m, kg, s.
    pub fn si() -> Self {
        Self { length: 1.0, mass: 1.0, time: 1.0 }
    }

    /// cm, g, s.
    pub fn cgs() -> Self {
        Self { length: 0.01, mass: 0.001, time: 1.0 }
    }

    /// km, 10^24 kg, day — handy for planetary bodies and orbits.
    pub fn planetary() -> Self {
        Self { length: 1000.0, mass: 1e24, time: DAY }
    }

    /// Look up a preset by name (`"si"`, `"cgs"`, `"planetary"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "si" | "mks" => Some(Self::si()),
            "cgs"        => Some(Self::cgs()),
            "planetary"  => Some(Self::planetary()),
            _            => None,
        }
    }

    // ── Builder methods ─────────────────────────────────────────────

    pub fn length(mut self, metres: f64) -> Self { self.length = metres; self }
    pub fn mass(mut self, kilograms: f64) -> Self { self.mass = kilograms; self }
    pub fn time(mut self, seconds: f64) -> Self { self.time = seconds; self }

    /// Multiplier that takes a value in a seeded unit to internal units.
    pub(crate) fn scale(&self, entry: &SeedUnit) -> f64 {
        let [l, m, t] = entry.dims;
        entry.si / (self.length.powi(l) * self.mass.powi(m) * self.time.powi(t))
    }
}

impl Default for UnitSystem {
    fn default() -> Self { Self::si() }
}

// ────────────────────────────────────────────────────────────────────
//  Built-in table
// ────────────────────────────────────────────────────────────────────

/// One linear built-in unit: its size in SI and its `[length, mass, time]`
/// dimension exponents.
#[derive(Debug, Clone, Copy)]
pub struct SeedUnit {
    pub symbol: &'static str,
    pub si: f64,
    pub dims: [i32; 3],
}

const fn unit(symbol: &'static str, si: f64, dims: [i32; 3]) -> SeedUnit {
    SeedUnit { symbol, si, dims }
}

const L: [i32; 3] = [1, 0, 0];
const M: [i32; 3] = [0, 1, 0];
const T: [i32; 3] = [0, 0, 1];
const NONE: [i32; 3] = [0, 0, 0];

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 365.25 * DAY;
const AU: f64 = 1.495_978_707e11;
const LIGHT_YEAR: f64 = 9.460_730_472_580_8e15;
const PARSEC: f64 = 3.085_677_581_491_367e16;

pub static LINEAR_UNITS: &[SeedUnit] = &[
    // Length
    unit("m",   1.0,        L),
    unit("km",  1e3,        L),
    unit("cm",  1e-2,       L),
    unit("mm",  1e-3,       L),
    unit("um",  1e-6,       L),
    unit("µm",  1e-6,       L),
    unit("nm",  1e-9,       L),
    unit("AU",  AU,         L),
    unit("ly",  LIGHT_YEAR, L),
    unit("pc",  PARSEC,     L),
    unit("kpc", 1e3 * PARSEC, L),
    unit("Mpc", 1e6 * PARSEC, L),
    // Mass
    unit("kg",  1.0,  M),
    unit("g",   1e-3, M),
    unit("mg",  1e-6, M),
    unit("t",   1e3,  M),
    // Time
    unit("s",   1.0,         T),
    unit("ms",  1e-3,        T),
    unit("min", MINUTE,      T),
    unit("h",   HOUR,        T),
    unit("d",   DAY,         T),
    unit("yr",  YEAR,        T),
    unit("kyr", 1e3 * YEAR,  T),
    unit("Myr", 1e6 * YEAR,  T),
    unit("Gyr", 1e9 * YEAR,  T),
    // Derived
    unit("Hz",  1.0,   [0, 0, -1]),
    unit("L",   1e-3,  [3, 0, 0]),
    unit("N",   1.0,   [1, 1, -2]),
    unit("J",   1.0,   [2, 1, -2]),
    unit("W",   1.0,   [2, 1, -3]),
    unit("Pa",  1.0,   [-1, 1, -2]),
    unit("bar", 1e5,   [-1, 1, -2]),
    // Dimensionless
    unit("rad",     1.0,                                NONE),
    unit("deg",     std::f64::consts::PI / 180.0,       NONE),
    unit("arcmin",  std::f64::consts::PI / 10_800.0,    NONE),
    unit("arcsec",  std::f64::consts::PI / 648_000.0,   NONE),
    unit("percent", 0.01,                               NONE),
    // Temperature (kelvin is always internal)
    unit("K",   1.0, NONE),
];

// ── Affine temperature scales ───────────────────────────────────────

fn celsius_to_kelvin(t: f64) -> f64 { t + 273.15 }
fn kelvin_to_celsius(t: f64) -> f64 { t - 273.15 }
fn fahrenheit_to_kelvin(t: f64) -> f64 { (t - 32.0) * 5.0 / 9.0 + 273.15 }
fn kelvin_to_fahrenheit(t: f64) -> f64 { (t - 273.15) * 9.0 / 5.0 + 32.0 }

pub const CELSIUS: AffineUnit = AffineUnit {
    to_internal: celsius_to_kelvin,
    from_internal: kelvin_to_celsius,
};

pub const FAHRENHEIT: AffineUnit = AffineUnit {
    to_internal: fahrenheit_to_kelvin,
    from_internal: kelvin_to_fahrenheit,
};

pub static NONLINEAR_UNITS: &[(&str, AffineUnit)] = &[
    ("degC", CELSIUS),
    ("C",    CELSIUS),
    ("degF", FAHRENHEIT),
    ("F",    FAHRENHEIT),
];
