use tracing::debug;

use crate::error::*;
use crate::parser::{try_parse_compound_unit, Failure};
use crate::registry::{AffineUnit, Registry, SharedRegistry};
use crate::seed::UnitSystem;

// ────────────────────────────────────────────────────────────────────
//  ConvertOptions — per-call switches
// ────────────────────────────────────────────────────────────────────

/// Per-call behaviour of [`Converter::to_internal_with`] and friends.
///
/// The default parses compound units, memoizes the result and reports
/// failures as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub parse_compound: bool,
    pub memoize: bool,
    pub failure: Failure,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self { parse_compound: true, memoize: true, failure: Failure::Loud }
    }

    pub fn parse_compound(mut self, yes: bool) -> Self { self.parse_compound = yes; self }
    pub fn memoize(mut self, yes: bool) -> Self { self.memoize = yes; self }
    pub fn failure(mut self, f: Failure) -> Self { self.failure = f; self }

    /// Report failures as `NaN` instead of `Err`.
    pub fn quiet(self) -> Self { self.failure(Failure::Quiet) }
}

impl Default for ConvertOptions {
    fn default() -> Self { Self::new() }
}

// ────────────────────────────────────────────────────────────────────
//  Converter — registry handle + conversion operations
// ────────────────────────────────────────────────────────────────────

/// How a unit string maps onto internal units once resolved.
#[derive(Debug, Clone, Copy)]
enum Resolved {
    /// Empty unit string: values pass through untouched.
    Identity,
    Linear(f64),
    Affine(AffineUnit),
}

/// Converts quantities between external unit strings and the internal
/// unit system of its registry.
///
/// Cloning is cheap and the clone shares the registry, including every
/// compound unit memoized from now on.
///
/// ```
/// use converter::Converter;
///
/// let conv = Converter::si();
/// let v = conv.to_internal(36.0, "km/h")?;
/// assert!((v - 10.0).abs() < 1e-12);
/// # Ok::<(), converter::UnitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    registry: SharedRegistry,
}

impl Default for Converter {
    fn default() -> Self { Self::si() }
}

impl Converter {
    pub fn new(registry: impl Into<SharedRegistry>) -> Self {
        Self { registry: registry.into() }
    }

    /// Seeded registry with SI internal units.
    pub fn si() -> Self {
        Self::new(Registry::new())
    }

    pub fn with_system(system: &UnitSystem) -> Self {
        Self::new(Registry::with_system(system))
    }

    /// The backing registry (shared with every clone of this converter).
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    // ── External → internal ─────────────────────────────────────────

    /// `x` in `unit` → internal units, with default options.
    pub fn to_internal(&self, x: f64, unit: &str) -> Result<f64> {
        self.to_internal_with(x, unit, ConvertOptions::default())
    }

    pub fn to_internal_with(&self, x: f64, unit: &str, opts: ConvertOptions) -> Result<f64> {
        let result = self.resolve(unit, opts).map(|resolved| match resolved {
            Resolved::Identity => x,
            Resolved::Linear(m) => x * m,
            Resolved::Affine(a) => (a.to_internal)(x),
        });
        opts.failure.signal(result)
    }

    // ── Internal → external ─────────────────────────────────────────

    /// Internal units → `x` in `unit`, with default options.
    pub fn from_internal(&self, x: f64, unit: &str) -> Result<f64> {
        self.from_internal_with(x, unit, ConvertOptions::default())
    }

    pub fn from_internal_with(&self, x: f64, unit: &str, opts: ConvertOptions) -> Result<f64> {
        let result = self.resolve(unit, opts).map(|resolved| match resolved {
            Resolved::Identity => x,
            Resolved::Linear(m) => x / m,
            Resolved::Affine(a) => (a.from_internal)(x),
        });
        opts.failure.signal(result)
    }

    /// `x` in `from` → `x` in `to`, passing through internal units.
    pub fn convert(&self, x: f64, from: &str, to: &str) -> Result<f64> {
        let internal = self.to_internal(x, from)?;
        self.from_internal(internal, to)
    }

    // ── Probing ─────────────────────────────────────────────────────

    /// True iff converting a probe value with `unit` would succeed.
    ///
    /// Runs a quiet conversion, so a compound unit that resolves is
    /// memoized just like in a real conversion.
    pub fn is_valid_unit(&self, unit: &str, parse_compound: bool) -> bool {
        let opts = ConvertOptions::new().parse_compound(parse_compound).quiet();
        matches!(self.to_internal_with(1.0, unit, opts), Ok(v) if !v.is_nan())
    }

    /// Resolve a compound unit against this converter's registry without
    /// memoizing it.
    pub fn parse_compound_unit(&self, unit: &str, failure: Failure) -> Result<f64> {
        let result = self
            .registry
            .read()
            .and_then(|reg| try_parse_compound_unit(unit, &reg));
        failure.signal(result)
    }

    // ── Resolution ──────────────────────────────────────────────────

    fn resolve(&self, unit: &str, opts: ConvertOptions) -> Result<Resolved> {
        if unit.is_empty() {
            return Ok(Resolved::Identity);
        }

        let multiplier = {
            let reg = self.registry.read()?;
            if let Some(m) = reg.lookup_linear(unit) {
                return Ok(Resolved::Linear(m));
            }
            if let Some(a) = reg.lookup_nonlinear(unit) {
                return Ok(Resolved::Affine(a));
            }
            if !opts.parse_compound {
                return Err(UnitError::UnknownUnit(unit.to_string()));
            }
            try_parse_compound_unit(unit, &reg)?
        };

        if opts.memoize {
            // Another thread may have stored the same key meanwhile; the
            // value is identical, so a plain upsert is fine.
            self.registry.write()?.insert_linear(unit, multiplier)?;
            debug!(unit, multiplier, "memoized compound unit");
        }
        Ok(Resolved::Linear(multiplier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_unit_is_a_no_op() {
        let conv = Converter::si();
        assert_eq!(conv.to_internal(42.0, "").unwrap(), 42.0);
        assert_eq!(conv.from_internal(42.0, "").unwrap(), 42.0);
    }

    #[test]
    fn linear_units_multiply_and_divide() {
        let conv = Converter::si();
        assert_eq!(conv.to_internal(2.5, "km").unwrap(), 2500.0);
        assert_eq!(conv.from_internal(2500.0, "km").unwrap(), 2.5);
    }

    #[test]
    fn affine_units_use_their_function_pair() {
        let conv = Converter::si();
        assert_relative_eq!(conv.to_internal(25.0, "degC").unwrap(), 298.15);
        assert_relative_eq!(conv.from_internal(273.15, "F").unwrap(), 32.0, max_relative = 1e-12);
    }

    #[test]
    fn affine_units_do_not_compose() {
        let conv = Converter::si();
        let err = conv.to_internal(1.0, "degC/s").unwrap_err();
        assert_eq!(err, UnitError::Unresolvable("degC".into()));
    }

    #[test]
    fn unknown_unit_without_compound_parsing() {
        let conv = Converter::si();
        let opts = ConvertOptions::new().parse_compound(false);
        assert_eq!(
            conv.to_internal_with(1.0, "km/s", opts).unwrap_err(),
            UnitError::UnknownUnit("km/s".into())
        );
    }

    #[test]
    fn compound_units_are_memoized() {
        let conv = Converter::si();
        assert_eq!(conv.registry().read().unwrap().lookup_linear("km/h"), None);

        let first = conv.to_internal(36.0, "km/h").unwrap();
        let cached = conv.registry().read().unwrap().lookup_linear("km/h");
        assert_relative_eq!(cached.unwrap(), 1000.0 / 3600.0);

        let second = conv.to_internal(36.0, "km/h").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn memoization_can_be_disabled() {
        let conv = Converter::si();
        let opts = ConvertOptions::new().memoize(false);
        conv.to_internal_with(1.0, "km/h", opts).unwrap();
        assert!(!conv.registry().read().unwrap().contains("km/h"));
    }

    #[test]
    fn failed_parse_leaves_registry_untouched() {
        let conv = Converter::si();
        let before = conv.registry().read().unwrap().len();
        assert!(conv.to_internal(1.0, "furlong/fortnight").is_err());
        assert_eq!(conv.registry().read().unwrap().len(), before);
    }

    #[test]
    fn quiet_failures_become_nan() {
        let conv = Converter::si();
        let opts = ConvertOptions::new().quiet();
        assert!(conv.to_internal_with(1.0, "m/(kg", opts).unwrap().is_nan());
        assert!(conv.from_internal_with(1.0, "furlong", opts).unwrap().is_nan());
        assert!(
            conv.to_internal_with(1.0, "bogus", opts.parse_compound(false))
                .unwrap()
                .is_nan()
        );
    }

    #[test]
    fn validity_probe() {
        let conv = Converter::si();
        assert!(conv.is_valid_unit("km", false));
        assert!(conv.is_valid_unit("degF", false));
        assert!(conv.is_valid_unit("", false));
        assert!(!conv.is_valid_unit("km/s", false));
        assert!(conv.is_valid_unit("km/s", true));
        assert!(!conv.is_valid_unit("m/(kg", true));
    }

    #[test]
    fn convert_passes_through_internal_units() {
        let conv = Converter::si();
        assert_relative_eq!(conv.convert(1.0, "d", "h").unwrap(), 24.0);
        assert_relative_eq!(conv.convert(100.0, "degC", "degF").unwrap(), 212.0, max_relative = 1e-12);
    }

    #[test]
    fn parse_compound_unit_does_not_memoize() {
        let conv = Converter::si();
        let m = conv.parse_compound_unit("km/s", Failure::Loud).unwrap();
        assert_eq!(m, 1000.0);
        assert!(!conv.registry().read().unwrap().contains("km/s"));
        assert!(conv.parse_compound_unit("km/", Failure::Quiet).unwrap().is_nan());
    }

    #[test]
    fn clones_share_memoized_units() {
        let a = Converter::si();
        let b = a.clone();
        a.to_internal(1.0, "AU/yr").unwrap();
        assert!(b.registry().read().unwrap().contains("AU/yr"));
        assert!(!Converter::si().registry().read().unwrap().contains("AU/yr"));
    }

    #[test]
    fn alternate_unit_system() {
        let cgs = Converter::with_system(&UnitSystem::cgs());
        assert_relative_eq!(cgs.to_internal(1.0, "m").unwrap(), 100.0);
        assert_relative_eq!(cgs.to_internal(1.0, "kg m/s^2").unwrap(), 1e5, max_relative = 1e-12);
    }
}
