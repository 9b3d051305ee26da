use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::*;
use crate::seed::{UnitSystem, LINEAR_UNITS, NONLINEAR_UNITS};

// ────────────────────────────────────────────────────────────────────
//  Affine (nonlinear) units
// ────────────────────────────────────────────────────────────────────

/// Conversion pair for a unit with an offset (°C, °F).
///
/// These never take part in compound expressions: the parser only
/// composes linear multipliers.
#[derive(Debug, Clone, Copy)]
pub struct AffineUnit {
    pub to_internal: fn(f64) -> f64,
    pub from_internal: fn(f64) -> f64,
}

// ────────────────────────────────────────────────────────────────────
//  Registry
// ────────────────────────────────────────────────────────────────────

/// Symbol table of every unit a converter understands.
///
/// Linear entries satisfy `value_in_unit * multiplier = value_internal`.
/// A symbol lives in at most one of the two maps.  The table only grows:
/// compound expressions resolved by the parser are written back under
/// their original spelling.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    linear: HashMap<String, f64>,
    nonlinear: HashMap<String, AffineUnit>,
}

impl Registry {
    /// Seeded for SI internal units.
    pub fn new() -> Self {
        Self::with_system(&UnitSystem::si())
    }

    /// A registry with no symbols at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seed the built-in table, rescaled so that `system`'s base units
    /// have multiplier 1.
    pub fn with_system(system: &UnitSystem) -> Self {
        let mut reg = Self::empty();
        for entry in LINEAR_UNITS {
            reg.linear.insert(entry.symbol.to_string(), system.scale(entry));
        }
        for (symbol, affine) in NONLINEAR_UNITS {
            reg.nonlinear.insert((*symbol).to_string(), *affine);
        }
        reg
    }

    // ── Lookups ─────────────────────────────────────────────────────

    pub fn lookup_linear(&self, symbol: &str) -> Option<f64> {
        self.linear.get(symbol).copied()
    }

    pub fn lookup_nonlinear(&self, symbol: &str) -> Option<AffineUnit> {
        self.nonlinear.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.linear.contains_key(symbol) || self.nonlinear.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.linear.len() + self.nonlinear.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered symbol, linear first.  Order within each kind is
    /// unspecified.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.linear.keys().chain(self.nonlinear.keys()).map(String::as_str)
    }

    // ── Insertion ───────────────────────────────────────────────────

    /// Upsert a linear unit.  Overwriting an existing linear entry is
    /// allowed (last write wins); shadowing a nonlinear one is not.
    pub fn insert_linear(&mut self, symbol: impl Into<String>, multiplier: f64) -> Result<()> {
        let symbol = symbol.into();
        if multiplier == 0.0 || !multiplier.is_finite() {
            return Err(UnitError::InvalidMultiplier { symbol, value: multiplier });
        }
        if self.nonlinear.contains_key(&symbol) {
            return Err(UnitError::SymbolConflict(symbol));
        }
        self.linear.insert(symbol, multiplier);
        Ok(())
    }

    pub fn insert_nonlinear(&mut self, symbol: impl Into<String>, unit: AffineUnit) -> Result<()> {
        let symbol = symbol.into();
        if self.linear.contains_key(&symbol) {
            return Err(UnitError::SymbolConflict(symbol));
        }
        self.nonlinear.insert(symbol, unit);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────
//  SharedRegistry — one registry, many readers and writers
// ────────────────────────────────────────────────────────────────────

/// Cloneable handle to a registry shared between threads.
///
/// Clones point at the same table; build a fresh one per test or per
/// alternate unit system to keep them isolated.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self { inner: Arc::new(RwLock::new(registry)) }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Registry>> {
        self.inner.read().map_err(|_| UnitError::RegistryPoisoned)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Registry>> {
        self.inner.write().map_err(|_| UnitError::RegistryPoisoned)
    }

    /// True when both handles share one table.
    pub fn same_registry(&self, other: &SharedRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self { Self::new(registry) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::CELSIUS;

    #[test]
    fn seeded_registry_knows_base_units() {
        let reg = Registry::new();
        assert_eq!(reg.lookup_linear("m"), Some(1.0));
        assert_eq!(reg.lookup_linear("km"), Some(1000.0));
        assert!(reg.lookup_nonlinear("degC").is_some());
        assert!(reg.contains("degF"));
        assert!(!reg.contains("furlong"));
    }

    #[test]
    fn absent_is_not_zero() {
        let reg = Registry::empty();
        assert!(reg.is_empty());
        assert_eq!(reg.lookup_linear("m"), None);
    }

    #[test]
    fn zero_and_non_finite_multipliers_are_rejected() {
        let mut reg = Registry::empty();
        assert!(matches!(
            reg.insert_linear("zero", 0.0),
            Err(UnitError::InvalidMultiplier { .. })
        ));
        assert!(reg.insert_linear("nan", f64::NAN).is_err());
        assert!(reg.insert_linear("inf", f64::INFINITY).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn insert_is_an_upsert() {
        let mut reg = Registry::empty();
        reg.insert_linear("furlong", 201.0).unwrap();
        reg.insert_linear("furlong", 201.168).unwrap();
        assert_eq!(reg.lookup_linear("furlong"), Some(201.168));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn linear_and_nonlinear_stay_disjoint() {
        let mut reg = Registry::new();
        assert_eq!(
            reg.insert_linear("degC", 1.0),
            Err(UnitError::SymbolConflict("degC".into()))
        );
        assert_eq!(
            reg.insert_nonlinear("m", CELSIUS).unwrap_err(),
            UnitError::SymbolConflict("m".into())
        );
    }

    #[test]
    fn symbols_cover_both_maps() {
        let mut reg = Registry::empty();
        reg.insert_linear("m", 1.0).unwrap();
        reg.insert_nonlinear("degC", CELSIUS).unwrap();
        let mut all: Vec<&str> = reg.symbols().collect();
        all.sort();
        assert_eq!(all, ["degC", "m"]);
    }

    #[test]
    fn shared_handles_see_each_others_writes() {
        let a = SharedRegistry::new(Registry::empty());
        let b = a.clone();
        a.write().unwrap().insert_linear("x", 2.0).unwrap();
        assert_eq!(b.read().unwrap().lookup_linear("x"), Some(2.0));
        assert!(a.same_registry(&b));
        assert!(!a.same_registry(&SharedRegistry::default()));
    }
}
