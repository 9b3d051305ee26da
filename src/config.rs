//! Environment-driven configuration of the process-wide converter.
//!
//! | Variable              | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `UNITCONV_SYSTEM`     | `si` (default), `cgs` or `planetary`      |
//! | `UNITCONV_UNITS_FILE` | JSON file with extra units (optional)     |
//!
//! Variables may also come from a `.env` file, looked up once per
//! process.
//!
//! A unit file looks like:
//!
//! ```json
//! {
//!   "linear":   { "furlong": 201.168, "fortnight": 1209600 },
//!   "compound": [["kph", "km/h"], ["fpf", "furlong/fortnight"]]
//! }
//! ```
//!
//! `linear` multipliers are in internal units.  `compound` aliases are
//! resolved in order after every linear entry is in place.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;

use converter::{try_parse_compound_unit, Converter, Registry, UnitSystem};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const SYSTEM_VAR: &str = "UNITCONV_SYSTEM";
pub const UNITS_FILE_VAR: &str = "UNITCONV_UNITS_FILE";

/// Settings that decide how a converter is seeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub system: UnitSystem,
    pub units_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self { system: UnitSystem::si(), units_file: None }
    }
}

impl Config {
    /// Read `UNITCONV_*` variables, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_vars(
            env::var(SYSTEM_VAR).ok(),
            env::var_os(UNITS_FILE_VAR).map(PathBuf::from),
        )
    }

    /// Build a config from already-read values (empty strings count as
    /// unset).
    pub fn from_vars(
        system: Option<String>,
        units_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let system = match system.as_deref().map(str::trim) {
            None | Some("") => UnitSystem::si(),
            Some(name) => UnitSystem::preset(name)
                .ok_or_else(|| ConfigError::UnknownSystem(name.to_string()))?,
        };
        let units_file = units_file.filter(|p| !p.as_os_str().is_empty());
        Ok(Self { system, units_file })
    }

    pub fn system(mut self, system: UnitSystem) -> Self { self.system = system; self }

    pub fn units_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.units_file = Some(path.into());
        self
    }

    /// Seed a registry for `system` and apply the unit file, if any.
    pub fn build_registry(&self) -> Result<Registry, ConfigError> {
        let mut registry = Registry::with_system(&self.system);
        if let Some(path) = &self.units_file {
            UnitFile::load(path)?.apply(&mut registry, path)?;
        }
        Ok(registry)
    }

    pub fn build_converter(&self) -> Result<Converter, ConfigError> {
        Ok(Converter::new(self.build_registry()?))
    }
}

// ── Unit file ───────────────────────────────────────────────────────

/// Extra units loaded from JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitFile {
    #[serde(default)]
    pub linear: BTreeMap<String, f64>,
    #[serde(default)]
    pub compound: Vec<(String, String)>,
}

impl UnitFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Insert every entry into `registry`.  `path` only labels errors.
    pub fn apply(&self, registry: &mut Registry, path: &Path) -> Result<(), ConfigError> {
        let entry_err = |symbol: &str, source| ConfigError::Entry {
            path: path.to_path_buf(),
            symbol: symbol.to_string(),
            source,
        };

        for (symbol, &multiplier) in &self.linear {
            registry
                .insert_linear(symbol.as_str(), multiplier)
                .map_err(|e| entry_err(symbol, e))?;
        }
        for (symbol, expr) in &self.compound {
            let multiplier =
                try_parse_compound_unit(expr, registry).map_err(|e| entry_err(symbol, e))?;
            registry
                .insert_linear(symbol.as_str(), multiplier)
                .map_err(|e| entry_err(symbol, e))?;
        }
        debug!(
            path = %path.display(),
            linear = self.linear.len(),
            compound = self.compound.len(),
            "loaded unit file"
        );
        Ok(())
    }
}

// ── .env loading (once) ─────────────────────────────────────────────

static DOTENV_SEARCHED: Once = Once::new();

/// Load the first `.env` found in the working directory, next to the
/// crate manifest, or next to the executable.  Variables already set in
/// the environment win.
fn load_dotenv() {
    DOTENV_SEARCHED.call_once(|| {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
            return;
        }
        let fallbacks = [
            env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from),
            env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)),
        ];
        for candidate in fallbacks.into_iter().flatten().map(|dir| dir.join(".env")) {
            match dotenvy::from_path(&candidate) {
                Ok(()) => {
                    debug!(path = %candidate.display(), "loaded .env");
                    return;
                }
                Err(e) if candidate.exists() => {
                    debug!(path = %candidate.display(), error = %e, "ignoring unreadable .env");
                }
                Err(_) => {}
            }
        }
    });
}
