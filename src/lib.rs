//! # unitconv
//!
//! Unit conversion and display formatting for scientific quantities.
//!
//! ## Highlights
//!
//! * **Compound units** — `"m^3/(kg s^2)"`, `"10^24 kg"`, `"d^-1"`
//! * **Memoizing registry** — a compound unit is parsed once, then looked up
//! * **Affine scales** — `degC` and `degF` next to linear units
//! * **Unit systems** — SI, CGS or planetary (km, 10^24 kg, d) internally
//! * **Quiet mode** — get `NaN` instead of an error when probing units
//! * **Formatting** — significant digits, SI prefixes, named numbers, lat/lon
//!
//! ## Quick example
//!
//! ```
//! use unitconv::{Converter, format};
//!
//! let conv = Converter::si();
//! let v = conv.to_internal(120.0, "km/h")?;       // m/s
//! assert!((v - 33.333).abs() < 1e-3);
//!
//! let s = format::format_si(&conv, 1.5e3, "m", 3)?;
//! assert_eq!(s, "1.50 km");
//! # Ok::<(), unitconv::UnitconvError>(())
//! ```
//!
//! ## Process-wide converter
//!
//! [`global()`] is configured from `UNITCONV_SYSTEM` and
//! `UNITCONV_UNITS_FILE` (also read from a `.env` file):
//!
//! ```no_run
//! let _g = unitconv::to_internal(6.674e-11, "m^3/(kg s^2)")?;
//! assert!(unitconv::is_valid_unit("AU/d", true));
//! # Ok::<(), unitconv::UnitconvError>(())
//! ```

// ── Internal modules ─────────────────────────────────────────────────
pub mod config;
pub mod error;
pub mod format;
mod global;

// ── Public re-exports ────────────────────────────────────────────────
pub use config::{Config, UnitFile};
pub use error::{ConfigError, Result, UnitconvError};
pub use global::{
    from_internal, from_internal_with, global, is_valid_unit, parse_compound_unit,
    set_global, to_internal, to_internal_with,
};

pub use converter::{
    AffineUnit, ConvertOptions, Converter, Failure, Registry, SharedRegistry, UnitError,
    UnitSystem,
};
