//! Unit registry and compound-unit conversion.
//!
//! Every quantity is stored in an **internal unit system** (SI by
//! default).  A [`Converter`] turns `(value, unit string)` pairs into
//! internal values and back.  Unit strings are either registered
//! symbols or compound expressions built from them:
//!
//! | Expression      | Meaning                        |
//! |-----------------|--------------------------------|
//! | `km/s`          | quotient                       |
//! | `kg m`          | product (space)                |
//! | `d^-1`, `m^0.5` | real-valued power              |
//! | `m^3/(kg s^2)`  | grouping with parentheses      |
//! | `10^24 kg`      | numeric literals as factors    |
//!
//! Each operator splits at its *first* occurrence outside parentheses,
//! so chained quotients group to the right: `km/h/h` is `km/(h/h)`,
//! i.e. plain `km`.  Write `km/h^2` or `km/(h h)` for an acceleration.
//! Nesting deeper than [`MAX_DEPTH`] levels is rejected with
//! [`UnitError::TooDeep`].
//!
//! Resolved compound units are memoized in the registry, so the next
//! lookup of the same string is a plain map hit.
//!
//! # Unit systems
//!
//! | Preset        | Length | Mass     | Time |
//! |---------------|--------|----------|------|
//! | `si()`        | m      | kg       | s    |
//! | `cgs()`       | cm     | g        | s    |
//! | `planetary()` | km     | 10^24 kg | d    |
//!
//! ```
//! use converter::{Converter, UnitSystem};
//!
//! let conv = Converter::with_system(&UnitSystem::planetary());
//! // one km/s is 86 400 km per day
//! let v = conv.to_internal(1.0, "km/s")?;
//! assert!((v - 86_400.0).abs() < 1e-6);
//! # Ok::<(), converter::UnitError>(())
//! ```

mod error;
mod parser;
mod quantity;
mod registry;
mod seed;

pub use error::{Result, UnitError};
pub use parser::{parse_compound_unit, try_parse_compound_unit, Failure, MAX_DEPTH};
pub use quantity::{ConvertOptions, Converter};
pub use registry::{AffineUnit, Registry, SharedRegistry};
pub use seed::{SeedUnit, UnitSystem, CELSIUS, FAHRENHEIT, LINEAR_UNITS, NONLINEAR_UNITS};
