use std::sync::OnceLock;

use converter::{ConvertOptions, Converter, Failure};
use tracing::warn;

use crate::config::Config;
use crate::error::Result;

static GLOBAL: OnceLock<Converter> = OnceLock::new();

/// The process-wide converter, built from [`Config::from_env`] on first use.
///
/// A broken configuration is logged and replaced by plain SI so that
/// callers always get a working converter.
pub fn global() -> &'static Converter {
    GLOBAL.get_or_init(|| {
        match Config::from_env().and_then(|cfg| cfg.build_converter()) {
            Ok(conv) => conv,
            Err(e) => {
                warn!(error = %e, "unit configuration rejected, using SI defaults");
                Converter::si()
            }
        }
    })
}

/// Install `converter` as the process-wide instance.  Fails (returning
/// the converter back) once [`global`] has been initialised.
pub fn set_global(converter: Converter) -> std::result::Result<(), Converter> {
    GLOBAL.set(converter)
}

/// [`Converter::to_internal`] on the process-wide converter.
pub fn to_internal(x: f64, unit: &str) -> Result<f64> {
    Ok(global().to_internal(x, unit)?)
}

/// [`Converter::from_internal`] on the process-wide converter.
pub fn from_internal(x: f64, unit: &str) -> Result<f64> {
    Ok(global().from_internal(x, unit)?)
}

/// Like [`to_internal`] but with explicit options.
pub fn to_internal_with(x: f64, unit: &str, opts: ConvertOptions) -> Result<f64> {
    Ok(global().to_internal_with(x, unit, opts)?)
}

pub fn from_internal_with(x: f64, unit: &str, opts: ConvertOptions) -> Result<f64> {
    Ok(global().from_internal_with(x, unit, opts)?)
}

pub fn is_valid_unit(unit: &str, parse_compound: bool) -> bool {
    global().is_valid_unit(unit, parse_compound)
}

pub fn parse_compound_unit(unit: &str, failure: Failure) -> Result<f64> {
    Ok(global().parse_compound_unit(unit, failure)?)
}
