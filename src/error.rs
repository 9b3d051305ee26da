use std::path::PathBuf;

use converter::UnitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnitconvError {
    /// A conversion or registry operation failed.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// `UNITCONV_SYSTEM` names no known preset.
    #[error("Unknown unit system {0:?} (expected si, cgs or planetary)")]
    UnknownSystem(String),

    #[error("Cannot read unit file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed unit file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An entry of the unit file was rejected by the registry or parser.
    #[error("Unit file {path}, entry {symbol:?}: {source}")]
    Entry {
        path: PathBuf,
        symbol: String,
        #[source]
        source: UnitError,
    },
}

pub type Result<T> = std::result::Result<T, UnitconvError>;
