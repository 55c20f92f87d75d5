//! Errors raised while loading catalogs and querying the store.

use std::path::PathBuf;
use thiserror::Error;

use crate::ColorMapKey;

/// A catalog, a color map or a sample file could not be loaded.
///
/// Every variant names the file or key at fault.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path:?}, line {line}: {reason}")]
    MalformedRow { path: PathBuf, line: usize, reason: String },

    #[error("{path:?}, sample {sample}: value {value} is not in [0, 1]")]
    OutOfRange { path: PathBuf, sample: usize, value: f64 },

    #[error("{path:?}: a color map needs at least 2 samples, found {len}")]
    TooFewSamples { path: PathBuf, len: usize },

    #[error("catalog {catalog:?} defines the color map {name:?} twice")]
    DuplicateColorMap { catalog: String, name: String },

    #[error("catalog key {key:?} of {path:?} is already used by another catalog")]
    DuplicateCatalog { key: String, path: PathBuf },

    #[error("{path:?}: invalid key {key:?}, it must be non-empty \
             (and, for a catalog, contain no '/')")]
    InvalidKey { path: PathBuf, key: String },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error)
                       -> Self {
        LoadError::Json { path: path.into(), source }
    }
}

/// A metadata or sample file could not be written.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriteError::Io { path: path.into(), source }
    }
}

/// The requested catalog or color map is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("unknown catalog {0:?}")]
    Catalog(String),

    #[error("unknown color map {0}")]
    ColorMap(ColorMapKey),
}

/// A string is not of the form `catalog/name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color map key {0:?}, expected \"catalog/name\"")]
pub struct KeyParseError(pub String);
