use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the fixture collections that back the corpus.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read from disk.
    #[error("failed to read fixtures from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The fixture document is not valid JSON or does not match the record shapes.
    #[error("failed to parse fixtures from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string did not name any variant of one of the record enumerations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}
