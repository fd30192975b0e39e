use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::records::{ControlRecord, DomainRecord, RegistryRecord};
use crate::error::FixtureError;

const BUILTIN_FIXTURES: &str = include_str!("../../data/standard.json");

/// The three read-only record collections the engine indexes.
///
/// Loading performs no referential validation: a control may relate to ids
/// that do not exist and a domain id may have no matching domain record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub domains: Vec<DomainRecord>,
    pub controls: Vec<ControlRecord>,
    pub registry: Vec<RegistryRecord>,
}

impl Fixtures {
    /// Create an empty [`Fixtures`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the domain records.
    #[must_use]
    pub fn with_domains(mut self, domains: Vec<DomainRecord>) -> Self {
        self.domains = domains;
        self
    }

    /// Replace the control records.
    #[must_use]
    pub fn with_controls(mut self, controls: Vec<ControlRecord>) -> Self {
        self.controls = controls;
        self
    }

    /// Replace the registry records.
    #[must_use]
    pub fn with_registry(mut self, registry: Vec<RegistryRecord>) -> Self {
        self.registry = registry;
        self
    }

    /// Parse the sample corpus compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] if the embedded document is malformed.
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::parse(BUILTIN_FIXTURES, "builtin corpus")
    }

    /// Parse a fixture document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Parse`] if the text is not a fixture document.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Self::parse(json, "inline JSON")
    }

    /// Read and parse a fixture document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Io`] if the file cannot be read and
    /// [`FixtureError::Parse`] if its contents are malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json, &path.display().to_string())
    }

    fn parse(json: &str, origin: &str) -> Result<Self, FixtureError> {
        let fixtures: Self = serde_json::from_str(json).map_err(|source| FixtureError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        log::debug!(
            "loaded {} domains, {} controls, {} registry records from {origin}",
            fixtures.domains.len(),
            fixtures.controls.len(),
            fixtures.registry.len()
        );
        Ok(fixtures)
    }
}
