//! Search, filtering and navigation engine for the ARA standard site.
//!
//! The crate indexes a read-only corpus of domains, controls, registry
//! records and static pages, and exposes the four interactive surfaces
//! built on it: full-page search, the command palette, the control library
//! and the certification registry. Surfaces hold only their own UI state and
//! borrow a shared [`Engine`] for the corpus.

pub mod app_dirs;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod search;
pub mod surfaces;

pub use corpus::{
    ControlRecord, DomainRecord, Fixtures, Record, RecordKind, RegistryRecord, STATIC_PAGES,
    StaticPageRecord,
};
pub use error::{FixtureError, UnknownValue};
pub use search::{
    ControlFacets, Engine, EngineTuning, Facet, FacetValue, Indexer, Query, RegistryFacets,
    ResultView, RiskFloor, SearchableRecord,
};
pub use surfaces::{
    CommandPalette, ControlLibrary, GlobalSearch, PaletteKey, PaletteOutcome, RegistryBrowser,
    ScrollHost, ScrollStatus,
};
