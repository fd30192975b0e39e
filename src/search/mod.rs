//! Indexing, matching, faceting and result assembly.
//!
//! Every surface runs the same pipeline: an [`Engine`] evaluates the query
//! and a [`Facet`] set against its corpus, and [`assemble`] turns the
//! surviving positions into a grouped [`ResultView`].

mod assemble;
mod engine;
mod facets;
mod index;
mod query;
mod tuning;

pub use assemble::{PALETTE_PRECEDENCE, ResultView, SEARCH_PRECEDENCE, assemble};
pub use engine::{Engine, FieldExtractor, IdleBehavior};
pub use facets::{
    ControlFacets, Facet, FacetOption, FacetValue, NoFacets, RegistryFacets, RiskFloor,
};
pub use index::{Indexer, SearchableRecord};
pub use query::{Query, fold};
pub use tuning::{
    DEEP_LINK_SCROLL_DELAY, EngineTuning, PALETTE_PREVIEW_LEN, PALETTE_RESULT_LIMIT,
};
