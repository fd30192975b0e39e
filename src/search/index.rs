use std::borrow::Cow;

use serde::Serialize;

use crate::corpus::{
    ControlRecord, DomainRecord, Fixtures, Record, RecordKind, RegistryRecord, StaticPageRecord,
};

/// One entry of the mixed corpus searched by the global search and the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchableRecord {
    Domain(DomainRecord),
    Control(ControlRecord),
    Registry(RegistryRecord),
    StaticPage(StaticPageRecord),
}

impl SearchableRecord {
    fn inner(&self) -> &dyn Record {
        match self {
            SearchableRecord::Domain(record) => record,
            SearchableRecord::Control(record) => record,
            SearchableRecord::Registry(record) => record,
            SearchableRecord::StaticPage(record) => record,
        }
    }

    #[must_use]
    pub fn as_control(&self) -> Option<&ControlRecord> {
        match self {
            SearchableRecord::Control(control) => Some(control),
            _ => None,
        }
    }
}

impl Record for SearchableRecord {
    fn kind(&self) -> RecordKind {
        self.inner().kind()
    }

    fn record_id(&self) -> Cow<'_, str> {
        self.inner().record_id()
    }

    fn title(&self) -> &str {
        self.inner().title()
    }

    fn url(&self) -> String {
        self.inner().url()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        self.inner().search_fields()
    }
}

/// Flattens the fixture collections into one deterministic corpus.
///
/// Domains come first in ascending id order, followed by controls, registry
/// records and static pages, each in declaration order.
#[derive(Debug, Clone)]
pub struct Indexer<'a> {
    fixtures: &'a Fixtures,
    pages: &'a [StaticPageRecord],
}

impl<'a> Indexer<'a> {
    #[must_use]
    pub fn new(fixtures: &'a Fixtures) -> Self {
        Self {
            fixtures,
            pages: &[],
        }
    }

    /// Append a static-page catalog after the fixture records.
    #[must_use]
    pub fn with_static_pages(mut self, pages: &'a [StaticPageRecord]) -> Self {
        self.pages = pages;
        self
    }

    #[must_use]
    pub fn build(&self) -> Vec<SearchableRecord> {
        let mut domains = self.fixtures.domains.clone();
        domains.sort_by_key(|domain| domain.id);

        let capacity = domains.len()
            + self.fixtures.controls.len()
            + self.fixtures.registry.len()
            + self.pages.len();
        let mut corpus = Vec::with_capacity(capacity);
        corpus.extend(domains.into_iter().map(SearchableRecord::Domain));
        corpus.extend(
            self.fixtures
                .controls
                .iter()
                .cloned()
                .map(SearchableRecord::Control),
        );
        corpus.extend(
            self.fixtures
                .registry
                .iter()
                .cloned()
                .map(SearchableRecord::Registry),
        );
        corpus.extend(self.pages.iter().copied().map(SearchableRecord::StaticPage));
        corpus
    }
}
