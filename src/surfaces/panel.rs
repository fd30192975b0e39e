use std::rc::Weak;
use std::time::Instant;

use super::deep_link::{DeepLinkSync, ScrollHost, ScrollRequest, ScrollStatus};
use super::expansion::ExpandSet;
use crate::corpus::{ControlRecord, Record, RecordKind, RegistryRecord};
use crate::search::{Engine, EngineTuning, Facet, IdleBehavior, Query, ResultView, assemble};

/// Records listed on their own by a [`FilterPanel`].
pub trait Listed: Record {
    const KIND: RecordKind;
}

impl Listed for ControlRecord {
    const KIND: RecordKind = RecordKind::Control;
}

impl Listed for RegistryRecord {
    const KIND: RecordKind = RecordKind::Registry;
}

/// A single-kind listing narrowed by free text and a surface-specific facet
/// set, with expandable detail rows and deep-link seeding.
///
/// A blank query lists every record that passes the facets. Expansion is
/// tracked by record id and survives any change to the filters.
#[derive(Debug)]
pub struct FilterPanel<'c, T, F> {
    engine: &'c Engine<T>,
    query: Query,
    facets: F,
    expanded: ExpandSet,
    deep_link: DeepLinkSync,
    pending_scroll: Option<ScrollRequest>,
    view: ResultView,
}

impl<'c, T, F> FilterPanel<'c, T, F>
where
    T: Listed,
    F: Facet<T> + Default,
{
    #[must_use]
    pub fn new(engine: &'c Engine<T>) -> Self {
        Self::with_tuning(engine, EngineTuning::default())
    }

    #[must_use]
    pub fn with_tuning(engine: &'c Engine<T>, tuning: EngineTuning) -> Self {
        let mut panel = Self {
            engine,
            query: Query::default(),
            facets: F::default(),
            expanded: ExpandSet::new(),
            deep_link: DeepLinkSync::new(tuning.scroll_delay),
            pending_scroll: None,
            view: ResultView::default(),
        };
        panel.recompute();
        panel
    }

    /// Seed expansion from the page's URL fragment. Only the first call has
    /// any effect; later fragment changes are not observed.
    pub fn mount(&mut self, fragment: Option<&str>, host: Weak<dyn ScrollHost>) {
        if let Some(request) =
            self.deep_link
                .apply(fragment, &mut self.expanded, host, Instant::now())
        {
            self.pending_scroll = Some(request);
        }
    }

    /// Drive the deferred deep-link scroll. Returns `None` when nothing was scheduled.
    pub fn poll_scroll(&mut self, now: Instant) -> Option<ScrollStatus> {
        self.pending_scroll.as_mut().map(|request| request.poll(now))
    }

    #[must_use]
    pub fn pending_scroll(&self) -> Option<&ScrollRequest> {
        self.pending_scroll.as_ref()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = Query::new(text);
        self.recompute();
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub fn facets(&self) -> &F {
        &self.facets
    }

    pub fn set_facets(&mut self, facets: F) {
        self.facets = facets;
        self.recompute();
    }

    /// Adjust the active facets in place.
    pub fn update_facets(&mut self, update: impl FnOnce(&mut F)) {
        update(&mut self.facets);
        self.recompute();
    }

    /// Reset the query and every facet. Expansion is left untouched.
    pub fn clear_filters(&mut self) {
        self.query = Query::default();
        self.facets = F::default();
        self.recompute();
    }

    #[must_use]
    pub fn active_filters(&self) -> usize {
        self.facets.active_predicates() + usize::from(!self.query.is_blank())
    }

    /// Flip the detail disclosure of `id`. Returns whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.expanded.toggle(id)
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.is_expanded(id)
    }

    #[must_use]
    pub fn expanded(&self) -> &ExpandSet {
        &self.expanded
    }

    #[must_use]
    pub fn view(&self) -> &ResultView {
        &self.view
    }

    #[must_use]
    pub fn engine(&self) -> &'c Engine<T> {
        self.engine
    }

    /// Visible records in corpus order.
    #[must_use]
    pub fn results(&self) -> Vec<&'c T> {
        let engine = self.engine;
        engine.resolve(self.view.ordered()).collect()
    }

    /// Visible records whose details are expanded.
    #[must_use]
    pub fn expanded_results(&self) -> Vec<&'c T> {
        self.results()
            .into_iter()
            .filter(|record| self.expanded.is_expanded(&record.record_id()))
            .collect()
    }

    /// Find a record by id regardless of the active filters.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&'c T> {
        let engine = self.engine;
        engine
            .position(|record| record.record_id() == id)
            .and_then(|index| engine.record(index))
    }

    fn recompute(&mut self) {
        let matches = self
            .engine
            .filter(&self.query, &self.facets, IdleBehavior::Everything);
        self.view = assemble(self.engine, &matches, &[T::KIND], None);
    }
}
