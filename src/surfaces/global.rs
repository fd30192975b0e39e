use crate::corpus::{Record, RecordKind};
use crate::search::{
    Engine, IdleBehavior, NoFacets, Query, ResultView, SEARCH_PRECEDENCE, SearchableRecord,
    assemble,
};

/// Full-page search across domains, controls and registry records.
///
/// Nothing is shown until the user types; results are unbounded.
#[derive(Debug, Clone)]
pub struct GlobalSearch<'c> {
    engine: &'c Engine<SearchableRecord>,
    query: Query,
    view: ResultView,
}

impl<'c> GlobalSearch<'c> {
    #[must_use]
    pub fn new(engine: &'c Engine<SearchableRecord>) -> Self {
        Self {
            engine,
            query: Query::default(),
            view: ResultView::default(),
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = Query::new(text);
        let matches = self
            .engine
            .filter(&self.query, &NoFacets, IdleBehavior::Nothing);
        self.view = assemble(self.engine, &matches, SEARCH_PRECEDENCE, None);
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Visible results in display order.
    #[must_use]
    pub fn results(&self) -> Vec<&'c SearchableRecord> {
        let engine = self.engine;
        engine.resolve(self.view.ordered()).collect()
    }

    /// Visible results per kind, in precedence order.
    #[must_use]
    pub fn grouped(&self) -> Vec<(RecordKind, Vec<&'c SearchableRecord>)> {
        let engine = self.engine;
        self.view
            .groups()
            .iter()
            .map(|(kind, indices)| (*kind, engine.resolve(indices).collect()))
            .collect()
    }

    /// True when the user has typed something that matched nothing.
    #[must_use]
    pub fn is_no_match(&self) -> bool {
        !self.query.is_blank() && self.view.is_empty()
    }

    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.results().into_iter().map(Record::url).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Fixtures;
    use crate::search::Indexer;

    fn engine() -> Engine<SearchableRecord> {
        let fixtures = Fixtures::builtin().expect("builtin");
        Engine::new(Indexer::new(&fixtures).build())
    }

    #[test]
    fn idle_search_shows_nothing() {
        let engine = engine();
        let mut search = GlobalSearch::new(&engine);
        assert!(search.results().is_empty());
        search.set_query("   ");
        assert!(search.results().is_empty());
        assert!(!search.is_no_match());
    }

    #[test]
    fn domain_number_finds_domain() {
        let engine = engine();
        let mut search = GlobalSearch::new(&engine);
        search.set_query("Domain 7");
        let grouped = search.grouped();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].0, RecordKind::Domain);
        assert_eq!(grouped[0].1[0].record_id(), "7");
    }

    #[test]
    fn unmatched_query_is_reported() {
        let engine = engine();
        let mut search = GlobalSearch::new(&engine);
        search.set_query("zzzz-not-present");
        assert!(search.is_no_match());
        assert_eq!(search.view().summary("results"), "Showing 0 of 0 results");
    }

    #[test]
    fn results_link_to_records() {
        let engine = engine();
        let mut search = GlobalSearch::new(&engine);
        search.set_query("ARA-2026-00142");
        assert_eq!(search.urls(), ["/registry/ARA-2026-00142"]);
    }
}
