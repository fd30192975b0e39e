use indexmap::IndexMap;

use super::engine::Engine;
use crate::corpus::{Record, RecordKind};

/// Type precedence of the full-page search.
pub const SEARCH_PRECEDENCE: &[RecordKind] =
    &[RecordKind::Domain, RecordKind::Control, RecordKind::Registry];

/// Type precedence of the command palette.
pub const PALETTE_PRECEDENCE: &[RecordKind] = &[
    RecordKind::Domain,
    RecordKind::Control,
    RecordKind::Registry,
    RecordKind::StaticPage,
];

/// Grouped, counted and optionally truncated view over a set of matches.
///
/// `ordered` and `groups` describe what is visible after truncation;
/// `counts` and [`ResultView::total`] describe every match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    ordered: Vec<usize>,
    groups: IndexMap<RecordKind, Vec<usize>>,
    counts: IndexMap<RecordKind, usize>,
    total: usize,
}

impl ResultView {
    /// Visible corpus positions, grouped by kind in precedence order.
    #[must_use]
    pub fn ordered(&self) -> &[usize] {
        &self.ordered
    }

    /// Visible corpus positions per kind. Kinds with no visible result are
    /// omitted.
    #[must_use]
    pub fn groups(&self) -> &IndexMap<RecordKind, Vec<usize>> {
        &self.groups
    }

    /// Pre-truncation match count per kind in precedence order, zeros included.
    #[must_use]
    pub fn counts(&self) -> &IndexMap<RecordKind, usize> {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, kind: RecordKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of matches before truncation.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of visible results.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.shown() < self.total
    }

    /// Corpus position of the `n`th visible result.
    #[must_use]
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.ordered.get(n).copied()
    }

    /// "Showing N of M" line reported next to the results.
    #[must_use]
    pub fn summary(&self, noun: &str) -> String {
        format!("Showing {} of {} {noun}", self.shown(), self.total)
    }
}

/// Group `matches` by kind, flatten the groups in `precedence` order and cap
/// the flattened list at `limit` entries.
///
/// Grouping is stable: within a kind, matches keep the order they arrive in,
/// which is corpus order for everything the engine produces. Kinds missing
/// from `precedence` are dropped.
#[must_use]
pub fn assemble<T: Record>(
    engine: &Engine<T>,
    matches: &[usize],
    precedence: &[RecordKind],
    limit: Option<usize>,
) -> ResultView {
    let mut buckets: IndexMap<RecordKind, Vec<usize>> = precedence
        .iter()
        .map(|kind| (*kind, Vec::new()))
        .collect();
    for &index in matches {
        let Some(record) = engine.record(index) else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(&record.kind()) {
            bucket.push(index);
        }
    }

    let counts: IndexMap<RecordKind, usize> = buckets
        .iter()
        .map(|(kind, bucket)| (*kind, bucket.len()))
        .collect();
    let total = counts.values().sum();

    let mut ordered: Vec<usize> = buckets.values().flatten().copied().collect();
    if let Some(limit) = limit {
        ordered.truncate(limit);
    }

    let mut groups: IndexMap<RecordKind, Vec<usize>> = IndexMap::new();
    for &index in &ordered {
        if let Some(record) = engine.record(index) {
            groups.entry(record.kind()).or_default().push(index);
        }
    }

    ResultView {
        ordered,
        groups,
        counts,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Fixtures, STATIC_PAGES};
    use crate::search::{Indexer, Query, SearchableRecord};

    fn palette_engine() -> Engine<SearchableRecord> {
        let fixtures = Fixtures::builtin().expect("builtin");
        Engine::new(
            Indexer::new(&fixtures)
                .with_static_pages(STATIC_PAGES)
                .build(),
        )
    }

    #[test]
    fn grouping_is_stable_within_each_kind() {
        let engine = palette_engine();
        let mut matches = engine.evaluate(&Query::new("adversarial"));
        matches.reverse();
        let view = assemble(&engine, &matches, SEARCH_PRECEDENCE, None);

        let kinds: Vec<RecordKind> = view.groups().keys().copied().collect();
        assert_eq!(kinds, [RecordKind::Domain, RecordKind::Control]);
        let controls = &view.groups()[&RecordKind::Control];
        assert!(controls.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(view.count(RecordKind::Registry), 0);
    }

    #[test]
    fn truncation_keeps_pre_truncation_counts() {
        let engine = palette_engine();
        let everything: Vec<usize> = (0..engine.len()).collect();
        let view = assemble(&engine, &everything, PALETTE_PRECEDENCE, Some(12));

        assert_eq!(view.shown(), 12);
        assert_eq!(view.total(), engine.len());
        assert!(view.is_truncated());
        assert_eq!(view.count(RecordKind::StaticPage), STATIC_PAGES.len());
        assert!(!view.groups().contains_key(&RecordKind::StaticPage));
        assert_eq!(
            view.summary("results"),
            format!("Showing 12 of {} results", engine.len())
        );
    }

    #[test]
    fn kinds_outside_precedence_are_dropped() {
        let engine = palette_engine();
        let everything: Vec<usize> = (0..engine.len()).collect();
        let view = assemble(&engine, &everything, SEARCH_PRECEDENCE, None);
        assert_eq!(view.total(), engine.len() - STATIC_PAGES.len());
        assert!(
            engine
                .resolve(view.ordered())
                .all(|record| record.kind() != RecordKind::StaticPage)
        );
    }

    #[test]
    fn empty_matches_produce_empty_view() {
        let engine = palette_engine();
        let view = assemble(&engine, &[], PALETTE_PRECEDENCE, Some(12));
        assert!(view.is_empty());
        assert_eq!(view.total(), 0);
        assert!(!view.is_truncated());
        assert_eq!(view.nth(0), None);
    }
}
