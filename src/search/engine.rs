use std::borrow::Cow;
use std::fmt::Display;

use indexmap::IndexMap;

use super::facets::{Facet, FacetOption};
use super::query::{Query, fold};
use crate::corpus::Record;

/// Extracts the fields of a record that free-text queries are matched against.
pub type FieldExtractor<T> = for<'a> fn(&'a T) -> Vec<Cow<'a, str>>;

/// What a blank query yields on a given surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleBehavior {
    /// Full-page search: nothing until the user types.
    Nothing,
    /// Filter panels: every record that passes the facets.
    Everything,
}

#[derive(Debug, Clone)]
struct Indexed<T> {
    record: T,
    folded: Vec<String>,
}

/// Immutable, indexed corpus shared by every view a surface derives.
///
/// Matches are reported as positions into the corpus so views can be held
/// next to a borrowed engine without copying records.
#[derive(Debug, Clone)]
pub struct Engine<T> {
    entries: Vec<Indexed<T>>,
}

impl<T: Record> Engine<T> {
    /// Index `records` using their own [`Record::search_fields`].
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        Self::with_fields(records, T::search_fields)
    }
}

impl<T> Engine<T> {
    /// Index `records`, precomputing case-folded fields with `fields`.
    #[must_use]
    pub fn with_fields(records: Vec<T>, fields: FieldExtractor<T>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| {
                let folded = fields(&record).iter().map(|field| fold(field)).collect();
                Indexed { record, folded }
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn record(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|entry| &entry.record)
    }

    /// All records in corpus order.
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Resolve corpus positions to records, skipping positions out of range.
    pub fn resolve<'s>(&'s self, indices: &[usize]) -> impl Iterator<Item = &'s T> {
        indices.iter().filter_map(move |index| self.record(*index))
    }

    /// Position of the first record satisfying `predicate`.
    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.entries.iter().position(|entry| predicate(&entry.record))
    }

    /// Records whose searchable fields contain the query, in corpus order.
    /// A blank query yields nothing.
    #[must_use]
    pub fn evaluate(&self, query: &Query) -> Vec<usize> {
        if query.is_blank() {
            return Vec::new();
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| query.matches_folded(entry.folded.iter().map(String::as_str)))
            .map(|(index, _)| index)
            .collect()
    }

    /// Apply the query and the facets conjunctively, in corpus order.
    #[must_use]
    pub fn filter<F>(&self, query: &Query, facets: &F, idle: IdleBehavior) -> Vec<usize>
    where
        F: Facet<T>,
    {
        let matches: Vec<usize> = if query.is_blank() {
            match idle {
                IdleBehavior::Nothing => Vec::new(),
                IdleBehavior::Everything => (0..self.entries.len()).collect(),
            }
        } else {
            self.evaluate(query)
        };

        let filtered: Vec<usize> = if facets.active_predicates() == 0 {
            matches
        } else {
            matches
                .into_iter()
                .filter(|index| facets.matches(&self.entries[*index].record))
                .collect()
        };

        log::debug!(
            "filter query={:?} facets={} -> {} of {}",
            query.needle(),
            facets.active_predicates(),
            filtered.len(),
            self.entries.len()
        );
        filtered
    }

    /// Distinct values of one field with the number of records carrying
    /// each, in order of first appearance.
    #[must_use]
    pub fn facet_options<K, V>(&self, key: K) -> Vec<FacetOption>
    where
        K: Fn(&T) -> V,
        V: Display,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for entry in &self.entries {
            *counts.entry(key(&entry.record).to_string()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(value, count)| FacetOption::new(value, count))
            .collect()
    }
}
