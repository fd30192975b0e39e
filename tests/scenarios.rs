//! End-to-end scenarios over the built-in sample corpus.

use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use ara_finder::corpus::{CertificationLevel, Fixtures, Record, RecordKind, STATIC_PAGES};
use ara_finder::search::{ControlFacets, Engine, Indexer, Query, SearchableRecord};
use ara_finder::surfaces::{
    CommandPalette, ControlLibrary, GlobalSearch, PaletteKey, PaletteOutcome, PaletteState,
    RegistryBrowser, ScrollHost, ScrollStatus,
};

fn fixtures() -> Fixtures {
    Fixtures::builtin().expect("built-in corpus parses")
}

fn search_engine(fixtures: &Fixtures) -> Engine<SearchableRecord> {
    Engine::new(Indexer::new(fixtures).build())
}

fn palette_engine(fixtures: &Fixtures) -> Engine<SearchableRecord> {
    Engine::new(
        Indexer::new(fixtures)
            .with_static_pages(STATIC_PAGES)
            .build(),
    )
}

struct Page(Vec<String>);

impl ScrollHost for Page {
    fn scroll_into_view(&self, element_id: &str) -> bool {
        self.0.iter().any(|id| id == element_id)
    }
}

#[test]
fn adversarial_query_finds_domain_and_controls() {
    let fixtures = fixtures();
    let engine = search_engine(&fixtures);
    let mut search = GlobalSearch::new(&engine);
    search.set_query("adversarial");

    let results = search.results();
    let ids: Vec<String> = results
        .iter()
        .map(|record| record.record_id().into_owned())
        .collect();
    for expected in [
        "ACR-6.02", "ACR-7.01", "ACR-7.03", "ACR-7.05", "ACR-7.10", "ACR-7.15",
    ] {
        assert!(ids.iter().any(|id| id == expected), "missing {expected}");
    }
    assert!(results.iter().any(|record| {
        record.kind() == RecordKind::Domain && record.title() == "Adversarial Robustness"
    }));

    for record in results {
        let haystack: Vec<String> = record
            .search_fields()
            .iter()
            .map(|field| field.to_lowercase())
            .collect();
        assert!(
            haystack.iter().any(|field| field.contains("adversarial")),
            "{} does not mention the query",
            record.record_id()
        );
    }
}

#[test]
fn global_search_groups_domains_first() {
    let fixtures = fixtures();
    let engine = search_engine(&fixtures);
    let mut search = GlobalSearch::new(&engine);
    search.set_query("ADVERSARIAL");

    let kinds: Vec<RecordKind> = search.grouped().iter().map(|(kind, _)| *kind).collect();
    assert_eq!(kinds, [RecordKind::Domain, RecordKind::Control]);
    assert_eq!(search.view().count(RecordKind::Registry), 0);
    assert!(!search.is_no_match());

    search.set_query("   ");
    assert!(search.results().is_empty());
    assert!(!search.is_no_match());
}

#[test]
fn control_library_domain_and_level_facets() {
    let fixtures = fixtures();
    let engine = Engine::new(fixtures.controls.clone());
    let mut library = ControlLibrary::new(&engine);
    library.set_facets(
        ControlFacets::default()
            .with_domain(7)
            .with_level(CertificationLevel::L3),
    );

    let results = library.results();
    assert!(!results.is_empty());
    for control in &results {
        assert!(control.id.starts_with("ACR-7."));
        assert!(control.level_applicability.l3);
    }
    let ids: Vec<&str> = results.iter().map(|control| control.id.as_str()).collect();
    assert!(ids.contains(&"ACR-7.05"));
    assert!(ids.contains(&"ACR-7.15"));
    assert!(!ids.contains(&"ACR-7.01"));
    assert!(!ids.contains(&"ACR-1.01"));
}

#[test]
fn registry_query_meridian() {
    let fixtures = fixtures();
    let engine = Engine::new(fixtures.registry.clone());
    let mut browser = RegistryBrowser::new(&engine);
    browser.set_query("Meridian");

    let ids: Vec<&str> = browser
        .results()
        .iter()
        .map(|record| record.certification_id.as_str())
        .collect();
    assert_eq!(ids, ["ARA-2026-00142"]);
}

#[test]
fn palette_commits_control_by_id() {
    let fixtures = fixtures();
    let engine = palette_engine(&fixtures);
    let mut palette = CommandPalette::new(&engine);
    assert_eq!(palette.open(), PaletteOutcome::Opened);
    palette.set_query("ACR-7.01");

    let outcome = palette.handle_key(PaletteKey::Enter);
    assert_eq!(
        outcome,
        PaletteOutcome::Navigate("/standard/v1.0/acr/ACR-7.01".to_string())
    );
    assert_eq!(palette.state(), PaletteState::Closed);
}

#[test]
fn palette_preview_ignores_corpus_size() {
    let empty = Fixtures::default();
    for fixtures in [fixtures(), empty] {
        let engine = palette_engine(&fixtures);
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        let titles: Vec<&str> = palette.results().iter().map(|record| record.title()).collect();
        let expected: Vec<&str> = STATIC_PAGES[..6].iter().map(|page| page.title).collect();
        assert_eq!(titles, expected);
    }
}

#[test]
fn deep_link_expands_exactly_the_fragment() {
    let fixtures = fixtures();
    let engine = Engine::new(fixtures.controls.clone());
    let mut library = ControlLibrary::new(&engine);
    library.toggle("ACR-2.01");
    library.toggle("ACR-3.01");

    let page = Rc::new(Page(
        engine.records().map(|control| control.id.clone()).collect(),
    ));
    let host: Weak<dyn ScrollHost> = Rc::downgrade(&page) as Weak<dyn ScrollHost>;
    let mounted = Instant::now();
    library.mount(Some("ACR-7.01"), host);

    let expanded: Vec<&str> = library.expanded().iter().collect();
    assert_eq!(expanded, ["ACR-7.01"]);

    let due = library.pending_scroll().expect("scroll scheduled").due();
    assert!(due >= mounted + Duration::from_millis(100));
    assert_eq!(library.poll_scroll(due), Some(ScrollStatus::Scrolled));
}

#[test]
fn query_folding_is_shared_across_surfaces() {
    let fixtures = fixtures();
    let engine = search_engine(&fixtures);
    let upper = engine.evaluate(&Query::new("MERIDIAN"));
    let lower = engine.evaluate(&Query::new("meridian"));
    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 1);
}

#[test]
fn surrounding_whitespace_is_part_of_the_substring() {
    let fixtures = fixtures();
    let engine = search_engine(&fixtures);
    let padded = engine.evaluate(&Query::new(" 7"));
    assert!(
        engine
            .resolve(&padded)
            .all(|record| record.record_id() != "ACR-7.01")
    );
    assert!(!engine.evaluate(&Query::new("7")).is_empty());
    assert!(engine.evaluate(&Query::new("  meridian ")).is_empty());
}
