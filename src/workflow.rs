use std::rc::{Rc, Weak};

use anyhow::{Context, Result};
use ara_finder::corpus::{ControlRecord, RegistryRecord};
use ara_finder::search::{FacetOption, ResultView, SEARCH_PRECEDENCE};
use ara_finder::surfaces::{FilterPanel, Listed, RelatedControl};
use ara_finder::{
    CommandPalette, ControlFacets, ControlLibrary, Engine, EngineTuning, Facet, FacetValue,
    Fixtures, GlobalSearch, Indexer, PaletteKey, Record, RecordKind, RegistryBrowser,
    RegistryFacets, RiskFloor, STATIC_PAGES, ScrollHost, ScrollStatus,
};
use indexmap::IndexMap;
use serde::Serialize;

use crate::cli::{Command, ControlsArgs, PaletteArgs, RegistryArgs};
use crate::settings::ResolvedConfig;

/// One listed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub kind: RecordKind,
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl Row {
    fn from_record<R: Record + ?Sized>(record: &R) -> Self {
        Self {
            kind: record.kind(),
            id: record.record_id().into_owned(),
            title: record.title().to_string(),
            url: record.url(),
            selected: false,
        }
    }
}

/// Visible results of one kind plus the number of matches before truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub kind: RecordKind,
    pub label: &'static str,
    pub count: usize,
    pub rows: Vec<Row>,
}

/// Expanded details of a listed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub id: String,
    pub fields: Vec<(&'static str, String)>,
}

/// Everything a surface run produced, ready for printing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub surface: &'static str,
    pub query: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    pub groups: Vec<Group>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Detail>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<&'static str, Vec<(String, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<String>,
}

/// Element ids the terminal "page" renders, standing in for the DOM the
/// deep-link scroll targets.
struct RenderedIds(Vec<String>);

impl ScrollHost for RenderedIds {
    fn scroll_into_view(&self, element_id: &str) -> bool {
        self.0.iter().any(|id| id == element_id)
    }
}

/// Loads the corpus once and drives a single surface per command.
pub struct Workflow {
    fixtures: Fixtures,
    tuning: EngineTuning,
}

impl Workflow {
    pub fn from_config(settings: &ResolvedConfig) -> Result<Self> {
        let fixtures = match &settings.fixtures {
            Some(path) => Fixtures::from_path(path)
                .with_context(|| format!("failed to load fixtures from {}", path.display()))?,
            None => Fixtures::builtin().context("built-in corpus is malformed")?,
        };
        Ok(Self::with_fixtures(fixtures, settings.tuning))
    }

    #[must_use]
    pub fn with_fixtures(fixtures: Fixtures, tuning: EngineTuning) -> Self {
        Self { fixtures, tuning }
    }

    pub fn run(&self, command: &Command) -> Report {
        log::debug!("running {command:?}");
        match command {
            Command::Search { query } => self.search(&query.join(" ")),
            Command::Palette(args) => self.palette(args),
            Command::Controls(args) => self.controls(args),
            Command::Registry(args) => self.registry(args),
        }
    }

    fn search(&self, query: &str) -> Report {
        let engine = Engine::new(Indexer::new(&self.fixtures).build());
        let mut search = GlobalSearch::new(&engine);
        search.set_query(query);

        let summary = if search.is_no_match() {
            format!("No results for \"{}\"", query.trim())
        } else {
            search.view().summary("results")
        };
        Report {
            surface: "search",
            query: query.to_string(),
            summary,
            groups: groups(&engine, search.view(), None),
            options: kind_counts(search.view()),
            ..Report::default()
        }
    }

    fn palette(&self, args: &PaletteArgs) -> Report {
        let engine = Engine::new(
            Indexer::new(&self.fixtures)
                .with_static_pages(STATIC_PAGES)
                .build(),
        );
        let mut palette = CommandPalette::with_tuning(&engine, self.tuning);
        palette.open();
        if let Some(query) = &args.query {
            palette.set_query(query.as_str());
        }

        let mut navigate = None;
        for key in &args.keys {
            let outcome = palette.handle_key(PaletteKey::from(*key));
            if let Some(url) = outcome.navigation() {
                navigate = Some(url.to_string());
            }
        }

        let selected = palette.is_open().then(|| palette.selected_index());
        Report {
            surface: "palette",
            query: palette.query().raw().to_string(),
            summary: palette.view().summary("results"),
            groups: groups(&engine, palette.view(), selected),
            palette_open: Some(palette.is_open()),
            navigate,
            ..Report::default()
        }
    }

    fn controls(&self, args: &ControlsArgs) -> Report {
        let engine = Engine::new(self.fixtures.controls.clone());
        let mut library = ControlLibrary::with_tuning(&engine, self.tuning);
        let host = rendered_host(&engine);
        let scroll = mount(&mut library, args.fragment.as_deref(), &host);
        for id in &args.expand {
            if !library.is_expanded(id) {
                library.toggle(id);
            }
        }

        let facets = control_facets(args);
        let filters = describe_control_facets(&facets);
        library.set_facets(facets);
        if let Some(query) = &args.query {
            library.set_query(query.as_str());
        }

        let details = library
            .expanded_results()
            .into_iter()
            .map(|control| control_detail(&library, control))
            .collect();

        let mut options = IndexMap::new();
        options.insert("domain", flatten(library.domain_options()));
        options.insert("method", flatten(library.method_options()));
        options.insert("classification", flatten(library.classification_options()));

        Report {
            surface: "controls",
            query: library.query().raw().to_string(),
            summary: library.view().summary("controls"),
            filters,
            groups: groups(&engine, library.view(), None),
            details,
            options,
            scroll,
            ..Report::default()
        }
    }

    fn registry(&self, args: &RegistryArgs) -> Report {
        let engine = Engine::new(self.fixtures.registry.clone());
        let mut browser = RegistryBrowser::with_tuning(&engine, self.tuning);
        let host = rendered_host(&engine);
        let scroll = mount(&mut browser, args.fragment.as_deref(), &host);
        for id in &args.expand {
            if !browser.is_expanded(id) {
                browser.toggle(id);
            }
        }

        let facets = registry_facets(args);
        let filters = describe_registry_facets(&facets);
        browser.set_facets(facets);
        if let Some(query) = &args.query {
            browser.set_query(query.as_str());
        }

        let details = browser
            .expanded_results()
            .into_iter()
            .map(registry_detail)
            .collect();

        let mut options = IndexMap::new();
        options.insert("industry", flatten(browser.industry_options()));
        options.insert("status", flatten(browser.status_options()));
        options.insert("monitoring", flatten(browser.monitoring_options()));

        Report {
            surface: "registry",
            query: browser.query().raw().to_string(),
            summary: browser.view().summary("certified systems"),
            filters,
            groups: groups(&engine, browser.view(), None),
            details,
            options,
            scroll,
            ..Report::default()
        }
    }
}

fn rendered_host<T: Record>(engine: &Engine<T>) -> Rc<RenderedIds> {
    Rc::new(RenderedIds(
        engine
            .records()
            .map(|record| record.record_id().into_owned())
            .collect(),
    ))
}

/// Seed the panel from `fragment` and settle its scroll request immediately.
fn mount<T, F>(
    panel: &mut FilterPanel<'_, T, F>,
    fragment: Option<&str>,
    host: &Rc<RenderedIds>,
) -> Option<String>
where
    T: Listed,
    F: Facet<T> + Default,
{
    let weak: Weak<dyn ScrollHost> = Rc::downgrade(host) as Weak<dyn ScrollHost>;
    panel.mount(fragment, weak);

    let request = panel.pending_scroll()?;
    let (target, due) = (request.target().to_string(), request.due());
    let status = panel.poll_scroll(due)?;
    let label = match status {
        ScrollStatus::Pending => "pending",
        ScrollStatus::Scrolled => "scrolled into view",
        ScrollStatus::Missing => "not on this page",
        ScrollStatus::Detached => "surface closed",
    };
    Some(format!("{target}: {label}"))
}

fn groups<T: Record>(
    engine: &Engine<T>,
    view: &ResultView,
    selected: Option<usize>,
) -> Vec<Group> {
    let mut position = 0;
    view.groups()
        .iter()
        .map(|(kind, indices)| {
            let rows = engine
                .resolve(indices)
                .map(|record| {
                    let mut row = Row::from_record(record);
                    row.selected = selected == Some(position);
                    position += 1;
                    row
                })
                .collect();
            Group {
                kind: *kind,
                label: kind.label(),
                count: view.count(*kind),
                rows,
            }
        })
        .collect()
}

fn kind_counts(view: &ResultView) -> IndexMap<&'static str, Vec<(String, usize)>> {
    let counts = SEARCH_PRECEDENCE
        .iter()
        .map(|kind| (kind.label().to_string(), view.count(*kind)))
        .collect();
    let mut options = IndexMap::new();
    options.insert("kind", counts);
    options
}

fn flatten(options: Vec<FacetOption>) -> Vec<(String, usize)> {
    options
        .into_iter()
        .map(|option| (option.value, option.count))
        .collect()
}

fn control_facets(args: &ControlsArgs) -> ControlFacets {
    let parse = |raw: &Option<String>| raw.as_deref().unwrap_or_default().to_string();
    ControlFacets {
        domain: FacetValue::parse(&parse(&args.domain)),
        level: FacetValue::parse(&parse(&args.level)),
        method: FacetValue::parse(&parse(&args.method)),
        classification: FacetValue::parse(&parse(&args.classification)),
        risk_floor: RiskFloor::parse(&parse(&args.min_risk)),
    }
}

fn registry_facets(args: &RegistryArgs) -> RegistryFacets {
    let parse = |raw: &Option<String>| raw.as_deref().unwrap_or_default().to_string();
    RegistryFacets {
        level: FacetValue::parse(&parse(&args.level)),
        industry: FacetValue::parse(&parse(&args.industry)),
        status: FacetValue::parse(&parse(&args.status)),
        monitoring: FacetValue::parse(&parse(&args.monitoring)),
    }
}

fn describe_control_facets(facets: &ControlFacets) -> Vec<String> {
    [
        ("domain", facets.domain.label()),
        ("level", facets.level.label()),
        ("method", facets.method.label()),
        ("classification", facets.classification.label()),
        ("risk", facets.risk_floor.label()),
    ]
    .into_iter()
    .filter_map(|(name, label)| label.map(|label| format!("{name}: {label}")))
    .collect()
}

fn describe_registry_facets(facets: &RegistryFacets) -> Vec<String> {
    [
        ("level", facets.level.label()),
        ("industry", facets.industry.label()),
        ("status", facets.status.label()),
        ("monitoring", facets.monitoring.label()),
    ]
    .into_iter()
    .filter_map(|(name, label)| label.map(|label| format!("{name}: {label}")))
    .collect()
}

fn control_detail(library: &ControlLibrary<'_>, control: &ControlRecord) -> Detail {
    let levels: Vec<&str> = control
        .level_applicability
        .levels()
        .into_iter()
        .map(|level| level.as_str())
        .collect();
    let related: Vec<String> = library
        .related(control)
        .iter()
        .map(|related| match related {
            RelatedControl::Defined(_) => format!("{} {}", related.id(), related.label()),
            RelatedControl::Undefined(id) => format!("{id} ({})", related.label()),
        })
        .collect();

    let mut fields = vec![
        ("description", control.description.clone()),
        ("domain", format!("{} {}", control.domain_id, control.domain_name)),
        ("method", control.evaluation_method.to_string()),
        ("classification", control.classification.to_string()),
        ("risk weight", control.risk_weight.to_string()),
        ("levels", levels.join(", ")),
        ("introduced", control.version_introduced.clone()),
    ];
    if !related.is_empty() {
        fields.push(("related", related.join("; ")));
    }
    Detail {
        id: control.id.clone(),
        fields,
    }
}

fn registry_detail(record: &RegistryRecord) -> Detail {
    let mut fields = vec![
        ("organization", record.organization.clone()),
        ("scope", record.scope_statement.clone()),
        ("level", record.certification_level.to_string()),
        ("status", record.certification_status.to_string()),
        ("monitoring", record.monitoring_status.to_string()),
        ("industry", record.industry.clone()),
        ("category", record.category.clone()),
        ("issued", record.issue_date.clone()),
        ("expires", record.expiry_date.clone()),
    ];
    for event in &record.revocation_history {
        fields.push((
            "history",
            format!("{} {}: {}", event.date, event.action, event.reason),
        ));
    }
    Detail {
        id: record.certification_id.clone(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::CliArgs;

    fn run(args: &[&str]) -> Report {
        let mut argv = vec!["ara"];
        argv.extend_from_slice(args);
        let cli = CliArgs::try_parse_from(argv).expect("parses");
        let workflow = Workflow::with_fixtures(
            Fixtures::builtin().expect("builtin"),
            EngineTuning::default(),
        );
        workflow.run(&cli.command)
    }

    fn ids(report: &Report) -> Vec<&str> {
        report
            .groups
            .iter()
            .flat_map(|group| group.rows.iter().map(|row| row.id.as_str()))
            .collect()
    }

    #[test]
    fn search_groups_by_kind() {
        let report = run(&["search", "Domain", "7"]);
        assert_eq!(report.groups[0].kind, RecordKind::Domain);
        assert_eq!(
            report.groups[0].rows[0].url,
            "/standard/v1.0/domains/adversarial-robustness"
        );
    }

    #[test]
    fn search_without_matches_says_so() {
        let report = run(&["search", "zzzz-not-present"]);
        assert!(report.groups.is_empty());
        assert!(report.summary.starts_with("No results"));
    }

    #[test]
    fn palette_commits_selection() {
        let report = run(&["palette", "--query", "ACR-7.01", "--keys", "enter"]);
        assert_eq!(report.navigate.as_deref(), Some("/standard/v1.0/acr/ACR-7.01"));
        assert_eq!(report.palette_open, Some(false));
    }

    #[test]
    fn palette_marks_selected_row() {
        let report = run(&["palette", "--keys", "down,down"]);
        let selected: Vec<&Row> = report
            .groups
            .iter()
            .flat_map(|group| &group.rows)
            .filter(|row| row.selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, STATIC_PAGES[2].title);
    }

    #[test]
    fn controls_apply_facets_and_fragment() {
        let report = run(&[
            "controls",
            "--domain",
            "7",
            "--level",
            "L3",
            "--fragment",
            "#ACR-7.15",
        ]);
        assert_eq!(ids(&report), ["ACR-7.05", "ACR-7.15"]);
        assert_eq!(report.filters, ["domain: 7", "level: L3"]);
        assert_eq!(report.details.len(), 1);
        assert_eq!(report.scroll.as_deref(), Some("ACR-7.15: scrolled into view"));
        let related = report.details[0]
            .fields
            .iter()
            .find(|(name, _)| *name == "related")
            .map(|(_, value)| value.as_str());
        assert_eq!(
            related,
            Some("ACR-7.02 Jailbreak Regression Suite; ACR-7.20 (not yet defined)")
        );
    }

    #[test]
    fn unknown_facet_value_matches_nothing() {
        let report = run(&["controls", "--level", "L4"]);
        assert!(report.groups.is_empty());
        assert_eq!(report.summary, "Showing 0 of 0 controls");
    }

    #[test]
    fn registry_lists_revocation_history() {
        let report = run(&["registry", "--expand", "ARA-2025-00089"]);
        assert_eq!(ids(&report).len(), 6);
        let history = report.details[0]
            .fields
            .iter()
            .filter(|(name, _)| *name == "history")
            .count();
        assert_eq!(history, 2);
    }
}
