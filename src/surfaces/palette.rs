use crate::corpus::{Record, RecordKind};
use crate::search::{
    Engine, EngineTuning, IdleBehavior, NoFacets, PALETTE_PRECEDENCE, Query, ResultView,
    SearchableRecord, assemble,
};

/// Keys the palette reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Whether the palette overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteState {
    #[default]
    Closed,
    Open,
}

/// Observable effect of a palette event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// The event had no effect in the current state.
    Ignored,
    Opened,
    Closed,
    /// The highlighted row is now at this index.
    Selected(usize),
    /// A result was committed; the router should navigate to this URL.
    Navigate(String),
}

impl PaletteOutcome {
    /// URL to hand to the router, if the event committed a result.
    #[must_use]
    pub fn navigation(&self) -> Option<&str> {
        match self {
            PaletteOutcome::Navigate(url) => Some(url),
            _ => None,
        }
    }
}

/// Command-palette overlay searching every record kind plus the static pages.
///
/// Before anything is typed it previews the first few static pages; once a
/// query is present it shows up to the result limit across all kinds. Every
/// mutation recomputes the view and re-clamps the selection before returning.
#[derive(Debug, Clone)]
pub struct CommandPalette<'c> {
    engine: &'c Engine<SearchableRecord>,
    tuning: EngineTuning,
    state: PaletteState,
    query: Query,
    selected: usize,
    view: ResultView,
}

impl<'c> CommandPalette<'c> {
    #[must_use]
    pub fn new(engine: &'c Engine<SearchableRecord>) -> Self {
        Self::with_tuning(engine, EngineTuning::default())
    }

    #[must_use]
    pub fn with_tuning(engine: &'c Engine<SearchableRecord>, tuning: EngineTuning) -> Self {
        let mut palette = Self {
            engine,
            tuning,
            state: PaletteState::Closed,
            query: Query::default(),
            selected: 0,
            view: ResultView::default(),
        };
        palette.recompute();
        palette
    }

    #[must_use]
    pub fn state(&self) -> PaletteState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == PaletteState::Open
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
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

    #[must_use]
    pub fn selected_record(&self) -> Option<&'c SearchableRecord> {
        let engine = self.engine;
        self.view
            .nth(self.selected)
            .and_then(|index| engine.record(index))
    }

    /// Show the overlay with a fresh query, selection and preview.
    pub fn open(&mut self) -> PaletteOutcome {
        if self.is_open() {
            return PaletteOutcome::Ignored;
        }
        self.state = PaletteState::Open;
        self.query = Query::default();
        self.selected = 0;
        self.recompute();
        log::debug!("palette opened");
        PaletteOutcome::Opened
    }

    pub fn close(&mut self) -> PaletteOutcome {
        if !self.is_open() {
            return PaletteOutcome::Ignored;
        }
        self.state = PaletteState::Closed;
        log::debug!("palette closed");
        PaletteOutcome::Closed
    }

    /// Global hotkey or external toggle.
    pub fn toggle(&mut self) -> PaletteOutcome {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    pub fn backdrop_click(&mut self) -> PaletteOutcome {
        self.close()
    }

    /// Replace the query text. Ignored while the palette is closed.
    pub fn set_query(&mut self, text: impl Into<String>) -> PaletteOutcome {
        if !self.is_open() {
            return PaletteOutcome::Ignored;
        }
        self.query = Query::new(text);
        self.recompute();
        PaletteOutcome::Selected(self.selected)
    }

    pub fn handle_key(&mut self, key: PaletteKey) -> PaletteOutcome {
        if !self.is_open() {
            return PaletteOutcome::Ignored;
        }
        log::trace!("palette key {key:?} at {}", self.selected);
        match key {
            PaletteKey::Down => {
                let last = self.view.shown().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
                PaletteOutcome::Selected(self.selected)
            }
            PaletteKey::Up => {
                self.selected = self.selected.saturating_sub(1);
                PaletteOutcome::Selected(self.selected)
            }
            PaletteKey::Enter => self.commit(),
            PaletteKey::Escape => self.close(),
        }
    }

    fn commit(&mut self) -> PaletteOutcome {
        let Some(record) = self.selected_record() else {
            return PaletteOutcome::Ignored;
        };
        let url = record.url();
        self.close();
        log::debug!("palette committed {url}");
        PaletteOutcome::Navigate(url)
    }

    fn recompute(&mut self) {
        let matches = if self.query.is_blank() {
            self.preview()
        } else {
            self.engine
                .filter(&self.query, &NoFacets, IdleBehavior::Nothing)
        };
        self.view = assemble(
            self.engine,
            &matches,
            PALETTE_PRECEDENCE,
            Some(self.tuning.palette_result_limit),
        );
        if self.selected >= self.view.shown() {
            self.selected = 0;
        }
    }

    /// First static pages in declaration order, independent of corpus size.
    fn preview(&self) -> Vec<usize> {
        (0..self.engine.len())
            .filter(|index| {
                self.engine
                    .record(*index)
                    .is_some_and(|record| record.kind() == RecordKind::StaticPage)
            })
            .take(self.tuning.palette_preview_len)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Fixtures, STATIC_PAGES};
    use crate::search::Indexer;

    fn engine() -> Engine<SearchableRecord> {
        let fixtures = Fixtures::builtin().expect("builtin");
        Engine::new(
            Indexer::new(&fixtures)
                .with_static_pages(STATIC_PAGES)
                .build(),
        )
    }

    fn titles(palette: &CommandPalette<'_>) -> Vec<String> {
        palette
            .results()
            .into_iter()
            .map(|record| record.title().to_string())
            .collect()
    }

    #[test]
    fn opening_shows_static_page_preview() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        assert_eq!(palette.open(), PaletteOutcome::Opened);
        let expected: Vec<String> = STATIC_PAGES[..6]
            .iter()
            .map(|page| page.title.to_string())
            .collect();
        assert_eq!(titles(&palette), expected);
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn reopening_resets_query_and_selection() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        palette.set_query("adversarial");
        palette.handle_key(PaletteKey::Down);
        palette.handle_key(PaletteKey::Escape);
        assert!(!palette.is_open());

        palette.toggle();
        assert!(palette.query().is_blank());
        assert_eq!(palette.selected_index(), 0);
        assert_eq!(palette.view().shown(), 6);
    }

    #[test]
    fn arrows_clamp_without_wrapping() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        assert_eq!(palette.handle_key(PaletteKey::Up), PaletteOutcome::Selected(0));
        for _ in 0..20 {
            palette.handle_key(PaletteKey::Down);
        }
        assert_eq!(palette.selected_index(), 5);
    }

    #[test]
    fn shrinking_results_resets_out_of_range_selection() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        palette.set_query("adversarial");
        for _ in 0..5 {
            palette.handle_key(PaletteKey::Down);
        }
        assert_eq!(palette.selected_index(), 5);

        palette.set_query("red team");
        assert!(palette.view().shown() <= 5);
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn in_range_selection_survives_recompute() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        palette.set_query("adversarial");
        palette.handle_key(PaletteKey::Down);
        palette.set_query("adversarial r");
        assert!(palette.view().shown() > 1);
        assert_eq!(palette.selected_index(), 1);
    }

    #[test]
    fn results_are_capped_after_grouping() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        palette.set_query("a");
        assert_eq!(palette.view().shown(), 12);
        assert!(palette.view().total() > 12);
        assert_eq!(palette.results()[0].kind(), RecordKind::Domain);
    }

    #[test]
    fn enter_commits_and_closes() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        palette.set_query("Meridian");
        let outcome = palette.handle_key(PaletteKey::Enter);
        assert_eq!(outcome.navigation(), Some("/registry/ARA-2026-00142"));
        assert_eq!(palette.state(), PaletteState::Closed);
    }

    #[test]
    fn enter_without_results_does_nothing() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        palette.set_query("zzzz-not-present");
        assert_eq!(palette.handle_key(PaletteKey::Enter), PaletteOutcome::Ignored);
        assert!(palette.is_open());
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn closed_palette_ignores_input() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        assert_eq!(palette.handle_key(PaletteKey::Enter), PaletteOutcome::Ignored);
        assert_eq!(palette.set_query("x"), PaletteOutcome::Ignored);
        assert_eq!(palette.close(), PaletteOutcome::Ignored);
        assert_eq!(palette.backdrop_click(), PaletteOutcome::Ignored);
    }

    #[test]
    fn backdrop_click_closes() {
        let engine = engine();
        let mut palette = CommandPalette::new(&engine);
        palette.open();
        assert_eq!(palette.backdrop_click(), PaletteOutcome::Closed);
        assert!(!palette.is_open());
    }
}
