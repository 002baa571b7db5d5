use crate::directory::Record;
use crate::filter::{self, FilterScope};
use crate::window::{DisplayWindow, PageSize};

/// Everything the engine knows at one point in time.
///
/// `view` is always `filter::evaluate(&source, &term, scope)` and `window`
/// always satisfies the [`DisplayWindow`] bounds for `view.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub source: Vec<Record>,
    pub view: Vec<Record>,
    /// Term the current view was evaluated with, not what is being typed.
    pub term: String,
    pub scope: FilterScope,
    pub page_size: PageSize,
    pub window: DisplayWindow,
    pub current_page: usize,
}

impl State {
    pub fn new(page_size: PageSize, scope: FilterScope) -> Self {
        Self {
            source: Vec::new(),
            view: Vec::new(),
            term: String::new(),
            scope,
            page_size,
            window: DisplayWindow::first(page_size, 0),
            current_page: 1,
        }
    }

    pub fn rows(&self) -> &[Record] {
        self.window.slice(&self.view)
    }

    pub fn can_advance(&self) -> bool {
        self.window.can_advance(self.view.len())
    }

    pub fn can_retreat(&self) -> bool {
        self.window.can_retreat()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(PageSize::default(), FilterScope::default())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// A fetch completed. The new batch is shown unfiltered.
    SourceLoaded(Vec<Record>),
    Predicate { term: String, scope: FilterScope },
    PageSize(PageSize),
    Advance,
    Retreat,
}

/// Derives the next state from the current one. Every mutation of the
/// engine goes through here.
pub fn reduce(state: State, change: Change) -> State {
    match change {
        Change::SourceLoaded(records) => {
            let view = records.clone();
            State {
                source: records,
                view,
                term: String::new(),
                ..state
            }
            .first_page()
        }
        Change::Predicate { term, scope } => {
            let view = filter::evaluate(&state.source, &term, scope);
            State {
                view,
                term,
                scope,
                ..state
            }
            .first_page()
        }
        Change::PageSize(page_size) => State { page_size, ..state }.first_page(),
        Change::Advance => {
            let window = state.window.advance(state.page_size, state.view.len());
            state.moved_to(window)
        }
        Change::Retreat => {
            let window = state.window.retreat(state.page_size, state.view.len());
            state.moved_to(window)
        }
    }
}

impl State {
    fn first_page(self) -> Self {
        let window = DisplayWindow::first(self.page_size, self.view.len());
        Self {
            window,
            current_page: 1,
            ..self
        }
    }

    fn moved_to(self, window: DisplayWindow) -> Self {
        if window == self.window {
            return self;
        }
        let current_page = window.page_number(self.page_size);
        Self {
            window,
            current_page,
            ..self
        }
    }
}
