pub mod debounce;
pub mod pipeline;

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;

use crate::directory::{DirectorySource, FetchError, FetchRequest, Record, DEFAULT_SEED};
use crate::filter::FilterScope;
use crate::window::PageSize;

use debounce::{Debouncer, DEFAULT_QUIESCENCE};
use pipeline::{Change, State};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub fn parse_page_size(value: u32) -> Result<PageSize, EngineError> {
    PageSize::parse(value).ok_or_else(|| EngineError::InvalidConfiguration {
        message: format!("page size {value} is not one of 10, 20, 30, 50, 100"),
    })
}

pub fn parse_scope(value: &str) -> Result<FilterScope, EngineError> {
    FilterScope::parse(value).ok_or_else(|| EngineError::InvalidConfiguration {
        message: format!(
            "unknown filter scope '{}', expected all, name, email, phone or location",
            value.trim()
        ),
    })
}

#[derive(Clone, Debug)]
pub struct Options {
    pub seed: String,
    pub page_size: PageSize,
    pub scope: FilterScope,
    pub debounce: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            page_size: PageSize::default(),
            scope: FilterScope::default(),
            debounce: DEFAULT_QUIESCENCE,
        }
    }
}

/// What the presentation layer needs to draw one screen.
#[derive(Clone, Debug, Serialize)]
pub struct Page<'a> {
    pub rows: &'a [Record],
    pub start: usize,
    pub end: usize,
    pub total: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub can_retreat: bool,
    pub can_advance: bool,
    pub scope: FilterScope,
    pub term: &'a str,
}

/// The user list controller. Owns the engine state and is the only way
/// to change it.
pub struct UserList<S> {
    source: S,
    seed: String,
    state: State,
    typed_term: String,
    debouncer: Debouncer<String>,
    evaluations: u64,
}

impl<S: DirectorySource> UserList<S> {
    pub fn new(source: S, options: Options) -> Self {
        Self {
            source,
            seed: options.seed,
            state: State::new(options.page_size, options.scope),
            typed_term: String::new(),
            debouncer: Debouncer::new(options.debounce),
            evaluations: 0,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn typed_term(&self) -> &str {
        &self.typed_term
    }

    /// Number of times the filter has been evaluated since construction.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn page(&self) -> Page<'_> {
        let state = &self.state;
        Page {
            rows: state.rows(),
            start: state.window.start,
            end: state.window.end,
            total: state.view.len(),
            current_page: state.current_page,
            page_size: state.page_size.get(),
            can_retreat: state.can_retreat(),
            can_advance: state.can_advance(),
            scope: state.scope,
            term: &state.term,
        }
    }

    /// Fetches a batch sized to the current page size. Returns whether the
    /// batch replaced the source set.
    pub async fn load(&mut self) -> bool {
        let request = FetchRequest {
            count: self.state.page_size.get(),
            seed: self.seed.clone(),
        };
        let outcome = self.source.fetch(&request).await;
        self.apply_fetch(outcome)
    }

    /// Applies a completed fetch. Failures are logged and leave every part
    /// of the state untouched. Completions are applied in arrival order, so
    /// the last one to arrive wins.
    pub fn apply_fetch(&mut self, outcome: Result<Vec<Record>, FetchError>) -> bool {
        match outcome {
            Ok(records) => {
                tracing::debug!(count = records.len(), "source set replaced");
                self.apply(Change::SourceLoaded(records));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch users, keeping previous list");
                false
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.set_search_term_at(term, Instant::now());
    }

    /// Records a keystroke. Evaluation is deferred until the term has been
    /// left alone for the quiescence interval.
    pub fn set_search_term_at(&mut self, term: impl Into<String>, now: Instant) {
        self.typed_term = term.into();
        self.debouncer.schedule(self.typed_term.clone(), now);
    }

    /// Evaluates the typed term right away, dropping any pending evaluation.
    pub fn submit_search(&mut self) {
        self.debouncer.cancel();
        self.evaluate(self.typed_term.clone(), self.state.scope);
    }

    /// Changes the searched fields. Takes effect immediately with whatever
    /// has been typed so far, superseding a pending evaluation.
    pub fn set_filter_scope(&mut self, scope: FilterScope) {
        self.debouncer.cancel();
        self.evaluate(self.typed_term.clone(), scope);
    }

    /// Switches page size. The window is reset before the new batch is
    /// requested so it never refers to the old size while the fetch runs.
    pub async fn set_page_size(&mut self, value: u32) -> Result<(), EngineError> {
        let page_size = parse_page_size(value)?;
        self.apply(Change::PageSize(page_size));
        self.load().await;
        Ok(())
    }

    pub fn advance(&mut self) {
        self.apply(Change::Advance);
    }

    pub fn retreat(&mut self) {
        self.apply(Change::Retreat);
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Runs the pending evaluation if it is due at `now`.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.debouncer.take_due(now) {
            Some(term) => {
                self.evaluate(term, self.state.scope);
                true
            }
            None => false,
        }
    }

    /// Waits out the pending evaluation, if any, and runs it.
    pub async fn settle(&mut self) -> bool {
        let Some(deadline) = self.debouncer.deadline() else {
            return false;
        };
        tokio::time::sleep_until(deadline).await;
        self.poll_debounce(Instant::now())
    }

    fn evaluate(&mut self, term: String, scope: FilterScope) {
        self.evaluations += 1;
        self.apply(Change::Predicate { term, scope });
        tracing::debug!(
            term = %self.state.term,
            scope = %self.state.scope,
            matches = self.state.view.len(),
            "filter evaluated"
        );
    }

    fn apply(&mut self, change: Change) {
        let state = std::mem::take(&mut self.state);
        self.state = pipeline::reduce(state, change);
    }
}
