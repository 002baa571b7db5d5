use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::Instant;

use crate::directory::{DirectorySource, FetchError, FetchRequest, Record};
use crate::engine::{EngineError, Options, UserList};
use crate::filter::FilterScope;
use crate::window::{DisplayWindow, PageSize};

fn users(n: usize) -> Vec<Record> {
    (1..=n)
        .map(|i| {
            Record::new(
                &format!("U{i}"),
                "",
                &format!("u{i}@x.com"),
                "555-0000",
                "Springfield",
                "Freedonia",
            )
        })
        .collect()
}

fn names(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.full_name.clone()).collect()
}

#[derive(Clone, Default)]
struct FakeDirectory {
    fail: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl FakeDirectory {
    fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl DirectorySource for FakeDirectory {
    fn fetch<'a>(
        &'a self,
        request: &'a FetchRequest,
    ) -> BoxFuture<'a, Result<Vec<Record>, FetchError>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail.load(Ordering::SeqCst) {
                return Err(FetchError::Malformed {
                    message: "simulated network error".to_string(),
                });
            }
            Ok(users(request.count))
        })
    }
}

fn list_with(fake: &FakeDirectory) -> UserList<FakeDirectory> {
    UserList::new(fake.clone(), Options::default())
}

#[tokio::test(start_paused = true)]
async fn load_requests_page_size_records_with_fixed_seed() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    assert!(list.load().await);

    assert_eq!(
        fake.requests(),
        vec![FetchRequest {
            count: 10,
            seed: "foobar".to_string(),
        }]
    );
    let state = list.state();
    assert_eq!(state.source.len(), 10);
    assert_eq!(state.view, state.source);
    assert_eq!(state.window, DisplayWindow { start: 1, end: 10 });
}

#[tokio::test(start_paused = true)]
async fn u1_search_over_25_users_clamps_window_to_page() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    assert!(list.apply_fetch(Ok(users(25))));

    list.set_search_term("u1");
    assert!(list.settle().await);

    let expected: Vec<String> = std::iter::once(1)
        .chain(10..=19)
        .map(|i| format!("U{i}"))
        .collect();
    assert_eq!(names(&list.state().view), expected);

    let page = list.page();
    assert_eq!((page.start, page.end, page.total), (1, 10, 11));
    assert_eq!(page.rows.len(), 10);
    assert!(page.can_advance);
    assert!(!page.can_retreat);
    assert_eq!(page.term, "u1");

    list.advance();
    let page = list.page();
    assert_eq!((page.start, page.end), (11, 11));
    assert_eq!(names(page.rows), vec!["U19".to_string()]);
    assert_eq!(page.current_page, 2);
    assert!(!page.can_advance);

    list.advance();
    assert_eq!(list.state().window, DisplayWindow { start: 11, end: 11 });
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_collapses_into_one_evaluation_with_final_term() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    let before = list.evaluations();

    for term in ["u", "u2", "u", "u1"] {
        list.set_search_term(term);
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(!list.poll_debounce(Instant::now()));
    }
    assert_eq!(list.evaluations(), before);
    assert_eq!(list.state().term, "");

    tokio::time::advance(Duration::from_millis(350)).await;
    assert!(!list.poll_debounce(Instant::now()));

    assert!(list.settle().await);
    assert_eq!(list.evaluations(), before + 1);
    assert_eq!(list.state().term, "u1");
    assert_eq!(list.state().view.len(), 11);

    assert!(list.debounce_deadline().is_none());
    assert!(!list.settle().await);
    assert_eq!(list.evaluations(), before + 1);
}

#[tokio::test(start_paused = true)]
async fn submit_runs_now_and_cancels_pending_evaluation() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    let before = list.evaluations();

    list.set_search_term("u2");
    list.submit_search();
    assert_eq!(list.evaluations(), before + 1);
    assert_eq!(names(&list.state().view), vec!["U2", "U20", "U21", "U22", "U23", "U24", "U25"]);
    assert!(list.debounce_deadline().is_none());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(!list.poll_debounce(Instant::now()));
    assert_eq!(list.evaluations(), before + 1);
}

#[tokio::test(start_paused = true)]
async fn scope_change_evaluates_immediately() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));

    list.set_search_term("springfield");
    list.set_filter_scope(FilterScope::Email);
    assert!(list.state().view.is_empty());
    assert_eq!(list.state().scope, FilterScope::Email);
    assert!(list.debounce_deadline().is_none());
    assert!(list.page().rows.is_empty());
    assert!(!list.page().can_advance);

    list.set_filter_scope(FilterScope::Location);
    assert_eq!(list.state().view.len(), 25);
    assert_eq!(list.state().window, DisplayWindow { start: 1, end: 10 });
}

#[tokio::test(start_paused = true)]
async fn page_size_change_resets_window_and_refetches() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    list.advance();
    list.advance();
    assert_eq!(list.state().current_page, 3);

    list.set_page_size(20).await.unwrap();

    let last = fake.requests().pop().unwrap();
    assert_eq!(last.count, 20);
    let state = list.state();
    assert_eq!(state.page_size, PageSize::Twenty);
    assert_eq!(state.source.len(), 20);
    assert_eq!(state.window, DisplayWindow { start: 1, end: 20 });
    assert_eq!(state.current_page, 1);
}

#[tokio::test(start_paused = true)]
async fn page_size_reset_does_not_wait_for_the_fetch() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    list.advance();
    fake.set_failing(true);

    list.set_page_size(20).await.unwrap();

    let state = list.state();
    assert_eq!(state.source.len(), 25);
    assert_eq!(state.window, DisplayWindow { start: 1, end: 20 });
    assert_eq!(state.current_page, 1);
}

#[tokio::test(start_paused = true)]
async fn invalid_page_size_is_rejected_without_side_effects() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    list.advance();
    let snapshot = list.state().clone();

    let err = list.set_page_size(15).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    assert_eq!(list.state(), &snapshot);
    assert!(fake.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_previous_state_exactly() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    list.set_search_term("u");
    list.submit_search();
    list.advance();
    let snapshot = list.state().clone();

    fake.set_failing(true);
    assert!(!list.load().await);
    assert_eq!(list.state(), &snapshot);
    assert_eq!(list.page().start, 11);
}

#[tokio::test(start_paused = true)]
async fn new_batch_is_unfiltered_but_typed_term_survives() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(25)));
    list.set_search_term("u1");
    list.submit_search();
    assert_eq!(list.state().view.len(), 11);

    assert!(list.load().await);
    assert_eq!(list.state().view.len(), 10);
    assert_eq!(list.state().term, "");
    assert_eq!(list.typed_term(), "u1");

    list.submit_search();
    assert_eq!(names(&list.state().view), vec!["U1", "U10"]);
}

#[test]
fn last_applied_batch_wins() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(50)));
    list.apply_fetch(Ok(users(20)));
    assert_eq!(list.state().source.len(), 20);
    assert_eq!(list.page().total, 20);
}

#[test]
fn retreat_on_first_page_and_advance_on_last_are_no_ops() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(users(10)));
    let first = list.state().clone();
    list.retreat();
    assert_eq!(list.state(), &first);
    list.advance();
    assert_eq!(list.state(), &first);
    assert!(!list.page().can_advance);
    assert!(!list.page().can_retreat);
}

#[test]
fn empty_directory_yields_empty_window() {
    let fake = FakeDirectory::default();
    let mut list = list_with(&fake);
    list.apply_fetch(Ok(Vec::new()));
    let page = list.page();
    assert_eq!(page.total, 0);
    assert!(page.rows.is_empty());
    assert!(!page.can_advance);
    assert!(!page.can_retreat);
    assert_eq!(crate::output::range_label(&page), "0 - 0 of 0");
}
