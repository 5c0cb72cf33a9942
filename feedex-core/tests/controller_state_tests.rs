//! List controller state machine tests
//!
//! These tests validate the in-flight guard, terminal exhaustion, duplicate
//! suppression, generation-based discard of stale responses, and the
//! reset/debounce lifecycle — all through the synchronous controller.

use feedex_core::controller::{
    Completion, ControllerSettings, ListController,
};
use feedex_core::error::FetchError;
use feedex_core::state::{CursorPolicy, ExhaustReason, ListLoadState};
use feedex_core::testing::{RecordingSink, SinkEvent};
use feedex_core::NoticeLevel;
use feedex_model::{FeedPage, ItemKey, PageCursor};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TestItem {
    id: u64,
}

fn item(id: u64) -> TestItem {
    TestItem { id }
}

fn page(ids: &[u64], next_page: Option<u64>) -> FeedPage<TestItem> {
    FeedPage {
        items: ids.iter().copied().map(item).collect(),
        next_page: next_page.map(PageCursor::new),
    }
}

fn controller() -> ListController<TestItem, RecordingSink<TestItem>> {
    ListController::new(
        ControllerSettings::default(),
        |item: &TestItem| ItemKey::new(item.id.to_string()),
        RecordingSink::new(),
    )
}

fn controller_with(
    settings: ControllerSettings,
) -> ListController<TestItem, RecordingSink<TestItem>> {
    ListController::new(
        settings,
        |item: &TestItem| ItemKey::new(item.id.to_string()),
        RecordingSink::new(),
    )
}

#[test]
fn begin_load_transitions_to_fetching_and_shows_loading() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().expect("idle controller should load");
    assert_eq!(ticket.cursor, PageCursor::FIRST);
    assert_eq!(ticket.query, "");
    assert!(ctrl.state().load_state.is_fetching());
    assert_eq!(ctrl.sink().events(), &[SinkEvent::LoadingShown]);
}

#[test]
fn at_most_one_load_in_flight() {
    let mut ctrl = controller();

    let first = ctrl.begin_load();
    assert!(first.is_some());

    // Every further trigger while the fetch is unresolved is a no-op.
    assert!(ctrl.begin_load().is_none());
    assert!(ctrl.on_scroll_proximity(0.0).is_none());
    assert!(ctrl.begin_load().is_none());
}

#[test]
fn success_with_continuation_returns_to_idle() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().unwrap();
    let completion = ctrl.complete_load(&ticket, Ok(page(&[1, 2], Some(2))));

    assert_eq!(completion, Completion::Appended(2));
    assert_eq!(ctrl.state().load_state, ListLoadState::Idle);
    assert_eq!(ctrl.state().cursor, PageCursor::new(2));
    assert_eq!(ctrl.sink().appended(), &[item(1), item(2)]);
    assert_eq!(ctrl.sink().loading_depth(), 0);
}

#[test]
fn loading_indicator_brackets_the_render() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[1], Some(2))));

    assert_eq!(
        ctrl.sink().events(),
        &[
            SinkEvent::LoadingShown,
            SinkEvent::Appended,
            SinkEvent::LoadingHidden,
        ]
    );
}

#[test]
fn empty_page_exhausts_with_info_notice() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().unwrap();
    let completion = ctrl.complete_load(&ticket, Ok(page(&[], None)));

    assert_eq!(completion, Completion::EndOfFeed);
    match &ctrl.state().load_state {
        ListLoadState::Exhausted { reason } => {
            assert_eq!(reason, &ExhaustReason::EndOfFeed);
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
    assert_eq!(
        ctrl.sink().notices(),
        vec![("No more items to load".to_string(), NoticeLevel::Info)]
    );
    assert_eq!(ctrl.sink().loading_depth(), 0);
}

#[test]
fn exhaustion_is_idempotent_until_reset() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[], None)));

    // Repeated triggers while exhausted never produce a ticket.
    assert!(ctrl.begin_load().is_none());
    assert!(ctrl.on_scroll_proximity(0.0).is_none());
    assert!(ctrl.begin_load().is_none());

    ctrl.reset("");
    assert!(ctrl.begin_load().is_some());
}

#[test]
fn transport_failure_fails_closed_and_preserves_rendered_items() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[1, 2], Some(2))));

    let ticket = ctrl.begin_load().unwrap();
    let completion = ctrl
        .complete_load(&ticket, Err(FetchError::Status { status: 502 }));

    assert_eq!(completion, Completion::Failed);
    match &ctrl.state().load_state {
        ListLoadState::Exhausted {
            reason: ExhaustReason::Failed(message),
        } => {
            assert!(message.contains("502"), "reason should carry the cause");
        }
        other => panic!("expected Exhausted(Failed), got {other:?}"),
    }

    // Already-rendered items stay untouched.
    assert_eq!(ctrl.sink().appended(), &[item(1), item(2)]);

    let notices = ctrl.sink().notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].1, NoticeLevel::Error);

    // No automatic retry: still rejected until a reset.
    assert!(ctrl.begin_load().is_none());
}

#[test]
fn duplicates_across_pages_render_once() {
    let mut ctrl = controller();

    // Page 1: items 1 and 2, explicit continuation to page 2.
    let ticket = ctrl.begin_load().unwrap();
    let completion = ctrl.complete_load(&ticket, Ok(page(&[1, 2], Some(2))));
    assert_eq!(completion, Completion::Appended(2));
    assert_eq!(ctrl.state().cursor, PageCursor::new(2));
    assert_eq!(ctrl.state().load_state, ListLoadState::Idle);

    // Page 2 overlaps with item 2 and carries no continuation.
    let ticket = ctrl.begin_load().unwrap();
    assert_eq!(ticket.cursor, PageCursor::new(2));
    let completion = ctrl.complete_load(&ticket, Ok(page(&[2, 3], None)));
    assert_eq!(completion, Completion::Appended(1));

    assert_eq!(ctrl.sink().appended(), &[item(1), item(2), item(3)]);
    assert!(ctrl.state().load_state.is_exhausted());
}

#[test]
fn legacy_increment_policy_bumps_cursor_without_continuation() {
    let mut ctrl = controller_with(ControllerSettings {
        cursor_policy: CursorPolicy::LegacyIncrement,
        ..ControllerSettings::default()
    });

    let ticket = ctrl.begin_load().unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[1], None)));

    // The page-counter shim keeps the feed live.
    assert_eq!(ctrl.state().load_state, ListLoadState::Idle);
    assert_eq!(ctrl.state().cursor, PageCursor::new(2));

    // Only an empty page ends a legacy feed.
    let ticket = ctrl.begin_load().unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[], None)));
    assert!(ctrl.state().load_state.is_exhausted());
}

#[test]
fn stale_completion_is_discarded_entirely() {
    let mut ctrl = controller();
    ctrl.reset("x");

    let ticket = ctrl.begin_load().unwrap();
    assert_eq!(ticket.query, "x");

    // The user searches again before the fetch resolves.
    ctrl.reset("y");
    assert_eq!(ctrl.state().query, "y");

    // The orphaned fetch resolves successfully — and must change nothing.
    let completion = ctrl.complete_load(&ticket, Ok(page(&[1, 2], Some(2))));
    assert_eq!(completion, Completion::Stale);

    assert_eq!(ctrl.sink().appended(), &[] as &[TestItem]);
    assert_eq!(ctrl.state().load_state, ListLoadState::Idle);
    assert_eq!(ctrl.state().cursor, PageCursor::FIRST);
    assert_eq!(ctrl.state().query, "y");
    // reset already hid the loader; the stale path must not hide it again.
    assert_eq!(ctrl.sink().loading_depth(), 0);

    // The new epoch fetches normally.
    let ticket = ctrl.begin_load().unwrap();
    assert_eq!(ticket.query, "y");
    let completion = ctrl.complete_load(&ticket, Ok(page(&[7], Some(2))));
    assert_eq!(completion, Completion::Appended(1));
    assert_eq!(ctrl.sink().appended(), &[item(7)]);
}

#[test]
fn reset_clears_query_cursor_and_seen_set() {
    let mut ctrl = controller();

    let ticket = ctrl.begin_load().unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[1], Some(2))));

    ctrl.reset("tesla");
    assert_eq!(ctrl.state().query, "tesla");
    assert_eq!(ctrl.state().cursor, PageCursor::FIRST);
    assert_eq!(ctrl.sink().clear_count(), 1);
    assert_eq!(ctrl.sink().appended(), &[] as &[TestItem]);

    // Item 1 is no longer "seen" after the reset.
    let ticket = ctrl.begin_load().unwrap();
    let completion = ctrl.complete_load(&ticket, Ok(page(&[1], Some(2))));
    assert_eq!(completion, Completion::Appended(1));
}

#[test]
fn reset_with_empty_first_response_shows_empty_feed() {
    let mut ctrl = controller();

    ctrl.reset("tesla");
    let ticket = ctrl.begin_load().unwrap();
    assert_eq!(ticket.query, "tesla");

    ctrl.complete_load(&ticket, Ok(page(&[], None)));

    assert_eq!(ctrl.sink().appended(), &[] as &[TestItem]);
    assert!(ctrl.state().load_state.is_exhausted());
    assert_eq!(
        ctrl.sink().notices(),
        vec![("No more items to load".to_string(), NoticeLevel::Info)]
    );
}

#[test]
fn scroll_proximity_respects_the_threshold() {
    let mut ctrl = controller();

    // Far from the bottom: no load, no sink traffic.
    assert!(ctrl.on_scroll_proximity(250.0).is_none());
    assert_eq!(ctrl.state().load_state, ListLoadState::Idle);
    assert!(ctrl.sink().events().is_empty());

    // At the threshold boundary the load fires.
    let ticket = ctrl.on_scroll_proximity(100.0);
    assert!(ticket.is_some());
}

#[test]
fn debounce_only_newest_ticket_fires() {
    let mut ctrl = controller();

    let first = ctrl.note_query_change("a");
    let second = ctrl.note_query_change("ab");
    let third = ctrl.note_query_change("abc");

    // Superseded timers are no-ops with no side effects.
    assert!(ctrl.debounce_elapsed(first).is_none());
    assert!(ctrl.debounce_elapsed(second).is_none());
    assert_eq!(ctrl.sink().clear_count(), 0);

    let ticket = ctrl.debounce_elapsed(third).expect("newest ticket fires");
    assert_eq!(ticket.query, "abc");
    assert_eq!(ticket.cursor, PageCursor::FIRST);
    assert_eq!(ctrl.state().query, "abc");
    assert_eq!(ctrl.sink().clear_count(), 1);
}

#[test]
fn submit_query_supersedes_pending_debounce() {
    let mut ctrl = controller();

    let pending = ctrl.note_query_change("te");
    let ticket = ctrl.submit_query("tesla").expect("submission loads");
    assert_eq!(ticket.query, "tesla");

    // The armed timer fires later and must do nothing.
    assert!(ctrl.debounce_elapsed(pending).is_none());
    assert_eq!(ctrl.state().query, "tesla");
    assert!(ctrl.state().load_state.is_fetching());
}

#[test]
fn refresh_refetches_from_page_one_under_same_query() {
    let mut ctrl = controller();

    let ticket = ctrl.submit_query("rust").unwrap();
    ctrl.complete_load(&ticket, Ok(page(&[1, 2], Some(2))));

    let ticket = ctrl.refresh().expect("refresh loads");
    assert_eq!(ticket.query, "rust");
    assert_eq!(ticket.cursor, PageCursor::FIRST);

    // The seen set was cleared, so the same items render again.
    let completion = ctrl.complete_load(&ticket, Ok(page(&[1, 2], Some(2))));
    assert_eq!(completion, Completion::Appended(2));
    assert_eq!(ctrl.sink().appended(), &[item(1), item(2)]);
}

#[test]
fn seed_suppresses_server_rendered_duplicates() {
    let mut ctrl = controller();

    // The view bootstraps with items 1 and 2 already on screen.
    ctrl.seed([item(1), item(2)].iter());
    assert_eq!(ctrl.sink().appended(), &[] as &[TestItem]);

    let ticket = ctrl.begin_load().unwrap();
    let completion = ctrl.complete_load(&ticket, Ok(page(&[2, 3], Some(2))));

    assert_eq!(completion, Completion::Appended(1));
    assert_eq!(ctrl.sink().appended(), &[item(3)]);
}
